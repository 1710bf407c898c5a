use std::collections::BTreeMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::SchemaError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Questions,
    Strings,
    Results,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 3] = [
        DocumentKind::Questions,
        DocumentKind::Strings,
        DocumentKind::Results,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            DocumentKind::Questions => "questions.json",
            DocumentKind::Strings => "strings.json",
            DocumentKind::Results => "results.json",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Paginated collection wrapper shared by every list-like document section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection<T> {
    pub total: usize,
    pub offset: usize,
    pub limit: usize,
    pub data: Vec<T>,
}

impl<T> Collection<T> {
    pub fn from_entries(data: Vec<T>) -> Self {
        Self {
            total: data.len(),
            offset: 0,
            limit: data.len(),
            data,
        }
    }

    pub fn single(entry: T) -> Self {
        Self::from_entries(vec![entry])
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    fn check(&self, document: DocumentKind, collection: &str) -> Result<(), SchemaError> {
        if self.data.len() > self.limit {
            return Err(SchemaError::Overflow {
                document,
                collection: collection.to_string(),
                len: self.data.len(),
                limit: self.limit,
            });
        }
        Ok(())
    }
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self::from_entries(Vec::new())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionEntry {
    #[serde(rename = "questions")]
    pub id: String,
    #[serde(
        rename = "max-selections",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub max_selections: Option<u32>,
    #[serde(
        rename = "min-selections",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub min_selections: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionLink {
    #[serde(rename = "options")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionStrings {
    #[serde(rename = "q")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    #[serde(rename = "sub-head", default, skip_serializing_if = "Option::is_none")]
    pub sub_head: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub btn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(
        rename = "footerFragment",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub footer_fragment: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionStrings {
    #[serde(rename = "options")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// `questions.json`: the question list plus one options collection per question id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionsDocument {
    pub questions: Collection<QuestionEntry>,
    #[serde(flatten)]
    pub options: BTreeMap<String, Collection<OptionLink>>,
}

impl QuestionsDocument {
    pub fn parse(text: &str) -> Result<Self, SchemaError> {
        let document: Self = parse_json(DocumentKind::Questions, text)?;
        document
            .questions
            .check(DocumentKind::Questions, "questions")?;
        for (key, collection) in &document.options {
            collection.check(DocumentKind::Questions, key)?;
        }
        Ok(document)
    }

    pub fn to_json(&self) -> Result<String, SchemaError> {
        to_json(DocumentKind::Questions, self)
    }

    pub fn options_of(&self, question: &str) -> &[OptionLink] {
        self.options
            .get(question)
            .map(|collection| collection.data.as_slice())
            .unwrap_or(&[])
    }
}

/// `strings.json`: question display text plus a one-entry collection per option id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringsDocument {
    pub questions: Collection<QuestionStrings>,
    #[serde(flatten)]
    pub options: BTreeMap<String, Collection<OptionStrings>>,
}

impl StringsDocument {
    pub fn parse(text: &str) -> Result<Self, SchemaError> {
        let document: Self = parse_json(DocumentKind::Strings, text)?;
        document.questions.check(DocumentKind::Strings, "questions")?;
        for (key, collection) in &document.options {
            collection.check(DocumentKind::Strings, key)?;
        }
        Ok(document)
    }

    pub fn to_json(&self) -> Result<String, SchemaError> {
        to_json(DocumentKind::Strings, self)
    }

    pub fn question(&self, id: &str) -> Option<&QuestionStrings> {
        self.questions.iter().find(|entry| entry.id == id)
    }

    pub fn option(&self, id: &str) -> Option<&OptionStrings> {
        self.options
            .get(id)
            .and_then(|collection| collection.data.first())
    }
}

/// `results.json`: read on import and kept with the session; never exported.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultsDocument {
    pub sections: BTreeMap<String, Collection<serde_json::Value>>,
}

impl ResultsDocument {
    pub fn parse(text: &str) -> Result<Self, SchemaError> {
        let document: Self = parse_json(DocumentKind::Results, text)?;
        for (key, collection) in &document.sections {
            collection.check(DocumentKind::Results, key)?;
        }
        Ok(document)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.sections.contains_key(key)
    }
}

fn parse_json<T: DeserializeOwned>(document: DocumentKind, text: &str) -> Result<T, SchemaError> {
    serde_json::from_str(text).map_err(|source| SchemaError::Json { document, source })
}

fn to_json<T: Serialize>(document: DocumentKind, value: &T) -> Result<String, SchemaError> {
    serde_json::to_string_pretty(value).map_err(|source| SchemaError::Json { document, source })
}
