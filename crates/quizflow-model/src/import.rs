use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::graph::{Edge, Graph, Node, OptionData, QuestionData};
use crate::schema::{OptionLink, QuestionsDocument, ResultsDocument, StringsDocument};
use crate::ImportError;

/// What to do with an option whose `next` names neither a question nor a result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegrityPolicy {
    #[default]
    Reject,
    Warn,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportOptions {
    pub dangling_next: IntegrityPolicy,
}

pub fn import_graph(
    questions: &QuestionsDocument,
    strings: &StringsDocument,
    results: &ResultsDocument,
    options: &ImportOptions,
) -> Result<Graph, ImportError> {
    let mut importer = Importer::new(questions, strings, results, options)?;
    for entry in questions.questions.iter() {
        importer.add_question(entry.id.as_str(), entry.min_selections, entry.max_selections)?;
        for link in questions.options_of(&entry.id) {
            importer.add_option(&entry.id, link)?;
        }
    }

    let graph = importer.graph;
    graph.validate()?;
    debug!(
        questions = graph.questions().count(),
        options = graph.options().count(),
        edges = graph.edges.len(),
        "imported quiz graph"
    );
    Ok(graph)
}

struct Importer<'a> {
    strings: &'a StringsDocument,
    results: &'a ResultsDocument,
    options: &'a ImportOptions,
    question_ids: HashSet<&'a str>,
    seen_options: HashSet<String>,
    seen_edges: HashSet<String>,
    question_strings: HashMap<&'a str, &'a crate::schema::QuestionStrings>,
    graph: Graph,
}

impl<'a> Importer<'a> {
    fn new(
        questions: &'a QuestionsDocument,
        strings: &'a StringsDocument,
        results: &'a ResultsDocument,
        options: &'a ImportOptions,
    ) -> Result<Self, ImportError> {
        let mut question_ids = HashSet::new();
        for entry in questions.questions.iter() {
            if !question_ids.insert(entry.id.as_str()) {
                return Err(ImportError::DuplicateQuestion(entry.id.clone()));
            }
        }
        for key in questions.options.keys() {
            if !question_ids.contains(key.as_str()) {
                return Err(ImportError::UnknownQuestion(key.clone()));
            }
        }

        let question_strings = strings
            .questions
            .iter()
            .map(|entry| (entry.id.as_str(), entry))
            .collect();

        Ok(Self {
            strings,
            results,
            options,
            question_ids,
            seen_options: HashSet::new(),
            seen_edges: HashSet::new(),
            question_strings,
            graph: Graph::default(),
        })
    }

    fn add_question(
        &mut self,
        id: &str,
        min_selections: Option<u32>,
        max_selections: Option<u32>,
    ) -> Result<(), ImportError> {
        let text = self
            .question_strings
            .get(id)
            .ok_or_else(|| ImportError::MissingQuestionStrings(id.to_string()))?;
        let data = QuestionData {
            label: text.heading.clone(),
            subtitle: text.sub_head.clone(),
            button_label: text.btn.clone(),
            background_image: text.background.clone(),
            footer_fragment: text.footer_fragment.clone(),
            max_selections,
            min_selections,
            product1: None,
            product2: None,
        };
        self.graph.nodes.push(Node::question(id, data));
        Ok(())
    }

    fn add_option(&mut self, question: &str, link: &OptionLink) -> Result<(), ImportError> {
        if self.question_ids.contains(link.id.as_str()) {
            return Err(ImportError::IdConflict(link.id.clone()));
        }

        if !self.seen_options.contains(&link.id) {
            self.check_next(link)?;
            let text = self
                .strings
                .option(&link.id)
                .ok_or_else(|| ImportError::MissingOptionStrings(link.id.clone()))?;
            let data = OptionData {
                label: text.title.clone(),
                text: text.text.clone(),
                icon: text.icon.clone(),
                image: text.image.clone(),
                next: link.next.clone(),
            };
            self.graph.nodes.push(Node::option(link.id.as_str(), data));
            self.seen_options.insert(link.id.clone());
        } else {
            debug!(option = %link.id, question, "option shared between questions");
        }

        let edge = Edge::between(question, link.id.as_str());
        if self.seen_edges.insert(edge.id.clone()) {
            self.graph.edges.push(edge);
        }
        Ok(())
    }

    fn check_next(&self, link: &OptionLink) -> Result<(), ImportError> {
        let Some(next) = link.next.as_deref() else {
            return Ok(());
        };
        if self.question_ids.contains(next) || self.results.contains(next) {
            return Ok(());
        }
        match self.options.dangling_next {
            IntegrityPolicy::Reject => Err(ImportError::DanglingNext {
                option: link.id.clone(),
                next: next.to_string(),
            }),
            IntegrityPolicy::Warn => {
                warn!(option = %link.id, next, "option leads to an unknown target");
                Ok(())
            }
        }
    }
}
