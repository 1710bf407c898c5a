use std::fs;
use std::path::PathBuf;

use quizflow_model::{
    DocumentKind, QuestionsDocument, ResultsDocument, SchemaError, StringsDocument,
};
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("error fetching {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "http")]
    #[error("error fetching {name}: {source}")]
    Http {
        name: String,
        #[source]
        source: reqwest::Error,
    },

    #[cfg(feature = "http")]
    #[error("cannot build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("error fetching {name}: {status}")]
    Status { name: String, status: String },
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] SchemaError),
}

/// Somewhere the three quiz documents can be read from by file name.
pub trait DocumentSource {
    fn describe(&self) -> String;

    fn fetch(&self, name: &str) -> Result<String, FetchError>;
}

#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl DocumentSource for DirectorySource {
    fn describe(&self) -> String {
        self.root.display().to_string()
    }

    fn fetch(&self, name: &str) -> Result<String, FetchError> {
        fs::read_to_string(self.root.join(name)).map_err(|source| FetchError::Io {
            name: name.to_string(),
            source,
        })
    }
}

#[cfg(feature = "http")]
#[derive(Debug, Clone)]
pub struct HttpSource {
    base_url: String,
    client: reqwest::blocking::Client,
}

#[cfg(feature = "http")]
impl HttpSource {
    pub fn new(base_url: impl Into<String>) -> Result<Self, FetchError> {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { base_url, client })
    }
}

#[cfg(feature = "http")]
impl DocumentSource for HttpSource {
    fn describe(&self) -> String {
        self.base_url.clone()
    }

    fn fetch(&self, name: &str) -> Result<String, FetchError> {
        let http_error = |source| FetchError::Http {
            name: name.to_string(),
            source,
        };
        let response = self
            .client
            .get(format!("{}{name}", self.base_url))
            .send()
            .map_err(http_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                name: name.to_string(),
                status: status.to_string(),
            });
        }
        response.text().map_err(http_error)
    }
}

/// Picks an HTTP source for `http(s)://` locations and a directory otherwise.
pub fn source_for(location: &str) -> Result<Box<dyn DocumentSource>, FetchError> {
    #[cfg(feature = "http")]
    if location.starts_with("http://") || location.starts_with("https://") {
        return Ok(Box::new(HttpSource::new(location)?));
    }
    Ok(Box::new(DirectorySource::new(location)))
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceDocuments {
    pub questions: QuestionsDocument,
    pub strings: StringsDocument,
    pub results: ResultsDocument,
}

/// Reads `questions.json`, `strings.json` and `results.json` in that order.
/// Nothing is returned unless all three arrive and parse.
pub fn fetch_documents(source: &dyn DocumentSource) -> Result<SourceDocuments, LoadError> {
    let mut texts = Vec::with_capacity(DocumentKind::ALL.len());
    for kind in DocumentKind::ALL {
        debug!(source = %source.describe(), document = %kind, "fetching document");
        texts.push(source.fetch(kind.file_name())?);
    }

    Ok(SourceDocuments {
        questions: QuestionsDocument::parse(&texts[0])?,
        strings: StringsDocument::parse(&texts[1])?,
        results: ResultsDocument::parse(&texts[2])?,
    })
}
