use crate::schema::DocumentKind;

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("{document} is not a valid document: {source}")]
    Json {
        document: DocumentKind,
        #[source]
        source: serde_json::Error,
    },

    #[error("{document}: collection `{collection}` holds {len} entries but its limit is {limit}")]
    Overflow {
        document: DocumentKind,
        collection: String,
        len: usize,
        limit: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("duplicate node id `{0}`")]
    DuplicateNode(String),

    #[error("duplicate edge id `{0}`")]
    DuplicateEdge(String),

    #[error("edge `{edge}` references missing node `{node}`")]
    DanglingEdge { edge: String, node: String },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImportError {
    #[error("question `{0}` is listed twice in questions.json")]
    DuplicateQuestion(String),

    #[error("questions.json has an options collection for unknown question `{0}`")]
    UnknownQuestion(String),

    #[error("question `{0}` has no entry in strings.json")]
    MissingQuestionStrings(String),

    #[error("option `{0}` has no entry in strings.json")]
    MissingOptionStrings(String),

    #[error("option `{option}` leads to `{next}`, which is neither a question nor a result")]
    DanglingNext { option: String, next: String },

    #[error("id `{0}` is used both as a question and as an option")]
    IdConflict(String),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExportError {
    #[error("edge `{edge}` points at missing node `{target}`")]
    MissingTarget { edge: String, target: String },
}
