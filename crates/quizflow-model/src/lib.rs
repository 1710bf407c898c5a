mod error;
mod export;
mod graph;
mod import;
mod schema;

pub use error::{ExportError, GraphError, ImportError, SchemaError};
pub use export::{export_graph, ExportedDocuments};
pub use graph::{
    edge_id, Edge, EdgeStyle, Graph, Node, NodeData, NodeKind, OptionData, Position, QuestionData,
};
pub use import::{import_graph, ImportOptions, IntegrityPolicy};
pub use schema::{
    Collection, DocumentKind, OptionLink, OptionStrings, QuestionEntry, QuestionStrings,
    QuestionsDocument, ResultsDocument, StringsDocument,
};
