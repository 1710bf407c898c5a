//! Editing session for quiz flow graphs: the authoritative graph store,
//! the connection-drag protocol that grows the graph, and loading of the
//! three source documents.

mod handle;
mod ids;
mod mutation;
mod session;
mod source;
mod store;
mod viewport;

pub use handle::{default_question, HandleKind};
pub use ids::IdGenerator;
pub use mutation::{spawn_from_handle, ConnectOutcome, DropTarget, IgnoreReason, PendingConnection};
pub use session::{EditorSession, ImportStatus, ImportTicket, SessionError, SessionOptions};
#[cfg(feature = "http")]
pub use source::HttpSource;
pub use source::{
    fetch_documents, source_for, DirectorySource, DocumentSource, FetchError, LoadError,
    SourceDocuments,
};
pub use store::{EdgeStyles, GraphCommand, GraphStore, StoreError};
pub use viewport::{CanvasFrame, FocusToggle, Project, ScreenPoint, Viewport};
