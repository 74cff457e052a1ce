pub mod config;
pub mod document;
pub mod history;
pub mod ide;
pub mod indexer;
mod progress;
pub mod rtags;
pub mod server;
pub mod text_pos;

pub use config::ServerSettings;
pub use history::{DEFAULT_JUMP_LIMIT, Location, NavigationHistory};
pub use ide::{IdePosition, NavigationTarget};
pub use indexer::{CandidateKind, CompletionCandidate, IndexedLocation, Indexer, IndexerError, SymbolQuery};
pub use rtags::RcIndexer;
pub use server::{CLEAR_HISTORY_COMMAND, GO_BACK_COMMAND, REINDEX_COMMAND, RtagsLanguageServer};
