pub(crate) mod commands;
pub(crate) mod handler;
pub(crate) mod state;

pub use commands::{CLEAR_HISTORY_COMMAND, GO_BACK_COMMAND, REINDEX_COMMAND};
pub use state::RtagsLanguageServer;
