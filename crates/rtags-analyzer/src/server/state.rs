use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, PoisonError},
};

use tokio::sync::RwLock;
use tower_lsp::{
    Client,
    lsp_types::{MessageType, Position, Url},
};
use tracing::{debug, warn};

use crate::{
    config::{LogLevel, ServerSettings},
    document::DocumentStore,
    history::{Location, NavigationHistory},
    ide::lsp::location_from_lsp,
    indexer::{IndexedLocation, Indexer, IndexerError, SymbolQuery},
    rtags::RcIndexer,
    text_pos::{to_byte_position, to_utf16_position},
};

/// A request cursor in both coordinate systems: `origin` as the editor sent
/// it, `query` with the byte column rtags works in.
pub(crate) struct CursorQuery {
    pub(crate) origin: Location,
    pub(crate) query: SymbolQuery,
}

/// The rtags-analyzer backend that implements the Language Server Protocol.
pub struct RtagsLanguageServer {
    /// The LSP client handle, used to send notifications and requests back.
    pub(crate) client: Client,

    /// Thread-safe store of all open documents.
    pub(crate) document_store: Arc<DocumentStore>,

    /// Source of definitions, references and completions.
    pub(crate) indexer: Arc<dyn Indexer>,

    /// Set when `indexer` is the built-in `rc` backend, so settings changes
    /// can reach it.
    rc_indexer: Option<Arc<RcIndexer>>,

    /// Locations jumps navigated away from, for `rtags.goBack`.
    ///
    /// Held only for the duration of a push/pop/clear, never across an await.
    history: Mutex<NavigationHistory>,

    /// Runtime server settings updated from LSP configuration.
    pub(crate) settings: Arc<RwLock<ServerSettings>>,
}

impl RtagsLanguageServer {
    /// Create a server backed by the `rc` command line client.
    pub fn new(client: Client) -> Self {
        let rc_indexer = Arc::new(RcIndexer::default());
        let indexer: Arc<dyn Indexer> = rc_indexer.clone();
        Self::build(client, indexer, Some(rc_indexer))
    }

    /// Create a server backed by an arbitrary [`Indexer`].
    pub fn with_indexer(
        client: Client,
        indexer: Arc<dyn Indexer>,
    ) -> Self {
        Self::build(client, indexer, None)
    }

    fn build(
        client: Client,
        indexer: Arc<dyn Indexer>,
        rc_indexer: Option<Arc<RcIndexer>>,
    ) -> Self {
        Self {
            client,
            document_store: Arc::new(DocumentStore::new()),
            indexer,
            rc_indexer,
            history: Mutex::new(NavigationHistory::default()),
            settings: Arc::new(RwLock::new(ServerSettings::default())),
        }
    }

    pub(crate) async fn settings_snapshot(&self) -> ServerSettings {
        self.settings.read().await.clone()
    }

    pub(crate) async fn apply_settings(
        &self,
        settings: ServerSettings,
    ) {
        if let Some(rc_indexer) = &self.rc_indexer {
            rc_indexer.set_settings(settings.rtags.clone());
        }
        *self.settings.write().await = settings;
    }

    fn with_history<R>(
        &self,
        f: impl FnOnce(&mut NavigationHistory) -> R,
    ) -> R {
        let mut guard = self.history.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    /// Remember where the cursor was before a jump.
    pub(crate) fn record_jump(
        &self,
        origin: Location,
    ) {
        debug!("recording jump origin {origin}");
        self.with_history(|history| history.push(origin));
    }

    pub(crate) fn take_previous_location(&self) -> Option<Location> {
        self.with_history(NavigationHistory::pop)
    }

    /// Empty the history. A new `jump_limit` only takes effect here, so a
    /// history never changes capacity while it holds entries.
    pub(crate) fn reset_history(
        &self,
        jump_limit: usize,
    ) {
        self.with_history(|history| {
            if history.capacity() == jump_limit {
                history.clear();
            } else {
                *history = NavigationHistory::new(jump_limit);
            }
        });
    }

    pub(crate) fn history_len(&self) -> usize {
        self.with_history(|history| history.len())
    }

    /// Snapshot the request cursor together with any unsaved text of its document.
    pub(crate) async fn symbol_query(
        &self,
        uri: &Url,
        position: Position,
    ) -> Option<CursorQuery> {
        let origin = location_from_lsp(uri, position)?;
        let source = self.source_text(origin.file_path()).await;
        let rtags_position = to_byte_position(source.as_deref(), origin.position());
        let query = SymbolQuery::new(Location::new(origin.file_path(), rtags_position))
            .with_unsaved_text(self.document_store.unsaved_text(uri));
        Some(CursorQuery { origin, query })
    }

    /// Map indexer results back to editor positions. Each referenced file is
    /// read once.
    pub(crate) async fn editor_locations(
        &self,
        found: &[IndexedLocation],
    ) -> Vec<Location> {
        let mut paths: Vec<&Path> = found.iter().map(|indexed| indexed.location.file_path()).collect();
        paths.sort();
        paths.dedup();

        let texts = futures::future::join_all(paths.iter().map(|path| self.source_text(path))).await;
        let sources: HashMap<PathBuf, Option<String>> =
            paths.into_iter().map(Path::to_path_buf).zip(texts).collect();

        found
            .iter()
            .map(|indexed| {
                let location = &indexed.location;
                let source = sources.get(location.file_path()).and_then(Option::as_deref);
                Location::new(location.file_path(), to_utf16_position(source, location.position()))
            })
            .collect()
    }

    /// The editor's text for an open document, otherwise the file on disk.
    async fn source_text(
        &self,
        path: &Path,
    ) -> Option<String> {
        if let Ok(uri) = Url::from_file_path(path)
            && let Some(document) = self.document_store.get(&uri)
        {
            return Some(document.text);
        }
        tokio::fs::read_to_string(path).await.ok()
    }

    /// Forward a message to the client's log window when the configured
    /// `logging.level` allows it.
    pub(crate) async fn client_log(
        &self,
        level: LogLevel,
        message: String,
    ) {
        let configured = self.settings.read().await.logging.level;
        if configured.allows(level) {
            self.client.log_message(level.message_type(), message).await;
        }
    }

    pub(crate) async fn report_indexer_error(
        &self,
        operation: &str,
        error: &IndexerError,
    ) {
        warn!("rtags {operation} failed: {error}");
        self.client.show_message(MessageType::WARNING, format!("rtags {operation} failed: {error}")).await;
    }
}
