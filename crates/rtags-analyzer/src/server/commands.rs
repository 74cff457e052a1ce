use serde_json::Value;
use tower_lsp::{
    jsonrpc::{Error, Result},
    lsp_types::{ExecuteCommandParams, ShowDocumentParams, Url},
};
use tracing::{debug, info, warn};

use crate::{config::LogLevel, ide::lsp::location_to_lsp, progress::ReindexProgress, server::state::RtagsLanguageServer};

pub const GO_BACK_COMMAND: &str = "rtags.goBack";
pub const CLEAR_HISTORY_COMMAND: &str = "rtags.clearHistory";
pub const REINDEX_COMMAND: &str = "rtags.reindex";

pub(crate) fn supported_commands() -> Vec<String> {
    [GO_BACK_COMMAND, CLEAR_HISTORY_COMMAND, REINDEX_COMMAND].iter().map(|c| c.to_string()).collect()
}

impl RtagsLanguageServer {
    pub(crate) async fn run_command(
        &self,
        params: ExecuteCommandParams,
    ) -> Result<Option<Value>> {
        match params.command.as_str() {
            GO_BACK_COMMAND => Ok(self.go_back().await),
            CLEAR_HISTORY_COMMAND => {
                let jump_limit = self.settings_snapshot().await.navigation.jump_limit;
                self.reset_history(jump_limit);
                self.client_log(LogLevel::Debug, "jump history cleared".to_string()).await;
                Ok(None)
            },
            REINDEX_COMMAND => {
                self.reindex(&params.arguments).await;
                Ok(None)
            },
            other => Err(Error::invalid_params(format!("unknown command: {other}"))),
        }
    }

    /// Return the cursor to where the most recent jump started.
    ///
    /// An empty history leaves the editor untouched and answers `null`.
    async fn go_back(&self) -> Option<Value> {
        let Some(previous) = self.take_previous_location() else {
            debug!("go back: jump history is empty");
            return None;
        };

        let Some(target) = location_to_lsp(&previous) else {
            warn!("go back: {previous} cannot be expressed as a file URI");
            return None;
        };

        let params = ShowDocumentParams {
            uri: target.uri.clone(),
            external: Some(false),
            take_focus: Some(true),
            selection: Some(target.range),
        };
        match self.client.show_document(params).await {
            Ok(true) => {},
            Ok(false) => warn!("go back: client refused to show {}", target.uri),
            Err(error) => warn!("go back: window/showDocument failed: {error}"),
        }

        self.client_log(
            LogLevel::Debug,
            format!("went back to {previous} ({} jumps left)", self.history_len()),
        )
        .await;
        serde_json::to_value(target).ok()
    }

    /// Ask rtags to re-index one file (first argument, a URI) or the whole
    /// project, then forget the jump history.
    async fn reindex(
        &self,
        arguments: &[Value],
    ) {
        let file = arguments
            .first()
            .and_then(Value::as_str)
            .and_then(|raw| Url::parse(raw).ok())
            .and_then(|uri| uri.to_file_path().ok());
        let description = file.as_ref().map(|p| p.display().to_string()).unwrap_or_else(|| "project".to_string());

        let progress = ReindexProgress::start(&self.client, &description).await;
        let result = self.indexer.reindex(file.as_deref()).await;
        progress.finish(&result).await;

        match result {
            Ok(()) => info!("reindexed {description}"),
            Err(error) => self.report_indexer_error("reindex", &error).await,
        }

        let jump_limit = self.settings_snapshot().await.navigation.jump_limit;
        self.reset_history(jump_limit);
    }
}
