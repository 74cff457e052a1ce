use serde_json::Value;
use tower_lsp::{LanguageServer, jsonrpc::Result, lsp_types::*};
use tracing::{debug, info};

use crate::{
    config::{LogLevel, ServerSettings},
    ide::{
        NavigationTarget,
        lsp::{candidate_to_completion_item, location_to_lsp, navigation_target_to_lsp},
    },
    server::{commands::supported_commands, state::RtagsLanguageServer},
};

#[tower_lsp::async_trait]
impl LanguageServer for RtagsLanguageServer {
    async fn initialize(
        &self,
        params: InitializeParams,
    ) -> Result<InitializeResult> {
        info!("Initializing rtags-analyzer...");

        let initial_settings = ServerSettings::from_lsp_payload(params.initialization_options.as_ref());
        self.reset_history(initial_settings.navigation.jump_limit);
        self.apply_settings(initial_settings).await;

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Options(TextDocumentSyncOptions {
                    open_close: Some(true),
                    change: Some(TextDocumentSyncKind::FULL),
                    save: Some(TextDocumentSyncSaveOptions::Supported(true)),
                    ..Default::default()
                })),
                completion_provider: Some(CompletionOptions {
                    trigger_characters: Some(vec![".".to_string(), ">".to_string(), ":".to_string()]),
                    ..Default::default()
                }),
                definition_provider: Some(OneOf::Left(true)),
                references_provider: Some(OneOf::Left(true)),
                execute_command_provider: Some(ExecuteCommandOptions {
                    commands: supported_commands(),
                    work_done_progress_options: Default::default(),
                }),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "rtags-analyzer".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(
        &self,
        _: InitializedParams,
    ) {
        let settings = self.settings_snapshot().await;
        info!("rtags-analyzer initialized (rc: {}, jump limit: {})", settings.rtags.command, settings.navigation.jump_limit);
    }

    async fn shutdown(&self) -> Result<()> {
        info!("Shutting down rtags-analyzer");
        Ok(())
    }

    async fn did_change_configuration(
        &self,
        params: DidChangeConfigurationParams,
    ) {
        let current = self.settings_snapshot().await;
        let merged = current.merged_with_payload(&params.settings);
        if merged == current {
            return;
        }

        if merged.navigation.jump_limit != current.navigation.jump_limit {
            info!(
                "navigation.jumpLimit changed to {}; applies when the jump history is next cleared",
                merged.navigation.jump_limit
            );
        }
        self.apply_settings(merged).await;
        info!("Applied updated rtags-analyzer settings");
    }

    async fn did_open(
        &self,
        params: DidOpenTextDocumentParams,
    ) {
        let doc = params.text_document;
        debug!("did_open: {}", doc.uri);
        self.document_store.open(doc.uri, doc.text, doc.version);
    }

    async fn did_change(
        &self,
        params: DidChangeTextDocumentParams,
    ) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;
        // Full sync: the last change carries the whole document.
        if let Some(change) = params.content_changes.into_iter().last() {
            self.document_store.update(uri, change.text, version);
        }
    }

    async fn did_save(
        &self,
        params: DidSaveTextDocumentParams,
    ) {
        debug!("did_save: {}", params.text_document.uri);
        self.document_store.save(&params.text_document.uri, params.text);
    }

    async fn did_close(
        &self,
        params: DidCloseTextDocumentParams,
    ) {
        debug!("did_close: {}", params.text_document.uri);
        self.document_store.close(&params.text_document.uri);
    }

    async fn goto_definition(
        &self,
        params: GotoDefinitionParams,
    ) -> Result<Option<GotoDefinitionResponse>> {
        let position_params = params.text_document_position_params;
        let Some(cursor) = self.symbol_query(&position_params.text_document.uri, position_params.position).await else {
            return Ok(None);
        };

        let found = match self.indexer.resolve_symbol(&cursor.query).await {
            Ok(found) => found,
            Err(error) => {
                self.report_indexer_error("follow location", &error).await;
                return Ok(None);
            },
        };

        if let Some(context) = found.first().and_then(|indexed| indexed.context.as_deref()) {
            debug!("goto_definition: {} -> `{context}`", cursor.query.location);
        }

        let targets = self.editor_locations(&found).await;
        let Some(target) = NavigationTarget::from_locations(targets) else {
            debug!("goto_definition: no target at {}", cursor.query.location);
            return Ok(None);
        };

        let response = navigation_target_to_lsp(target);
        if response.is_some() {
            self.record_jump(cursor.origin);
        }
        Ok(response)
    }

    async fn references(
        &self,
        params: ReferenceParams,
    ) -> Result<Option<Vec<Location>>> {
        let position_params = params.text_document_position;
        let Some(cursor) = self.symbol_query(&position_params.text_document.uri, position_params.position).await else {
            return Ok(None);
        };

        let found = match self.indexer.find_references(&cursor.query).await {
            Ok(found) => found,
            Err(error) => {
                self.report_indexer_error("find references", &error).await;
                return Ok(None);
            },
        };

        let include_declaration = params.context.include_declaration;
        let targets = self
            .editor_locations(&found)
            .await
            .into_iter()
            .filter(|location| include_declaration || *location != cursor.origin)
            .collect();
        let Some(target) = NavigationTarget::from_locations(targets) else {
            return Ok(None);
        };

        // With several usages the editor shows a picker rather than jumping.
        if target.is_direct_jump() {
            self.record_jump(cursor.origin.clone());
        }

        let locations = match target {
            NavigationTarget::Single(location) => vec![location],
            NavigationTarget::Multiple(locations) => locations,
        };
        let lsp_locations: Vec<Location> = locations.iter().filter_map(location_to_lsp).collect();
        self.client_log(LogLevel::Debug, format!("{} references for {}", lsp_locations.len(), cursor.origin)).await;
        Ok(Some(lsp_locations))
    }

    async fn completion(
        &self,
        params: CompletionParams,
    ) -> Result<Option<CompletionResponse>> {
        let position_params = params.text_document_position;
        let Some(cursor) = self.symbol_query(&position_params.text_document.uri, position_params.position).await else {
            return Ok(None);
        };

        let candidates = match self.indexer.complete_at(&cursor.query).await {
            Ok(candidates) => candidates,
            Err(error) => {
                self.report_indexer_error("code completion", &error).await;
                return Ok(None);
            },
        };
        if candidates.is_empty() {
            return Ok(None);
        }

        let items = candidates
            .into_iter()
            .enumerate()
            .map(|(rank, candidate)| candidate_to_completion_item(rank, candidate))
            .collect();
        Ok(Some(CompletionResponse::Array(items)))
    }

    async fn execute_command(
        &self,
        params: ExecuteCommandParams,
    ) -> Result<Option<Value>> {
        debug!("execute_command: {}", params.command);
        self.run_command(params).await
    }
}
