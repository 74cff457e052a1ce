#![allow(dead_code)]

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
    time::Duration,
};

use futures::{FutureExt, SinkExt, StreamExt};
use rtags_analyzer::{
    CompletionCandidate, IdePosition, IndexedLocation, Indexer, IndexerError, Location, RtagsLanguageServer,
    SymbolQuery,
};
use serde_json::{Value, json};
use tower::{Service, ServiceExt};
use tower_lsp::{
    ClientSocket, LspService,
    jsonrpc::{Request, Response},
    lsp_types::Url,
};

pub const FOO_CXX: &str = "/work/data/foo.cxx";
pub const FOO_H: &str = "/work/data/foo.h";

pub fn loc(
    path: &str,
    line: u32,
    character: u32,
) -> Location {
    Location::new(path, IdePosition::new(line, character))
}

pub fn uri(path: &str) -> Url {
    Url::from_file_path(path).expect("absolute test path is a valid file:// URI")
}

/// Indexer answering from tables filled in by the test.
#[derive(Default)]
pub struct FakeIndexer {
    definitions: Mutex<HashMap<Location, Vec<Location>>>,
    references: Mutex<HashMap<Location, Vec<Location>>>,
    completions: Mutex<Vec<CompletionCandidate>>,
    failure: Mutex<Option<IndexerError>>,
    queries: Mutex<Vec<SymbolQuery>>,
    reindexed: Mutex<Vec<Option<PathBuf>>>,
}

impl FakeIndexer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn define(
        &self,
        from: Location,
        to: Location,
    ) {
        self.definitions.lock().unwrap().entry(from).or_default().push(to);
    }

    pub fn refer(
        &self,
        from: Location,
        usages: Vec<Location>,
    ) {
        self.references.lock().unwrap().insert(from, usages);
    }

    pub fn offer_completions(
        &self,
        candidates: Vec<CompletionCandidate>,
    ) {
        *self.completions.lock().unwrap() = candidates;
    }

    pub fn fail_with(
        &self,
        error: IndexerError,
    ) {
        *self.failure.lock().unwrap() = Some(error);
    }

    pub fn queries(&self) -> Vec<SymbolQuery> {
        self.queries.lock().unwrap().clone()
    }

    pub fn reindexed(&self) -> Vec<Option<PathBuf>> {
        self.reindexed.lock().unwrap().clone()
    }

    fn begin(
        &self,
        query: &SymbolQuery,
    ) -> Result<(), IndexerError> {
        self.queries.lock().unwrap().push(query.clone());
        match self.failure.lock().unwrap().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn lookup(
        table: &Mutex<HashMap<Location, Vec<Location>>>,
        at: &Location,
    ) -> Vec<IndexedLocation> {
        table.lock().unwrap().get(at).cloned().unwrap_or_default().into_iter().map(IndexedLocation::new).collect()
    }
}

#[tower_lsp::async_trait]
impl Indexer for FakeIndexer {
    async fn resolve_symbol(
        &self,
        query: &SymbolQuery,
    ) -> Result<Vec<IndexedLocation>, IndexerError> {
        self.begin(query)?;
        Ok(Self::lookup(&self.definitions, &query.location))
    }

    async fn find_references(
        &self,
        query: &SymbolQuery,
    ) -> Result<Vec<IndexedLocation>, IndexerError> {
        self.begin(query)?;
        Ok(Self::lookup(&self.references, &query.location))
    }

    async fn complete_at(
        &self,
        query: &SymbolQuery,
    ) -> Result<Vec<CompletionCandidate>, IndexerError> {
        self.begin(query)?;
        Ok(self.completions.lock().unwrap().clone())
    }

    async fn reindex(
        &self,
        file: Option<&Path>,
    ) -> Result<(), IndexerError> {
        self.reindexed.lock().unwrap().push(file.map(Path::to_path_buf));
        match self.failure.lock().unwrap().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

/// Message the server sent to the client while a call was in flight.
#[derive(Debug, Clone)]
pub struct ClientMessage {
    pub method: String,
    pub params: Option<Value>,
}

/// An initialized server driven through `tower::Service`, with a pump that
/// answers server-to-client requests.
pub struct TestServer {
    service: LspService<RtagsLanguageServer>,
    socket: ClientSocket,
    next_id: i64,
    pub client_requests: Vec<ClientMessage>,
    pub client_notifications: Vec<ClientMessage>,
}

impl TestServer {
    pub async fn start(indexer: Arc<FakeIndexer>) -> Self {
        Self::start_with_options(indexer, json!({})).await
    }

    pub async fn start_with_options(
        indexer: Arc<FakeIndexer>,
        initialization_options: Value,
    ) -> Self {
        let indexer: Arc<dyn Indexer> = indexer;
        let (service, socket) = LspService::new(move |client| RtagsLanguageServer::with_indexer(client, indexer));
        let mut server = Self {
            service,
            socket,
            next_id: 1,
            client_requests: Vec::new(),
            client_notifications: Vec::new(),
        };

        let response = server
            .request(
                "initialize",
                json!({
                    "capabilities": {},
                    "initializationOptions": initialization_options,
                }),
            )
            .await;
        assert!(response.is_ok(), "initialize failed: {:?}", response.error());
        server.notify("initialized", json!({})).await;
        server
    }

    pub async fn notify<P: serde::Serialize>(
        &mut self,
        method: &'static str,
        params: P,
    ) {
        let request =
            Request::build(method).params(serde_json::to_value(params).expect("serialize notification params")).finish();
        let response = self.call(request).await;
        assert!(response.is_none(), "{method} should be handled as notification");
    }

    pub async fn request<P: serde::Serialize>(
        &mut self,
        method: &'static str,
        params: P,
    ) -> Response {
        let id = self.next_id;
        self.next_id += 1;
        let request = Request::build(method)
            .params(serde_json::to_value(params).expect("serialize request params"))
            .id(id)
            .finish();
        self.call(request).await.expect("request should return response")
    }

    /// Result of a successful request, `Value::Null` for `null`.
    pub async fn request_result<P: serde::Serialize>(
        &mut self,
        method: &'static str,
        params: P,
    ) -> Value {
        let response = self.request(method, params).await;
        assert!(response.is_ok(), "{method} failed: {:?}", response.error());
        response.result().cloned().unwrap_or(Value::Null)
    }

    async fn call(
        &mut self,
        request: Request,
    ) -> Option<Response> {
        let service = &mut self.service;
        let socket = &mut self.socket;
        let client_requests = &mut self.client_requests;
        let client_notifications = &mut self.client_notifications;

        let mut call_fut =
            Box::pin(async { service.ready().await.expect("service ready").call(request).await.expect("service call") });

        // Biased towards the socket: messages the server sent before answering
        // are collected before the response is returned.
        let response = loop {
            tokio::select! {
                biased;
                maybe_req = tokio::time::timeout(Duration::from_secs(20), socket.next()) => {
                    let req = maybe_req
                        .expect("timed out waiting for server message while call is in flight")
                        .expect("client socket unexpectedly closed while call in flight");
                    Self::handle_client_message(socket, client_requests, client_notifications, req).await;
                }
                response = &mut call_fut => break response,
            }
        };

        // Messages sent in the same poll that produced the response are
        // already queued; collect them too.
        while let Some(Some(req)) = socket.next().now_or_never() {
            Self::handle_client_message(socket, client_requests, client_notifications, req).await;
        }
        response
    }

    async fn handle_client_message(
        socket: &mut ClientSocket,
        client_requests: &mut Vec<ClientMessage>,
        client_notifications: &mut Vec<ClientMessage>,
        req: Request,
    ) {
        let message = ClientMessage {
            method: req.method().to_string(),
            params: req.params().cloned(),
        };
        if let Some(id) = req.id().cloned() {
            let result = match message.method.as_str() {
                "window/showDocument" => json!({ "success": true }),
                _ => json!(null),
            };
            client_requests.push(message);
            socket.send(Response::from_ok(id, result)).await.expect("failed to answer server request");
        } else {
            client_notifications.push(message);
        }
    }

    pub async fn open(
        &mut self,
        path: &str,
        text: &str,
    ) {
        self.notify(
            "textDocument/didOpen",
            json!({
                "textDocument": { "uri": uri(path), "languageId": "cpp", "version": 1, "text": text }
            }),
        )
        .await;
    }

    pub async fn edit(
        &mut self,
        path: &str,
        version: i32,
        text: &str,
    ) {
        self.notify(
            "textDocument/didChange",
            json!({
                "textDocument": { "uri": uri(path), "version": version },
                "contentChanges": [{ "text": text }]
            }),
        )
        .await;
    }

    pub async fn save(
        &mut self,
        path: &str,
    ) {
        self.notify("textDocument/didSave", json!({ "textDocument": { "uri": uri(path) } })).await;
    }

    pub async fn goto(
        &mut self,
        path: &str,
        line: u32,
        character: u32,
    ) -> Value {
        self.request_result(
            "textDocument/definition",
            json!({
                "textDocument": { "uri": uri(path) },
                "position": { "line": line, "character": character }
            }),
        )
        .await
    }

    pub async fn references(
        &mut self,
        path: &str,
        line: u32,
        character: u32,
        include_declaration: bool,
    ) -> Value {
        self.request_result(
            "textDocument/references",
            json!({
                "textDocument": { "uri": uri(path) },
                "position": { "line": line, "character": character },
                "context": { "includeDeclaration": include_declaration }
            }),
        )
        .await
    }

    pub async fn command(
        &mut self,
        command: &str,
        arguments: Vec<Value>,
    ) -> Value {
        self.request_result("workspace/executeCommand", json!({ "command": command, "arguments": arguments })).await
    }

    pub async fn go_back(&mut self) -> Value {
        self.command(rtags_analyzer::GO_BACK_COMMAND, Vec::new()).await
    }

    pub fn show_document_requests(&self) -> Vec<Value> {
        self.client_requests
            .iter()
            .filter(|m| m.method == "window/showDocument")
            .filter_map(|m| m.params.clone())
            .collect()
    }
}

/// `(path, line, character)` of a scalar LSP location value.
pub fn location_parts(value: &Value) -> (PathBuf, u32, u32) {
    let uri: Url = serde_json::from_value(value["uri"].clone()).expect("location has a uri");
    let path = uri.to_file_path().expect("file uri");
    let line = value["range"]["start"]["line"].as_u64().expect("line") as u32;
    let character = value["range"]["start"]["character"].as_u64().expect("character") as u32;
    (path, line, character)
}
