use dashmap::DashMap;
use tower_lsp::lsp_types::Url;

use super::Document;

/// Thread-safe store of all open documents.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: DashMap<Url, Document>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open (register) a document. Freshly opened text matches the disk.
    pub fn open(
        &self,
        uri: Url,
        text: String,
        version: i32,
    ) {
        self.documents.insert(uri.clone(), Document::new(uri, text, version));
    }

    /// Replace the full content of a document after an edit.
    pub fn update(
        &self,
        uri: Url,
        text: String,
        version: i32,
    ) {
        if let Some(mut doc) = self.documents.get_mut(&uri) {
            doc.set_content(text, version);
        } else {
            let mut doc = Document::new(uri.clone(), String::new(), version);
            doc.set_content(text, version);
            self.documents.insert(uri, doc);
        }
    }

    /// The editor wrote the document to disk.
    pub fn save(
        &self,
        uri: &Url,
        text: Option<String>,
    ) {
        if let Some(mut doc) = self.documents.get_mut(uri) {
            doc.mark_saved(text);
        }
    }

    pub fn close(
        &self,
        uri: &Url,
    ) {
        self.documents.remove(uri);
    }

    pub fn get(
        &self,
        uri: &Url,
    ) -> Option<Document> {
        self.documents.get(uri).map(|r| r.value().clone())
    }

    /// Unsaved editor text for `uri`, or `None` when rtags can read the file
    /// from disk.
    pub fn unsaved_text(
        &self,
        uri: &Url,
    ) -> Option<String> {
        self.documents.get(uri).and_then(|r| r.value().unsaved_text().map(str::to_string))
    }
}

#[cfg(test)]
#[path = "../../tests/src/document/document_store_tests.rs"]
mod tests;
