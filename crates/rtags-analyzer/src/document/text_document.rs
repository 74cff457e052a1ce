use tower_lsp::lsp_types::Url;

/// Snapshot of a single open text document.
#[derive(Debug, Clone)]
pub struct Document {
    /// The document URI.
    pub uri: Url,
    /// Full source text as the editor currently shows it.
    pub text: String,
    /// Document version as reported by the client.
    pub version: i32,
    /// Set by edits, cleared by saves. While set, rtags is handed `text`
    /// instead of reading the file from disk.
    dirty: bool,
}

impl Document {
    pub fn new(
        uri: Url,
        text: String,
        version: i32,
    ) -> Self {
        Self {
            uri,
            text,
            version,
            dirty: false,
        }
    }

    pub(crate) fn set_content(
        &mut self,
        text: String,
        version: i32,
    ) {
        self.text = text;
        self.version = version;
        self.dirty = true;
    }

    pub(crate) fn mark_saved(
        &mut self,
        text: Option<String>,
    ) {
        if let Some(text) = text {
            self.text = text;
        }
        self.dirty = false;
    }

    /// Text rtags should see instead of the file on disk, if any.
    pub fn unsaved_text(&self) -> Option<&str> {
        self.dirty.then_some(self.text.as_str())
    }
}
