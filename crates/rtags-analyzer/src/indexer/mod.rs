//! Seam between the language server and the external source indexer.
//!
//! The server only ever talks to an [`Indexer`]; [`crate::rtags::RcIndexer`]
//! is the production implementation and tests plug in scripted fakes.
//!
//! Columns crossing this seam, in queries and in results, are byte offsets
//! into the UTF-8 source line. The server converts to and from the editor's
//! UTF-16 columns.

mod error;
mod types;

use std::path::Path;

pub use error::IndexerError;
pub use types::{CandidateKind, CompletionCandidate, IndexedLocation, SymbolQuery};

#[tower_lsp::async_trait]
pub trait Indexer: Send + Sync {
    /// Locations of the declaration or definition of the symbol under the cursor.
    async fn resolve_symbol(
        &self,
        query: &SymbolQuery,
    ) -> Result<Vec<IndexedLocation>, IndexerError>;

    /// Every usage of the symbol under the cursor.
    async fn find_references(
        &self,
        query: &SymbolQuery,
    ) -> Result<Vec<IndexedLocation>, IndexerError>;

    /// Completion candidates at the cursor, in the indexer's preferred order.
    async fn complete_at(
        &self,
        query: &SymbolQuery,
    ) -> Result<Vec<CompletionCandidate>, IndexerError>;

    /// Re-index one file, or the whole project when `file` is `None`.
    async fn reindex(
        &self,
        file: Option<&Path>,
    ) -> Result<(), IndexerError>;
}
