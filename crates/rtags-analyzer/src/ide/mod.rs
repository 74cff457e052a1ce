pub mod lsp;
pub mod navigation;

pub use navigation::{IdePosition, NavigationTarget};
