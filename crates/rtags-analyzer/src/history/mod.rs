//! Jump history used by "go back".

mod location;
mod navigation_history;

pub use location::Location;
pub use navigation_history::{DEFAULT_JUMP_LIMIT, NavigationHistory};
