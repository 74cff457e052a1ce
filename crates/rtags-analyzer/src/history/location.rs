use std::{
    fmt::{Display, Formatter},
    path::{Path, PathBuf},
};

use crate::ide::IdePosition;

/// Snapshot of a cursor position inside a document.
///
/// Captured at the moment of a jump and never updated afterwards, so later
/// edits to the document do not move it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    file_path: PathBuf,
    position: IdePosition,
}

impl Location {
    pub fn new(
        file_path: impl Into<PathBuf>,
        position: IdePosition,
    ) -> Self {
        Self {
            file_path: file_path.into(),
            position,
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn position(&self) -> IdePosition {
        self.position
    }
}

/// Formats as `path:line:column` with the 1-based numbering rtags uses.
impl Display for Location {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        let (line, column) = self.position.one_based();
        write!(f, "{}:{line}:{column}", self.file_path.display())
    }
}
