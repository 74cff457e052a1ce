use crate::history::Location;

/// Zero-based line/character pair, independent of any protocol encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct IdePosition {
    pub line: u32,
    pub character: u32,
}

impl IdePosition {
    pub const fn new(
        line: u32,
        character: u32,
    ) -> Self {
        Self {
            line,
            character,
        }
    }

    /// Build a position from the 1-based line/column pair rtags prints.
    ///
    /// Returns `None` for a zero line or column, which rtags never emits for a
    /// real location.
    pub fn from_one_based(
        line: u32,
        column: u32,
    ) -> Option<Self> {
        Some(Self::new(line.checked_sub(1)?, column.checked_sub(1)?))
    }

    pub const fn one_based(self) -> (u32, u32) {
        (self.line + 1, self.character + 1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationTarget {
    Single(Location),
    Multiple(Vec<Location>),
}

impl NavigationTarget {
    pub fn from_locations(locations: Vec<Location>) -> Option<Self> {
        match locations.len() {
            0 => None,
            1 => locations.into_iter().next().map(Self::Single),
            _ => Some(Self::Multiple(locations)),
        }
    }

    /// Whether the editor moves the cursor straight to the target without
    /// asking the user to pick one.
    pub fn is_direct_jump(&self) -> bool {
        matches!(self, Self::Single(_))
    }
}

#[cfg(test)]
#[path = "../../tests/src/ide/navigation_tests.rs"]
mod tests;
