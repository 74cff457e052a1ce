use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::history::DEFAULT_JUMP_LIMIT;

pub const MIN_JUMP_LIMIT: usize = 1;
pub const MAX_JUMP_LIMIT: usize = 1000;

#[derive(Debug, Clone, PartialEq)]
pub struct NavigationSettings {
    /// Capacity of the "go back" history.
    pub jump_limit: usize,
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self {
            jump_limit: DEFAULT_JUMP_LIMIT,
        }
    }
}

impl NavigationSettings {
    pub(crate) fn apply_patch(
        &mut self,
        patch: NavigationSettingsPatch,
    ) {
        if let Some(v) = patch.jump_limit {
            self.jump_limit = v;
        }
    }

    pub(crate) fn normalize(&mut self) {
        self.jump_limit = self.jump_limit.clamp(MIN_JUMP_LIMIT, MAX_JUMP_LIMIT);
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct NavigationSettingsPatch {
    pub(crate) jump_limit: Option<usize>,
    #[serde(flatten)]
    pub(crate) _extra: HashMap<String, Value>,
}
