use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

pub const DEFAULT_RC_COMMAND: &str = "rc";
pub const MIN_TIMEOUT_MS: u64 = 100;
pub const MAX_TIMEOUT_MS: u64 = 120_000;
pub const MIN_MAX_COMPLETIONS: usize = 1;
pub const MAX_MAX_COMPLETIONS: usize = 5000;

#[derive(Debug, Clone, PartialEq)]
pub struct RtagsSettings {
    pub command: String,
    pub extra_args: Vec<String>,
    pub timeout_ms: u64,
    pub max_completions: usize,
}

impl Default for RtagsSettings {
    fn default() -> Self {
        Self {
            command: DEFAULT_RC_COMMAND.to_string(),
            extra_args: Vec::new(),
            timeout_ms: 5000,
            max_completions: 200,
        }
    }
}

impl RtagsSettings {
    pub(crate) fn apply_patch(
        &mut self,
        patch: RtagsSettingsPatch,
    ) {
        if let Some(v) = patch.command {
            self.command = v;
        }
        if let Some(v) = patch.extra_args {
            self.extra_args = v;
        }
        if let Some(v) = patch.timeout_ms {
            self.timeout_ms = v;
        }
        if let Some(v) = patch.max_completions {
            self.max_completions = v;
        }
    }

    pub(crate) fn normalize(&mut self) {
        self.command = self.command.trim().to_string();
        if self.command.is_empty() {
            self.command = DEFAULT_RC_COMMAND.to_string();
        }
        self.extra_args = self.extra_args.iter().map(|a| a.trim().to_string()).filter(|a| !a.is_empty()).collect();
        self.timeout_ms = self.timeout_ms.clamp(MIN_TIMEOUT_MS, MAX_TIMEOUT_MS);
        self.max_completions = self.max_completions.clamp(MIN_MAX_COMPLETIONS, MAX_MAX_COMPLETIONS);
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct RtagsSettingsPatch {
    pub(crate) command: Option<String>,
    pub(crate) extra_args: Option<Vec<String>>,
    pub(crate) timeout_ms: Option<u64>,
    pub(crate) max_completions: Option<usize>,
    #[serde(flatten)]
    pub(crate) _extra: HashMap<String, Value>,
}
