//! Declarative configuration.
//!
//! Settings are split into one file per category. [`ServerSettings`]
//! aggregates all categories and handles JSON deserialization from LSP
//! initialization options and `didChangeConfiguration` payloads.

pub(crate) mod logging;
pub(crate) mod navigation;
pub(crate) mod rtags;

use std::collections::HashMap;

use logging::LoggingSettingsPatch;
pub use logging::{LogLevel, LoggingSettings};
use navigation::NavigationSettingsPatch;
pub use navigation::{MAX_JUMP_LIMIT, MIN_JUMP_LIMIT, NavigationSettings};
use rtags::RtagsSettingsPatch;
pub use rtags::{
    DEFAULT_RC_COMMAND, MAX_MAX_COMPLETIONS, MAX_TIMEOUT_MS, MIN_MAX_COMPLETIONS, MIN_TIMEOUT_MS, RtagsSettings,
};
use serde::Deserialize;
use serde_json::Value;

pub const SETTINGS_SECTION_KEY: &str = "rtags-analyzer";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ServerSettings {
    pub navigation: NavigationSettings,
    pub rtags: RtagsSettings,
    pub logging: LoggingSettings,
}

impl ServerSettings {
    pub fn from_lsp_payload(payload: Option<&Value>) -> Self {
        let mut settings = Self::default();
        if let Some(payload) = payload {
            settings = settings.merged_with_payload(payload);
        }
        settings
    }

    pub fn merged_with_payload(
        &self,
        payload: &Value,
    ) -> Self {
        let mut merged = self.clone();

        for candidate in payload_candidates(payload) {
            if let Ok(patch) = serde_json::from_value::<ServerSettingsPatch>(candidate.clone()) {
                merged.apply_patch(patch);
            }
        }

        merged.normalize();
        merged
    }

    fn apply_patch(
        &mut self,
        patch: ServerSettingsPatch,
    ) {
        if let Some(p) = patch.navigation {
            self.navigation.apply_patch(p);
        }
        if let Some(p) = patch.rtags {
            self.rtags.apply_patch(p);
        }
        if let Some(p) = patch.logging {
            self.logging.apply_patch(p);
        }
    }

    fn normalize(&mut self) {
        self.navigation.normalize();
        self.rtags.normalize();
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct ServerSettingsPatch {
    navigation: Option<NavigationSettingsPatch>,
    rtags: Option<RtagsSettingsPatch>,
    logging: Option<LoggingSettingsPatch>,
    #[serde(flatten)]
    _extra: HashMap<String, Value>,
}

fn payload_candidates(payload: &Value) -> Vec<Value> {
    let mut candidates = Vec::new();
    candidates.push(payload.clone());
    if let Some(scoped) = payload.get(SETTINGS_SECTION_KEY) {
        candidates.push(scoped.clone());
    }
    candidates
}

#[cfg(test)]
#[path = "../../tests/src/config/settings_tests.rs"]
mod tests;
