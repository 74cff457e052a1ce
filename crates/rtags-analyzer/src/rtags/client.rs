use std::{io::ErrorKind, path::Path, process::Stdio, sync::RwLock, time::Duration};

use tokio::{io::AsyncWriteExt, process::Command};
use tracing::{debug, warn};

use crate::{
    config::RtagsSettings,
    indexer::{CompletionCandidate, IndexedLocation, Indexer, IndexerError, SymbolQuery},
    rtags::output::{parse_completions, parse_locations},
};

/// [`Indexer`] backed by the rtags `rc` client. Every call is one `rc`
/// invocation against the already running `rdm` daemon.
#[derive(Debug)]
pub struct RcIndexer {
    settings: RwLock<RtagsSettings>,
}

impl RcIndexer {
    pub fn new(settings: RtagsSettings) -> Self {
        Self {
            settings: RwLock::new(settings),
        }
    }

    pub fn set_settings(
        &self,
        settings: RtagsSettings,
    ) {
        if let Ok(mut guard) = self.settings.write() {
            *guard = settings;
        }
    }

    fn settings_snapshot(&self) -> RtagsSettings {
        self.settings.read().map(|guard| guard.clone()).unwrap_or_default()
    }

    async fn run_query(
        &self,
        mode: &[&str],
        query: &SymbolQuery,
    ) -> Result<(RtagsSettings, String), IndexerError> {
        let settings = self.settings_snapshot();
        let args = query_args(&settings.extra_args, mode, query);
        let output = run_rc(&settings.command, &args, query.unsaved_text.as_deref(), settings.timeout_ms).await?;
        Ok((settings, output))
    }
}

impl Default for RcIndexer {
    fn default() -> Self {
        Self::new(RtagsSettings::default())
    }
}

#[tower_lsp::async_trait]
impl Indexer for RcIndexer {
    async fn resolve_symbol(
        &self,
        query: &SymbolQuery,
    ) -> Result<Vec<IndexedLocation>, IndexerError> {
        let (_, output) = self.run_query(&["--absolute-path", "--follow-location"], query).await?;
        Ok(parse_locations(&output))
    }

    async fn find_references(
        &self,
        query: &SymbolQuery,
    ) -> Result<Vec<IndexedLocation>, IndexerError> {
        let (_, output) = self.run_query(&["--absolute-path", "--references"], query).await?;
        Ok(parse_locations(&output))
    }

    async fn complete_at(
        &self,
        query: &SymbolQuery,
    ) -> Result<Vec<CompletionCandidate>, IndexerError> {
        let (settings, output) =
            self.run_query(&["--synchronous-completions", "--code-complete-at"], query).await?;
        Ok(parse_completions(&output, settings.max_completions))
    }

    async fn reindex(
        &self,
        file: Option<&Path>,
    ) -> Result<(), IndexerError> {
        let settings = self.settings_snapshot();
        let args = reindex_args(&settings.extra_args, file);
        run_rc(&settings.command, &args, None, settings.timeout_ms).await?;
        Ok(())
    }
}

/// Arguments for a cursor query: configured extras, the mode flags, then
/// `FILE:LINE:COLUMN` and the unsaved-file marker when text is streamed.
pub(crate) fn query_args(
    extra_args: &[String],
    mode: &[&str],
    query: &SymbolQuery,
) -> Vec<String> {
    let mut args = extra_args.to_vec();
    args.extend(mode.iter().map(|flag| flag.to_string()));
    args.push(query.location.to_string());
    if let Some(text) = &query.unsaved_text {
        args.push(format!("--unsaved-file={}:{}", query.location.file_path().display(), text.len()));
    }
    args
}

pub(crate) fn reindex_args(
    extra_args: &[String],
    file: Option<&Path>,
) -> Vec<String> {
    let mut args = extra_args.to_vec();
    args.push("--reindex".to_string());
    if let Some(file) = file {
        args.push(file.display().to_string());
    }
    args
}

async fn run_rc(
    executable: &str,
    args: &[String],
    input: Option<&str>,
    timeout_ms: u64,
) -> Result<String, IndexerError> {
    debug!("{executable} {}", args.join(" "));

    let invocation = run_rc_unbounded(executable, args, input);
    match tokio::time::timeout(Duration::from_millis(timeout_ms), invocation).await {
        Ok(result) => result,
        Err(_) => {
            warn!("{executable} timed out after {timeout_ms} ms");
            Err(IndexerError::TimedOut {
                command: executable.to_string(),
                timeout_ms,
            })
        },
    }
}

async fn run_rc_unbounded(
    executable: &str,
    args: &[String],
    input: Option<&str>,
) -> Result<String, IndexerError> {
    let mut child = Command::new(executable)
        .args(args)
        .kill_on_drop(true)
        .stdin(if input.is_some() { Stdio::piped() } else { Stdio::null() })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|error| match error.kind() {
            ErrorKind::NotFound => IndexerError::CommandNotFound(executable.to_string()),
            _ => IndexerError::LaunchFailed {
                command: executable.to_string(),
                reason: error.to_string(),
            },
        })?;

    if let (Some(text), Some(mut stdin)) = (input, child.stdin.take()) {
        match stdin.write_all(text.as_bytes()).await {
            Ok(()) => {},
            // rc answered without reading the buffer; its output still counts.
            Err(error) if error.kind() == ErrorKind::BrokenPipe => {
                debug!("{executable} closed stdin before the unsaved buffer was written");
            },
            Err(error) => {
                return Err(IndexerError::LaunchFailed {
                    command: executable.to_string(),
                    reason: format!("failed to stream unsaved buffer: {error}"),
                });
            },
        }
    }

    let output = child.wait_with_output().await.map_err(|error| IndexerError::LaunchFailed {
        command: executable.to_string(),
        reason: error.to_string(),
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        // rc exits non-zero with a silent stderr when it simply has no answer.
        if !stderr.is_empty() {
            return Err(IndexerError::Failed {
                command: executable.to_string(),
                reason: stderr,
            });
        }
        debug!("{executable} exited with {} and no diagnostics", output.status);
    }

    String::from_utf8(output.stdout).map_err(|error| IndexerError::Failed {
        command: executable.to_string(),
        reason: format!("rc produced invalid UTF-8 output: {error}"),
    })
}

#[cfg(test)]
#[path = "../../tests/src/rtags/client_tests.rs"]
mod tests;
