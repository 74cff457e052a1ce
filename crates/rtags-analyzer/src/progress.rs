//! `$/progress` reporting for `rtags.reindex`.

use std::sync::atomic::{AtomicU64, Ordering};

use tower_lsp::{
    Client,
    lsp_types::{
        NumberOrString, ProgressParams, ProgressParamsValue, WorkDoneProgress, WorkDoneProgressBegin,
        WorkDoneProgressCreateParams, WorkDoneProgressEnd, WorkDoneProgressReport, notification::Progress,
        request::WorkDoneProgressCreate,
    },
};
use tracing::debug;

use crate::indexer::IndexerError;

const REINDEX_TITLE: &str = "rtags: Reindexing";

static NEXT_REINDEX_ID: AtomicU64 = AtomicU64::new(1);

/// Editor-side indicator for one reindex run: `Begin`, a `Report` naming the
/// file or project being reindexed, then `End` with the outcome.
///
/// Clients that refuse `window/workDoneProgress/create` get no notifications.
pub(crate) struct ReindexProgress {
    client: Client,
    token: Option<NumberOrString>,
}

impl ReindexProgress {
    pub(crate) async fn start(
        client: &Client,
        target: &str,
    ) -> Self {
        let token = NumberOrString::String(format!(
            "rtags-analyzer/reindex/{}",
            NEXT_REINDEX_ID.fetch_add(1, Ordering::Relaxed)
        ));
        let created = client
            .send_request::<WorkDoneProgressCreate>(WorkDoneProgressCreateParams {
                token: token.clone(),
            })
            .await;

        let progress = Self {
            client: client.clone(),
            token: match created {
                Ok(()) => Some(token),
                Err(error) => {
                    debug!("reindex progress unavailable: {error}");
                    None
                },
            },
        };

        progress
            .send(WorkDoneProgress::Begin(WorkDoneProgressBegin {
                title: REINDEX_TITLE.to_string(),
                cancellable: Some(false),
                message: None,
                percentage: None,
            }))
            .await;
        progress
            .send(WorkDoneProgress::Report(WorkDoneProgressReport {
                cancellable: Some(false),
                message: Some(target.to_string()),
                percentage: None,
            }))
            .await;
        progress
    }

    pub(crate) async fn finish(
        mut self,
        outcome: &Result<(), IndexerError>,
    ) {
        self.send(WorkDoneProgress::End(WorkDoneProgressEnd {
            message: Some(end_message(outcome)),
        }))
        .await;
        self.token = None;
    }

    async fn send(
        &self,
        value: WorkDoneProgress,
    ) {
        if let Some(token) = &self.token {
            self.client
                .send_notification::<Progress>(ProgressParams {
                    token: token.clone(),
                    value: ProgressParamsValue::WorkDone(value),
                })
                .await;
        }
    }
}

impl Drop for ReindexProgress {
    // The command future was dropped mid-reindex.
    fn drop(&mut self) {
        let Some(token) = self.token.take() else {
            return;
        };
        let client = self.client.clone();
        tokio::spawn(async move {
            client
                .send_notification::<Progress>(ProgressParams {
                    token,
                    value: ProgressParamsValue::WorkDone(WorkDoneProgress::End(WorkDoneProgressEnd {
                        message: Some("Cancelled".to_string()),
                    })),
                })
                .await;
        });
    }
}

fn end_message(outcome: &Result<(), IndexerError>) -> String {
    match outcome {
        Ok(()) => "Done".to_string(),
        Err(error) => format!("Failed: {error}"),
    }
}

#[cfg(test)]
#[path = "../tests/src/progress_tests.rs"]
mod tests;
