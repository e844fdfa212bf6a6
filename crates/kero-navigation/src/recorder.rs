//! Background history writer
//!
//! Location events must never wait on SQLite, so visits are queued here and
//! written by a worker task. Writes are fire-and-forget: a failed insert is
//! logged and dropped.

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::history::HistoryManager;

#[derive(Debug)]
enum HistoryWrite {
    Visit {
        title: String,
        url: String,
        visited_at: DateTime<Utc>,
    },
    Title {
        url: String,
        title: String,
    },
}

impl HistoryWrite {
    fn url(&self) -> &str {
        match self {
            HistoryWrite::Visit { url, .. } | HistoryWrite::Title { url, .. } => url,
        }
    }

    fn apply(self, history: &HistoryManager) -> crate::Result<()> {
        match self {
            HistoryWrite::Visit {
                title,
                url,
                visited_at,
            } => history.append(&title, &url, visited_at),
            HistoryWrite::Title { url, title } => history.update_title(&url, &title),
        }
    }
}

pub struct HistoryRecorder {
    tx: mpsc::UnboundedSender<HistoryWrite>,
    worker: JoinHandle<()>,
}

impl HistoryRecorder {
    /// Start the writer task. Must be called from within a tokio runtime.
    pub fn spawn(history: HistoryManager) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<HistoryWrite>();

        let worker = tokio::spawn(async move {
            while let Some(write) = rx.recv().await {
                let history = history.clone();
                let url = write.url().to_string();
                let written = tokio::task::spawn_blocking(move || write.apply(&history)).await;

                match written {
                    Ok(Ok(())) => tracing::trace!(url = %url, "Recorded visit"),
                    Ok(Err(e)) => tracing::warn!(url = %url, error = %e, "Dropped history entry"),
                    Err(e) => tracing::warn!(url = %url, error = %e, "History writer panicked"),
                }
            }

            tracing::debug!("History recorder stopped");
        });

        Self { tx, worker }
    }

    /// Queue a visit. Never blocks.
    pub fn record(&self, title: &str, url: &str) {
        self.send(HistoryWrite::Visit {
            title: title.to_string(),
            url: url.to_string(),
            visited_at: Utc::now(),
        });
    }

    /// Queue a title update for the newest visit to `url`.
    pub fn retitle(&self, url: &str, title: &str) {
        self.send(HistoryWrite::Title {
            url: url.to_string(),
            title: title.to_string(),
        });
    }

    fn send(&self, write: HistoryWrite) {
        if let Err(e) = self.tx.send(write) {
            tracing::warn!(url = %e.0.url(), "History recorder is gone, write dropped");
        }
    }

    /// Stop accepting visits and wait for queued ones to be written.
    pub async fn shutdown(self) {
        drop(self.tx);
        if let Err(e) = self.worker.await {
            tracing::warn!(error = %e, "History recorder did not shut down cleanly");
        }
    }
}
