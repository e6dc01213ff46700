//! Download worker loop.

use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};

use crate::download::recording::Downloader;
use crate::download::state::ItemReport;
use crate::media::Recording;

/// Receiving half of the work queue, shared by every worker.
pub type SharedQueue = Arc<Mutex<mpsc::Receiver<Recording>>>;

/// Pull recordings until the queue is closed and drained.
///
/// Item failures are recorded in the returned reports; they never end the loop.
pub async fn run_worker(
    id: usize,
    queue: SharedQueue,
    downloader: Arc<Downloader>,
) -> Vec<ItemReport> {
    tracing::debug!("Worker {} starting", id);
    let mut reports = Vec::new();

    loop {
        // Only the receive happens under the lock.
        let next = queue.lock().await.recv().await;
        let Some(recording) = next else {
            break;
        };

        reports.push(downloader.process(id, recording).await);
    }

    tracing::debug!("Worker {} done ({} item(s))", id, reports.len());
    reports
}
