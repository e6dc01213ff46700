//! Fixed-size download worker pool.

use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;

use crate::download::recording::Downloader;
use crate::download::state::{ItemReport, RunSummary};
use crate::download::worker::run_worker;
use crate::media::Recording;

/// Capacity of the work queue. Kept minimal so that a producer can never run
/// more than one recording ahead of the busiest worker.
pub const QUEUE_CAPACITY: usize = 1;

/// Owns the work queue and the worker tasks consuming it.
///
/// Lifecycle: [`start`](Self::start), any number of [`submit`](Self::submit),
/// [`close`](Self::close), then [`join`](Self::join).
pub struct Dispatcher {
    sender: Option<mpsc::Sender<Recording>>,
    workers: Vec<JoinHandle<Vec<ItemReport>>>,
    submitted: u64,
}

impl Dispatcher {
    /// Spawn `worker_count` workers bound to a fresh queue.
    ///
    /// # Panics
    ///
    /// Panics if `worker_count` is zero, or when called outside a Tokio runtime.
    pub fn start(worker_count: usize, downloader: Downloader) -> Self {
        assert!(worker_count > 0, "dispatcher needs at least one worker");

        let (sender, receiver) = mpsc::channel(QUEUE_CAPACITY);
        let queue = Arc::new(Mutex::new(receiver));
        let downloader = Arc::new(downloader);

        tracing::info!(
            "Starting {} download worker(s) into {}",
            worker_count,
            downloader.output_dir().display()
        );

        let workers = (0..worker_count)
            .map(|id| tokio::spawn(run_worker(id, Arc::clone(&queue), Arc::clone(&downloader))))
            .collect();

        Self {
            sender: Some(sender),
            workers,
            submitted: 0,
        }
    }

    /// Hand one recording to the pool, waiting while every worker is busy.
    ///
    /// # Panics
    ///
    /// Panics if called after [`close`](Self::close), or if every worker has
    /// died while the queue was still open.
    pub async fn submit(&mut self, recording: Recording) {
        let Some(sender) = self.sender.as_ref() else {
            panic!(
                "recording {} submitted after the work queue was closed",
                recording.unique_id
            );
        };

        if let Err(mpsc::error::SendError(recording)) = sender.send(recording).await {
            panic!(
                "no download worker left to receive recording {}",
                recording.unique_id
            );
        }

        self.submitted += 1;
    }

    /// Signal that no more recordings will be submitted.
    pub fn close(&mut self) {
        if self.sender.take().is_some() {
            tracing::debug!("Work queue closed after {} recording(s)", self.submitted);
        }
    }

    /// Whether [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.sender.is_none()
    }

    /// Number of recordings submitted so far.
    pub fn submitted(&self) -> u64 {
        self.submitted
    }

    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Close the queue if still open and wait for every worker to exit.
    pub async fn join(mut self) -> RunSummary {
        self.close();

        let mut summary = RunSummary::default();
        for handle in self.workers {
            match handle.await {
                Ok(reports) => summary.extend(reports),
                Err(e) => tracing::error!("Download worker terminated abnormally: {}", e),
            }
        }

        summary
    }
}
