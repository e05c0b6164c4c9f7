//! Detached click persistence.
//!
//! The click service hands finalized [`NewClick`] records to a [`ClickWriter`],
//! which enqueues them on a bounded channel without waiting. A single
//! [`run_click_worker`] task, spawned at startup and owned by no request,
//! drains the channel and inserts each record on its own task, with at most
//! `concurrency` inserts in flight.
//!
//! Each record gets exactly one insert attempt. Failures are logged with the
//! click's identifying fields and discarded; nothing is retried and the
//! client response is never affected.

use std::sync::Arc;
use tokio::sync::{Semaphore, mpsc, mpsc::error::TrySendError};
use tracing::{Span, error, info, warn};

use crate::domain::entities::NewClick;
use crate::domain::repositories::ClickRepository;

/// Non-blocking handle used by request handlers to dispatch click records.
#[derive(Clone)]
pub struct ClickWriter {
    tx: mpsc::Sender<NewClick>,
    span: Span,
}

impl ClickWriter {
    /// Wraps the sending half of the click queue.
    ///
    /// `span` is the parent of every diagnostic this writer emits.
    pub fn new(tx: mpsc::Sender<NewClick>, span: Span) -> Self {
        Self { tx, span }
    }

    /// Enqueues a click record without waiting.
    ///
    /// Returns `false` if the record was dropped because the queue is full or
    /// the worker has shut down.
    pub fn dispatch(&self, click: NewClick) -> bool {
        let (reason, click) = match self.tx.try_send(click) {
            Ok(()) => return true,
            Err(TrySendError::Full(click)) => ("full", click),
            Err(TrySendError::Closed(click)) => ("closed", click),
        };

        metrics::counter!("click_queue_dropped_total", "reason" => reason).increment(1);
        warn!(
            parent: &self.span,
            click_id = %click.click_id,
            link_id = %click.link_id,
            campaign_id = %click.campaign_id,
            user_id = %click.user_id,
            reason,
            "Click queue unavailable, dropping click record"
        );
        false
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    /// Free slots currently left in the queue.
    pub fn capacity(&self) -> usize {
        self.tx.capacity()
    }
}

/// Drains the click queue until every [`ClickWriter`] is dropped.
///
/// Inserts run on spawned tasks bounded by a semaphore of `concurrency`
/// permits. Once the channel closes, waits for in-flight inserts to finish
/// before returning.
pub async fn run_click_worker(
    mut rx: mpsc::Receiver<NewClick>,
    repository: Arc<dyn ClickRepository>,
    concurrency: usize,
    span: Span,
) {
    let concurrency = concurrency.max(1);
    let semaphore = Arc::new(Semaphore::new(concurrency));

    while let Some(click) = rx.recv().await {
        let Ok(permit) = semaphore.clone().acquire_owned().await else {
            break;
        };

        let repository = repository.clone();
        let span = span.clone();
        tokio::spawn(async move {
            persist_click(repository.as_ref(), click, &span).await;
            drop(permit);
        });
    }

    // Reacquiring every permit means no insert is still running.
    let _ = semaphore.acquire_many(concurrency as u32).await;
    info!(parent: &span, "Click worker stopped");
}

async fn persist_click(repository: &dyn ClickRepository, click: NewClick, span: &Span) {
    let click_id = click.click_id;
    let link_id = click.link_id;
    let campaign_id = click.campaign_id;
    let user_id = click.user_id.clone();

    if let Err(e) = repository.insert(click).await {
        metrics::counter!("click_persist_failures_total").increment(1);
        error!(
            parent: span,
            click_id = %click_id,
            link_id = %link_id,
            campaign_id = %campaign_id,
            user_id = %user_id,
            error = %e,
            "Failed to insert click into database"
        );
    }
}
