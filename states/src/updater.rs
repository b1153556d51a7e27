use std::any::{Any, TypeId, type_name};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use flume::Sender;
use tokio_util::sync::CancellationToken;

use crate::TaskId;

pub(crate) type Update = (TypeId, Box<dyn Any + Send>);

/// Sends whole replacement values for states or computes back to the `StateCtx`.
///
/// Updates are queued and only applied on the UI thread by `StateCtx::sync_computes`.
#[derive(Debug, Clone)]
pub struct Updater {
    send: Sender<Update>,
}

impl Updater {
    pub(crate) fn new(send: Sender<Update>) -> Self {
        Self { send }
    }

    pub fn set<T: Any + Send>(&self, value: T) {
        if self
            .send
            .send((TypeId::of::<T>(), Box::new(value)))
            .is_err()
        {
            log::debug!(
                "StateCtx is gone, dropping update for {}",
                type_name::<T>()
            );
        }
    }
}

/// `Updater` handed to a running command.
///
/// Drops every update once the command's task was cancelled, or once a newer run of
/// the same command was spawned. A response that arrives after teardown can therefore
/// never overwrite state.
#[derive(Debug, Clone)]
pub struct LatestOnlyUpdater {
    inner: Updater,
    task: TaskId,
    latest: Arc<AtomicU64>,
    cancel: CancellationToken,
}

impl LatestOnlyUpdater {
    pub(crate) fn new(
        inner: Updater,
        task: TaskId,
        latest: Arc<AtomicU64>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            inner,
            task,
            latest,
            cancel,
        }
    }

    /// Whether updates from this task would still be applied.
    pub fn is_current(&self) -> bool {
        !self.cancel.is_cancelled() && self.latest.load(Ordering::Acquire) == self.task.generation()
    }

    pub fn set<T: Any + Send>(&self, value: T) {
        if self.is_current() {
            self.inner.set(value);
        } else {
            log::debug!(
                "Discarding stale update for {} from task generation {}",
                type_name::<T>(),
                self.task.generation()
            );
        }
    }
}
