use std::any::Any;
use std::fmt::Debug;
use std::future::Future;
use std::pin::Pin;

use tokio_util::sync::CancellationToken;

use crate::{CommandSnapshot, LatestOnlyUpdater};

pub type CommandFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// A manually dispatched side effect (network IO and the like).
///
/// Commands never touch the `StateCtx` directly. They read an owned `CommandSnapshot`
/// taken at flush time and publish results through the `LatestOnlyUpdater`.
pub trait Command: Any + Debug {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: LatestOnlyUpdater,
        cancel: CancellationToken,
    ) -> CommandFuture;
}
