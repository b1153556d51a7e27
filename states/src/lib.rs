//! State / compute / command runtime shared by the business and UI crates.

mod command;
mod compute;
mod ctx;
mod dep;
mod error;
mod snapshot;
mod state;
mod task;
mod updater;

pub use command::{Command, CommandFuture};
pub use compute::{Compute, ComputeDeps, assign_impl};
pub use ctx::StateCtx;
pub use dep::Dep;
pub use error::Error;
pub use snapshot::{CommandSnapshot, SnapshotClone};
pub use state::{State, state_assign_impl};
pub use task::{TaskHandle, TaskId};
pub use updater::{LatestOnlyUpdater, Updater};

pub use tokio_util::sync::CancellationToken;
