//! Cached user list plus the command that fetches it.
//!
//! `UsersCompute` starts out `Loading` and is moved to `Loaded` exactly once by
//! `FetchUsersCommand`. A failed fetch is logged and ends up as an empty list, so the
//! table never shows an error state.

use std::any::Any;

use activity_states::{
    CancellationToken, Command, CommandFuture, CommandSnapshot, Compute, ComputeDeps, Dep,
    LatestOnlyUpdater, SnapshotClone, Updater, assign_impl,
};
use chrono::Utc;

use crate::BusinessConfig;
use crate::records::DisplayRecord;
use crate::users::api;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UsersLoad {
    /// No response yet.
    #[default]
    Loading,
    /// Fetch finished. Empty when the request failed.
    Loaded(Vec<DisplayRecord>),
}

#[derive(Debug, Clone, Default)]
pub struct UsersCompute {
    pub load: UsersLoad,
}

impl UsersCompute {
    pub fn loaded(records: Vec<DisplayRecord>) -> Self {
        Self {
            load: UsersLoad::Loaded(records),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.load, UsersLoad::Loading)
    }

    /// Records in server order; empty while loading.
    pub fn records(&self) -> &[DisplayRecord] {
        match &self.load {
            UsersLoad::Loading => &[],
            UsersLoad::Loaded(records) => records,
        }
    }
}

impl SnapshotClone for UsersCompute {
    fn clone_boxed(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }
}

impl Compute for UsersCompute {
    fn deps(&self) -> ComputeDeps {
        ComputeDeps::none()
    }

    fn compute(&self, _deps: Dep<'_>, _updater: Updater) {
        // Updated by FetchUsersCommand only.
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        assign_impl(self, new_self);
    }
}

/// Fetch the user list once and publish it into [`UsersCompute`].
///
/// Metrics are derived against the clock reading taken when the response arrives.
#[derive(Debug, Default)]
pub struct FetchUsersCommand;

impl Command for FetchUsersCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: LatestOnlyUpdater,
        _cancel: CancellationToken,
    ) -> CommandFuture {
        let config = snap.state::<BusinessConfig>().cloned();

        Box::pin(async move {
            let Some(config) = config else {
                log::error!("FetchUsersCommand: BusinessConfig is not registered");
                updater.set(UsersCompute::loaded(Vec::new()));
                return;
            };

            let url = config.users_url();
            log::info!("FetchUsersCommand: GET {url}");

            let records = match api::list_users(&url).await {
                Ok(raw) => {
                    let now = Utc::now();
                    log::info!("FetchUsersCommand: received {} users", raw.len());
                    raw.into_iter()
                        .map(|record| DisplayRecord::derive(record, now))
                        .collect()
                }
                Err(err) => {
                    log::error!("Failed to fetch users from {url}: {err}");
                    Vec::new()
                }
            };

            updater.set(UsersCompute::loaded(records));
        })
    }
}
