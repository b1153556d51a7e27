use std::any::Any;

use activity_states::{Compute, ComputeDeps, Dep, SnapshotClone, Updater, assign_impl};

use crate::filter::MfaFilter;
use crate::records::DisplayRecord;
use crate::users::UsersCompute;

/// Positions in `UsersCompute::records()` that pass the current [`MfaFilter`].
///
/// Recomputed whenever the fetched list or the filter changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredUsersCompute {
    pub rows: Vec<usize>,
}

impl FilteredUsersCompute {
    /// Resolve the stored positions against the list they were computed from.
    pub fn records<'a>(
        &'a self,
        users: &'a UsersCompute,
    ) -> impl Iterator<Item = &'a DisplayRecord> + 'a {
        let records = users.records();
        self.rows.iter().filter_map(move |&index| records.get(index))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl SnapshotClone for FilteredUsersCompute {}

impl Compute for FilteredUsersCompute {
    fn deps(&self) -> ComputeDeps {
        ComputeDeps::none()
            .state::<MfaFilter>()
            .compute::<UsersCompute>()
    }

    fn compute(&self, deps: Dep<'_>, updater: Updater) {
        let (filter, users) = match (deps.state::<MfaFilter>(), deps.compute::<UsersCompute>()) {
            (Ok(filter), Ok(users)) => (*filter, users),
            (Err(err), _) | (_, Err(err)) => {
                log::warn!("FilteredUsersCompute: {err}");
                return;
            }
        };

        let rows = filter
            .apply(users.records())
            .map(|(index, _)| index)
            .collect();
        updater.set(Self { rows });
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        assign_impl(self, new_self);
    }
}
