use std::any::Any;

use activity_states::{SnapshotClone, State, state_assign_impl};

use crate::DisplayRecord;

/// Label of the selector bound to [`MfaFilter`].
pub const FILTER_LABEL: &str = "MFA Status";

/// Which accounts the table shows, by MFA status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MfaFilter {
    #[default]
    All,
    Enabled,
    Disabled,
}

impl MfaFilter {
    /// Every option, in selector order.
    pub const ALL: [Self; 3] = [Self::All, Self::Enabled, Self::Disabled];

    pub fn matches(self, record: &DisplayRecord) -> bool {
        match self {
            Self::All => true,
            Self::Enabled => record.mfa_enabled(),
            Self::Disabled => !record.mfa_enabled(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All Users",
            Self::Enabled => "MFA Enabled",
            Self::Disabled => "MFA Disabled",
        }
    }

    /// Records passing the filter, in their original order.
    pub fn apply<'a>(
        self,
        records: &'a [DisplayRecord],
    ) -> impl Iterator<Item = (usize, &'a DisplayRecord)> + 'a {
        records
            .iter()
            .enumerate()
            .filter(move |(_, record)| self.matches(record))
    }
}

impl SnapshotClone for MfaFilter {
    fn clone_boxed(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(*self))
    }
}

impl State for MfaFilter {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}
