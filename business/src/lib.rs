//! Business layer of the user activity dashboard.
//!
//! Owns the domain records, the MFA filter, and the states/computes/commands that
//! drive the one-shot user-list fetch. Nothing here depends on egui.

mod config;
mod error;
mod filter;
pub mod http;
mod records;
pub mod users;

#[cfg(test)]
mod test_utils;

use activity_states::StateCtx;

pub use config::{BusinessConfig, DashboardEnv};
pub use error::FetchError;
pub use filter::{FILTER_LABEL, MfaFilter};
pub use records::{DisplayRecord, InvalidDate, IsoDate, RawRecord, days_since};
pub use users::{FetchUsersCommand, FilteredUsersCompute, UsersCompute, UsersLoad};

/// Record every state, compute and command of the dashboard in `ctx`.
///
/// Does not start the fetch; enqueue [`FetchUsersCommand`] for that.
pub fn register(ctx: &mut StateCtx, config: BusinessConfig) {
    ctx.add_state(config);
    ctx.add_state(MfaFilter::default());
    ctx.record_compute(UsersCompute::default());
    ctx.record_compute(FilteredUsersCompute::default());
    ctx.record_command(FetchUsersCommand);
}
