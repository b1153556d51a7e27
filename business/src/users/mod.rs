//! User-list domain module.
//!
//! Holds the cached fetch result, the command performing the one-shot fetch, and the
//! compute deriving what the MFA filter lets through. UI code only reads these via
//! `ctx.cached::<T>()` and writes the filter via `ctx.update::<MfaFilter>()`.

pub mod api;
pub mod fetch_users_compute;
pub mod filtered_users_compute;

pub use fetch_users_compute::{FetchUsersCommand, UsersCompute, UsersLoad};
pub use filtered_users_compute::FilteredUsersCompute;
