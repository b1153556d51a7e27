use std::any::Any;
use std::fmt::Debug;

use crate::SnapshotClone;

/// A plain piece of application state owned by a `StateCtx`.
///
/// States are mutated synchronously on the UI thread through `StateCtx::update`,
/// or asynchronously by sending a whole new value through an `Updater`.
pub trait State: Any + Debug + SnapshotClone {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Replace `self` with a value received from an `Updater`.
    fn assign_box(&mut self, new_self: Box<dyn Any + Send>);
}

/// Shared `assign_box` body for states: downcast and overwrite.
pub fn state_assign_impl<T: State>(target: &mut T, new_self: Box<dyn Any + Send>) {
    match new_self.downcast::<T>() {
        Ok(value) => *target = *value,
        Err(_) => log::warn!(
            "Discarding update with mismatched type for state {}",
            std::any::type_name::<T>()
        ),
    }
}
