use std::any::{Any, TypeId};
use std::fmt::Debug;

use crate::{Dep, SnapshotClone, State, Updater};

/// The states and computes a `Compute` reads from.
///
/// Whenever one of them changes the compute is marked dirty and re-run on the
/// next `StateCtx::run_all_dirty`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComputeDeps {
    pub states: Vec<TypeId>,
    pub computes: Vec<TypeId>,
}

impl ComputeDeps {
    /// No dependencies: the compute is only ever updated through an `Updater`.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn state<T: State>(mut self) -> Self {
        self.states.push(TypeId::of::<T>());
        self
    }

    pub fn compute<T: Compute>(mut self) -> Self {
        self.computes.push(TypeId::of::<T>());
        self
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &TypeId> {
        self.states.iter().chain(self.computes.iter())
    }
}

/// A derived or cached value.
///
/// `compute` must be free of side effects: it can run implicitly at startup and whenever
/// a dependency changes. Network IO belongs in a `Command` which then publishes the
/// result via `Updater::set`.
pub trait Compute: Any + Debug + SnapshotClone {
    fn deps(&self) -> ComputeDeps;

    fn compute(&self, deps: Dep<'_>, updater: Updater);

    fn as_any(&self) -> &dyn Any;

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>);
}

/// Shared `assign_box` body for computes: downcast and overwrite.
pub fn assign_impl<T: Compute>(target: &mut T, new_self: Box<dyn Any + Send>) {
    match new_self.downcast::<T>() {
        Ok(value) => *target = *value,
        Err(_) => log::warn!(
            "Discarding update with mismatched type for compute {}",
            std::any::type_name::<T>()
        ),
    }
}
