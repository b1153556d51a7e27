use std::any::{TypeId, type_name};
use std::collections::BTreeMap;

use crate::ctx::ComputeSlot;
use crate::{Compute, Error, State};

/// Read-only view over a `StateCtx` handed to `Compute::compute`.
pub struct Dep<'a> {
    states: &'a BTreeMap<TypeId, Box<dyn State>>,
    computes: &'a BTreeMap<TypeId, ComputeSlot>,
    reader: &'static str,
}

impl<'a> Dep<'a> {
    pub(crate) fn new(
        states: &'a BTreeMap<TypeId, Box<dyn State>>,
        computes: &'a BTreeMap<TypeId, ComputeSlot>,
        reader: &'static str,
    ) -> Self {
        Self {
            states,
            computes,
            reader,
        }
    }

    pub fn state<T: State>(&self) -> Result<&'a T, Error> {
        self.states
            .get(&TypeId::of::<T>())
            .and_then(|state| state.as_any().downcast_ref::<T>())
            .ok_or_else(|| Error::state_not_found(type_name::<T>(), self.reader))
    }

    pub fn compute<T: Compute>(&self) -> Result<&'a T, Error> {
        self.computes
            .get(&TypeId::of::<T>())
            .and_then(|slot| slot.compute.as_any().downcast_ref::<T>())
            .ok_or_else(|| Error::compute_not_found(type_name::<T>(), self.reader))
    }
}
