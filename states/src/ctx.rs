use std::any::{TypeId, type_name};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use flume::{Receiver, Sender};
use tokio_util::sync::CancellationToken;

use crate::updater::Update;
use crate::{
    Command, CommandFuture, CommandSnapshot, Compute, Dep, LatestOnlyUpdater, State,
    TaskHandle, TaskId, Updater,
};

#[derive(Debug)]
pub(crate) struct ComputeSlot {
    pub(crate) compute: Box<dyn Compute>,
    name: &'static str,
}

/// Owner of every state, compute and command of the application.
///
/// A frame of the UI loop should:
/// 1. `sync_computes()` to apply updates published by finished commands
/// 2. render, reading via `state`/`cached` and writing via `update`/`enqueue_command`
/// 3. `flush_commands()` then `run_all_dirty()`
#[derive(Debug)]
pub struct StateCtx {
    states: BTreeMap<TypeId, Box<dyn State>>,
    computes: BTreeMap<TypeId, ComputeSlot>,
    commands: BTreeMap<TypeId, Box<dyn Command>>,

    // dependency id -> computes reading it
    dependents: BTreeMap<TypeId, Vec<TypeId>>,
    dirty: BTreeSet<TypeId>,

    queue: Vec<TypeId>,
    generations: BTreeMap<TypeId, Arc<AtomicU64>>,
    handles: Vec<TaskHandle>,

    send: Sender<Update>,
    recv: Receiver<Update>,

    #[cfg(not(target_arch = "wasm32"))]
    tasks: tokio::task::JoinSet<()>,
    // Built on first spawn when the caller is outside any tokio runtime.
    #[cfg(not(target_arch = "wasm32"))]
    fallback_runtime: Option<tokio::runtime::Runtime>,
    #[cfg(target_arch = "wasm32")]
    in_flight: Arc<std::sync::atomic::AtomicUsize>,
}

impl Default for StateCtx {
    fn default() -> Self {
        Self::new()
    }
}

impl StateCtx {
    pub fn new() -> Self {
        let (send, recv) = flume::unbounded();
        Self {
            states: BTreeMap::new(),
            computes: BTreeMap::new(),
            commands: BTreeMap::new(),
            dependents: BTreeMap::new(),
            dirty: BTreeSet::new(),
            queue: Vec::new(),
            generations: BTreeMap::new(),
            handles: Vec::new(),
            send,
            recv,
            #[cfg(not(target_arch = "wasm32"))]
            tasks: tokio::task::JoinSet::new(),
            #[cfg(not(target_arch = "wasm32"))]
            fallback_runtime: None,
            #[cfg(target_arch = "wasm32")]
            in_flight: Arc::default(),
        }
    }

    pub fn add_state<T: State>(&mut self, state: T) {
        let id = TypeId::of::<T>();
        self.states.insert(id, Box::new(state));
        self.mark_dependents_dirty(id);
    }

    pub fn record_compute<T: Compute>(&mut self, compute: T) {
        let id = TypeId::of::<T>();
        for dep in compute.deps().iter() {
            self.dependents.entry(*dep).or_default().push(id);
        }
        self.computes.insert(
            id,
            ComputeSlot {
                compute: Box::new(compute),
                name: type_name::<T>(),
            },
        );
        self.dirty.insert(id);
    }

    pub fn record_command<C: Command>(&mut self, command: C) {
        let id = TypeId::of::<C>();
        self.commands.insert(id, Box::new(command));
        self.generations.entry(id).or_default();
    }

    /// # Panics
    /// Panics if `T` was never registered with `add_state`.
    pub fn state<T: State>(&self) -> &T {
        self.states
            .get(&TypeId::of::<T>())
            .and_then(|state| state.as_any().downcast_ref::<T>())
            .unwrap_or_else(|| panic!("State {} is not registered", type_name::<T>()))
    }

    /// Mutate a state in place and mark every compute reading it dirty.
    pub fn update<T: State>(&mut self, f: impl FnOnce(&mut T)) {
        let id = TypeId::of::<T>();
        match self
            .states
            .get_mut(&id)
            .and_then(|state| state.as_any_mut().downcast_mut::<T>())
        {
            Some(state) => f(state),
            None => {
                log::warn!("update called for unregistered state {}", type_name::<T>());
                return;
            }
        }
        self.mark_dependents_dirty(id);
    }

    pub fn cached<T: Compute>(&self) -> Option<&T> {
        self.computes
            .get(&TypeId::of::<T>())
            .and_then(|slot| slot.compute.as_any().downcast_ref::<T>())
    }

    /// # Panics
    /// Panics if `T` was never registered with `record_compute`.
    pub fn compute<T: Compute>(&self) -> &T {
        self.cached::<T>()
            .unwrap_or_else(|| panic!("Compute {} is not registered", type_name::<T>()))
    }

    pub fn updater(&self) -> Updater {
        Updater::new(self.send.clone())
    }

    pub fn is_dirty<T: Compute>(&self) -> bool {
        self.dirty.contains(&TypeId::of::<T>())
    }

    /// Apply every update queued through an `Updater` since the last call.
    pub fn sync_computes(&mut self) {
        while let Ok((id, value)) = self.recv.try_recv() {
            if let Some(slot) = self.computes.get_mut(&id) {
                slot.compute.assign_box(value);
            } else if let Some(state) = self.states.get_mut(&id) {
                state.assign_box(value);
            } else {
                log::warn!("Dropping update for unregistered type {id:?}");
                continue;
            }
            self.mark_dependents_dirty(id);
        }
        self.reap_finished_tasks();
    }

    /// Run dirty computes until the dependency chain settles.
    pub fn run_all_dirty(&mut self) {
        // A chain can be at most as long as the number of computes.
        for _ in 0..=self.computes.len() {
            self.sync_computes();
            if self.dirty.is_empty() {
                break;
            }

            let dirty = std::mem::take(&mut self.dirty);
            let updater = self.updater();
            for id in &dirty {
                if let Some(slot) = self.computes.get(id) {
                    let deps = Dep::new(&self.states, &self.computes, slot.name);
                    slot.compute.compute(deps, updater.clone());
                }
            }
        }
        self.sync_computes();
    }

    pub fn enqueue_command<C: Command>(&mut self) {
        self.queue.push(TypeId::of::<C>());
    }

    /// Spawn every queued command.
    ///
    /// A new run of a command cancels the previous run of the same command, whose
    /// remaining updates are then discarded.
    pub fn flush_commands(&mut self) {
        for id in std::mem::take(&mut self.queue) {
            if !self.commands.contains_key(&id) {
                log::warn!("Command {id:?} was enqueued but never recorded");
                continue;
            }

            let snap = self.snapshot();
            let latest = Arc::clone(self.generations.entry(id).or_default());
            let generation = latest.fetch_add(1, Ordering::AcqRel) + 1;
            let task = TaskId::new(id, generation);

            self.handles.retain(|handle| {
                if handle.id().type_id() == id {
                    handle.cancel();
                    false
                } else {
                    !handle.is_cancelled()
                }
            });

            let token = CancellationToken::new();
            let updater = LatestOnlyUpdater::new(self.updater(), task, latest, token.clone());
            let future = match self.commands.get(&id) {
                Some(command) => command.run(snap, updater, token.clone()),
                None => continue,
            };
            self.handles.push(TaskHandle::new(task, token.clone()));
            self.spawn(future, token);
        }
    }

    /// Cancel every running command without waiting for it.
    pub fn cancel_all(&mut self) {
        for handle in self.handles.drain(..) {
            handle.cancel();
        }
    }

    /// Cancel every running command and wait until all of them have stopped.
    pub async fn shutdown(&mut self) {
        self.cancel_all();
        #[cfg(not(target_arch = "wasm32"))]
        while self.tasks.join_next().await.is_some() {}
    }

    /// Number of spawned commands that have not been reaped yet.
    pub fn task_count(&self) -> usize {
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.tasks.len()
        }
        #[cfg(target_arch = "wasm32")]
        {
            self.in_flight.load(Ordering::Acquire)
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn task_set_mut(&mut self) -> &mut tokio::task::JoinSet<()> {
        &mut self.tasks
    }

    fn snapshot(&self) -> CommandSnapshot {
        let mut snap = CommandSnapshot::new();
        for (id, state) in &self.states {
            if let Some(value) = state.clone_boxed() {
                snap.insert_state(*id, value);
            }
        }
        for (id, slot) in &self.computes {
            if let Some(value) = slot.compute.clone_boxed() {
                snap.insert_compute(*id, value);
            }
        }
        snap
    }

    fn mark_dependents_dirty(&mut self, id: TypeId) {
        if let Some(dependents) = self.dependents.get(&id) {
            self.dirty.extend(dependents.iter().copied());
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn spawn(&mut self, future: CommandFuture, token: CancellationToken) {
        let task = async move {
            tokio::select! {
                () = token.cancelled() => {}
                () = future => {}
            }
        };

        if tokio::runtime::Handle::try_current().is_ok() {
            self.tasks.spawn(task);
            return;
        }

        match self.fallback_handle() {
            Ok(handle) => {
                self.tasks.spawn_on(task, &handle);
            }
            Err(err) => log::error!("Cannot start a runtime for command tasks: {err}"),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn fallback_handle(&mut self) -> std::io::Result<tokio::runtime::Handle> {
        if let Some(runtime) = &self.fallback_runtime {
            return Ok(runtime.handle().clone());
        }

        log::warn!("No tokio runtime is running, starting a dedicated one for command tasks");
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("state-ctx-commands")
            .enable_all()
            .build()?;
        let handle = runtime.handle().clone();
        self.fallback_runtime = Some(runtime);
        Ok(handle)
    }

    #[cfg(target_arch = "wasm32")]
    fn spawn(&mut self, future: CommandFuture, token: CancellationToken) {
        let in_flight = Arc::clone(&self.in_flight);
        in_flight.fetch_add(1, Ordering::AcqRel);
        wasm_bindgen_futures::spawn_local(async move {
            tokio::select! {
                () = token.cancelled() => {}
                () = future => {}
            }
            in_flight.fetch_sub(1, Ordering::AcqRel);
        });
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn reap_finished_tasks(&mut self) {
        while let Some(result) = self.tasks.try_join_next() {
            if let Err(err) = result
                && err.is_panic()
            {
                log::error!("Command task panicked: {err}");
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn reap_finished_tasks(&mut self) {}
}

impl Drop for StateCtx {
    fn drop(&mut self) {
        self.cancel_all();
        #[cfg(not(target_arch = "wasm32"))]
        if let Some(runtime) = self.fallback_runtime.take() {
            runtime.shutdown_background();
        }
    }
}
