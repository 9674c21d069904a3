use std::collections::HashMap;
use std::sync::Mutex;

use crate::machine::Machine;

/// Concurrency-safe store of every machine the watcher has observed, keyed
/// by `system_id`.
///
/// The registry only grows: a machine that later disappears from an upstream
/// snapshot keeps its last observed status. All mutation goes through
/// [`MachineRegistry::upsert`] so the change signal stays accurate; the raw
/// map is never exposed.
#[derive(Debug, Default)]
pub struct MachineRegistry {
    machines: Mutex<HashMap<String, Machine>>,
}

impl MachineRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or update a machine, reporting whether anything changed.
    ///
    /// Returns `true` when the identity was unseen or its stored status
    /// differs from the incoming one; `false` when the stored entry is
    /// already identical. Every `true` return also emits a change notice,
    /// which is part of the operational contract.
    pub fn upsert(&self, machine: Machine) -> bool {
        let mut machines = self.machines.lock().expect("registry mutex poisoned");
        match machines.get(&machine.system_id) {
            Some(existing) if existing.status_name == machine.status_name => false,
            _ => {
                tracing::info!(
                    system_id = %machine.system_id,
                    status = %machine.status_name,
                    "machine status updated"
                );
                machines.insert(machine.system_id.clone(), machine);
                true
            }
        }
    }

    /// Last observed state for `system_id`, if the machine has ever been seen.
    pub fn get(&self, system_id: &str) -> Option<Machine> {
        self.machines
            .lock()
            .expect("registry mutex poisoned")
            .get(system_id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.machines.lock().expect("registry mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
