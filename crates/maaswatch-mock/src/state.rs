use std::sync::{Arc, Mutex, MutexGuard};

use maaswatch_core::Machine;

/// Statuses the mutator draws from.
pub const STATUS_VOCABULARY: [&str; 4] = ["Broken", "Deployed", "Ready", "Releasing failed"];

/// Shared mock inventory handed to both the request handler and the mutator.
///
/// One mutex guards the whole list: every served response is a consistent
/// whole-list snapshot and every mutator tick lands atomically. The list
/// never grows or shrinks after construction.
#[derive(Clone)]
pub struct MockState {
    machines: Arc<Mutex<Vec<Machine>>>,
}

impl MockState {
    /// The fixed 14-machine inventory the mock boots with.
    pub fn new() -> Self {
        Self::with_machines(seed_machines())
    }

    /// A mock over a custom inventory, mostly for tests and demos.
    pub fn with_machines(machines: Vec<Machine>) -> Self {
        Self {
            machines: Arc::new(Mutex::new(machines)),
        }
    }

    /// Serialize the current inventory while holding the lock.
    pub(crate) fn snapshot_json(&self) -> serde_json::Result<Vec<u8>> {
        let machines = self.lock();
        serde_json::to_vec(&*machines)
    }

    /// Overwrite one machine's status, reporting whether the id was found.
    /// Lets tests and demos force a deterministic transition.
    pub fn set_status(&self, system_id: &str, status: &str) -> bool {
        let mut machines = self.lock();
        match machines.iter_mut().find(|m| m.system_id == system_id) {
            Some(machine) => {
                machine.status_name = status.to_string();
                true
            }
            None => false,
        }
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, Vec<Machine>> {
        self.machines.lock().expect("mock inventory mutex poisoned")
    }
}

impl Default for MockState {
    fn default() -> Self {
        Self::new()
    }
}

fn seed_machines() -> Vec<Machine> {
    [
        ("rfykrh", "Broken"),
        ("a3babp", "Deployed"),
        ("hyhypg", "Deployed"),
        ("tekmyk", "Ready"),
        ("a47eh3", "Ready"),
        ("bssbfh", "Ready"),
        ("4dneak", "Ready"),
        ("mbknk6", "Deployed"),
        ("pcfenf", "Ready"),
        ("s7468h", "Deployed"),
        ("7cpkgs", "Ready"),
        ("gm6tae", "Ready"),
        ("b8n4mg", "Ready"),
        ("xswsfr", "Releasing failed"),
    ]
    .into_iter()
    .map(|(id, status)| Machine::new(id, status))
    .collect()
}
