use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::state::{MockState, STATUS_VOCABULARY};

/// Apply one mutation tick under the inventory lock: pick `k` uniformly from
/// 1..=4, then `k` times overwrite a uniformly random machine's status with a
/// uniformly random vocabulary entry. The same index may be hit more than
/// once per tick and the drawn status may equal the current one.
pub fn mutate_once(state: &MockState, rng: &mut impl Rng) {
    let mut machines = state.lock();
    if machines.is_empty() {
        return;
    }
    let count = rng.gen_range(1..=4);
    for _ in 0..count {
        let index = rng.gen_range(0..machines.len());
        let status = STATUS_VOCABULARY[rng.gen_range(0..STATUS_VOCABULARY.len())];
        machines[index].status_name = status.to_string();
    }
}

/// Run the mutator forever, one tick per `interval` (reference: 10s).
///
/// With `seed` set the status churn is reproducible run to run; otherwise
/// the RNG is seeded from entropy.
pub async fn run_mutator(state: MockState, interval: Duration, seed: Option<u64>) {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    loop {
        tokio::time::sleep(interval).await;
        mutate_once(&state, &mut rng);
        tracing::debug!("mutator tick applied");
    }
}
