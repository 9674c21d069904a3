//! End-to-end: real mock server on an ephemeral port, real poller.

use maaswatch_core::{Credentials, Machine, MachineRegistry, Poller};
use maaswatch_mock::{serve, MockState, MACHINES_PATH};

/// Start the mock on its own runtime thread and return the bound address.
fn start_mock(state: MockState) -> std::net::SocketAddr {
    let (tx, rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            tx.send(listener.local_addr().unwrap()).unwrap();
            serve(state, listener).await.unwrap();
        });
    });
    rx.recv().unwrap()
}

fn poller_for(addr: std::net::SocketAddr) -> Poller {
    let credentials = Credentials::parse("k1:k2:k3").unwrap();
    Poller::new(credentials, &format!("http://{addr}{MACHINES_PATH}")).unwrap()
}

#[test]
fn poll_tracks_a_status_transition() {
    let state = MockState::with_machines(vec![Machine::new("a", "Ready")]);
    let addr = start_mock(state.clone());

    let registry = MachineRegistry::new();
    let poller = poller_for(addr);

    // Startup pass populates the registry.
    let first = poller.poll_once(&registry).unwrap();
    assert_eq!(first, vec![Machine::new("a", "Ready")]);
    assert_eq!(registry.get("a"), Some(Machine::new("a", "Ready")));

    // Upstream transition is reported on the next poll.
    assert!(state.set_status("a", "Broken"));
    let second = poller.poll_once(&registry).unwrap();
    assert_eq!(second, vec![Machine::new("a", "Broken")]);

    // No change, no report.
    let third = poller.poll_once(&registry).unwrap();
    assert!(third.is_empty());
}

#[test]
fn first_poll_ingests_the_full_seed_inventory() {
    let addr = start_mock(MockState::new());

    let registry = MachineRegistry::new();
    let poller = poller_for(addr);

    let changed = poller.poll_once(&registry).unwrap();
    assert_eq!(changed.len(), 14);
    assert_eq!(registry.len(), 14);

    // Decode order matches the mock's fixed list order.
    assert_eq!(changed[0].system_id, "rfykrh");
    assert_eq!(changed[13].system_id, "xswsfr");

    assert!(poller.poll_once(&registry).unwrap().is_empty());
}
