//! Poll-and-diff loop against the MAAS machines endpoint.

use std::time::Duration;

use crate::auth::Credentials;
use crate::error::{Result, WatchError};
use crate::machine::Machine;
use crate::registry::MachineRegistry;
use crate::snapshot;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Periodically fetches the full machine listing and reconciles it against a
/// [`MachineRegistry`]. One outstanding fetch at a time; polls never overlap.
#[derive(Debug)]
pub struct Poller {
    client: reqwest::blocking::Client,
    credentials: Credentials,
    endpoint: reqwest::Url,
}

impl Poller {
    pub fn new(credentials: Credentials, endpoint: &str) -> Result<Self> {
        let endpoint = reqwest::Url::parse(endpoint)
            .map_err(|e| WatchError::InvalidEndpoint(format!("{endpoint}: {e}")))?;
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            credentials,
            endpoint,
        })
    }

    /// Fetch one snapshot and upsert every decoded machine into `registry`.
    ///
    /// Returns the machines whose status was new or changed, in decode
    /// order. A non-200 response or a decode failure aborts the poll and
    /// surfaces the error; the caller's schedule is unaffected.
    pub fn poll_once(&self, registry: &MachineRegistry) -> Result<Vec<Machine>> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .header(
                reqwest::header::AUTHORIZATION,
                self.credentials.authorization_header(),
            )
            .send()?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(WatchError::UnexpectedStatus(status));
        }

        let mut changed = Vec::new();
        snapshot::decode_machine_array(response, |machine| {
            if registry.upsert(machine.clone()) {
                changed.push(machine);
            }
        })?;
        Ok(changed)
    }

    /// Run the poll loop forever: an immediate startup pass to populate the
    /// registry, then one poll per `interval`, sequentially.
    ///
    /// Poll failures are logged and the schedule continues unchanged; there
    /// is no backoff and no retry within a tick.
    pub fn run_forever(&self, registry: &MachineRegistry, interval: Duration) -> ! {
        tracing::info!(endpoint = %self.endpoint, "initializing machine registry");
        report(self.poll_once(registry));

        loop {
            std::thread::sleep(interval);
            tracing::debug!("starting changed-state check");
            report(self.poll_once(registry));
        }
    }
}

fn report(outcome: Result<Vec<Machine>>) {
    match outcome {
        Ok(changed) if changed.is_empty() => {
            tracing::info!("poll complete, no status changes");
        }
        Ok(changed) => {
            tracing::info!(count = changed.len(), "poll complete, machines changed state");
            for machine in &changed {
                tracing::info!(
                    system_id = %machine.system_id,
                    status = %machine.status_name,
                    "changed state"
                );
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "poll failed, retrying next tick");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeStage;

    const MACHINES_PATH: &str = "/MAAS/api/2.0/machines/";

    fn poller_for(server: &mockito::ServerGuard) -> Poller {
        let credentials = Credentials::parse("k1:k2:k3").unwrap();
        Poller::new(credentials, &format!("{}{MACHINES_PATH}", server.url())).unwrap()
    }

    #[test]
    fn changed_list_preserves_decode_order() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", MACHINES_PATH)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[{"system_id":"x","status_name":"Ready"},
                    {"system_id":"y","status_name":"Broken"}]"#,
            )
            .create();

        let registry = MachineRegistry::new();
        let changed = poller_for(&server).poll_once(&registry).unwrap();
        assert_eq!(
            changed,
            vec![Machine::new("x", "Ready"), Machine::new("y", "Broken")]
        );
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn unchanged_snapshot_yields_empty_list() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", MACHINES_PATH)
            .with_body(r#"[{"system_id":"x","status_name":"Ready"}]"#)
            .expect(2)
            .create();

        let registry = MachineRegistry::new();
        let poller = poller_for(&server);
        assert_eq!(poller.poll_once(&registry).unwrap().len(), 1);
        assert!(poller.poll_once(&registry).unwrap().is_empty());
    }

    #[test]
    fn non_200_short_circuits_without_touching_registry() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", MACHINES_PATH)
            .with_status(503)
            .with_body(r#"[{"system_id":"x","status_name":"Ready"}]"#)
            .create();

        let registry = MachineRegistry::new();
        let err = poller_for(&server).poll_once(&registry).unwrap_err();
        match err {
            WatchError::UnexpectedStatus(status) => assert_eq!(status.as_u16(), 503),
            other => panic!("expected UnexpectedStatus, got {other:?}"),
        }
        assert!(registry.is_empty());
    }

    #[test]
    fn decode_failure_aborts_the_poll() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", MACHINES_PATH)
            .with_body("this is not json")
            .create();

        let registry = MachineRegistry::new();
        let err = poller_for(&server).poll_once(&registry).unwrap_err();
        match err {
            WatchError::Decode { stage, .. } => assert_eq!(stage, DecodeStage::ArrayStart),
            other => panic!("expected Decode, got {other:?}"),
        }
    }

    #[test]
    fn request_carries_oauth_plaintext_header() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", MACHINES_PATH)
            .match_header(
                "authorization",
                mockito::Matcher::Regex(
                    "OAuth oauth_version=\"1.0\", oauth_signature_method=\"PLAINTEXT\", \
                     oauth_consumer_key=\"k1\", oauth_token=\"k2\", oauth_signature=\"&k3\", \
                     oauth_nonce=\"[0-9a-f-]+\", oauth_timestamp=\"[0-9]+\""
                        .to_string(),
                ),
            )
            .with_body("[]")
            .create();

        let registry = MachineRegistry::new();
        poller_for(&server).poll_once(&registry).unwrap();
        mock.assert();
    }

    #[test]
    fn invalid_endpoint_is_rejected_at_construction() {
        let credentials = Credentials::parse("k1:k2:k3").unwrap();
        let err = Poller::new(credentials, "not a url").unwrap_err();
        assert!(matches!(err, WatchError::InvalidEndpoint(_)));
    }
}
