use anyhow::{bail, Context, Result};
use maaswatch_core::{Credentials, MachineRegistry, Poller};
use std::time::Duration;

/// Production machines endpoint: the MAAS region controller this watcher is
/// deployed against.
const DEFAULT_ENDPOINT: &str = "http://192.168.200.3:5240/MAAS/api/2.0/machines/";

/// Local `maaswatch mock` endpoint, selected by --test.
const MOCK_ENDPOINT: &str = "http://127.0.0.1:5240/MAAS/api/2.0/machines/";

pub fn run(
    apikey: Option<&str>,
    endpoint: Option<&str>,
    test: bool,
    interval: Duration,
) -> Result<()> {
    let Some(apikey) = apikey else {
        bail!("API key is not provided: set MAAS_API_KEY or pass --apikey");
    };
    let credentials = Credentials::parse(apikey).context("bad --apikey")?;

    let endpoint = match endpoint {
        Some(url) => url,
        None if test => MOCK_ENDPOINT,
        None => DEFAULT_ENDPOINT,
    };

    let registry = MachineRegistry::new();
    let poller = Poller::new(credentials, endpoint)?;
    poller.run_forever(&registry, interval)
}
