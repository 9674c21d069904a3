use anyhow::Result;
use maaswatch_mock::{run_mutator, serve, MockState};
use std::time::Duration;

pub fn run(port: u16, mutate_interval: Duration, seed: Option<u64>) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let state = MockState::new();
        let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
        tokio::spawn(run_mutator(state.clone(), mutate_interval, seed));
        serve(state, listener).await
    })
}
