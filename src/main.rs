//! Office-hours simulator binary.
//!
//! Usage: `officevisor <workload-file>`
//!
//! Reads the workload, runs the simulation with stdout logging, and exits
//! non-zero on workload errors. `SIGINT`/`SIGTERM` abort the run early.

use std::sync::Arc;

use anyhow::Context;
use tokio_util::sync::CancellationToken;

use officevisor::sim::shutdown;
use officevisor::{Config, LogWriter, Simulation, Subscribe, Workload};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let path = std::env::args()
        .nth(1)
        .context("usage: officevisor <workload-file>")?;

    let workload = Workload::from_path(&path)
        .with_context(|| format!("loading workload from {path}"))?;
    println!(
        "starting office-hours simulation with {} students",
        workload.len()
    );

    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];
    let sim = Simulation::with_subscribers(Config::default(), workload, subs);

    let token = CancellationToken::new();
    tokio::spawn({
        let token = token.clone();
        async move {
            if shutdown::wait_for_shutdown_signal().await.is_ok() {
                token.cancel();
            }
        }
    });

    let completed = sim.run_with_token(token).await;
    println!("office-hours simulation done: {completed} students helped");
    Ok(())
}
