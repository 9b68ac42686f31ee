pub mod arguments;
pub mod chain;
pub mod contract;
pub mod error;
pub mod runner;
pub mod traits;

pub use {
    error::Error,
    runner::{Outcome, Runner},
};
use {chain::AlloyChain, contracts::ArtifactRegistry, std::io::Write};

/// Runs the workflow against the node and artifacts configured in `args`,
/// printing the status lines to stdout.
pub async fn start(args: arguments::Arguments) -> Result<Outcome, Error> {
    let templates = ArtifactRegistry::new(args.artifacts_dir);
    let provider = ethrpc::provider(&args.node_url, args.private_key);
    let chain = AlloyChain::new(provider, args.confirmations, args.confirmation_timeout);

    Runner::new(templates, chain)
        .run(&mut std::io::stdout())
        .await
}

/// Reports the result of a run and returns the process exit status. A failure
/// and all of its causes are written to `stderr` regardless of the log filter.
pub fn finish<T>(result: Result<T, Error>, stderr: &mut impl Write) -> i32 {
    match result {
        Ok(_) => 0,
        Err(err) => {
            let err = anyhow::Error::from(err);
            tracing::error!(?err, "win-battle failed");
            let _ = writeln!(stderr, "Error: {err:#}");
            1
        }
    }
}
