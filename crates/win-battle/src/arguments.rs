use {
    alloy::signers::{Signer, local::PrivateKeySigner},
    contracts::DEFAULT_ARTIFACTS_DIR,
    std::{path::PathBuf, time::Duration},
    tracing::Level,
    url::Url,
};

#[derive(clap::Parser)]
pub struct LoggingArguments {
    #[clap(
        long,
        env,
        default_value = "warn,win_battle=info,contracts=info,ethrpc=info"
    )]
    pub log_filter: String,

    /// Events at or above this level are logged to stderr and all others to
    /// stdout. By default every log goes to stderr so that stdout only
    /// carries the status lines.
    #[clap(long, env)]
    pub log_stderr_threshold: Option<Level>,

    /// Log events as JSON.
    #[clap(long, env)]
    pub log_json: bool,
}

impl LoggingArguments {
    pub fn observe_config(&self) -> observe::Config {
        observe::Config::new(
            &self.log_filter,
            self.log_stderr_threshold,
            self.log_json,
        )
    }
}

#[derive(clap::Parser)]
pub struct Arguments {
    #[clap(flatten)]
    pub logging: LoggingArguments,

    /// The Ethereum node URL to connect to.
    #[clap(long, env, default_value = "http://localhost:8545")]
    pub node_url: Url,

    /// Hex encoded private key of the account deploying and calling the
    /// contract.
    #[clap(long, env, hide_env_values = true)]
    pub private_key: PrivateKeySigner,

    /// Directory containing the compiled contract artifacts.
    #[clap(long, env, default_value = DEFAULT_ARTIFACTS_DIR)]
    pub artifacts_dir: PathBuf,

    /// Maximum time to wait for a submitted transaction to be confirmed.
    #[clap(
        long,
        env,
        default_value = "5m",
        value_parser = humantime::parse_duration,
    )]
    pub confirmation_timeout: Duration,

    /// Number of blocks (including the one the transaction was mined in)
    /// required before a transaction counts as confirmed.
    #[clap(
        long,
        env,
        default_value = "1",
        value_parser = clap::value_parser!(u64).range(1..),
    )]
    pub confirmations: u64,
}

impl std::fmt::Display for Arguments {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Self {
            logging,
            node_url,
            private_key,
            artifacts_dir,
            confirmation_timeout,
            confirmations,
        } = self;

        writeln!(f, "log_filter: {}", logging.log_filter)?;
        writeln!(f, "log_stderr_threshold: {:?}", logging.log_stderr_threshold)?;
        writeln!(f, "log_json: {}", logging.log_json)?;
        writeln!(f, "node_url: {node_url}")?;
        writeln!(f, "private_key: SECRET")?;
        writeln!(f, "account: {}", private_key.address())?;
        writeln!(f, "artifacts_dir: {}", artifacts_dir.display())?;
        writeln!(f, "confirmation_timeout: {confirmation_timeout:?}")?;
        writeln!(f, "confirmations: {confirmations}")?;
        Ok(())
    }
}
