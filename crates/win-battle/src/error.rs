use std::time::Duration;

/// Transactions the runner submits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Step {
    Deployment,
    Invocation,
}

/// Reasons a run fails. Every error is fatal, nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no compiled artifact found for contract {name}")]
    TemplateNotFound { name: String },

    #[error("artifact of contract {name} can't be deployed")]
    InvalidTemplate {
        name: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("deployment failed: {0}")]
    DeploymentFailed(String),

    #[error("invocation failed: {0}")]
    InvocationFailed(String),

    #[error("{step} was not confirmed within {after:?}")]
    Timeout { step: Step, after: Duration },

    #[error("network error")]
    Network(#[source] anyhow::Error),

    #[error("failed to write status")]
    Output(#[from] std::io::Error),
}

impl Error {
    /// The failure of `step` for the given reason.
    pub(crate) fn failed(step: Step, reason: String) -> Self {
        match step {
            Step::Deployment => Self::DeploymentFailed(reason),
            Step::Invocation => Self::InvocationFailed(reason),
        }
    }
}
