use {
    crate::{
        contract::DeployedContract,
        error::{Error, Step},
        traits::{Chain, ChainError, Confirmation, PendingTx, TemplateSource},
    },
    alloy::primitives::Address,
    std::io::Write,
};

pub const CONTRACT_NAME: &str = "WinBattle";
pub const FUNCTION_NAME: &str = "winBattle";
pub const ATTEMPTS: u64 = 10;

/// Result of a successful run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub address: Address,
    pub deployment: Confirmation,
    pub invocation: Confirmation,
}

/// Deploys the `WinBattle` contract and calls `winBattle(10)` on it, strictly
/// one after the other.
pub struct Runner<T, C> {
    templates: T,
    chain: C,
}

impl<T, C> Runner<T, C>
where
    T: TemplateSource,
    C: Chain,
{
    pub fn new(templates: T, chain: C) -> Self {
        Self { templates, chain }
    }

    /// Executes the workflow, writing the status lines to `out`. Stops at the
    /// first failure.
    pub async fn run(&self, out: &mut impl Write) -> Result<Outcome, Error> {
        let deployed = self.deploy().await?;
        writeln!(out, "{CONTRACT_NAME} deployed to: {}", deployed.address())?;

        tracing::info!("Calling {FUNCTION_NAME}...");
        let invocation = self.invoke(&deployed).await?;
        writeln!(out, "Battle completed!")?;

        Ok(Outcome {
            address: deployed.address(),
            deployment: deployed.confirmation,
            invocation,
        })
    }

    async fn deploy(&self) -> Result<Deployed, Error> {
        let artifact = self
            .templates
            .template(CONTRACT_NAME)
            .await
            .map_err(|source| Error::InvalidTemplate {
                name: CONTRACT_NAME.to_string(),
                source,
            })?
            .ok_or_else(|| Error::TemplateNotFound {
                name: CONTRACT_NAME.to_string(),
            })?;
        let code = artifact
            .creation_code()
            .map_err(|err| Error::InvalidTemplate {
                name: CONTRACT_NAME.to_string(),
                source: err.into(),
            })?;

        tracing::debug!(artifact = %artifact.name, bytes = code.len(), "deploying {CONTRACT_NAME}");
        let pending = self
            .chain
            .deploy(code)
            .await
            .map_err(|err| chain_error(Step::Deployment, err))?;
        let confirmation = self.await_confirmation(Step::Deployment, pending).await?;
        let address = confirmation.contract_address.ok_or_else(|| {
            Error::DeploymentFailed(format!(
                "receipt of {} carries no contract address",
                confirmation.tx_hash
            ))
        })?;
        tracing::info!(?address, tx = ?confirmation.tx_hash, "deployed {CONTRACT_NAME}");

        Ok(Deployed {
            contract: DeployedContract::new(address, artifact.abi),
            confirmation,
        })
    }

    async fn invoke(&self, deployed: &Deployed) -> Result<Confirmation, Error> {
        let attempts = ATTEMPTS.to_string();
        let calldata = deployed
            .contract
            .encode_call(FUNCTION_NAME, &[&attempts])
            .map_err(|err| Error::InvocationFailed(format!("{err:#}")))?;

        let pending = self
            .chain
            .call(deployed.address(), calldata)
            .await
            .map_err(|err| chain_error(Step::Invocation, err))?;
        let confirmation = self.await_confirmation(Step::Invocation, pending).await?;
        tracing::info!(tx = ?confirmation.tx_hash, "{FUNCTION_NAME} confirmed");
        Ok(confirmation)
    }

    async fn await_confirmation(&self, step: Step, tx: PendingTx) -> Result<Confirmation, Error> {
        tracing::debug!(hash = ?tx.0, %step, "awaiting confirmation");
        let confirmation = self
            .chain
            .confirm(tx)
            .await
            .map_err(|err| chain_error(step, err))?;
        if !confirmation.success {
            return Err(Error::failed(
                step,
                format!("transaction {} reverted", confirmation.tx_hash),
            ));
        }
        tracing::debug!(
            block = ?confirmation.block_number,
            gas_used = confirmation.gas_used,
            %step,
            "transaction confirmed"
        );
        Ok(confirmation)
    }
}

/// A confirmed deployment.
struct Deployed {
    contract: DeployedContract,
    confirmation: Confirmation,
}

impl Deployed {
    fn address(&self) -> Address {
        self.contract.address()
    }
}

fn chain_error(step: Step, err: ChainError) -> Error {
    match err {
        ChainError::Reverted(reason) => Error::failed(step, reason),
        ChainError::Timeout(after) => Error::Timeout { step, after },
        ChainError::Node(err) => Error::Network(err.context(format!("{step} failed"))),
    }
}
