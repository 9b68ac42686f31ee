//! Trait definitions for external system boundaries.
//!
//! These traits abstract the artifact lookup and blockchain interactions to
//! enable unit testing with mocks.

use {
    alloy::primitives::{Address, BlockNumber, Bytes, TxHash},
    anyhow::{Context, Result},
    contracts::{Artifact, ArtifactRegistry},
    std::time::Duration,
};

/// A submitted transaction that has not been awaited yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingTx(pub TxHash);

/// Terminal state of an awaited transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Confirmation {
    pub tx_hash: TxHash,
    pub block_number: Option<BlockNumber>,
    pub gas_used: u64,
    /// Whether the transaction executed without reverting.
    pub success: bool,
    /// Address of the contract created by a deployment transaction.
    pub contract_address: Option<Address>,
}

#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    /// The node refused the transaction because it reverts.
    #[error("transaction reverts: {0}")]
    Reverted(String),

    #[error("transaction not confirmed after {0:?}")]
    Timeout(Duration),

    #[error(transparent)]
    Node(#[from] anyhow::Error),
}

/// Resolves contract names to compiled artifacts.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait TemplateSource: Send + Sync {
    /// Returns `Ok(None)` if there is no artifact for the contract.
    async fn template(&self, name: &str) -> Result<Option<Artifact>>;
}

#[async_trait::async_trait]
impl TemplateSource for ArtifactRegistry {
    async fn template(&self, name: &str) -> Result<Option<Artifact>> {
        // Scanning and reading the artifacts directory is blocking file I/O.
        let registry = self.clone();
        let name = name.to_string();
        tokio::task::spawn_blocking(move || registry.get(&name))
            .await
            .context("artifact lookup task failed")?
    }
}

/// Abstracts blockchain write operations. Submitting and awaiting a
/// transaction are separate steps so the caller decides when to block.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Chain: Send + Sync {
    /// Submits a transaction creating a contract from `code`.
    async fn deploy(&self, code: Bytes) -> Result<PendingTx, ChainError>;

    /// Submits a transaction calling the contract at `to` with `calldata`.
    async fn call(&self, to: Address, calldata: Bytes) -> Result<PendingTx, ChainError>;

    /// Waits until the transaction is confirmed. A mined but reverted
    /// transaction is a confirmation with `success == false`.
    async fn confirm(&self, tx: PendingTx) -> Result<Confirmation, ChainError>;
}
