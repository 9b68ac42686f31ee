use {
    crate::traits::{Chain, ChainError, Confirmation, PendingTx},
    alloy::{
        network::{ReceiptResponse, TransactionBuilder},
        primitives::{Address, Bytes},
        providers::{
            DynProvider,
            PendingTransactionBuilder,
            PendingTransactionError,
            Provider,
            WatchTxError,
        },
        rpc::types::TransactionRequest,
        transports::TransportError,
    },
    anyhow::anyhow,
    ethrpc::errors::TransportErrorExt,
    std::time::Duration,
};

/// [`Chain`] backed by a signing node connection.
pub struct AlloyChain {
    provider: DynProvider,
    confirmations: u64,
    timeout: Duration,
}

impl AlloyChain {
    pub fn new(provider: DynProvider, confirmations: u64, timeout: Duration) -> Self {
        Self {
            provider,
            confirmations,
            timeout,
        }
    }

    async fn submit(&self, tx: TransactionRequest) -> Result<PendingTx, ChainError> {
        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(submission_error)?;
        let hash = *pending.tx_hash();
        tracing::debug!(?hash, "submitted transaction");
        Ok(PendingTx(hash))
    }
}

#[async_trait::async_trait]
impl Chain for AlloyChain {
    async fn deploy(&self, code: Bytes) -> Result<PendingTx, ChainError> {
        self.submit(TransactionRequest::default().with_deploy_code(code))
            .await
    }

    async fn call(&self, to: Address, calldata: Bytes) -> Result<PendingTx, ChainError> {
        self.submit(
            TransactionRequest::default()
                .with_to(to)
                .with_input(calldata),
        )
        .await
    }

    async fn confirm(&self, tx: PendingTx) -> Result<Confirmation, ChainError> {
        let receipt = PendingTransactionBuilder::new(self.provider.root().clone(), tx.0)
            .with_required_confirmations(self.confirmations)
            .with_timeout(Some(self.timeout))
            .get_receipt()
            .await
            .map_err(|err| watch_error(err, self.timeout))?;
        Ok(confirmation(&receipt))
    }
}

fn confirmation(receipt: &impl ReceiptResponse) -> Confirmation {
    Confirmation {
        tx_hash: receipt.transaction_hash(),
        block_number: receipt.block_number(),
        gas_used: receipt.gas_used(),
        success: receipt.status(),
        contract_address: receipt.contract_address(),
    }
}

fn watch_error(err: PendingTransactionError, timeout: Duration) -> ChainError {
    match err {
        PendingTransactionError::TxWatcher(WatchTxError::Timeout) => ChainError::Timeout(timeout),
        err => ChainError::Node(anyhow!(err).context("failed to await transaction")),
    }
}

/// The node simulates transactions while filling in their gas limit, so a
/// transaction that would revert is usually rejected before it gets mined.
fn submission_error(err: TransportError) -> ChainError {
    match err.revert_reason() {
        Some(reason) => ChainError::Reverted(reason),
        None => ChainError::Node(anyhow!(err).context("failed to submit transaction")),
    }
}
