use alloy::transports::{RpcError, TransportError};

pub trait TransportErrorExt {
    /// Returns whether the node rejected the request because executing the
    /// transaction reverted (e.g. during gas estimation).
    fn is_revert(&self) -> bool;

    /// The message the node attached to a revert.
    fn revert_reason(&self) -> Option<String>;
}

impl TransportErrorExt for TransportError {
    fn is_revert(&self) -> bool {
        match self {
            // Nodes disagree on how reverts are reported: some attach the revert
            // data, others only mention it in the message (e.g. a `require`
            // without a reason string yields empty revert data).
            RpcError::ErrorResp(err) => {
                let has_revert_data = err.as_revert_data().is_some();
                tracing::debug!(?err, %has_revert_data, "transport rpc error");
                has_revert_data || err.message.to_lowercase().contains("revert")
            }
            _ => false,
        }
    }

    fn revert_reason(&self) -> Option<String> {
        match self {
            RpcError::ErrorResp(err) if self.is_revert() => Some(err.message.to_string()),
            _ => None,
        }
    }
}

/// Create an arbitrary error response that classifies as a revert.
/// Useful for testing.
#[cfg(any(test, feature = "test-util"))]
pub fn testing_revert_error(message: &'static str) -> TransportError {
    TransportError::ErrorResp(alloy::rpc::json_rpc::ErrorPayload {
        code: 3,
        message: message.into(),
        data: None,
    })
}

/// Create an arbitrary error that classifies as a node error.
/// Useful for testing.
#[cfg(any(test, feature = "test-util"))]
pub fn testing_node_error() -> TransportError {
    TransportError::ErrorResp(alloy::rpc::json_rpc::ErrorPayload::internal_error())
}
