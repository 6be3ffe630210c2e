//! Errors of the bridging layer.
use thiserror::Error;

/// Errors raised while shuttling data between a plant and the platform.
///
/// All of them are fatal to the current episode. The external driver decides
/// whether to abort or restart; nothing in this layer retries.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The signal vector does not match the plant contract.
    #[error("signal vector has {got} elements, the model expects {expected}")]
    SignalArity {
        /// Arity the plant contract documents.
        expected: usize,
        /// Arity actually received.
        got: usize,
    },

    /// A formatter ran before `convert_input` populated the state.
    #[error("no state has been converted in this episode")]
    StateUnset,

    /// The step formatter ran before any action was issued.
    #[error("no action has been issued in this episode")]
    ActionUnset,

    /// A message from the platform did not decode into the typed record.
    #[error("malformed platform message: {0}")]
    Message(#[from] serde_json::Error),
}
