//! Errors raised by a pipeline stage.
//!
//! Stages run detached, so these are logged and dropped by the worker.
//! Only the on-demand CLI paths hand them back to a caller.

use thiserror::Error;

use crate::domain::foundation::UserId;
use crate::ports::{CompletionError, PersistenceError, TransportError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Completion(#[from] CompletionError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The agent answered with something other than text.
    #[error("agent reply carried no text")]
    NonTextReply,

    #[error("no diagnostic stored for user {0}")]
    MissingDiagnostic(UserId),

    #[error("pipeline queue is full")]
    QueueFull,

    #[error("pipeline worker has stopped")]
    QueueClosed,
}
