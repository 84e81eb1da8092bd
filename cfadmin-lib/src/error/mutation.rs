//! Mutation error types

use crate::mutation::Ticket;

use super::FieldError;

/// Errors surfaced by the mutation layer.
///
/// Sinks report persistence failures through `Rejected` and `Failed`; the
/// queue itself only raises `UnknownTicket`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MutationError {
    /// The backend refused the command (validation, duplicate entity, ...).
    #[error("mutation rejected: {message}")]
    Rejected { message: String },

    /// The command could not be delivered or the backend failed.
    #[error("mutation failed: {message}")]
    Failed { message: String },

    /// A ticket was resolved twice or never issued by this queue.
    #[error("unknown mutation ticket {0}")]
    UnknownTicket(Ticket),

    /// The row carries no usable identifier.
    #[error("row has no '{field}' identifier")]
    MissingId { field: String },

    /// The targeted field cannot be used by this command.
    #[error(transparent)]
    Field(#[from] FieldError),
}

impl MutationError {
    /// Creates a rejection error.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    /// Creates a failure error.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }
}
