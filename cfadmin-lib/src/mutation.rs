//! Command-pattern mutations with explicit reconciliation.
//!
//! Edits, deletes and status toggles are issued as [`MutationCommand`]s to a
//! [`MutationSink`] (the REST or Supabase layer). While a command is in flight
//! the [`MutationQueue`] reports its target row as pending. Once the sink
//! answers, the caller reconciles its row list from the authoritative
//! [`MutationOutcome`] instead of guessing the result up front, so a failure
//! leaves nothing to roll back.
//!
//! # Example
//!
//! ```
//! use async_trait::async_trait;
//! use cfadmin_lib::error::MutationError;
//! use cfadmin_lib::model::Row;
//! use cfadmin_lib::mutation::{self, MutationCommand, MutationOutcome, MutationQueue, MutationSink};
//!
//! struct AcceptAll;
//!
//! #[async_trait]
//! impl MutationSink for AcceptAll {
//!     async fn apply(&self, command: &MutationCommand) -> Result<MutationOutcome, MutationError> {
//!         match command {
//!             MutationCommand::Edit { row } => Ok(MutationOutcome::Updated(row.clone())),
//!             MutationCommand::Delete { id } => Ok(MutationOutcome::Deleted(id.clone())),
//!             MutationCommand::SetField { .. } => Ok(MutationOutcome::Refetch),
//!         }
//!     }
//! }
//!
//! # async fn run() -> Result<(), MutationError> {
//! let mut rows = vec![Row::new().set("id", 1).set("active", true)];
//! let mut queue = MutationQueue::default();
//!
//! let command = MutationCommand::delete(1);
//! let outcome = mutation::dispatch(&mut queue, &AcceptAll, command).await?;
//! outcome.reconcile(&mut rows, queue.id_field());
//! assert!(rows.is_empty());
//! # Ok(())
//! # }
//! ```

use std::fmt;

use async_trait::async_trait;

use crate::config::EngineConfig;
use crate::error::MutationError;
use crate::model::Row;
use crate::model::Value;

/// Identifies one issued command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A change the user asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationCommand {
    /// Persist an edited row.
    Edit { row: Row },
    /// Delete the row with this id.
    Delete { id: Value },
    /// Set one field of the row with this id.
    SetField {
        id: Value,
        field: String,
        value: Value,
    },
}

impl MutationCommand {
    /// Creates an edit command.
    pub fn edit(row: Row) -> Self {
        Self::Edit { row }
    }

    /// Creates a delete command.
    pub fn delete(id: impl Into<Value>) -> Self {
        Self::Delete { id: id.into() }
    }

    /// Creates a set-field command.
    pub fn set_field(id: impl Into<Value>, field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::SetField {
            id: id.into(),
            field: field.into(),
            value: value.into(),
        }
    }

    /// Builds the command that flips the boolean `field` of `row`.
    ///
    /// A null field counts as `false`.
    pub fn toggle(row: &Row, field: &str, id_field: &str) -> Result<Self, MutationError> {
        let id = row
            .get(id_field)
            .filter(|id| !id.is_null())
            .cloned()
            .ok_or_else(|| MutationError::MissingId {
                field: id_field.to_string(),
            })?;
        let current = row.get_bool(field)?.unwrap_or(false);
        Ok(Self::SetField {
            id,
            field: field.to_string(),
            value: Value::Bool(!current),
        })
    }

    /// Identifier of the row this command targets.
    pub fn target<'a>(&'a self, id_field: &str) -> Option<&'a Value> {
        match self {
            Self::Edit { row } => row.get(id_field).filter(|id| !id.is_null()),
            Self::Delete { id } | Self::SetField { id, .. } => Some(id),
        }
    }

    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Edit { .. } => "edit",
            Self::Delete { .. } => "delete",
            Self::SetField { .. } => "set_field",
        }
    }
}

/// The authoritative result of a command.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome {
    /// The backend's copy of the row after the change.
    Updated(Row),
    /// The row with this id no longer exists.
    Deleted(Value),
    /// The backend gave no usable row; the list must be fetched again.
    Refetch,
}

impl MutationOutcome {
    /// Applies the outcome to the caller's row list, matching rows by
    /// `id_field`.
    ///
    /// `Updated` replaces the matching row in place (or appends it when no
    /// row matches) and `Deleted` removes it. Returns `false` for `Refetch`,
    /// meaning the list is no longer authoritative.
    pub fn reconcile(self, rows: &mut Vec<Row>, id_field: &str) -> bool {
        let same_id = |row: &Row, id: &Value| row.get(id_field).is_some_and(|v| v.strict_eq(id));
        match self {
            Self::Updated(updated) => {
                let position = updated
                    .get(id_field)
                    .filter(|id| !id.is_null())
                    .and_then(|id| rows.iter().position(|row| same_id(row, id)));
                match position {
                    Some(index) => rows[index] = updated,
                    None => rows.push(updated),
                }
                true
            }
            Self::Deleted(id) => {
                rows.retain(|row| !same_id(row, &id));
                true
            }
            Self::Refetch => false,
        }
    }
}

/// The persistence layer commands are delivered to.
///
/// Implementations wrap the REST client or the Supabase table client; the
/// table layer never talks to either directly.
#[async_trait]
pub trait MutationSink: Send + Sync {
    /// Performs the command and reports what the backend now holds.
    async fn apply(&self, command: &MutationCommand) -> Result<MutationOutcome, MutationError>;
}

/// A command that has been issued and not yet resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingMutation {
    pub ticket: Ticket,
    pub command: MutationCommand,
    /// Identifier of the targeted row, when known.
    pub target: Option<Value>,
}

/// Tracks in-flight commands.
#[derive(Debug)]
pub struct MutationQueue {
    id_field: String,
    next_ticket: u64,
    pending: Vec<PendingMutation>,
}

impl Default for MutationQueue {
    fn default() -> Self {
        Self::new("id")
    }
}

impl MutationQueue {
    /// Creates a queue matching rows by `id_field`.
    pub fn new(id_field: impl Into<String>) -> Self {
        Self {
            id_field: id_field.into(),
            next_ticket: 0,
            pending: Vec::new(),
        }
    }

    /// Creates a queue using the configured id field.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.id_field.clone())
    }

    /// Field rows are matched by.
    pub fn id_field(&self) -> &str {
        &self.id_field
    }

    /// Records a command as pending and returns its ticket.
    pub fn issue(&mut self, command: MutationCommand) -> Ticket {
        self.next_ticket += 1;
        let ticket = Ticket(self.next_ticket);
        let target = command.target(&self.id_field).cloned();
        log::debug!("issuing {} mutation {}", command.kind(), ticket);
        self.pending.push(PendingMutation {
            ticket,
            command,
            target,
        });
        ticket
    }

    /// Settles a ticket with the sink's result and hands the result back.
    ///
    /// Fails with [`MutationError::UnknownTicket`] for tickets that are not
    /// pending.
    pub fn resolve(
        &mut self,
        ticket: Ticket,
        result: Result<MutationOutcome, MutationError>,
    ) -> Result<MutationOutcome, MutationError> {
        let index = self
            .pending
            .iter()
            .position(|p| p.ticket == ticket)
            .ok_or(MutationError::UnknownTicket(ticket))?;
        let settled = self.pending.remove(index);

        match &result {
            Ok(_) => log::debug!("{} mutation {} settled", settled.command.kind(), ticket),
            Err(err) => log::warn!("{} mutation {} failed: {}", settled.command.kind(), ticket, err),
        }
        result
    }

    /// Returns `true` if a pending command targets the row with `id`.
    pub fn is_pending(&self, id: &Value) -> bool {
        self.pending
            .iter()
            .any(|p| p.target.as_ref().is_some_and(|target| target.strict_eq(id)))
    }

    /// Commands not yet resolved, oldest first.
    pub fn pending(&self) -> &[PendingMutation] {
        &self.pending
    }

    /// Returns `true` when nothing is in flight.
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Issues `command`, awaits the sink and resolves the ticket.
pub async fn dispatch<S>(
    queue: &mut MutationQueue,
    sink: &S,
    command: MutationCommand,
) -> Result<MutationOutcome, MutationError>
where
    S: MutationSink + ?Sized,
{
    let ticket = queue.issue(command.clone());
    let result = sink.apply(&command).await;
    queue.resolve(ticket, result)
}
