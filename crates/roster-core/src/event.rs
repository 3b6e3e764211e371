//! Mutation events and the listener seam.
//!
//! Every successful mutation notifies registered listeners synchronously,
//! inside the same transaction as the write. A listener error vetoes the
//! mutation and the store rolls the whole transaction back.

use thiserror::Error;

use crate::{
  contact::{Contact, ContactId, UserId},
  status::Status,
};

/// A mutation notification.
#[derive(Debug, Clone)]
pub enum ContactEvent {
  Created {
    id:    ContactId,
    actor: UserId,
  },
  Modified {
    id:    ContactId,
    actor: UserId,
  },
  /// Carries the record as it stood immediately before deletion, for audit
  /// consumers that need the prior field values.
  Deleted {
    contact: Box<Contact>,
    actor:   UserId,
  },
  StatusChanged {
    id:     ContactId,
    status: Status,
    actor:  UserId,
  },
}

impl ContactEvent {
  pub fn name(&self) -> &'static str {
    match self {
      Self::Created { .. } => "contact-created",
      Self::Modified { .. } => "contact-modified",
      Self::Deleted { .. } => "contact-deleted",
      Self::StatusChanged { .. } => "contact-status-changed",
    }
  }
}

/// Returned by a listener to veto the mutation it was notified of.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct ListenerError(pub String);

/// Observer invoked synchronously after each mutation, before commit.
pub trait ContactListener: Send + Sync {
  fn on_event(&self, event: &ContactEvent) -> Result<(), ListenerError>;
}
