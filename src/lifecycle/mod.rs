//! Request lifecycle - one in-flight submission per outcome slot
//!
//! Handles:
//! - The outcome state machine (Idle -> Loading -> Success | Failure)
//! - Blank-input and re-entrancy guards on submission
//! - Dropping completions that belong to an older submission
//!
//! Transitions go through [`RequestOutcome::reduce`], a pure function of
//! (state, event), so everything here is testable without a terminal.

use std::fmt::{self, Display};
use thiserror::Error;

/// Current state of one logical action
#[derive(Debug, Clone, PartialEq)]
pub enum RequestOutcome<T> {
    /// Nothing submitted yet
    Idle,
    /// A submission is in flight
    Loading,
    /// Last submission succeeded with this payload
    Success(T),
    /// Last submission failed with this user-facing message
    Failure(String),
}

impl<T> Default for RequestOutcome<T> {
    fn default() -> Self {
        RequestOutcome::Idle
    }
}

/// Inputs to the outcome reducer
#[derive(Debug, Clone, PartialEq)]
pub enum SlotEvent<T> {
    Submitted,
    Succeeded(T),
    Failed(String),
    Reset,
}

impl<T> RequestOutcome<T> {
    /// Pure transition function
    ///
    /// `Submitted` always moves to `Loading`, replacing any terminal state.
    /// Completions only apply while `Loading`; otherwise the state is kept.
    pub fn reduce(self, event: SlotEvent<T>) -> Self {
        match (self, event) {
            (_, SlotEvent::Submitted) => RequestOutcome::Loading,
            (_, SlotEvent::Reset) => RequestOutcome::Idle,
            (RequestOutcome::Loading, SlotEvent::Succeeded(payload)) => {
                RequestOutcome::Success(payload)
            }
            (RequestOutcome::Loading, SlotEvent::Failed(message)) => {
                RequestOutcome::Failure(message)
            }
            (state, _) => state,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, RequestOutcome::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, RequestOutcome::Loading)
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            RequestOutcome::Success(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            RequestOutcome::Failure(message) => Some(message),
            _ => None,
        }
    }
}

/// Why a submission was not started
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum Rejection {
    #[error("input is blank")]
    BlankInput,

    #[error("a request is already in flight")]
    InFlight,
}

/// Handle for one accepted submission
///
/// Carries the slot's sequence number at the time of `begin`; only the
/// latest ticket can resolve the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    seq: u64,
}

impl Ticket {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

impl Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.seq)
    }
}

/// Exclusive owner of one action's [`RequestOutcome`]
#[derive(Debug, Clone)]
pub struct OutcomeSlot<T> {
    name: &'static str,
    outcome: RequestOutcome<T>,
    seq: u64,
}

impl<T> OutcomeSlot<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            outcome: RequestOutcome::Idle,
            seq: 0,
        }
    }

    pub fn outcome(&self) -> &RequestOutcome<T> {
        &self.outcome
    }

    pub fn is_loading(&self) -> bool {
        self.outcome.is_loading()
    }

    /// Sequence number of the latest accepted submission (0 before any)
    pub fn latest_seq(&self) -> u64 {
        self.seq
    }

    /// Start a submission for `input`
    ///
    /// Blank input or an in-flight request leaves the slot untouched. On
    /// success the slot is already `Loading` when this returns, so a second
    /// call before the first resolves is rejected.
    pub fn begin(&mut self, input: &str) -> Result<Ticket, Rejection> {
        if input.trim().is_empty() {
            tracing::debug!(slot = self.name, "submission rejected: blank input");
            return Err(Rejection::BlankInput);
        }
        self.start()
    }

    /// Start a submission that takes no user input
    pub fn start(&mut self) -> Result<Ticket, Rejection> {
        if self.outcome.is_loading() {
            tracing::debug!(slot = self.name, "submission rejected: already loading");
            return Err(Rejection::InFlight);
        }
        self.seq += 1;
        self.apply(SlotEvent::Submitted);
        tracing::debug!(slot = self.name, seq = self.seq, "submission started");
        Ok(Ticket { seq: self.seq })
    }

    /// Apply the result of the submission identified by `ticket`
    ///
    /// Returns false when the ticket is stale and the result was dropped.
    pub fn resolve<E: Display>(&mut self, ticket: Ticket, result: Result<T, E>) -> bool {
        if ticket.seq != self.seq || !self.outcome.is_loading() {
            tracing::debug!(
                slot = self.name,
                ticket = %ticket,
                latest = self.seq,
                "dropping stale completion"
            );
            return false;
        }

        let event = match result {
            Ok(payload) => SlotEvent::Succeeded(payload),
            Err(e) => {
                let message = e.to_string();
                tracing::debug!(
                    slot = self.name,
                    seq = ticket.seq,
                    error = %message,
                    "submission failed"
                );
                SlotEvent::Failed(message)
            }
        };
        self.apply(event);
        true
    }

    /// Back to `Idle`; any in-flight result becomes stale
    pub fn reset(&mut self) {
        self.seq += 1;
        self.apply(SlotEvent::Reset);
    }

    fn apply(&mut self, event: SlotEvent<T>) {
        let current = std::mem::take(&mut self.outcome);
        self.outcome = current.reduce(event);
    }
}
