//! Fetch lifecycle tracking.

use std::sync::Arc;

use derive_more::Display;
use tracerr::Traced;
use tracing as log;

use crate::infra::source;

/// Cause of a failed fetch, kept for diagnostics.
pub type Cause = Arc<Traced<source::Error>>;

/// State of a logical fetch request.
#[derive(Clone, Debug, Default)]
pub enum State<T> {
    /// Nothing has been requested yet.
    #[default]
    Idle,

    /// The latest request is in flight.
    Loading,

    /// The latest request succeeded.
    Success(T),

    /// The latest request failed.
    Error(Cause),
}

impl<T> State<T> {
    /// Indicates whether this [`State`] is [`State::Loading`].
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Returns the payload of a [`State::Success`].
    #[must_use]
    pub fn success(&self) -> Option<&T> {
        match self {
            Self::Success(v) => Some(v),
            Self::Idle | Self::Loading | Self::Error(_) => None,
        }
    }

    /// Returns the [`Cause`] of a [`State::Error`].
    #[must_use]
    pub fn error(&self) -> Option<&Cause> {
        match self {
            Self::Error(e) => Some(e),
            Self::Idle | Self::Loading | Self::Success(_) => None,
        }
    }
}

/// Sequence number of an issued fetch request.
#[derive(Clone, Copy, Debug, Display, Eq, Ord, PartialEq, PartialOrd)]
#[display("#{_0}")]
pub struct Ticket(u64);

/// Lifecycle of fetches issued by a single view.
///
/// Only the latest issued [`Ticket`] may change the [`State`]: completions
/// of superseded requests are discarded, whatever order they arrive in.
#[derive(Debug)]
pub struct Lifecycle<T> {
    /// Latest issued [`Ticket`].
    latest: Ticket,

    /// Current [`State`].
    state: State<T>,
}

impl<T> Default for Lifecycle<T> {
    fn default() -> Self {
        Self {
            latest: Ticket(0),
            state: State::Idle,
        }
    }
}

impl<T> Lifecycle<T> {
    /// Returns the current [`State`].
    #[must_use]
    pub fn state(&self) -> &State<T> {
        &self.state
    }

    /// Issues a new request, superseding all the in-flight ones, and
    /// switches to [`State::Loading`].
    pub fn begin(&mut self) -> Ticket {
        self.latest = Ticket(self.latest.0 + 1);
        self.state = State::Loading;
        log::debug!("fetch {} issued", self.latest);
        self.latest
    }

    /// Indicates whether the provided [`Ticket`] is the latest issued one.
    #[must_use]
    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket == self.latest
    }

    /// Completes the request with the provided [`Ticket`].
    ///
    /// Returns `false` (leaving the [`State`] untouched) if the request has
    /// been superseded.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        result: Result<T, Traced<source::Error>>,
    ) -> bool {
        if !self.is_current(ticket) {
            log::debug!(
                "fetch {ticket} discarded: superseded by {}",
                self.latest,
            );
            return false;
        }
        self.state = match result {
            Ok(v) => State::Success(v),
            Err(e) => State::Error(Arc::new(e)),
        };
        true
    }
}
