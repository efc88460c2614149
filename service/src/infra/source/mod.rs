//! [`Source`]-related implementations.

#[cfg(feature = "http")]
pub mod http;

use derive_more::{Display, Error as StdError};

#[cfg(feature = "http")]
pub use self::http::Http;

/// Read-only operation of a remote record source.
pub use common::Handler as Source;

/// [`Source`] error.
#[derive(Debug, Display, StdError)]
pub enum Error {
    /// [`Source`] is unreachable or the request failed in transit.
    #[cfg(feature = "http")]
    #[display("request failed: {_0}")]
    Request(reqwest::Error),

    /// Requested record doesn't exist.
    #[display("record does not exist")]
    NotFound,

    /// [`Source`] responded with a non-success status.
    #[display("unexpected response status: {_0}")]
    Status(#[error(not(source))] u16),

    /// Payload doesn't match the expected record shape.
    #[display("malformed payload: {_0}")]
    Decode(serde_json::Error),
}

impl Error {
    /// Indicates whether this [`Error`] happened while transferring the
    /// payload (as opposed to decoding it).
    #[must_use]
    pub fn is_transport(&self) -> bool {
        !self.is_decode()
    }

    /// Indicates whether this [`Error`] is caused by a malformed payload.
    #[must_use]
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }
}
