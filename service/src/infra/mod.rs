//! Infrastructure layer.

pub mod source;

pub use self::source::Source;
#[cfg(feature = "http")]
pub use self::source::{http, Http};
