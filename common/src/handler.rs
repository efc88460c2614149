//! [`Handler`] abstractions.

use std::future::Future;

/// Executable handler.
///
/// Both data sources and queries are expressed as [`Handler`]s, so a single
/// type may handle many different `Args` (one implementation per operation).
pub trait Handler<Args = ()> {
    /// Type of successful [`Handler`] result.
    type Ok;

    /// Type of this [`Handler`] error.
    type Err;

    /// Executes this [`Handler`] with the provided arguments.
    ///
    /// The returned [`Future`] is not required to be [`Send`]: handlers are
    /// driven from a single-threaded local task set.
    fn execute(
        &self,
        args: Args,
    ) -> impl Future<Output = Result<Self::Ok, Self::Err>>;
}
