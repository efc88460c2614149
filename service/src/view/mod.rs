//! View controllers feeding a presentation layer.
//!
//! Views are driven from a single [`LocalSet`]: every input (user action,
//! settled query, fetch completion) is handled to completion before the
//! next one, so the published state is always consistent.
//!
//! [`LocalSet`]: tokio::task::LocalSet

pub mod debounce;
pub mod detail;
pub mod fetch;
pub mod list;

use std::time::Duration;

use common::pagination;
use smart_default::SmartDefault;

pub use self::{
    debounce::Debouncer,
    detail::DetailView,
    fetch::{Lifecycle, State as FetchState},
    list::{ListView, Snapshot},
};

/// Views configuration.
#[derive(Clone, Copy, Debug, SmartDefault)]
pub struct Config {
    /// Number of [`User`]s on a single page of a [`ListView`].
    ///
    /// [`User`]: crate::domain::User
    #[default(pagination::DEFAULT_SIZE)]
    pub page_size: pagination::Size,

    /// Quiet period after which a typed search query settles.
    #[default(debounce::DEFAULT_QUIET_PERIOD)]
    pub quiet_period: Duration,
}
