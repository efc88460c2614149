//! [`Query`] collection related to a single [`User`].

use common::operations::By;

use crate::domain::{user, User};
#[cfg(doc)]
use crate::Query;

use super::SourceQuery;

/// Queries a [`User`] by its [`user::Id`].
///
/// A missing [`User`] is reported as [`source::Error::NotFound`].
///
/// [`source::Error::NotFound`]: crate::infra::source::Error::NotFound
pub type ById = SourceQuery<By<User, user::Id>>;
