//! [`Query`] collection related to the multiple [`User`]s.

#[cfg(doc)]
use crate::Query;
use crate::domain::User;

use super::SourceQuery;

/// Queries the full list of [`User`]s, in the order the source provides.
pub type List = SourceQuery<common::operations::By<Vec<User>, ()>>;
