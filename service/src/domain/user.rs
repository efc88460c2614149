//! [`User`] definitions.

use derive_more::{AsRef, Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};

/// Person listed in the directory.
///
/// Immutable once fetched: a refetch replaces the whole [`User`].
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct User {
    /// ID of this [`User`].
    pub id: Id,

    /// [`Name`] of this [`User`].
    pub name: Name,

    /// [`Username`] of this [`User`].
    pub username: Username,

    /// [`Email`] of this [`User`].
    pub email: Email,

    /// [`Phone`] of this [`User`].
    pub phone: Phone,

    /// [`Website`] of this [`User`].
    pub website: Website,

    /// [`Address`] of this [`User`].
    pub address: Address,

    /// [`Company`] this [`User`] works for.
    pub company: Company,
}

/// ID of a [`User`], assigned by the data source.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
pub struct Id(u64);

/// Defines a textual field of a [`User`].
macro_rules! define_text {
    ($(#[doc = $doc:literal] $name:ident),* $(,)?) => {$(
        #[doc = $doc]
        #[derive(
            AsRef,
            Clone,
            Debug,
            Deserialize,
            Display,
            Eq,
            From,
            Hash,
            PartialEq,
            Serialize,
        )]
        #[as_ref(str, String)]
        #[from(&str, String)]
        pub struct $name(String);

        impl $name {
            #[doc = concat!("Creates a new [`", stringify!($name), "`].")]
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }
        }
    )*};
}

define_text! {
    /// Full name of a [`User`].
    Name,

    /// Handle of a [`User`].
    Username,

    /// Email address of a [`User`].
    Email,

    /// Phone number of a [`User`], in whatever format the source provides.
    Phone,

    /// Website (host without a scheme) of a [`User`].
    Website,
}

/// Postal address of a [`User`].
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Address {
    /// Street name.
    pub street: String,

    /// Suite or apartment.
    pub suite: String,

    /// City name.
    pub city: String,

    /// Postal code.
    pub zipcode: String,

    /// [`Geo`] location of this [`Address`].
    pub geo: Geo,
}

/// Geographic coordinates.
///
/// Kept as provided by the source, since they're only ever displayed.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Geo {
    /// Latitude.
    pub lat: String,

    /// Longitude.
    pub lng: String,
}

/// Employer of a [`User`].
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    /// Company name.
    pub name: String,

    /// Company motto.
    pub catch_phrase: String,

    /// Line of business.
    pub bs: String,
}
