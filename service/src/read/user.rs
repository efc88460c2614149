//! [`User`] read model definition.
//!
//! [`User`]: crate::domain::User

pub mod list {
    //! [`User`]s list definitions.

    use crate::domain::User;

    /// Filter narrowing a list of [`User`]s down to the ones matching a
    /// search query.
    #[derive(Clone, Debug, Default, Eq, PartialEq)]
    pub struct Filter {
        /// Search query, as typed (not trimmed).
        query: String,

        /// Lowercased `query`, compared against lowercased fields.
        needle: String,
    }

    impl Filter {
        /// Creates a new [`Filter`] out of the provided search `query`.
        #[must_use]
        pub fn new(query: impl Into<String>) -> Self {
            let query = query.into();
            let needle = query.to_lowercase();
            Self { query, needle }
        }

        /// Returns the search query of this [`Filter`].
        #[must_use]
        pub fn query(&self) -> &str {
            &self.query
        }

        /// Indicates whether this [`Filter`] lets every [`User`] through.
        ///
        /// Only an exactly empty query does so: whitespace is searched for
        /// as is.
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.query.is_empty()
        }

        /// Checks whether the provided [`User`] passes this [`Filter`].
        ///
        /// A [`User`] passes if its name or email contains the query as a
        /// case-insensitive substring.
        #[must_use]
        pub fn matches(&self, user: &User) -> bool {
            if self.is_empty() {
                return true;
            }
            let fields: [&str; 2] = [user.name.as_ref(), user.email.as_ref()];
            fields
                .into_iter()
                .any(|f| f.to_lowercase().contains(&self.needle))
        }

        /// Applies this [`Filter`] to the provided `users`, preserving their
        /// order.
        #[must_use]
        pub fn apply<'u, I>(&self, users: I) -> Vec<&'u User>
        where
            I: IntoIterator<Item = &'u User>,
        {
            users.into_iter().filter(|u| self.matches(u)).collect()
        }
    }

}
