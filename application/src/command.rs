//! [`Command`] typed into the terminal.

use std::str::FromStr;

use derive_more::{Display, Error};
use service::domain::user;

/// Prefix distinguishing a [`Command`] from a search query.
const PREFIX: char = ':';

/// Action requested by a line of terminal input.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Command {
    /// Changes the search query to the provided text.
    ///
    /// Any line not starting with `:` is a search query, including the empty
    /// one clearing the search. A leading `::` searches for a literal `:`.
    Search(String),

    /// Jumps to the page with the provided 1-based number.
    Page(usize),

    /// Jumps to the next page.
    Next,

    /// Jumps to the previous page.
    Previous,

    /// Opens details of the [`User`] with the provided [`user::Id`].
    ///
    /// [`User`]: service::domain::User
    Open(user::Id),

    /// Returns from the details to the list.
    Back,

    /// Fetches the currently displayed records again.
    Reload,

    /// Exits the application.
    Quit,
}

/// Error of parsing a [`Command`].
#[derive(Clone, Debug, Display, Eq, Error, PartialEq)]
pub enum ParseError {
    /// [`Command`] is not known.
    #[display("unknown command `:{_0}`, try `:help`")]
    Unknown(#[error(not(source))] String),

    /// [`Command`] requires an argument that is missing or malformed.
    #[display("`:{_0}` expects {_1}")]
    BadArgument(
        #[error(not(source))] &'static str,
        #[error(not(source))] &'static str,
    ),

    /// Help is requested instead of a [`Command`].
    #[display("{}", HELP)]
    Help,
}

/// Help on the available [`Command`]s.
pub const HELP: &str = "\
Type any text to search users by name or email.
  :page N    jump to page N
  :next      jump to the next page
  :prev      jump to the previous page
  :open ID   show details of the user with ID
  :back      return to the list
  :reload    fetch the data again
  :quit      exit";

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let Some(command) = line.strip_prefix(PREFIX) else {
            return Ok(Self::Search(line.to_owned()));
        };
        if command.starts_with(PREFIX) {
            return Ok(Self::Search(command.to_owned()));
        }

        let mut words = command.split_whitespace();
        let name = words.next().unwrap_or_default();
        let argument = words.next();
        let excess = words.next().is_some();
        let page = ParseError::BadArgument("page", "a single page number");
        let open = ParseError::BadArgument("open", "a single user ID");
        Ok(match (name, argument, excess) {
            ("page" | "p", _, true) => return Err(page),
            ("page" | "p", arg, false) => {
                Self::Page(arg.and_then(|n| n.parse().ok()).ok_or(page)?)
            }
            ("open" | "o", _, true) => return Err(open),
            ("open" | "o", arg, false) => {
                Self::Open(arg.and_then(|id| id.parse().ok()).ok_or(open)?)
            }
            ("next" | "n", None, _) => Self::Next,
            ("prev" | "previous", None, _) => Self::Previous,
            ("back" | "b", None, _) => Self::Back,
            ("reload" | "r", None, _) => Self::Reload,
            ("quit" | "q", None, _) => Self::Quit,
            ("help" | "h", None, _) => return Err(ParseError::Help),
            _ => return Err(ParseError::Unknown(command.trim().to_owned())),
        })
    }
}
