//! Plain text rendering of view states.

use std::fmt::Write as _;

use itertools::Itertools as _;
use service::{
    domain::User,
    view::{FetchState, Snapshot},
};

/// Width of the name column.
const NAME_WIDTH: usize = 24;

/// Width of the email column.
const EMAIL_WIDTH: usize = 26;

/// Width of the phone column.
const PHONE_WIDTH: usize = 22;

/// Renders the provided list [`Snapshot`].
#[must_use]
pub fn list(snapshot: &Snapshot) -> String {
    match &snapshot.state {
        FetchState::Idle => String::new(),
        FetchState::Loading => "Loading users...".to_owned(),
        FetchState::Error(_) => {
            "Failed to load users. Type `:reload` to retry.".to_owned()
        }
        FetchState::Success(_) => {
            let mut out = String::new();
            if !snapshot.query.is_empty() {
                _ = writeln!(
                    out,
                    "Search \"{}\": {} match(es)",
                    snapshot.query, snapshot.matched,
                );
            }
            if snapshot.users.is_empty() {
                out.push_str("No users found.");
                return out;
            }

            _ = writeln!(
                out,
                "{:>4}  {:<NAME_WIDTH$}  {:<EMAIL_WIDTH$}  \
                 {:<PHONE_WIDTH$}  Company",
                "ID", "Name", "Email", "Phone",
            );
            for user in &snapshot.users {
                _ = writeln!(
                    out,
                    "{:>4}  {:<NAME_WIDTH$}  {:<EMAIL_WIDTH$}  \
                     {:<PHONE_WIDTH$}  {}",
                    user.id,
                    truncate(user.name.as_ref(), NAME_WIDTH),
                    truncate(user.email.as_ref(), EMAIL_WIDTH),
                    truncate(user.phone.as_ref(), PHONE_WIDTH),
                    user.company.name,
                );
            }
            if snapshot.is_paginated() {
                _ = write!(
                    out,
                    "{}{}{}",
                    if snapshot.has_previous() { "< :prev  " } else { "" },
                    snapshot.page_numbers().format_with(" ", |n, f| {
                        if n == snapshot.page {
                            f(&format_args!("[{n}]"))
                        } else {
                            f(&n)
                        }
                    }),
                    if snapshot.has_next() { "  :next >" } else { "" },
                );
            }
            out.trim_end().to_owned()
        }
    }
}

/// Renders the provided details [`FetchState`] of a [`User`].
#[must_use]
pub fn detail(state: &FetchState<User>) -> String {
    let user = match state {
        FetchState::Idle | FetchState::Loading => {
            return "Loading user...".to_owned();
        }
        FetchState::Error(_) => {
            return "User not found. Type `:back` to return.".to_owned();
        }
        FetchState::Success(user) => user,
    };
    let User {
        id,
        name,
        username,
        email,
        phone,
        website,
        address,
        company,
    } = user;

    format!(
        "\
User #{id}: {name}

Personal Information
  Username:  @{username}
  Email:     {email}
  Phone:     {phone}
  Website:   http://{website}

Address
  {street}, {suite}
  {city} {zipcode}
  Geo:       {lat}, {lng}

Company
  {company_name}
  \"{catch_phrase}\"
  {bs}

Type `:back` to return.",
        street = address.street,
        suite = address.suite,
        city = address.city,
        zipcode = address.zipcode,
        lat = address.geo.lat,
        lng = address.geo.lng,
        company_name = company.name,
        catch_phrase = company.catch_phrase,
        bs = company.bs,
    )
}

/// Truncates the provided `text` to `width` characters, marking the cut
/// with `...`.
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_owned();
    }
    let kept = width.saturating_sub(3);
    text.chars().take(kept).chain("...".chars()).collect()
}
