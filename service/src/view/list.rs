//! [`ListView`] of [`User`]s with incremental search and pagination.

use std::{num::NonZeroUsize, sync::Arc};

use common::pagination::{self, Page};
use tokio::{
    sync::{mpsc, watch},
    task,
};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{user, User},
    infra::source,
    query, read,
    view::{
        debounce::{Debouncer, Settled},
        fetch::{Lifecycle, State, Ticket},
        DetailView,
    },
    Query, Service,
};

/// Cached full list of [`User`]s.
pub type Records = Arc<[User]>;

/// Composed state of a [`ListView`], ready to be rendered.
#[derive(Clone, Debug)]
pub struct Snapshot {
    /// [`State`] of the list fetch.
    pub state: State<Records>,

    /// Settled search query the [`User`]s were filtered by.
    pub query: String,

    /// [`User`]s on the current page.
    ///
    /// Always empty unless the `state` is a [`State::Success`].
    pub users: Vec<User>,

    /// Number of [`User`]s matching the `query` across all pages.
    pub matched: usize,

    /// Current page.
    pub page: pagination::Number,

    /// Total number of pages (at least one).
    pub total_pages: NonZeroUsize,
}

impl Snapshot {
    /// Indicates whether the results span more than one page.
    #[must_use]
    pub fn is_paginated(&self) -> bool {
        self.total_pages.get() > 1
    }

    /// Indicates whether there is a page before the current one.
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.page > pagination::Number::FIRST
    }

    /// Indicates whether there is a page after the current one.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page.get() < self.total_pages.get()
    }

    /// Returns numbers of all the pages.
    pub fn page_numbers(&self) -> impl Iterator<Item = pagination::Number> {
        (1..=self.total_pages.get()).filter_map(pagination::Number::new)
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        compose(
            &State::Idle,
            &[],
            &read::user::list::Filter::default(),
            pagination::Number::FIRST,
            pagination::DEFAULT_SIZE,
        )
    }
}

/// Composes a [`Snapshot`] out of the provided inputs.
///
/// `records` are filtered first, then paginated. A `page` the filtered
/// `records` don't reach anymore is replaced with the first one.
///
/// `records` are shown only in a [`State::Success`]: any other [`State`]
/// yields a single blank page.
#[must_use]
pub fn compose(
    state: &State<Records>,
    records: &[User],
    filter: &read::user::list::Filter,
    page: pagination::Number,
    size: pagination::Size,
) -> Snapshot {
    let records: &[User] =
        if state.success().is_some() { records } else { &[] };
    let matched = filter.apply(records);
    let total_pages = pagination::total_pages(matched.len(), size);
    let page = if page.is_within(total_pages) {
        page
    } else {
        pagination::Number::FIRST
    };
    let users = Page::new(&matched, page, size)
        .items
        .iter()
        .map(|u| (*u).clone())
        .collect();

    Snapshot {
        state: state.clone(),
        query: filter.query().to_owned(),
        users,
        matched: matched.len(),
        page,
        total_pages,
    }
}

/// Event handled by a [`ListView`].
#[derive(Debug)]
enum Event {
    /// Search query has settled.
    Settled(Settled),

    /// List fetch has completed.
    Loaded(Ticket, Result<Vec<User>, Traced<source::Error>>),
}

impl From<Settled> for Event {
    fn from(settled: Settled) -> Self {
        Self::Settled(settled)
    }
}

/// Controller of a searchable, paginated list of [`User`]s.
///
/// Fetches the whole list once and filters/paginates it locally. Every
/// change is published as a [`Snapshot`] via [`ListView::subscribe()`].
///
/// Must be used inside a [`task::LocalSet`], with [`ListView::step()`]
/// polled to handle settled queries and fetch completions.
#[derive(Debug)]
pub struct ListView<Src> {
    /// [`Service`] to fetch [`User`]s with.
    service: Service<Src>,

    /// [`Lifecycle`] of the list fetch.
    lifecycle: Lifecycle<Records>,

    /// Cached [`User`]s of the latest successful fetch.
    records: Records,

    /// Search query as currently typed.
    raw_query: String,

    /// [`read::user::list::Filter`] of the settled search query.
    filter: read::user::list::Filter,

    /// Current page.
    page: pagination::Number,

    /// [`Debouncer`] of the typed search query.
    debouncer: Debouncer<Event>,

    /// Sender into the [`Event`]s queue.
    events: mpsc::UnboundedSender<Event>,

    /// Receiver of the [`Event`]s queue.
    queue: mpsc::UnboundedReceiver<Event>,

    /// Latest published [`Snapshot`].
    snapshot: watch::Sender<Snapshot>,
}

impl<Src> ListView<Src> {
    /// Creates a new idle [`ListView`].
    ///
    /// Nothing is fetched until [`ListView::load()`] is called.
    #[must_use]
    pub fn new(service: Service<Src>) -> Self {
        let (events, queue) = mpsc::unbounded_channel();
        let config = service.config().view;
        Self {
            service,
            lifecycle: Lifecycle::default(),
            records: Records::from([]),
            raw_query: String::new(),
            filter: read::user::list::Filter::default(),
            page: pagination::Number::FIRST,
            debouncer: Debouncer::new(config.quiet_period, events.clone()),
            events,
            queue,
            snapshot: watch::Sender::new(Snapshot::default()),
        }
    }

    /// Subscribes to [`Snapshot`]s of this [`ListView`].
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshot.subscribe()
    }

    /// Returns the latest [`Snapshot`] of this [`ListView`].
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot.borrow().clone()
    }

    /// Returns the search query as currently typed.
    #[must_use]
    pub fn raw_query(&self) -> &str {
        &self.raw_query
    }

    /// Handles a change of the typed search query.
    ///
    /// Nothing is recomposed until the query settles.
    pub fn on_query_change(&mut self, text: impl Into<String>) {
        self.raw_query = text.into();
        self.debouncer.observe(self.raw_query.clone());
    }

    /// Handles a request to switch to the page with the provided 1-based
    /// `number`.
    ///
    /// Returns `false` (changing nothing) if no such page exists.
    pub fn on_page_request(&mut self, number: usize) -> bool {
        let total = self.snapshot.borrow().total_pages;
        let Some(page) = pagination::Number::checked(number, total) else {
            log::debug!("page {number} rejected: only {total} available");
            return false;
        };
        if page != self.page {
            self.page = page;
            self.recompose();
        }
        true
    }

    /// Handles the next queued event (a settled search query or a completed
    /// fetch), waiting for one to arrive.
    ///
    /// Cancel-safe: no event is lost if the returned future is dropped
    /// before completion.
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    pub async fn step(&mut self) {
        let event = self
            .queue
            .recv()
            .await
            .expect("`ListView` holds its own `Sender`");
        match event {
            Event::Settled(settled) => self.on_settled(settled),
            Event::Loaded(ticket, result) => self.on_loaded(ticket, result),
        }
    }

    /// Applies the settled search query, if it's still the latest one.
    fn on_settled(&mut self, settled: Settled) {
        let Some(query) = self.debouncer.accept(settled) else {
            return;
        };
        if query == self.filter.query() {
            return;
        }
        log::debug!("search query settled: `{query}`");
        self.filter = read::user::list::Filter::new(query);
        self.recompose();
    }

    /// Applies the completed fetch, if it hasn't been superseded.
    fn on_loaded(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<User>, Traced<source::Error>>,
    ) {
        if !self.lifecycle.complete(ticket, result.map(Records::from)) {
            return;
        }
        match self.lifecycle.state() {
            State::Success(users) => {
                log::debug!("fetched {} users", users.len());
                self.records = Arc::clone(users);
            }
            State::Error(e) => log::error!("failed to fetch users: {e}"),
            State::Idle | State::Loading => {}
        }
        self.recompose();
    }

    /// Recomposes and publishes the [`Snapshot`].
    fn recompose(&mut self) {
        let snapshot = compose(
            self.lifecycle.state(),
            &self.records,
            &self.filter,
            self.page,
            self.service.config().view.page_size,
        );
        // Without records the requested page is kept for the next load.
        if snapshot.state.success().is_some() && snapshot.page != self.page {
            log::debug!(
                "page {} is out of {} pages, reset to {}",
                self.page,
                snapshot.total_pages,
                snapshot.page,
            );
            self.page = snapshot.page;
        }
        _ = self.snapshot.send_replace(snapshot);
    }
}

impl<Src> ListView<Src>
where
    Service<Src>: Query<
            query::users::List,
            Ok = Vec<User>,
            Err = Traced<source::Error>,
        > + Clone
        + 'static,
{
    /// Fetches the list of [`User`]s, superseding any fetch in flight.
    ///
    /// Switches to [`State::Loading`] immediately, while the outcome arrives
    /// later via [`ListView::step()`].
    pub fn load(&mut self) {
        let ticket = self.lifecycle.begin();
        self.recompose();

        let service = self.service.clone();
        let events = self.events.clone();
        drop(task::spawn_local(async move {
            let result = service.execute(query::users::List::by(())).await;
            _ = events.send(Event::Loaded(ticket, result));
        }));
    }

    /// Fetches the list of [`User`]s again.
    ///
    /// The way to recover from a [`State::Error`].
    pub fn reload(&mut self) {
        self.load();
    }
}

impl<Src> ListView<Src>
where
    Service<Src>: Query<
            query::user::ById,
            Ok = User,
            Err = Traced<source::Error>,
        > + Clone
        + 'static,
{
    /// Handles navigation to the [`User`] with the provided [`user::Id`],
    /// mounting its [`DetailView`].
    #[must_use]
    pub fn on_navigate_to_detail(&self, id: user::Id) -> DetailView<Src> {
        DetailView::new(self.service.clone(), id)
    }
}
