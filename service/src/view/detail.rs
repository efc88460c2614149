//! [`DetailView`] of a single [`User`].

use tokio::{
    sync::{mpsc, watch},
    task,
};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{user, User},
    infra::source,
    query,
    view::fetch::{Lifecycle, State, Ticket},
    Query, Service,
};

/// Completion of a [`User`] fetch.
#[derive(Debug)]
struct Loaded(Ticket, Result<User, Traced<source::Error>>);

/// Controller of a single [`User`] page, mounted for a [`user::Id`] provided
/// by navigation.
///
/// Must be used inside a [`task::LocalSet`], with [`DetailView::step()`]
/// polled to handle fetch completions.
#[derive(Debug)]
pub struct DetailView<Src> {
    /// [`Service`] to fetch the [`User`] with.
    service: Service<Src>,

    /// ID of the displayed [`User`].
    id: user::Id,

    /// [`Lifecycle`] of the [`User`] fetch.
    lifecycle: Lifecycle<User>,

    /// Sender into the completions queue.
    events: mpsc::UnboundedSender<Loaded>,

    /// Receiver of the completions queue.
    queue: mpsc::UnboundedReceiver<Loaded>,

    /// Latest published [`State`].
    state: watch::Sender<State<User>>,
}

impl<Src> DetailView<Src> {
    /// Returns ID of the displayed [`User`].
    #[must_use]
    pub fn id(&self) -> user::Id {
        self.id
    }

    /// Subscribes to [`State`] changes of this [`DetailView`].
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<State<User>> {
        self.state.subscribe()
    }

    /// Returns the current [`State`] of this [`DetailView`].
    #[must_use]
    pub fn state(&self) -> State<User> {
        self.state.borrow().clone()
    }

    /// Handles the next completed fetch, waiting for one to arrive.
    ///
    /// Cancel-safe: no completion is lost if the returned future is dropped
    /// before completion.
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    pub async fn step(&mut self) {
        let Loaded(ticket, result) = self
            .queue
            .recv()
            .await
            .expect("`DetailView` holds its own `Sender`");
        if !self.lifecycle.complete(ticket, result) {
            return;
        }
        if let State::Error(e) = self.lifecycle.state() {
            log::error!("failed to fetch user details for `{}`: {e}", self.id);
        }
        _ = self.state.send_replace(self.lifecycle.state().clone());
    }
}

impl<Src> DetailView<Src>
where
    Service<Src>: Query<
            query::user::ById,
            Ok = User,
            Err = Traced<source::Error>,
        > + Clone
        + 'static,
{
    /// Mounts a new [`DetailView`] of the [`User`] with the provided
    /// [`user::Id`], starting to fetch it right away.
    #[must_use]
    pub fn new(service: Service<Src>, id: user::Id) -> Self {
        let (events, queue) = mpsc::unbounded_channel();
        let mut this = Self {
            service,
            id,
            lifecycle: Lifecycle::default(),
            events,
            queue,
            state: watch::Sender::new(State::Idle),
        };
        this.load();
        this
    }

    /// Fetches the [`User`] again, superseding any fetch in flight.
    ///
    /// The way to recover from a [`State::Error`].
    pub fn reload(&mut self) {
        self.load();
    }

    /// Fetches the [`User`], switching to [`State::Loading`] immediately.
    fn load(&mut self) {
        let ticket = self.lifecycle.begin();
        _ = self.state.send_replace(State::Loading);

        let service = self.service.clone();
        let events = self.events.clone();
        let id = self.id;
        drop(task::spawn_local(async move {
            let result = service.execute(query::user::ById::by(id)).await;
            _ = events.send(Loaded(ticket, result));
        }));
    }
}
