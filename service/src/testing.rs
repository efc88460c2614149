//! Test doubles shared across unit tests.

use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use common::operations::{By, Select};
use tokio::{sync::oneshot, task};
use tracerr::Traced;

use crate::{
    domain::{
        user::{
            Address, Company, Email, Geo, Id, Name, Phone, Username, Website,
        },
        User,
    },
    infra::{source, Source},
    view, Config, Service,
};

/// Outcome of a [`Gate`] request.
pub(crate) type Reply<T> = Result<T, Traced<source::Error>>;

/// Pending [`Gate`] request.
type Pending<T> = oneshot::Sender<Reply<T>>;

/// [`Source`] holding every request until the test replies to it.
///
/// Replies may be sent in any order, so out-of-order completions can be
/// reproduced deterministically.
#[derive(Clone, Debug, Default)]
pub(crate) struct Gate {
    /// Pending list requests, in issue order.
    lists: Rc<RefCell<VecDeque<Pending<Vec<User>>>>>,

    /// Pending single [`User`] requests, in issue order.
    users: Rc<RefCell<VecDeque<(Id, Pending<User>)>>>,
}

impl Gate {
    /// Waits for the next list request to be issued.
    pub(crate) async fn next_list(&self) -> Pending<Vec<User>> {
        loop {
            if let Some(pending) = self.lists.borrow_mut().pop_front() {
                return pending;
            }
            task::yield_now().await;
        }
    }

    /// Waits for the next single [`User`] request to be issued.
    pub(crate) async fn next_user(&self) -> (Id, Pending<User>) {
        loop {
            if let Some(pending) = self.users.borrow_mut().pop_front() {
                return pending;
            }
            task::yield_now().await;
        }
    }
}

impl Source<Select<By<Vec<User>, ()>>> for Gate {
    type Ok = Vec<User>;
    type Err = Traced<source::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<User>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let (tx, rx) = oneshot::channel();
        self.lists.borrow_mut().push_back(tx);
        rx.await
            .unwrap_or_else(|_| Err(tracerr::new!(source::Error::Status(499))))
    }
}

impl Source<Select<By<User, Id>>> for Gate {
    type Ok = User;
    type Err = Traced<source::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<User, Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let (tx, rx) = oneshot::channel();
        self.users.borrow_mut().push_back((by.into_inner(), tx));
        rx.await
            .unwrap_or_else(|_| Err(tracerr::new!(source::Error::Status(499))))
    }
}

/// Creates a [`Service`] backed by the provided [`Gate`].
pub(crate) fn service(gate: &Gate) -> Service<Gate> {
    Service::new(
        Config {
            view: view::Config::default(),
        },
        gate.clone(),
    )
}

/// Creates a [`User`] with the provided identity.
pub(crate) fn user(id: u64, name: &str, email: &str) -> User {
    User {
        id: Id::from(id),
        name: Name::new(name),
        username: Username::new(format!("user{id}")),
        email: Email::new(email),
        phone: Phone::new("1-770-736-8031"),
        website: Website::new("example.com"),
        address: Address {
            street: "Kulas Light".into(),
            suite: "Apt. 556".into(),
            city: "Gwenborough".into(),
            zipcode: "92998-3874".into(),
            geo: Geo {
                lat: "-37.3159".into(),
                lng: "81.1496".into(),
            },
        },
        company: Company {
            name: "Romaguera-Crona".into(),
            catch_phrase: "Multi-layered client-server neural-net".into(),
            bs: "harness real-time e-markets".into(),
        },
    }
}

/// Returns IDs of the provided [`User`]s.
pub(crate) fn ids<'u>(users: impl IntoIterator<Item = &'u User>) -> Vec<u64> {
    users.into_iter().map(|u| u.id.into()).collect()
}
