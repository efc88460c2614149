//! HTTP [`Source`] implementation.

use std::time;

use common::operations::{By, Select};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use smart_default::SmartDefault;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{user, User},
    infra::source::{self, Error},
};
#[cfg(doc)]
use crate::infra::Source;

/// User agent sent along every request.
const USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// [`Http`] source configuration.
#[derive(Clone, Debug, SmartDefault)]
pub struct Config {
    /// URL of the [`User`]s collection.
    ///
    /// A single [`User`] is requested as `{base_url}/{id}`.
    #[default("https://jsonplaceholder.typicode.com/users".to_owned())]
    pub base_url: String,

    /// Timeout of a single request, enforced by the transport.
    #[default(time::Duration::from_secs(30))]
    pub timeout: time::Duration,
}

/// [`Source`] fetching JSON records over HTTP.
#[derive(Clone, Debug)]
pub struct Http {
    /// Underlying HTTP client.
    client: reqwest::Client,

    /// URL of the [`User`]s collection, without a trailing slash.
    base_url: String,
}

impl Http {
    /// Creates a new [`Http`] source with the provided [`Config`].
    ///
    /// # Errors
    ///
    /// If failed to initialize the underlying HTTP client.
    pub fn new(conf: &Config) -> Result<Self, Traced<Error>> {
        let client = reqwest::Client::builder()
            .timeout(conf.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(Error::Request)
            .map_err(tracerr::wrap!())?;
        Ok(Self {
            client,
            base_url: conf.base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Fetches and decodes a JSON document located at the provided `url`.
    async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
    ) -> Result<T, Traced<Error>> {
        log::debug!("GET {url}");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(Error::Request)
            .map_err(tracerr::wrap!())?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                return Err(tracerr::new!(Error::NotFound));
            }
            s if !s.is_success() => {
                return Err(tracerr::new!(Error::Status(s.as_u16())));
            }
            _ => {}
        }

        let body = response
            .bytes()
            .await
            .map_err(Error::Request)
            .map_err(tracerr::wrap!())?;
        serde_json::from_slice(&body)
            .map_err(Error::Decode)
            .map_err(tracerr::wrap!())
    }
}

impl source::Source<Select<By<Vec<User>, ()>>> for Http {
    type Ok = Vec<User>;
    type Err = Traced<Error>;

    #[tracing::instrument(skip_all, fields(url = %self.base_url))]
    async fn execute(
        &self,
        _: Select<By<Vec<User>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.get(&self.base_url).await.map_err(tracerr::wrap!())
    }
}

impl source::Source<Select<By<User, user::Id>>> for Http {
    type Ok = User;
    type Err = Traced<Error>;

    #[tracing::instrument(skip_all, fields(id = %by.by()))]
    async fn execute(
        &self,
        Select(by): Select<By<User, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let url = format!("{}/{}", self.base_url, by.into_inner());
        self.get(&url).await.map_err(tracerr::wrap!())
    }
}
