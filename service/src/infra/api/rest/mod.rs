//! REST [`Api`] implementation.

mod impls;
mod wire;

use std::time::Duration;

use common::{define_kind, money::Currency};
use derive_more::{Display, Error as StdError, From};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret as _, SecretBox};
use serde::de::DeserializeOwned;
use tracerr::Traced;
use tracing as log;
use url::Url;

use crate::{domain::user::session::Token, infra::api};
#[cfg(doc)]
use crate::{domain::Offer, infra::Api};

/// [`Rest`] client configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL every endpoint path is resolved against.
    pub base_url: String,

    /// [`Style`] of [`Offer`] transition requests.
    pub style: Style,

    /// Timeout of a single request.
    pub timeout: Duration,

    /// [`Currency`] the backend keeps amounts in.
    pub currency: Currency,
}

define_kind! {
    #[doc = "Style of requesting an [`Offer`] transition."]
    #[case = "lowercase"]
    enum Style {
        #[doc = "`POST offers/{id}/{action}/` per action."]
        Actions = 1,

        #[doc = "`PATCH offers/{id}/` with the target status."]
        Patch = 2,
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::Actions
    }
}

/// REST backend [`Api`] client.
#[derive(Clone, Debug)]
pub struct Rest {
    /// Underlying HTTP client.
    client: reqwest::Client,

    /// Base [`Url`] always ending with a `/`.
    base_url: Url,

    /// [`Style`] of [`Offer`] transition requests.
    style: Style,

    /// [`Currency`] the backend keeps amounts in.
    currency: Currency,

    /// Bearer [`Token`] attached to every request, if any.
    access_token: Option<SecretBox<Token>>,
}

impl Rest {
    /// Creates a new [`Rest`] client with the provided [`Config`].
    ///
    /// # Errors
    ///
    /// If the base URL is invalid or the HTTP client cannot be built.
    pub fn new(conf: &Config) -> Result<Self, Traced<api::Error>> {
        let mut base_url = Url::parse(&conf.base_url)
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .timeout(conf.timeout)
            .build()
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;

        Ok(Self {
            client,
            base_url,
            style: conf.style,
            currency: conf.currency,
            access_token: None,
        })
    }

    /// Attaches the provided access [`Token`] to every request of this
    /// [`Rest`] client.
    #[must_use]
    pub fn with_access_token(mut self, token: SecretBox<Token>) -> Self {
        self.access_token = Some(token);
        self
    }

    /// Returns the base [`Url`] of this [`Rest`] client.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Prepares a request to the provided `path` relative to the base [`Url`].
    fn request(
        &self,
        method: Method,
        path: &str,
    ) -> Result<RequestBuilder, Traced<Error>> {
        let url = self
            .base_url
            .join(path)
            .map_err(tracerr::from_and_wrap!(=> Error))?;
        log::debug!(%method, %url, "requesting backend");

        let req = self.client.request(method, url);
        Ok(match &self.access_token {
            Some(token) => req.bearer_auth(token.expose_secret()),
            None => req,
        })
    }

    /// Sends the provided request, failing on any non-success status.
    async fn send(req: RequestBuilder) -> Result<Response, Traced<Error>> {
        let resp = req.send().await.map_err(tracerr::from_and_wrap!(=> Error))?;

        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        log::warn!(%status, "backend rejected request");
        Err(tracerr::new!(Error::Status { status, body }))
    }

    /// Sends the provided request and decodes its JSON response body.
    async fn fetch<T: DeserializeOwned>(
        req: RequestBuilder,
    ) -> Result<T, Traced<Error>> {
        Self::send(req)
            .await?
            .json()
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
    }
}

/// [`Rest`] client error.
#[derive(Debug, Display, StdError, From)]
pub enum Error {
    /// URL cannot be built.
    #[display("Invalid URL: {_0}")]
    Url(url::ParseError),

    /// Request failed to be sent or its response failed to be read.
    #[display("Request failed: {_0}")]
    Request(reqwest::Error),

    /// Backend responded with a non-success status.
    #[display("Backend responded with `{status}`: {body}")]
    #[from(ignore)]
    Status {
        /// Received [`StatusCode`].
        status: StatusCode,

        /// Received response body.
        body: String,
    },

    /// Response body doesn't describe a valid entity.
    #[display("Malformed response: {_0}")]
    #[from(ignore)]
    Malformed(#[error(not(source))] String),
}

impl Error {
    /// Returns the [`StatusCode`] the backend responded with, if any.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Request(e) => e.status(),
            Self::Url(_) | Self::Malformed(_) => None,
        }
    }
}
