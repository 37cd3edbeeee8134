mod deserialize;
mod error;
mod speedrun;

use eyre::WrapErr;
use hyper::{
    body::{self, Bytes},
    client::HttpConnector,
    header::{CONTENT_LENGTH, CONTENT_TYPE, USER_AGENT},
    Body, Client as HyperClient, Method, Request, Response,
};
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};

use crate::util::{constants::BODY_EXCERPT_SIZE, truncate_chars};

pub use self::{error::*, speedrun::*};

type ClientResult<T> = Result<T, ClientError>;

static MY_USER_AGENT: &str = env!("CARGO_PKG_NAME");

pub struct CustomClient {
    client: HyperClient<HttpsConnector<HttpConnector>, Body>,
}

impl CustomClient {
    pub fn new() -> Self {
        let connector = HttpsConnectorBuilder::new()
            .with_webpki_roots()
            .https_or_http()
            .enable_http1()
            .build();

        let client = HyperClient::builder().build(connector);

        Self { client }
    }

    async fn make_get_request(&self, url: impl AsRef<str>) -> ClientResult<Bytes> {
        let url = url.as_ref();
        trace!("GET request to url {url}");

        let req = Request::builder()
            .uri(url)
            .method(Method::GET)
            .header(USER_AGENT, MY_USER_AGENT)
            .body(Body::empty())
            .wrap_err("failed to build GET request")?;

        let response = self
            .client
            .request(req)
            .await
            .wrap_err("failed to receive GET response")?;

        Self::error_for_status(response, url).await
    }

    async fn make_json_post_request(&self, url: impl AsRef<str>, json: Vec<u8>) -> ClientResult<Bytes> {
        let url = url.as_ref();
        trace!("POST json request to url {url}");

        let req = Request::builder()
            .method(Method::POST)
            .uri(url)
            .header(USER_AGENT, MY_USER_AGENT)
            .header(CONTENT_TYPE, "application/json")
            .header(CONTENT_LENGTH, json.len())
            .body(Body::from(json))
            .wrap_err("failed to build POST json request")?;

        let response = self
            .client
            .request(req)
            .await
            .wrap_err("failed to receive POST response")?;

        Self::error_for_status(response, url).await
    }

    async fn error_for_status(response: Response<Body>, url: &str) -> ClientResult<Bytes> {
        let status = response.status();

        let bytes = body::to_bytes(response.into_body())
            .await
            .wrap_err("failed to collect response bytes")?;

        match status.as_u16() {
            200..=299 => Ok(bytes),
            404 => Err(ClientError::NotFound),
            _ => {
                let body = String::from_utf8_lossy(&bytes);

                Err(ClientError::Status {
                    status,
                    url: url.to_owned(),
                    body: truncate_chars(&body, BODY_EXCERPT_SIZE).to_owned(),
                })
            }
        }
    }
}
