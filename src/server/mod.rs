use std::{fmt, net::SocketAddr, sync::Arc, time::Duration};

use ed25519_dalek::VerifyingKey;
use eyre::{Report, Result};
use hyper::{
    body::HttpBody, header::CONTENT_TYPE, server::Server, Body, Request, Response, StatusCode,
};
use routerify::{ext::RequestExt, RouteError, Router, RouterService};
use tokio::{sync::oneshot, time::timeout};
use twilight_model::{
    application::interaction::{Interaction, InteractionType},
    http::interaction::{InteractionResponse, InteractionResponseType},
};

use crate::core::{handle_interaction, BotConfig, Context};

pub use self::{
    error::{ServerError, SignatureError},
    responder::WebhookResponder,
};

mod error;
mod responder;
mod signature;

/// Discord drops the interaction if the initial response takes longer.
const INITIAL_RESPONSE_TIMEOUT: Duration = Duration::from_secs(3);

const MAX_BODY_SIZE: usize = 1024 * 1024;

pub async fn run_server(ctx: Arc<Context>, shutdown_rx: oneshot::Receiver<()>) -> Result<()> {
    let config = BotConfig::get();

    let public_key = config
        .tokens
        .public_key
        .ok_or_else(|| eyre!("missing public key to verify interactions"))?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));

    let router = router(ctx, public_key)
        .map_err(|err| Report::new(ErrorWrapper(err)).wrap_err("failed to build router"))?;

    let service = RouterService::new(router)
        .map_err(|err| Report::new(ErrorWrapper(err)).wrap_err("failed to create service"))?;

    let server = Server::try_bind(&addr)
        .map_err(|err| Report::new(err).wrap_err(format!("failed to bind to {addr}")))?
        .serve(service)
        .with_graceful_shutdown(async {
            let _ = shutdown_rx.await;
        });

    info!("Running server on {addr}...");

    server.await.map_err(|err| Report::new(err).wrap_err("server failed"))
}

struct Context_(Arc<Context>);
struct PublicKey(VerifyingKey);

fn router(ctx: Arc<Context>, public_key: VerifyingKey) -> Result<Router<Body, ServerError>, RouteError> {
    Router::builder()
        .data(Context_(ctx))
        .data(PublicKey(public_key))
        .post("/discord-interaction", interaction_handler)
        .any(handle_404)
        .err_handler(error_handler)
        .build()
}

// Required to pass RouteError to Report
#[derive(Debug)]
struct ErrorWrapper(RouteError);

impl std::error::Error for ErrorWrapper {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl fmt::Display for ErrorWrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

async fn error_handler(err: RouteError) -> Response<Body> {
    let report = Report::new(ErrorWrapper(err)).wrap_err("error while handling server request");
    error!("{report:?}");

    let mut response = Response::new(Body::from("500 Internal Server Error"));
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;

    response
}

type HandlerResult = Result<Response<Body>, ServerError>;

async fn handle_404(_req: Request<Body>) -> HandlerResult {
    let response = Response::builder()
        .status(StatusCode::NOT_FOUND)
        .body(Body::from("404 Not Found"))?;

    Ok(response)
}

async fn interaction_handler(req: Request<Body>) -> HandlerResult {
    let Context_(ctx) = req.data().ok_or(ServerError::MissingData)?;
    let ctx = Arc::clone(ctx);

    let PublicKey(public_key) = req.data().ok_or(ServerError::MissingData)?;
    let public_key = *public_key;

    let (parts, body) = req.into_parts();
    let Some(bytes) = collect_limited(body, MAX_BODY_SIZE).await? else {
        let response = Response::builder()
            .status(StatusCode::PAYLOAD_TOO_LARGE)
            .body(Body::from("413 Payload Too Large"))?;

        return Ok(response);
    };

    if let Err(err) = signature::verify(&public_key, &parts.headers, &bytes) {
        debug!("Rejected interaction request: {err}");

        let response = Response::builder()
            .status(StatusCode::UNAUTHORIZED)
            .body(Body::from("invalid request signature"))?;

        return Ok(response);
    }

    let interaction: Interaction = serde_json::from_slice(&bytes)?;

    if interaction.kind == InteractionType::Ping {
        return json_response(&pong());
    }

    let (tx, rx) = oneshot::channel();
    let responder = WebhookResponder::new(Arc::clone(&ctx), interaction.token.clone(), tx);

    // keeps running after the initial response to finalize deferrals
    tokio::spawn(async move { handle_interaction(&ctx, interaction, &responder).await });

    let response = match timeout(INITIAL_RESPONSE_TIMEOUT, rx).await {
        Ok(Ok(response)) => response,
        Ok(Err(_)) => return Err(ServerError::NoResponse),
        Err(_) => return Err(ServerError::Timeout),
    };

    json_response(&response)
}

/// Returns `None` as soon as the body exceeds `limit` bytes.
async fn collect_limited(mut body: Body, limit: usize) -> Result<Option<Vec<u8>>, hyper::Error> {
    let mut bytes = Vec::new();

    while let Some(chunk) = body.data().await {
        let chunk = chunk?;

        if bytes.len() + chunk.len() > limit {
            return Ok(None);
        }

        bytes.extend_from_slice(&chunk);
    }

    Ok(Some(bytes))
}

fn pong() -> InteractionResponse {
    InteractionResponse {
        kind: InteractionResponseType::Pong,
        data: None,
    }
}

fn json_response(response: &InteractionResponse) -> HandlerResult {
    let body = serde_json::to_vec(response)?;

    let response = Response::builder()
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body))?;

    Ok(response)
}
