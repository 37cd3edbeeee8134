use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("http error")]
    Http(#[from] hyper::http::Error),
    #[error("hyper error")]
    Hyper(#[from] hyper::Error),
    #[error("failed to (de)serialize interaction")]
    Json(#[from] serde_json::Error),
    #[error("missing router data")]
    MissingData,
    #[error("interaction was not answered")]
    NoResponse,
    #[error("interaction was not answered in time")]
    Timeout,
}

#[derive(Debug, Error)]
pub enum SignatureError {
    #[error("header `{0}` is not valid utf-8")]
    InvalidHeader(&'static str),
    #[error("signature is not valid hex")]
    Hex(#[from] hex::FromHexError),
    #[error("signature must be 64 bytes, got {0}")]
    Length(usize),
    #[error("signature does not match")]
    Invalid(#[from] ed25519_dalek::SignatureError),
    #[error("missing header `{0}`")]
    MissingHeader(&'static str),
}
