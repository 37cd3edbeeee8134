use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use hyper::HeaderMap;

use super::SignatureError;

const SIGNATURE_HEADER: &str = "x-signature-ed25519";
const TIMESTAMP_HEADER: &str = "x-signature-timestamp";

/// Check that the request was signed by Discord with the application's key.
///
/// The signed message is the timestamp header followed by the raw body.
pub fn verify(key: &VerifyingKey, headers: &HeaderMap, body: &[u8]) -> Result<(), SignatureError> {
    let signature = header(headers, SIGNATURE_HEADER)?;
    let timestamp = header(headers, TIMESTAMP_HEADER)?;

    let bytes = hex::decode(signature)?;
    let len = bytes.len();

    let bytes: [u8; Signature::BYTE_SIZE] =
        bytes.try_into().map_err(|_| SignatureError::Length(len))?;

    let signature = Signature::from_bytes(&bytes);

    let mut message = Vec::with_capacity(timestamp.len() + body.len());
    message.extend_from_slice(timestamp.as_bytes());
    message.extend_from_slice(body);

    key.verify(&message, &signature)?;

    Ok(())
}

fn header<'h>(headers: &'h HeaderMap, name: &'static str) -> Result<&'h str, SignatureError> {
    headers
        .get(name)
        .ok_or(SignatureError::MissingHeader(name))?
        .to_str()
        .map_err(|_| SignatureError::InvalidHeader(name))
}
