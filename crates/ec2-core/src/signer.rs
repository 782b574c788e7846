//! AWS query Signature Version 2.
//!
//! The string to sign is
//!
//! ```text
//! METHOD \n host \n path \n k1=v1&k2=v2...
//! ```
//!
//! with the pairs sorted by key and RFC 3986 encoded. Its HMAC-SHA256 under the
//! secret key, base64 encoded, becomes the `Signature` parameter.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use sha2::Sha256;

use crate::credentials::Credentials;
use crate::query::Params;

type HmacSha256 = Hmac<Sha256>;

/// Everything except the RFC 3986 unreserved characters is escaped.
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Parameter carrying the signature.
pub const SIGNATURE: &str = "Signature";

/// Sign `params` in place.
///
/// Adds the access key, signature method and version, the session token when
/// present, and finally `Signature`. Must run after every other parameter is
/// in place: anything added later is not covered by the signature.
pub fn sign(credentials: &Credentials, method: &str, path: &str, params: &mut Params, host: &str) {
    params.insert("AWSAccessKeyId", credentials.access_key());
    params.insert("SignatureVersion", "2");
    params.insert("SignatureMethod", "HmacSHA256");
    if let Some(token) = credentials.session_token() {
        params.insert("SecurityToken", token);
    }

    let payload = string_to_sign(method, host, path, params);
    let signature = BASE64.encode(hmac_sha256(credentials.secret_key().as_bytes(), payload.as_bytes()));
    params.insert(SIGNATURE, signature);
}

fn string_to_sign(method: &str, host: &str, path: &str, params: &Params) -> String {
    let canonical = params
        .iter()
        .filter(|(key, _)| *key != SIGNATURE)
        .map(|(key, value)| format!("{}={}", encode(key), encode(value)))
        .collect::<Vec<_>>()
        .join("&");

    format!("{method}\n{host}\n{path}\n{canonical}")
}

fn encode(value: &str) -> String {
    utf8_percent_encode(value, QUERY_ENCODE_SET).to_string()
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}
