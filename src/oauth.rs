//! OAuth 1.0a request signing (RFC 5849, HMAC-SHA1).
//!
//! Produces the `Authorization: OAuth ...` header value for a request. The
//! signature covers the request method, the URL without its query string, the
//! query parameters, and the `oauth_*` protocol parameters.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rand::distr::Alphanumeric;
use rand::Rng;
use sha1::Sha1;
use std::time::{SystemTime, UNIX_EPOCH};
use url::{Position, Url};

type HmacSha1 = Hmac<Sha1>;

/// Everything except the RFC 3986 unreserved characters, per RFC 5849 §3.6.
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

const SIGNATURE_METHOD: &str = "HMAC-SHA1";
const OAUTH_VERSION: &str = "1.0";
const NONCE_LEN: usize = 32;

/// The four OAuth1 credential fields, captured once per client.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub token: String,
    pub token_secret: String,
}

/// Builds the `Authorization` header value for a signed request to `url`,
/// using a fresh nonce and the current time.
pub fn authorization_header(method: &str, url: &Url, credentials: &Credentials) -> String {
    let nonce: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(NONCE_LEN)
        .map(char::from)
        .collect();
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
        .to_string();

    sign(method, url, credentials, &nonce, &timestamp)
}

/// Deterministic part of the header construction: given a nonce and a
/// timestamp, computes the signature and assembles the header value.
fn sign(method: &str, url: &Url, credentials: &Credentials, nonce: &str, timestamp: &str) -> String {
    let oauth_params = [
        ("oauth_consumer_key", credentials.consumer_key.as_str()),
        ("oauth_nonce", nonce),
        ("oauth_signature_method", SIGNATURE_METHOD),
        ("oauth_timestamp", timestamp),
        ("oauth_token", credentials.token.as_str()),
        ("oauth_version", OAUTH_VERSION),
    ];

    let base = signature_base_string(method, url, &oauth_params);
    let signing_key = format!(
        "{}&{}",
        encode(&credentials.consumer_secret),
        encode(&credentials.token_secret)
    );

    let mut mac =
        HmacSha1::new_from_slice(signing_key.as_bytes()).expect("HMAC accepts keys of any size");
    mac.update(base.as_bytes());
    let signature = BASE64.encode(mac.finalize().into_bytes());

    // Header parameters stay in alphabetical order with the signature slotted in.
    let mut header_params = oauth_params.to_vec();
    header_params.insert(2, ("oauth_signature", signature.as_str()));

    let rendered = header_params
        .iter()
        .map(|(key, value)| format!("{key}=\"{}\"", encode(value)))
        .collect::<Vec<_>>()
        .join(", ");
    format!("OAuth {rendered}")
}

/// RFC 5849 §3.4.1: `METHOD&encoded-base-url&encoded-sorted-params`.
fn signature_base_string(method: &str, url: &Url, oauth_params: &[(&str, &str)]) -> String {
    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (encode(&k), encode(&v)))
        .chain(oauth_params.iter().map(|(k, v)| (encode(k), encode(v))))
        .collect();
    pairs.sort();

    let param_string = pairs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    // The base URL excludes the query string and fragment.
    let base_url = &url[..Position::AfterPath];

    format!(
        "{}&{}&{}",
        method.to_uppercase(),
        encode(base_url),
        encode(&param_string)
    )
}

fn encode(input: &str) -> String {
    utf8_percent_encode(input, OAUTH_ENCODE_SET).to_string()
}
