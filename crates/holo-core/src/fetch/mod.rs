//! HTTP fetch adapter: one GET, JSON decode, `{ data }` envelope.
//!
//! Transfers use the curl crate (libcurl) on the calling thread; the async
//! entry points move them onto tokio's blocking pool. No retries and no
//! status-code checks: whatever body comes back is decoded.

mod endpoint;
mod envelope;
mod error;

pub use endpoint::{entity_url, resolve_reference};
pub use envelope::Envelope;
pub use error::FetchError;

use serde::de::DeserializeOwned;
use std::time::Duration;

/// Per-request curl settings.
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// Whole-request timeout; None waits indefinitely.
    pub timeout: Option<Duration>,
    /// User-Agent header; None keeps the libcurl default.
    pub user_agent: Option<String>,
}

fn transport(url: &str) -> impl Fn(curl::Error) -> FetchError + '_ {
    move |source| FetchError::Transport {
        url: url.to_string(),
        source,
    }
}

/// Performs the GET and returns the raw body.
/// Runs in the current thread; call from `spawn_blocking` if used from async code.
fn get_body(url: &str, opts: &FetchOptions) -> Result<Vec<u8>, FetchError> {
    let mut body = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url).map_err(transport(url))?;
    easy.get(true).map_err(transport(url))?;
    easy.follow_location(true).map_err(transport(url))?;
    easy.max_redirections(10).map_err(transport(url))?;
    if let Some(timeout) = opts.timeout {
        easy.timeout(timeout).map_err(transport(url))?;
    }
    if let Some(ua) = &opts.user_agent {
        easy.useragent(ua).map_err(transport(url))?;
    }

    let mut list = curl::easy::List::new();
    list.append("Accept: application/json")
        .map_err(transport(url))?;
    easy.http_headers(list).map_err(transport(url))?;

    {
        let mut transfer = easy.transfer();
        transfer
            .write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })
            .map_err(transport(url))?;
        transfer.perform().map_err(transport(url))?;
    }

    let code = easy.response_code().map_err(transport(url))?;
    tracing::debug!(url, status = code, bytes = body.len(), "GET complete");
    Ok(body)
}

/// Decodes a response body into an envelope.
pub fn decode<T: DeserializeOwned>(url: &str, body: &[u8]) -> Result<Envelope<T>, FetchError> {
    let data = serde_json::from_slice(body).map_err(|source| FetchError::Decode {
        url: url.to_string(),
        source,
    })?;
    Ok(Envelope::new(data))
}

/// Blocking GET of `url`, decoded as JSON into `T`.
pub fn fetch_data_blocking<T: DeserializeOwned>(
    url: &str,
    opts: &FetchOptions,
) -> Result<Envelope<T>, FetchError> {
    let body = get_body(url, opts)?;
    decode(url, &body)
}

/// GET `url` on the blocking pool and decode the body as JSON into `T`.
pub async fn fetch_data<T>(url: &str, opts: &FetchOptions) -> Result<Envelope<T>, FetchError>
where
    T: DeserializeOwned + Send + 'static,
{
    let owned_url = url.to_string();
    let opts = opts.clone();
    tokio::task::spawn_blocking(move || fetch_data_blocking(&owned_url, &opts))
        .await
        .map_err(|source| FetchError::Join {
            url: url.to_string(),
            source,
        })?
}

/// GET one entity, `{api_root}{collection}/{id}/`.
pub async fn get_one<T>(
    id: u32,
    collection: &str,
    api_root: &str,
    opts: &FetchOptions,
) -> Result<Envelope<T>, FetchError>
where
    T: DeserializeOwned + Send + 'static,
{
    let url = entity_url(api_root, collection, id)?;
    fetch_data(url.as_str(), opts).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Film {
        title: String,
    }

    #[test]
    fn decode_wraps_payload_in_envelope() {
        let env: Envelope<Film> = decode("u", br#"{"title":"A New Hope","episode_id":4}"#).unwrap();
        assert_eq!(env.data.title, "A New Hope");
    }

    #[test]
    fn decode_untyped_value() {
        let env: Envelope<serde_json::Value> = decode("u", br#"{"detail":"Not found"}"#).unwrap();
        assert_eq!(env.data["detail"], "Not found");
    }

    #[test]
    fn decode_invalid_json_is_decode_error() {
        let err = decode::<serde_json::Value>("http://h/x", b"<html>oops</html>").unwrap_err();
        assert!(matches!(err, FetchError::Decode { .. }));
        assert_eq!(err.url(), Some("http://h/x"));
        assert!(!err.is_transport());
    }

    #[test]
    fn decode_wrong_shape_is_decode_error() {
        let err = decode::<Film>("u", br#"{"name":"Luke"}"#).unwrap_err();
        assert!(matches!(err, FetchError::Decode { .. }));
    }

    #[test]
    fn envelope_serializes_under_data_key() {
        let env = Envelope::new(serde_json::json!({"name": "Leia"}));
        let s = serde_json::to_string(&env).unwrap();
        assert_eq!(s, r#"{"data":{"name":"Leia"}}"#);
    }

    #[test]
    fn unreachable_host_is_transport_error() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let err = fetch_data_blocking::<serde_json::Value>(
            &format!("http://127.0.0.1:{}/", port),
            &FetchOptions {
                timeout: Some(Duration::from_secs(5)),
                user_agent: None,
            },
        )
        .unwrap_err();
        assert!(err.is_transport());
    }
}
