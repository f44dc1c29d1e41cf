//! Building request URLs from the API root.

use url::Url;

use super::FetchError;

fn parse_root(api_root: &str) -> Result<Url, FetchError> {
    let mut root = api_root.trim().to_string();
    // Url::join drops the last path segment unless the base ends with '/'.
    if !root.ends_with('/') {
        root.push('/');
    }
    Url::parse(&root).map_err(|source| FetchError::InvalidUrl { url: root, source })
}

/// URL of one entity: `{api_root}{collection}/{id}/`.
///
/// - `entity_url("https://swapi.py4e.com/api/", "people", 1)` → `https://swapi.py4e.com/api/people/1/`
/// - `entity_url("https://swapi.py4e.com/api", "/people/", 1)` → same
pub fn entity_url(api_root: &str, collection: &str, id: u32) -> Result<Url, FetchError> {
    let collection = collection.trim().trim_matches('/');
    if collection.is_empty() {
        return Err(FetchError::EmptyCollection);
    }
    let base = parse_root(api_root)?;
    let relative = format!("{}/{}/", collection, id);
    base.join(&relative)
        .map_err(|source| FetchError::InvalidUrl { url: relative, source })
}

/// Resolves a film reference from a primary payload.
///
/// Absolute references are used as-is; relative ones are resolved against
/// the API root with `Url::join` semantics: `/films/1/` lands on the root's
/// origin, `films/1/` under the root's path.
pub fn resolve_reference(api_root: &str, reference: &str) -> Result<Url, FetchError> {
    let reference = reference.trim();
    if let Ok(url) = Url::parse(reference) {
        return Ok(url);
    }
    let base = parse_root(api_root)?;
    base.join(reference).map_err(|source| FetchError::InvalidUrl {
        url: reference.to_string(),
        source,
    })
}
