//! Endpoint resolution against the configured base URI

use url::Url;

use crate::error::{HttpError, Result};

/// Resolve `resource` against `base` and append `query`.
///
/// Resolution follows RFC 3986: `items/1` lands under the base path while
/// `/items/1` replaces it. Query pairs are appended in iteration order; an
/// empty query leaves the URL without a `?`.
pub fn resolve_endpoint<I, K, V>(base: &Url, resource: &str, query: I) -> Result<Url>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut url = base
        .join(resource)
        .map_err(|e| HttpError::InvalidUrl(format!("{resource}: {e}")))?;

    let mut pairs = query.into_iter().peekable();
    if pairs.peek().is_some() {
        url.query_pairs_mut().extend_pairs(pairs);
    }

    Ok(url)
}
