use serde_json::Value;

use super::module::Module;
use super::wire::QuoteSummaryEnvelope;
use crate::core::client::MAINTENANCE_MARKER;
use crate::core::{RetryConfig, YsClient, YsError};

/// Outcome of classifying one raw response body.
pub(crate) enum Classified {
    /// Well-formed payload; carries the first result object (the modules map).
    Ok(Value),
    /// The service answered with its maintenance placeholder.
    ServiceDown(YsError),
    /// Structured API error or an otherwise unusable payload.
    RequestError(YsError),
}

/// Decide whether a body is a maintenance page, a structured API error, or a
/// well-formed quoteSummary payload.
pub(crate) fn classify_body(body: &str) -> Classified {
    if body.contains(MAINTENANCE_MARKER) {
        return Classified::ServiceDown(YsError::ServiceUnavailable(
            "Yahoo Finance is currently down".into(),
        ));
    }

    let env: QuoteSummaryEnvelope = match serde_json::from_str(body) {
        Ok(env) => env,
        Err(e) => {
            return Classified::RequestError(YsError::ModuleFormat(format!(
                "quoteSummary json parse: {e}"
            )));
        }
    };

    let Some(node) = env.quote_summary else {
        return Classified::RequestError(YsError::Api("missing quoteSummary wrapper".into()));
    };

    if let Some(error) = node.error {
        let desc = error
            .description
            .unwrap_or_else(|| "unspecified error".into());
        return Classified::RequestError(YsError::Api(desc));
    }

    match node.result.and_then(|mut v| {
        if v.is_empty() { None } else { Some(v.remove(0)) }
    }) {
        Some(root) => Classified::Ok(root),
        None => Classified::RequestError(YsError::Api("empty quoteSummary result".into())),
    }
}

/// Fetch the requested modules for one symbol and return the root modules
/// object of the response.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(skip(client, retry_override), err)
)]
pub(crate) async fn fetch_summary(
    client: &YsClient,
    symbol: &str,
    modules: &[Module],
    retry_override: Option<&RetryConfig>,
) -> Result<Value, YsError> {
    let module_list = modules
        .iter()
        .map(|m| m.query_name())
        .collect::<Vec<_>>()
        .join(",");

    let mut url = client.base_summary().join(symbol)?;
    url.query_pairs_mut().append_pair("modules", &module_list);

    let req = client.http().get(url);
    let resp = client.send_with_retry(req, retry_override).await?;
    let body = resp.text().await?;

    match classify_body(&body) {
        Classified::Ok(root) => Ok(root),
        Classified::ServiceDown(e) | Classified::RequestError(e) => Err(e),
    }
}
