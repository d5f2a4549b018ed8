use async_trait::async_trait;
use http::StatusCode;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::CoreResult;
use crate::outcome::{ApiError, Outcome};
use crate::transport::ApiTransport;

/// Identity and plumbing every adapter exposes to the query pipeline.
pub trait LookupProvider: Send + Sync {
    /// Short provider name used in logs ("viacep", "smarty", ...).
    fn name(&self) -> &'static str;
    /// Entity label used in failure messages ("address", "postcode").
    fn entity(&self) -> &'static str;
    fn transport(&self) -> &ApiTransport;
}

/// Lookup addressed by a single opaque code (zip, CEP, PIN, postcode).
///
/// Adapters supply only [`build_code_url`](CodeLookup::build_code_url);
/// the query orchestration is shared. URL building validates the caller's
/// input and returns `Err` before any network attempt — a remote or
/// transport fault instead lands inside the returned [`Outcome`].
#[async_trait]
pub trait CodeLookup: LookupProvider {
    fn build_code_url(&self, code: &str) -> CoreResult<String>;

    async fn query_by_code<T>(&self, code: &str) -> CoreResult<Outcome<T>>
    where
        T: DeserializeOwned + Send,
    {
        let url = self.build_code_url(code)?;
        debug!(provider = self.name(), "dispatching code lookup");
        let outcome = self.transport().call(&url).await;
        Ok(outcome.match_with(|body| parse_entity(self.entity(), &body), Outcome::failure))
    }
}

/// Lookup addressed by free-form state/city/street components, returning
/// every matching record. An empty match set is a success, not an error.
#[async_trait]
pub trait ComponentLookup: LookupProvider {
    fn build_components_url(&self, state: &str, city: &str, street: &str) -> CoreResult<String>;

    async fn query_by_components<T>(
        &self,
        state: &str,
        city: &str,
        street: &str,
    ) -> CoreResult<Outcome<Vec<T>>>
    where
        T: DeserializeOwned + Send,
    {
        let url = self.build_components_url(state, city, street)?;
        debug!(provider = self.name(), "dispatching component lookup");
        let outcome = self.transport().call(&url).await;
        Ok(outcome.match_with(
            |body| parse_entity_list(self.entity(), &body),
            Outcome::failure,
        ))
    }
}

/// Deserialization step for by-code queries. Parses in two phases so a JSON
/// `null` or `[]` body (service answered, nothing matched) maps to 404 while
/// malformed JSON maps to 422 with the raw body preserved.
fn parse_entity<T: DeserializeOwned>(entity: &str, body: &str) -> Outcome<T> {
    let value: serde_json::Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(err) => return Outcome::failure(parse_failure(entity, "response", &err, body)),
    };
    if value.is_null() || value.as_array().is_some_and(|a| a.is_empty()) {
        return Outcome::failure(ApiError::new(
            StatusCode::NOT_FOUND,
            format!("{entity} not found or empty response."),
        ));
    }
    match serde_json::from_value(value) {
        Ok(parsed) => Outcome::success(parsed),
        Err(err) => Outcome::failure(parse_failure(entity, "response", &err, body)),
    }
}

fn parse_entity_list<T: DeserializeOwned>(entity: &str, body: &str) -> Outcome<Vec<T>> {
    let value: serde_json::Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(err) => return Outcome::failure(parse_failure(entity, "list", &err, body)),
    };
    if value.is_null() {
        return Outcome::success(Vec::new());
    }
    match serde_json::from_value(value) {
        Ok(list) => Outcome::success(list),
        Err(err) => Outcome::failure(parse_failure(entity, "list", &err, body)),
    }
}

fn parse_failure(entity: &str, kind: &str, err: &serde_json::Error, body: &str) -> ApiError {
    ApiError::new(
        StatusCode::UNPROCESSABLE_ENTITY,
        format!("Failed to parse {entity} {kind}."),
    )
    .with_detail(err.to_string())
    .with_body(body)
}
