//! UK postcode search via the Postcodes.io API (<https://postcodes.io>).

pub mod model;

pub use model::{PostcodeInfo, PostcodeSearchResponse};

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::error::{CoreResult, ZipQueryError};
use crate::normalize::clean_field;
use crate::providers::parse_base_url;
use crate::service::{CodeLookup, LookupProvider};
use crate::transport::ApiTransport;

static DEFAULT_BASE: Lazy<Url> =
    Lazy::new(|| Url::parse("https://api.postcodes.io").expect("default base URL"));
// UK postcodes are 5-8 characters including the separating space; the ?q=
// endpoint is a search, so prefixes down to 2 characters are accepted.
static POSTCODE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9 ]+$").expect("postcode pattern"));

#[derive(Debug, Clone)]
pub struct PostcodesIo {
    transport: ApiTransport,
    base: Url,
}

impl PostcodesIo {
    pub fn new(transport: ApiTransport) -> Self {
        Self {
            transport,
            base: DEFAULT_BASE.clone(),
        }
    }

    pub fn with_base_url(transport: ApiTransport, base: &str) -> CoreResult<Self> {
        Ok(Self {
            transport,
            base: parse_base_url(base)?,
        })
    }

    fn validate_code(code: &str) -> CoreResult<String> {
        let clean = clean_field(code);
        let len = clean.chars().count();
        if !(2..=8).contains(&len) {
            return Err(ZipQueryError::CodeSize {
                expected: "2 to 8 characters",
                actual: len,
            });
        }
        if !POSTCODE_PATTERN.is_match(&clean) {
            return Err(ZipQueryError::CodeFormat {
                expected: "letters, digits and spaces",
            });
        }
        Ok(clean)
    }
}

impl LookupProvider for PostcodesIo {
    fn name(&self) -> &'static str {
        "postcodes-io"
    }

    fn entity(&self) -> &'static str {
        "postcode"
    }

    fn transport(&self) -> &ApiTransport {
        &self.transport
    }
}

impl CodeLookup for PostcodesIo {
    fn build_code_url(&self, code: &str) -> CoreResult<String> {
        let code = Self::validate_code(code)?;
        let mut url = self.base.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ZipQueryError::Validation("base URL cannot carry a path".into()))?;
            path.pop_if_empty().push("postcodes");
        }
        url.query_pairs_mut().append_pair("q", &code);
        Ok(url.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::Method::GET;
    use httpmock::MockServer;

    #[test]
    fn code_url_encodes_the_query() {
        let service = PostcodesIo::new(ApiTransport::new_default().unwrap());
        let url = service.build_code_url("SW1A 2AA").unwrap();
        assert_eq!(url, "https://api.postcodes.io/postcodes?q=SW1A+2AA");
    }

    #[test]
    fn bounds_and_character_class_are_enforced() {
        let service = PostcodesIo::new(ApiTransport::new_default().unwrap());
        match service.build_code_url("X") {
            Err(ZipQueryError::CodeSize { actual: 1, .. }) => {}
            other => panic!("expected CodeSize, got: {:?}", other),
        }
        match service.build_code_url("SW1A 2AA 99") {
            Err(ZipQueryError::CodeSize { actual: 11, .. }) => {}
            other => panic!("expected CodeSize, got: {:?}", other),
        }
        match service.build_code_url("SW1A*2AA") {
            Err(ZipQueryError::CodeFormat { .. }) => {}
            other => panic!("expected CodeFormat, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn search_deserializes_nested_results() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(GET).path("/postcodes").query_param("q", "SW1A 2AA");
            then.status(200).body(
                r#"{
                    "status": 200,
                    "result": [{
                        "postcode": "SW1A 2AA",
                        "quality": 1,
                        "country": "England",
                        "region": "London",
                        "longitude": -0.127695,
                        "latitude": 51.503541,
                        "incode": "2AA",
                        "outcode": "SW1A",
                        "admin_district": "Westminster",
                        "codes": {"admin_district": "E09000033"}
                    }]
                }"#,
            );
        });

        let transport = ApiTransport::new_default().unwrap();
        let service = PostcodesIo::with_base_url(transport, &server.base_url()).unwrap();
        let outcome = service
            .query_by_code::<PostcodeSearchResponse>("SW1A 2AA")
            .await
            .unwrap();
        let response = outcome.value().expect("success");
        assert_eq!(response.status, Some(200));
        let results = response.result.as_deref().unwrap();
        assert_eq!(results[0].postcode.as_deref(), Some("SW1A 2AA"));
        assert_eq!(results[0].region.as_deref(), Some("London"));
        assert_eq!(
            results[0]
                .codes
                .as_ref()
                .and_then(|c| c.admin_district.as_deref()),
            Some("E09000033")
        );
        m.assert();
    }

    #[tokio::test]
    async fn no_match_search_still_succeeds() {
        let server = MockServer::start();
        let _m = server.mock(|when, then| {
            when.method(GET).path("/postcodes");
            then.status(200).body(r#"{"status":200,"result":null}"#);
        });

        let transport = ApiTransport::new_default().unwrap();
        let service = PostcodesIo::with_base_url(transport, &server.base_url()).unwrap();
        let outcome = service
            .query_by_code::<PostcodeSearchResponse>("ZZ99")
            .await
            .unwrap();
        let response = outcome.value().expect("success");
        assert!(response.result.is_none());
    }
}
