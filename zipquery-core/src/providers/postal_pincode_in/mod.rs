//! Indian postal PIN lookup via the Postalpincode.in API
//! (<http://www.postalpincode.in/>).

pub mod model;

pub use model::{PincodeResponse, PostOffice};

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::error::{CoreResult, ZipQueryError};
use crate::normalize::clean_code;
use crate::providers::parse_base_url;
use crate::service::{CodeLookup, LookupProvider};
use crate::transport::ApiTransport;

static DEFAULT_BASE: Lazy<Url> =
    Lazy::new(|| Url::parse("http://postalpincode.in").expect("default base URL"));
static PIN_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{6}$").expect("PIN pattern"));

/// Indian PINs are exactly six digits; the service has no street search.
#[derive(Debug, Clone)]
pub struct PostalPincodeIn {
    transport: ApiTransport,
    base: Url,
}

impl PostalPincodeIn {
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
        let clean = clean_code(code);
        if clean.chars().count() != 6 {
            return Err(ZipQueryError::CodeSize {
                expected: "6 digits",
                actual: clean.chars().count(),
            });
        }
        if !PIN_PATTERN.is_match(&clean) {
            return Err(ZipQueryError::CodeFormat {
                expected: "6 digits",
            });
        }
        Ok(clean)
    }
}

impl LookupProvider for PostalPincodeIn {
    fn name(&self) -> &'static str {
        "postalpincode-in"
    }

    fn entity(&self) -> &'static str {
        "postcode"
    }

    fn transport(&self) -> &ApiTransport {
        &self.transport
    }
}

impl CodeLookup for PostalPincodeIn {
    fn build_code_url(&self, code: &str) -> CoreResult<String> {
        let code = Self::validate_code(code)?;
        let mut url = self.base.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ZipQueryError::Validation("base URL cannot carry a path".into()))?;
            path.pop_if_empty().push("api").push("pincode").push(&code);
        }
        Ok(url.to_string())
    }
}
