//! Brazilian address lookup via the ViaCep API (<https://viacep.com.br>).

pub mod model;

pub use model::ViaCepAddress;

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::error::{CoreResult, ZipQueryError};
use crate::normalize::{clean_code, clean_field};
use crate::providers::parse_base_url;
use crate::service::{CodeLookup, ComponentLookup, LookupProvider};
use crate::transport::ApiTransport;

static DEFAULT_BASE: Lazy<Url> =
    Lazy::new(|| Url::parse("https://viacep.com.br").expect("default base URL"));
static CEP_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{8}$").expect("CEP pattern"));

/// ViaCep accepts an 8-digit CEP (hyphen optional) or a reverse lookup by
/// state/city/street, both answered as path-style JSON endpoints.
#[derive(Debug, Clone)]
pub struct ViaCep {
    transport: ApiTransport,
    base: Url,
}

impl ViaCep {
    pub fn new(transport: ApiTransport) -> Self {
        Self {
            transport,
            base: DEFAULT_BASE.clone(),
        }
    }

    /// Point the adapter at a different host (tests, proxies).
    pub fn with_base_url(transport: ApiTransport, base: &str) -> CoreResult<Self> {
        Ok(Self {
            transport,
            base: parse_base_url(base)?,
        })
    }

    fn validate_code(code: &str) -> CoreResult<String> {
        let clean = clean_code(code);
        if clean.chars().count() != 8 {
            return Err(ZipQueryError::CodeSize {
                expected: "8 digits",
                actual: clean.chars().count(),
            });
        }
        if !CEP_PATTERN.is_match(&clean) {
            return Err(ZipQueryError::CodeFormat {
                expected: "8 digits",
            });
        }
        Ok(clean)
    }

    fn validate_field(field: &'static str, value: &str, min: usize) -> CoreResult<String> {
        let clean = clean_field(value);
        if clean.chars().count() < min {
            return Err(ZipQueryError::FieldTooShort { field, min });
        }
        Ok(clean)
    }

    fn ws_url(&self, segments: &[&str]) -> CoreResult<String> {
        let mut url = self.base.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ZipQueryError::Validation("base URL cannot carry a path".into()))?;
            path.pop_if_empty().push("ws");
            for segment in segments {
                path.push(segment);
            }
            path.push("json").push("");
        }
        Ok(url.to_string())
    }
}

impl LookupProvider for ViaCep {
    fn name(&self) -> &'static str {
        "viacep"
    }

    fn entity(&self) -> &'static str {
        "address"
    }

    fn transport(&self) -> &ApiTransport {
        &self.transport
    }
}

impl CodeLookup for ViaCep {
    fn build_code_url(&self, code: &str) -> CoreResult<String> {
        let code = Self::validate_code(code)?;
        self.ws_url(&[&code])
    }
}

impl ComponentLookup for ViaCep {
    // Fields are validated in the order they appear in the URL; the first
    // violation is the one reported.
    fn build_components_url(&self, state: &str, city: &str, street: &str) -> CoreResult<String> {
        let state = Self::validate_field("state", state, 2)?;
        let city = Self::validate_field("city", city, 3)?;
        let street = Self::validate_field("street", street, 3)?;
        self.ws_url(&[&state, &city, &street])
    }
}
