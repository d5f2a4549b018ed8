//! US ZIP code and street-address lookup via the Smarty APIs
//! (<https://www.smarty.com/>). Requests carry an auth-id/auth-token pair
//! in the query string.

pub mod model;

pub use model::{StreetCandidate, ZipLookupResult};

use once_cell::sync::Lazy;
use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::error::{CoreResult, ZipQueryError};
use crate::normalize::{clean_code, clean_field};
use crate::providers::parse_base_url;
use crate::service::{CodeLookup, ComponentLookup, LookupProvider};
use crate::transport::ApiTransport;

static DEFAULT_ZIPCODE_BASE: Lazy<Url> = Lazy::new(|| {
    Url::parse("https://us-zipcode.api.smartystreets.com/lookup").expect("default zipcode URL")
});
static DEFAULT_STREET_BASE: Lazy<Url> = Lazy::new(|| {
    Url::parse("https://us-street.api.smartystreets.com/street-address").expect("default street URL")
});
static ZIPCODE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{5,16}$").expect("zipcode pattern"));

#[derive(Debug, Clone)]
pub struct Smarty {
    transport: ApiTransport,
    auth_id: SecretString,
    auth_token: SecretString,
    zipcode_base: Url,
    street_base: Url,
}

impl Smarty {
    /// Credentials are required and checked here; a blank id or token is a
    /// construction fault, not something to discover on the first call.
    pub fn new(
        transport: ApiTransport,
        auth_id: impl Into<String>,
        auth_token: impl Into<String>,
    ) -> CoreResult<Self> {
        Self::with_base_urls(
            transport,
            auth_id,
            auth_token,
            DEFAULT_ZIPCODE_BASE.as_str(),
            DEFAULT_STREET_BASE.as_str(),
        )
    }

    pub fn with_base_urls(
        transport: ApiTransport,
        auth_id: impl Into<String>,
        auth_token: impl Into<String>,
        zipcode_base: &str,
        street_base: &str,
    ) -> CoreResult<Self> {
        let auth_id = auth_id.into();
        if auth_id.trim().is_empty() {
            return Err(ZipQueryError::MissingCredential("auth-id"));
        }
        let auth_token = auth_token.into();
        if auth_token.trim().is_empty() {
            return Err(ZipQueryError::MissingCredential("auth-token"));
        }
        Ok(Self {
            transport,
            auth_id: SecretString::from(auth_id),
            auth_token: SecretString::from(auth_token),
            zipcode_base: parse_base_url(zipcode_base)?,
            street_base: parse_base_url(street_base)?,
        })
    }

    fn validate_code(code: &str) -> CoreResult<String> {
        let clean = clean_code(code);
        let len = clean.chars().count();
        if !(5..=16).contains(&len) {
            return Err(ZipQueryError::CodeSize {
                expected: "5 to 16 digits",
                actual: len,
            });
        }
        if !ZIPCODE_PATTERN.is_match(&clean) {
            return Err(ZipQueryError::CodeFormat {
                expected: "5 to 16 digits",
            });
        }
        Ok(clean)
    }

    fn validate_field(field: &'static str, value: &str, max: usize) -> CoreResult<String> {
        let clean = clean_field(value);
        if clean.chars().count() > max {
            return Err(ZipQueryError::FieldTooLong { field, max });
        }
        Ok(clean)
    }

    /// Clone of `base` with the credential pair appended, ready for the
    /// call-specific parameters.
    fn authed(&self, base: &Url) -> Url {
        let mut url = base.clone();
        url.query_pairs_mut()
            .append_pair("auth-id", self.auth_id.expose_secret())
            .append_pair("auth-token", self.auth_token.expose_secret());
        url
    }
}

impl LookupProvider for Smarty {
    fn name(&self) -> &'static str {
        "smarty"
    }

    fn entity(&self) -> &'static str {
        "address"
    }

    fn transport(&self) -> &ApiTransport {
        &self.transport
    }
}

impl CodeLookup for Smarty {
    fn build_code_url(&self, code: &str) -> CoreResult<String> {
        let code = Self::validate_code(code)?;
        let mut url = self.authed(&self.zipcode_base);
        url.query_pairs_mut().append_pair("zipcode", &code);
        Ok(url.to_string())
    }
}

impl ComponentLookup for Smarty {
    // Fields are validated in the order they appear in the URL; the first
    // violation is the one reported.
    fn build_components_url(&self, state: &str, city: &str, street: &str) -> CoreResult<String> {
        let street = Self::validate_field("street", street, 64)?;
        let city = Self::validate_field("city", city, 64)?;
        let state = Self::validate_field("state", state, 32)?;
        let mut url = self.authed(&self.street_base);
        url.query_pairs_mut()
            .append_pair("street", &street)
            .append_pair("city", &city)
            .append_pair("state", &state)
            .append_pair("candidates", "10");
        Ok(url.to_string())
    }
}
