pub mod postal_pincode_in;
pub mod postcodes_io;
pub mod smarty;
pub mod via_cep;

use url::Url;

use crate::error::{CoreResult, ZipQueryError};

/// Parse an adapter base URL at construction time so a bad override fails
/// fast instead of at the first query.
pub(crate) fn parse_base_url(base: &str) -> CoreResult<Url> {
    Url::parse(base)
        .map_err(|e| ZipQueryError::Validation(format!("invalid base URL '{base}': {e}")))
}
