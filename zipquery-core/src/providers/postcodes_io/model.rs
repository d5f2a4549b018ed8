use serde::{Deserialize, Serialize};

/// Envelope returned by the Postcodes.io search endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostcodeSearchResponse {
    pub status: Option<i64>,
    pub result: Option<Vec<PostcodeInfo>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostcodeInfo {
    pub postcode: Option<String>,
    pub quality: Option<i64>,
    pub eastings: Option<i64>,
    pub northings: Option<i64>,
    pub country: Option<String>,
    pub nhs_ha: Option<String>,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub european_electoral_region: Option<String>,
    pub primary_care_trust: Option<String>,
    pub region: Option<String>,
    pub lsoa: Option<String>,
    pub msoa: Option<String>,
    pub incode: Option<String>,
    pub outcode: Option<String>,
    pub parliamentary_constituency: Option<String>,
    pub admin_district: Option<String>,
    pub parish: Option<String>,
    pub admin_county: Option<String>,
    pub admin_ward: Option<String>,
    pub ced: Option<String>,
    pub ccg: Option<String>,
    pub nuts: Option<String>,
    pub codes: Option<AdminCodes>,
}

/// Administrative and statistical region codes for a postcode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminCodes {
    pub admin_district: Option<String>,
    pub admin_county: Option<String>,
    pub admin_ward: Option<String>,
    pub parish: Option<String>,
    pub parliamentary_constituency: Option<String>,
    pub ccg: Option<String>,
    pub ced: Option<String>,
    pub nuts: Option<String>,
}
