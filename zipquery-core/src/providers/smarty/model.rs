use serde::{Deserialize, Serialize};

/// One row of a Smarty US ZIP code lookup: the city/state and zipcode
/// candidates matching the queried code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZipLookupResult {
    pub input_index: Option<i64>,
    #[serde(default)]
    pub city_states: Vec<CityState>,
    #[serde(default)]
    pub zipcodes: Vec<ZipcodeEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CityState {
    pub city: Option<String>,
    pub state_abbreviation: Option<String>,
    pub state: Option<String>,
    pub mailable_city: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZipcodeEntry {
    pub zipcode: Option<String>,
    pub zipcode_type: Option<String>,
    pub default_city: Option<String>,
    pub county_fips: Option<String>,
    pub county_name: Option<String>,
    pub state_abbreviation: Option<String>,
    pub state: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub precision: Option<String>,
}

/// One candidate of a Smarty US street-address search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreetCandidate {
    pub input_index: Option<i64>,
    pub candidate_index: Option<i64>,
    pub delivery_line_1: Option<String>,
    pub last_line: Option<String>,
    pub delivery_point_barcode: Option<String>,
    pub components: Option<AddressComponents>,
    pub metadata: Option<AddressMetadata>,
    pub analysis: Option<DpvAnalysis>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddressComponents {
    pub primary_number: Option<String>,
    pub street_name: Option<String>,
    pub street_suffix: Option<String>,
    pub city_name: Option<String>,
    pub default_city_name: Option<String>,
    pub state_abbreviation: Option<String>,
    pub zipcode: Option<String>,
    pub plus4_code: Option<String>,
    pub delivery_point: Option<String>,
    pub delivery_point_check_digit: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddressMetadata {
    pub record_type: Option<String>,
    pub zip_type: Option<String>,
    pub county_fips: Option<String>,
    pub county_name: Option<String>,
    pub carrier_route: Option<String>,
    pub congressional_district: Option<String>,
    pub rdi: Option<String>,
    pub elot_sequence: Option<String>,
    pub elot_sort: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub precision: Option<String>,
    pub time_zone: Option<String>,
    pub utc_offset: Option<f64>,
    pub dst: Option<bool>,
}

/// USPS delivery-point validation flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DpvAnalysis {
    pub dpv_match_code: Option<String>,
    pub dpv_footnotes: Option<String>,
    pub dpv_cmra: Option<String>,
    pub dpv_vacant: Option<String>,
    pub active: Option<String>,
}
