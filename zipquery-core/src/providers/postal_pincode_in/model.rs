use serde::{Deserialize, Serialize};

/// Envelope returned by Postalpincode.in: a status line plus the matching
/// post offices. Keys are PascalCase on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PincodeResponse {
    #[serde(rename = "Message")]
    pub message: Option<String>,
    #[serde(rename = "Status")]
    pub status: Option<String>,
    #[serde(rename = "PostOffice")]
    pub post_offices: Option<Vec<PostOffice>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PostOffice {
    pub name: Option<String>,
    pub description: Option<String>,
    pub branch_type: Option<String>,
    pub delivery_status: Option<String>,
    pub taluk: Option<String>,
    pub circle: Option<String>,
    pub district: Option<String>,
    pub division: Option<String>,
    pub region: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}
