use serde::{Deserialize, Serialize};

/// Address record returned by the ViaCep API. Every field is optional:
/// ViaCep omits or blanks fields freely depending on the locality.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViaCepAddress {
    #[serde(rename = "cep")]
    pub zip_code: Option<String>,
    #[serde(rename = "logradouro")]
    pub street: Option<String>,
    #[serde(rename = "complemento")]
    pub complement: Option<String>,
    #[serde(rename = "bairro")]
    pub neighborhood: Option<String>,
    #[serde(rename = "localidade")]
    pub city: Option<String>,
    #[serde(rename = "uf")]
    pub state: Option<String>,
    pub ibge: Option<String>,
    pub gia: Option<String>,
    pub ddd: Option<String>,
    pub siafi: Option<String>,
}
