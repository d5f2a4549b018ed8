use unicode_normalization::UnicodeNormalization;

/// NFC normalization + trim. Free-form fields come from user input and may
/// carry decomposed accents (e.g. "São Paulo" typed on macOS).
pub(crate) fn clean_field(s: &str) -> String {
    s.nfc().collect::<String>().trim().to_string()
}

/// Field cleanup plus separator stripping for numeric code formats
/// ("14810-100" -> "14810100").
pub(crate) fn clean_code(s: &str) -> String {
    clean_field(s).replace('-', "")
}
