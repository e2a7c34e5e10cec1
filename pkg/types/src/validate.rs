use anyhow::{Result, bail};
use pkg_constants::converter::VALID_FREQUENCIES_MIN;

/// Validate a monitor frequency given in minutes.
/// Rules: ASCII digits only, value in the NAM allow-list. Returns the input unchanged.
pub fn validate_frequency(value: &str) -> Result<String> {
    if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
        bail!(
            "Invalid frequency '{}', valid numbers = {:?}",
            value,
            VALID_FREQUENCIES_MIN
        );
    }
    match value.parse::<u32>() {
        Ok(n) if VALID_FREQUENCIES_MIN.contains(&n) => Ok(value.to_string()),
        _ => bail!(
            "Invalid frequency '{}', valid numbers = {:?}",
            value,
            VALID_FREQUENCIES_MIN
        ),
    }
}

/// Reduce an endpoint name to a file-name component.
/// Spaces are removed, then only `[0-9A-Za-z_-]` is kept.
pub fn sanitize_file_component(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_frequencies() {
        for f in ["1", "2", "5", "10", "15", "30", "60"] {
            assert_eq!(validate_frequency(f).unwrap(), f);
        }
        assert_eq!(validate_frequency("05").unwrap(), "05");
    }

    #[test]
    fn invalid_frequencies() {
        assert!(validate_frequency("").is_err());
        assert!(validate_frequency("0").is_err());
        assert!(validate_frequency("3").is_err());
        assert!(validate_frequency("120").is_err());
        assert!(validate_frequency("-5").is_err());
        assert!(validate_frequency("five").is_err());
        assert!(validate_frequency("99999999999999999999").is_err());
    }

    #[test]
    fn sanitize_names() {
        assert_eq!(sanitize_file_component("My DNS check"), "MyDNScheck");
        assert_eq!(sanitize_file_component("web-01_ping"), "web-01_ping");
        assert_eq!(sanitize_file_component("a/b\\c:d*e"), "abcde");
        assert_eq!(sanitize_file_component("ünïcode 名前"), "ncode");
        assert_eq!(sanitize_file_component(""), "");
    }
}
