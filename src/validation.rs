use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

const MIN_KPI_NAME: usize = 2;
const MAX_KPI_NAME: usize = 50;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KpiNameError {
    #[error("KPI name is required.")]
    Missing,
    #[error("KPI name must be at least 2 characters long.")]
    TooShort,
    #[error("KPI name must be less than 50 characters.")]
    TooLong,
    #[error("KPI name can only contain letters, numbers, spaces, hyphens, and underscores.")]
    InvalidCharacters,
}

fn kpi_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-zA-Z0-9\s\-_]+$").expect("static KPI name pattern"))
}

/// Returns the trimmed name when it is acceptable as a KPI identifier.
pub fn validate_kpi_name(raw: &str) -> Result<&str, KpiNameError> {
    let name = raw.trim();
    let length = name.chars().count();
    if length == 0 {
        return Err(KpiNameError::Missing);
    }
    if length < MIN_KPI_NAME {
        return Err(KpiNameError::TooShort);
    }
    if length > MAX_KPI_NAME {
        return Err(KpiNameError::TooLong);
    }
    if !kpi_name_pattern().is_match(name) {
        return Err(KpiNameError::InvalidCharacters);
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_words_digits_spaces_hyphens_underscores() {
        assert_eq!(validate_kpi_name("  body weight "), Ok("body weight"));
        assert_eq!(validate_kpi_name("steps_per-day 2"), Ok("steps_per-day 2"));
        assert_eq!(validate_kpi_name("ab"), Ok("ab"));
        assert_eq!(validate_kpi_name(&"x".repeat(50)).map(str::len), Ok(50));
    }

    #[test]
    fn rejects_by_length() {
        assert_eq!(validate_kpi_name("   "), Err(KpiNameError::Missing));
        assert_eq!(validate_kpi_name("a"), Err(KpiNameError::TooShort));
        assert_eq!(validate_kpi_name(&"x".repeat(51)), Err(KpiNameError::TooLong));
    }

    #[test]
    fn rejects_punctuation() {
        for name in ["sleep/night", "mood!", "a.b", "caf\u{e9}"] {
            assert_eq!(
                validate_kpi_name(name),
                Err(KpiNameError::InvalidCharacters),
                "{name}"
            );
        }
    }
}
