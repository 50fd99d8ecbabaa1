use super::ApiError;
use crate::constants::limits::{MAX_TRENDS_NUMBER, MAX_WORD_LENGTH};
use crate::models::PeriodType;

pub fn validate_trends_number(trends_number: u32) -> Result<u32, ApiError> {
    if !(1..=MAX_TRENDS_NUMBER).contains(&trends_number) {
        return Err(ApiError::validation(format!(
            "Invalid trends_number: {trends_number}. Must be between 1 and {MAX_TRENDS_NUMBER}"
        )));
    }
    Ok(trends_number)
}

pub fn validate_word(word: Option<&str>) -> Result<&str, ApiError> {
    let trimmed = word.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return Err(ApiError::validation("Word cannot be empty"));
    }

    if trimmed.chars().count() > MAX_WORD_LENGTH {
        return Err(ApiError::validation(format!(
            "Word must be {MAX_WORD_LENGTH} characters or less"
        )));
    }

    Ok(trimmed)
}

pub fn validate_period_type(period: Option<&str>) -> Result<PeriodType, ApiError> {
    match period {
        None => Ok(PeriodType::default()),
        Some(raw) if raw.trim().is_empty() => Ok(PeriodType::default()),
        Some(raw) => raw.parse().map_err(ApiError::validation),
    }
}

pub fn validate_limit(limit: Option<u32>) -> Result<Option<u32>, ApiError> {
    match limit {
        Some(0) => Err(ApiError::validation("Limit must be a positive integer")),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_trends_number() {
        assert!(validate_trends_number(1).is_ok());
        assert!(validate_trends_number(50).is_ok());
        assert!(validate_trends_number(0).is_err());
        assert!(validate_trends_number(51).is_err());
    }

    #[test]
    fn test_validate_word() {
        assert_eq!(validate_word(Some("  rust ")).unwrap(), "rust");
        assert!(validate_word(Some("   ")).is_err());
        assert!(validate_word(None).is_err());
        assert!(validate_word(Some(&"a".repeat(101))).is_err());
    }

    #[test]
    fn test_validate_period_type() {
        assert_eq!(validate_period_type(None).unwrap(), PeriodType::Year);
        assert_eq!(
            validate_period_type(Some("today 3-m")).unwrap(),
            PeriodType::Quarter
        );
        assert!(validate_period_type(Some("forever")).is_err());
    }

    #[test]
    fn test_validate_limit() {
        assert_eq!(validate_limit(None).unwrap(), None);
        assert_eq!(validate_limit(Some(10)).unwrap(), Some(10));
        assert!(validate_limit(Some(0)).is_err());
    }
}
