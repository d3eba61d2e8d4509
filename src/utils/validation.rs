use crate::utils::error::{UploadError, Result};
use std::collections::HashSet;
use url::Url;

/// Database URL schemes the gateway has a driver for.
pub const SUPPORTED_DATABASE_SCHEMES: &[&str] = &["mysql", "mariadb", "sqlite"];

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_database_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(UploadError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) if SUPPORTED_DATABASE_SCHEMES.contains(&url.scheme()) => Ok(()),
        Ok(url) => Err(UploadError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!(
                "Unsupported URL scheme: {}. Supported schemes: {}",
                url.scheme(),
                SUPPORTED_DATABASE_SCHEMES.join(", ")
            ),
        }),
        Err(e) => Err(UploadError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(UploadError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(UploadError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// Returns true when `path` ends in one of `allowed_extensions` (exact match).
pub fn has_allowed_extension(path: &str, allowed_extensions: &[&str]) -> bool {
    let allowed_set: HashSet<&str> = allowed_extensions.iter().copied().collect();

    std::path::Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| allowed_set.contains(ext))
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| UploadError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(UploadError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(UploadError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_database_url() {
        assert!(validate_database_url("database_url", "mysql://root@localhost/users").is_ok());
        assert!(validate_database_url("database_url", "sqlite::memory:").is_ok());
        assert!(validate_database_url("database_url", "").is_err());
        assert!(validate_database_url("database_url", "not a url").is_err());
        assert!(validate_database_url("database_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_has_allowed_extension() {
        assert!(has_allowed_extension("users.csv", &["csv"]));
        assert!(has_allowed_extension("/tmp/data/users.csv", &["csv"]));
        assert!(!has_allowed_extension("users.txt", &["csv"]));
        assert!(!has_allowed_extension("users", &["csv"]));
        assert!(!has_allowed_extension("users.CSV", &["csv"]));
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("port", 3306u16, 1, u16::MAX).is_ok());
        assert!(validate_range("port", 0u16, 1, u16::MAX).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some("users.csv".to_string());
        assert_eq!(validate_required_field("file", &present).unwrap(), "users.csv");

        let absent: Option<String> = None;
        assert!(matches!(
            validate_required_field("file", &absent),
            Err(UploadError::MissingConfigError { .. })
        ));
    }
}
