use crate::utils::error::{DealMindError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(DealMindError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(DealMindError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(DealMindError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

/// `*` 代表允許任何來源，其餘必須是 http(s) origin
///
/// Entries are compared verbatim against the browser's `Origin` header, so
/// anything beyond `scheme://host[:port]` (a path, a trailing slash, a
/// default port, upper-case host) is rejected.
pub fn validate_origin(field_name: &str, origin: &str) -> Result<()> {
    if origin == "*" {
        return Ok(());
    }
    validate_url(field_name, origin)?;

    let serialized = Url::parse(origin)
        .map(|url| url.origin().ascii_serialization())
        .unwrap_or_default();
    if serialized != origin {
        return Err(DealMindError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: origin.to_string(),
            reason: format!("Origin must be exactly '{}'", serialized),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DealMindError::InvalidConfigValueError {
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
        return Err(DealMindError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(DealMindError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Supported values: {}", allowed.join(", ")),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("base_url", "https://example.com").is_ok());
        assert!(validate_url("base_url", "http://localhost:5000").is_ok());
        assert!(validate_url("base_url", "").is_err());
        assert!(validate_url("base_url", "invalid-url").is_err());
        assert!(validate_url("base_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_origin_accepts_wildcard() {
        assert!(validate_origin("cors.allowed_origins", "*").is_ok());
        assert!(validate_origin("cors.allowed_origins", "http://localhost:5173").is_ok());
        assert!(validate_origin("cors.allowed_origins", "localhost").is_err());
    }

    #[test]
    fn test_validate_origin_rejects_non_origin_urls() {
        let field = "cors.allowed_origins";
        assert!(validate_origin(field, "https://dashboard.example").is_ok());
        assert!(validate_origin(field, "http://127.0.0.1:8080").is_ok());

        assert!(validate_origin(field, "http://a.example/").is_err());
        assert!(validate_origin(field, "http://a.example/app").is_err());
        assert!(validate_origin(field, "http://a.example:80").is_err());
        assert!(validate_origin(field, "http://A.example").is_err());

        match validate_origin(field, "http://a.example/") {
            Err(DealMindError::InvalidConfigValueError { reason, .. }) => {
                assert_eq!(reason, "Origin must be exactly 'http://a.example'")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("server.port", 5000u16, 1, u16::MAX).is_ok());
        assert!(validate_range("server.port", 0u16, 1, u16::MAX).is_err());
    }

    #[test]
    fn test_validate_one_of() {
        assert!(validate_one_of("logging.level", "info", &["info", "debug"]).is_ok());
        assert!(validate_one_of("logging.level", "loud", &["info", "debug"]).is_err());
    }
}
