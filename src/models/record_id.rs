//! Record identifier (Aleph system number)

use std::fmt;

use crate::error::{AppError, AppResult};

/// Opaque catalog record identifier.
///
/// Used verbatim as the cache file stem and inside the Z39.50 query, so it
/// must be non-empty and must not contain path components or whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordId(String);

impl RecordId {
    pub fn parse(raw: &str) -> AppResult<Self> {
        if raw.is_empty() {
            return Err(AppError::Validation("record identifier is empty".to_string()));
        }
        if raw == "." || raw == ".." {
            return Err(AppError::Validation(format!(
                "record identifier {:?} is not a file name",
                raw
            )));
        }
        if raw
            .chars()
            .any(|c| c == '/' || c == '\\' || c.is_whitespace() || c.is_control())
        {
            return Err(AppError::Validation(format!(
                "record identifier {:?} contains path separators or whitespace",
                raw
            )));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for RecordId {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_system_number_verbatim() {
        let id = RecordId::parse("000123456").unwrap();
        assert_eq!(id.as_str(), "000123456");
        assert_eq!(id.to_string(), "000123456");
    }

    #[test]
    fn test_rejects_empty() {
        assert!(matches!(RecordId::parse(""), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_rejects_path_escapes() {
        for raw in ["..", ".", "../etc/passwd", "a/b", "a\\b", "000 123"] {
            assert!(RecordId::parse(raw).is_err(), "{raw} should be rejected");
        }
    }
}
