use thiserror::Error;

/// Errors raised while validating an incoming request.
///
/// Every variant is a client error: the server maps all of them to
/// HTTP 400 without attempting any outbound call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One or more required fields were absent or blank.
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// A field exceeded its maximum length (in characters).
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// A field that must hold an email address does not.
    #[error("invalid email address in {0}")]
    InvalidEmail(&'static str),

    /// A field contains a denylisted markup or script signature.
    #[error("{field} contains disallowed content ({pattern})")]
    DangerousContent {
        field: &'static str,
        pattern: &'static str,
    },

    /// The date prefix is not a `YYYY-MM-DD` calendar date.
    #[error("invalid date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),

    /// The slug normalized to an empty string.
    #[error("slug must contain at least one letter or digit")]
    EmptySlug,

    /// The image extension is not on the allowlist.
    #[error("unsupported image type {0:?}, allowed: jpg, jpeg, png, gif, webp")]
    UnsupportedImageType(String),

    /// The image payload is not valid base64.
    #[error("invalid image data: {0}")]
    InvalidImageData(String),

    /// The decoded image exceeds the size cap.
    #[error("image is {size} bytes, maximum is {max} bytes")]
    ImageTooLarge { size: usize, max: usize },
}

/// Collect the names of required fields that are absent or blank.
///
/// Returns `Err(MissingFields)` listing every offending field in the order
/// given, so the caller sees all problems at once.
pub(crate) fn require_fields(
    fields: &[(&'static str, Option<&str>)],
) -> Result<(), ValidationError> {
    let missing: Vec<&'static str> = fields
        .iter()
        .filter(|(_, value)| value.is_none_or(|v| v.trim().is_empty()))
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::MissingFields(missing))
    }
}

/// Reject `value` if it is longer than `max` characters.
pub(crate) fn check_length(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        Err(ValidationError::TooLong { field, max })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_lists_all() {
        let err = require_fields(&[
            ("title", None),
            ("date", Some("2024-01-02")),
            ("slug", Some("   ")),
        ])
        .unwrap_err();
        assert_eq!(err, ValidationError::MissingFields(vec!["title", "slug"]));
        assert_eq!(err.to_string(), "missing required fields: title, slug");
    }

    #[test]
    fn present_fields_pass() {
        assert!(require_fields(&[("name", Some("Ann"))]).is_ok());
    }

    #[test]
    fn length_counts_chars_not_bytes() {
        // Four CJK characters are twelve bytes.
        assert!(check_length("name", "你好世界", 4).is_ok());
        assert_eq!(
            check_length("name", "你好世界!", 4),
            Err(ValidationError::TooLong {
                field: "name",
                max: 4
            })
        );
    }

    #[test]
    fn error_display() {
        let err = ValidationError::ImageTooLarge { size: 10, max: 5 };
        assert_eq!(err.to_string(), "image is 10 bytes, maximum is 5 bytes");
    }
}
