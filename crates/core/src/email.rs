use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, check_length, require_fields};
use crate::sanitize::{escape_html, find_dangerous_pattern, is_valid_email, sanitize};

/// Maximum subject length in characters.
pub const MAX_SUBJECT_LEN: usize = 200;

/// Maximum body length in characters.
pub const MAX_BODY_LEN: usize = 10_000;

/// Body of `POST /api/send-email`.
///
/// Every field is optional at the wire level so that a missing field is
/// reported as a validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct EmailRequest {
    /// Recipient address.
    #[cfg_attr(feature = "openapi", schema(example = "reader@example.com"))]
    pub to: Option<String>,
    /// Subject line, at most 200 characters.
    pub subject: Option<String>,
    /// Plain-text body, at most 10000 characters.
    #[serde(alias = "text", alias = "message")]
    pub body: Option<String>,
    /// Optional reply-to address.
    #[serde(alias = "replyTo")]
    pub reply_to: Option<String>,
}

/// An email request that passed validation and is safe to relay.
///
/// `subject` and `body` are sanitized and HTML-escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
    pub reply_to: Option<String>,
}

impl EmailRequest {
    /// Validate, sanitize and escape the request.
    ///
    /// Checks run in order: required fields, length limits, address shape,
    /// then the markup denylist on the raw subject and body.
    pub fn validate(&self) -> Result<ValidatedEmail, ValidationError> {
        require_fields(&[
            ("to", self.to.as_deref()),
            ("subject", self.subject.as_deref()),
            ("body", self.body.as_deref()),
        ])?;

        let to = self.to.as_deref().unwrap_or_default().trim();
        let subject = self.subject.as_deref().unwrap_or_default();
        let body = self.body.as_deref().unwrap_or_default();
        let reply_to = self
            .reply_to
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty());

        check_length("subject", subject, MAX_SUBJECT_LEN)?;
        check_length("body", body, MAX_BODY_LEN)?;

        let to = checked_address("to", to)?;
        let reply_to = reply_to
            .map(|r| checked_address("reply_to", r))
            .transpose()?;

        for (field, value) in [("subject", subject), ("body", body)] {
            if let Some(pattern) = find_dangerous_pattern(value) {
                return Err(ValidationError::DangerousContent { field, pattern });
            }
        }

        let subject = sanitize(subject);
        let body = sanitize(body);
        // Markup-only input sanitizes down to nothing.
        require_fields(&[
            ("subject", Some(subject.as_str())),
            ("body", Some(body.as_str())),
        ])?;

        Ok(ValidatedEmail {
            to,
            subject: escape_html(&subject),
            body: escape_html(&body),
            reply_to,
        })
    }
}

/// An address is relayed exactly as given, so it must survive sanitizing
/// unchanged and still be well-formed.
fn checked_address(field: &'static str, raw: &str) -> Result<String, ValidationError> {
    let clean = sanitize(raw);
    if clean != raw || !is_valid_email(&clean) {
        return Err(ValidationError::InvalidEmail(field));
    }
    Ok(clean)
}
