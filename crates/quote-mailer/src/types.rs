//! Email request structures and validation

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use lazy_static::lazy_static;
use regex::Regex;

/// Largest attachment accepted, in decoded bytes
pub const MAX_ATTACHMENT_BYTES: usize = 10 * 1024 * 1024;

lazy_static! {
    /// Conservative address pattern: dotted local part, dotted domain, alphabetic TLD
    static ref EMAIL_PATTERN: Regex =
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)*\.[A-Za-z]{2,}$").unwrap();
}

/// Outbound email
#[derive(Debug, Clone)]
pub struct SendEmailRequest {
    /// Sender address, optionally `Name <addr>`
    pub from: String,

    pub to: Vec<String>,

    pub subject: String,

    pub html: Option<String>,

    /// Plain-text alternative
    pub text: Option<String>,

    pub headers: Vec<EmailHeader>,

    /// Tags for tracking
    pub tags: Vec<EmailTag>,

    pub attachments: Vec<Attachment>,

    /// SES configuration set
    pub configuration_set: Option<String>,
}

impl SendEmailRequest {
    /// Create a simple email request
    pub fn simple(from: &str, to: &str, subject: &str, html: &str) -> Self {
        Self {
            from: from.to_string(),
            to: vec![to.to_string()],
            subject: subject.to_string(),
            html: Some(html.to_string()),
            text: None,
            headers: vec![],
            tags: vec![],
            attachments: vec![],
            configuration_set: None,
        }
    }

    /// Add a tag for tracking
    pub fn with_tag(mut self, name: &str, value: &str) -> Self {
        self.tags.push(EmailTag {
            name: name.to_string(),
            value: value.to_string(),
        });
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push(EmailHeader {
            name: name.to_string(),
            value: value.to_string(),
        });
        self
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Validate the request
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.from.is_empty() {
            return Err(ValidationError::MissingField("from"));
        }
        if !is_valid_email(&self.from) {
            return Err(ValidationError::InvalidEmail(self.from.clone()));
        }

        if self.to.is_empty() {
            return Err(ValidationError::MissingField("to"));
        }
        for email in &self.to {
            if !is_valid_email(email) {
                return Err(ValidationError::InvalidEmail(email.clone()));
            }
        }

        if self.subject.trim().is_empty() {
            return Err(ValidationError::MissingField("subject"));
        }
        if has_control(&self.subject) {
            return Err(ValidationError::HeaderInjection("subject"));
        }
        for header in &self.headers {
            let name_ok = !header.name.is_empty()
                && header.name.bytes().all(|b| b.is_ascii_graphic() && b != b':');
            if !name_ok || has_control(&header.value) {
                return Err(ValidationError::HeaderInjection("header"));
            }
        }

        if self.html.is_none() && self.text.is_none() {
            return Err(ValidationError::MissingContent);
        }

        for attachment in &self.attachments {
            if has_control(&attachment.filename) || has_control(&attachment.content_type) {
                return Err(ValidationError::HeaderInjection("attachment"));
            }
            let size = attachment.decoded_len();
            if size > MAX_ATTACHMENT_BYTES {
                return Err(ValidationError::AttachmentTooLarge(size, MAX_ATTACHMENT_BYTES));
            }
        }

        Ok(())
    }
}

/// Custom email header
#[derive(Debug, Clone, PartialEq)]
pub struct EmailHeader {
    pub name: String,
    pub value: String,
}

/// Email tag for tracking
#[derive(Debug, Clone, PartialEq)]
pub struct EmailTag {
    pub name: String,
    pub value: String,
}

/// Email attachment
#[derive(Debug, Clone)]
pub struct Attachment {
    pub filename: String,

    /// Base64-encoded content
    pub content: String,

    /// MIME type (e.g., "application/pdf")
    pub content_type: String,
}

impl Attachment {
    /// Encode raw bytes as an attachment
    pub fn from_bytes(filename: &str, bytes: &[u8], content_type: &str) -> Self {
        Self {
            filename: filename.to_string(),
            content: BASE64.encode(bytes),
            content_type: content_type.to_string(),
        }
    }

    pub fn pdf(filename: &str, bytes: &[u8]) -> Self {
        Self::from_bytes(filename, bytes, "application/pdf")
    }

    /// Size of the content once decoded, without decoding it
    pub fn decoded_len(&self) -> usize {
        let encoded = self.content.trim_end();
        let padding = encoded.bytes().rev().take_while(|&b| b == b'=').count();
        (encoded.len() / 4 * 3).saturating_sub(padding)
    }
}

/// Validation error
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Email must have either html or text content")]
    MissingContent,

    #[error("Attachment too large: {0} bytes (max {1})")]
    AttachmentTooLarge(usize, usize),

    #[error("Control character in {0}")]
    HeaderInjection(&'static str),
}

fn has_control(text: &str) -> bool {
    text.chars().any(char::is_control)
}

/// Check an address, accepting the `Name <addr>` form
///
/// In the named form the `<addr>` must end the value, and the name may not
/// carry address syntax of its own.
pub fn is_valid_email(email: &str) -> bool {
    if has_control(email) {
        return false;
    }
    let email = email.trim();
    match email.strip_suffix('>') {
        Some(named) => match named.split_once('<') {
            Some((name, address)) => {
                !name.contains(['<', '>', ',', ';', ':', '@', '"']) && is_bare_address(address)
            }
            None => false,
        },
        None => is_bare_address(email),
    }
}

/// Check a lone address with no display name
pub fn is_bare_address(email: &str) -> bool {
    !has_control(email) && EMAIL_PATTERN.is_match(email)
}
