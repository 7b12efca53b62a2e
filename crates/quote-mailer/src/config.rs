//! Mailer configuration

/// Sender identity for quotation emails
#[derive(Debug, Clone)]
pub struct MailerConfig {
    /// `From` address, optionally `Name <addr>`
    pub from: String,

    /// Company named in the subject line and body
    pub company_name: String,

    /// SES configuration set for delivery tracking
    pub configuration_set: Option<String>,
}

impl Default for MailerConfig {
    fn default() -> Self {
        Self {
            from: "Skyline Elevators <quotes@skyline-elevators.com>".to_string(),
            company_name: "Skyline Elevators Pvt Ltd".to_string(),
            configuration_set: None,
        }
    }
}

impl MailerConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            from: std::env::var("MAIL_FROM").unwrap_or(defaults.from),
            company_name: std::env::var("COMPANY_NAME").unwrap_or(defaults.company_name),
            configuration_set: std::env::var("SES_CONFIGURATION_SET")
                .ok()
                .filter(|s| !s.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sender_is_valid() {
        assert!(crate::types::is_valid_email(&MailerConfig::default().from));
    }
}
