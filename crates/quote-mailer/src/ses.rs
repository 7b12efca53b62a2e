//! AWS SES v2 transport
//!
//! Sends the request as a raw MIME message so the quotation PDF travels as a
//! real attachment.

use async_trait::async_trait;
use aws_sdk_sesv2::{
    primitives::Blob,
    types::{EmailContent, MessageTag, RawMessage},
    Client as SesClient,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use tracing::{error, info, instrument};

use crate::transport::{MailReceipt, MailTransport, TransportError};
use crate::types::SendEmailRequest;

/// Base64 line length inside MIME parts
const MIME_LINE_LENGTH: usize = 76;

/// Text bytes per RFC 2047 encoded word, keeping each word under 75 characters
const ENCODED_WORD_BYTES: usize = 45;

/// SES email sender
pub struct SesTransport {
    client: SesClient,
    configuration_set: Option<String>,
}

impl SesTransport {
    /// Create from the ambient AWS environment
    pub async fn from_env(configuration_set: Option<String>) -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::with_client(SesClient::new(&config), configuration_set)
    }

    pub fn with_client(client: SesClient, configuration_set: Option<String>) -> Self {
        Self {
            client,
            configuration_set,
        }
    }
}

#[async_trait]
impl MailTransport for SesTransport {
    #[instrument(skip(self, request), fields(to = ?request.to, subject = %request.subject))]
    async fn send_mail(&self, request: &SendEmailRequest) -> Result<MailReceipt, TransportError> {
        let mime_message = build_mime_message(request, &mime_boundary("Part"), &mime_boundary("Alt"));

        let raw_message = RawMessage::builder()
            .data(Blob::new(mime_message))
            .build()
            .map_err(|e| TransportError::BuildError(e.to_string()))?;

        let email_content = EmailContent::builder().raw(raw_message).build();

        let mut send_request = self.client.send_email().content(email_content);

        if let Some(config_set) = request
            .configuration_set
            .as_ref()
            .or(self.configuration_set.as_ref())
        {
            send_request = send_request.configuration_set_name(config_set.clone());
        }

        for tag in &request.tags {
            send_request = send_request.email_tags(
                MessageTag::builder()
                    .name(&tag.name)
                    .value(&tag.value)
                    .build()
                    .map_err(|e| TransportError::BuildError(e.to_string()))?,
            );
        }

        let result = send_request.send().await.map_err(|e| {
            error!(error = %e, "SES raw send failed");
            TransportError::SendFailed(e.to_string())
        })?;

        let message_id = result.message_id().unwrap_or("unknown").to_string();
        info!(message_id = %message_id, "Email sent");

        Ok(MailReceipt { message_id })
    }
}

fn mime_boundary(kind: &str) -> String {
    format!("----=_{}_{}", kind, uuid::Uuid::new_v4().simple())
}

/// Render a multipart/mixed message: text and HTML alternatives, then attachments
pub(crate) fn build_mime_message(
    request: &SendEmailRequest,
    boundary: &str,
    inner_boundary: &str,
) -> Vec<u8> {
    let mut message = String::new();
    let mut line = |text: &str| {
        message.push_str(text);
        message.push_str("\r\n");
    };

    let to: Vec<String> = request.to.iter().map(|address| encode_address(address)).collect();
    line(&format!("From: {}", encode_address(&request.from)));
    line(&format!("To: {}", to.join(", ")));
    line(&format!("Subject: {}", encode_header(&request.subject)));
    line("MIME-Version: 1.0");
    for header in &request.headers {
        line(&format!("{}: {}", header.name, encode_header(&header.value)));
    }
    line(&format!(
        "Content-Type: multipart/mixed; boundary=\"{boundary}\""
    ));
    line("");

    if request.html.is_some() || request.text.is_some() {
        line(&format!("--{boundary}"));
        line(&format!(
            "Content-Type: multipart/alternative; boundary=\"{inner_boundary}\""
        ));
        line("");

        let bodies = [("text/plain", &request.text), ("text/html", &request.html)];
        for (content_type, body) in bodies {
            if let Some(body) = body {
                line(&format!("--{inner_boundary}"));
                line(&format!("Content-Type: {content_type}; charset=UTF-8"));
                line("Content-Transfer-Encoding: 8bit");
                line("");
                line(body.as_str());
            }
        }

        line(&format!("--{inner_boundary}--"));
    }

    for attachment in &request.attachments {
        line(&format!("--{boundary}"));
        let filename = quoted_param(&attachment.filename);
        line(&format!(
            "Content-Type: {}; name={}",
            attachment.content_type, filename
        ));
        line("Content-Transfer-Encoding: base64");
        line(&format!("Content-Disposition: attachment; filename={}", filename));
        line("");

        // Content is base64 already, so every chunk is ASCII
        let encoded = attachment.content.trim();
        let mut rest = encoded;
        while !rest.is_empty() {
            let (chunk, tail) = rest.split_at(rest.len().min(MIME_LINE_LENGTH));
            line(chunk);
            rest = tail;
        }
    }

    line(&format!("--{boundary}--"));

    message.into_bytes()
}

/// Split non-ASCII text into RFC 2047 `B` encoded words
fn encoded_words(text: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut start = 0;
    while start < text.len() {
        let mut end = (start + ENCODED_WORD_BYTES).min(text.len());
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        words.push(format!("=?UTF-8?B?{}?=", BASE64.encode(&text[start..end])));
        start = end;
    }
    words
}

/// Header text, folded into encoded words when it is not plain ASCII
fn encode_header(text: &str) -> String {
    if text.is_ascii() {
        text.to_string()
    } else {
        encoded_words(text).join("\r\n ")
    }
}

/// `Name <addr>` with only the display name encoded
fn encode_address(address: &str) -> String {
    match address.rfind('<') {
        Some(split) if !address.is_ascii() => {
            let name = address[..split].trim();
            format!("{} {}", encode_header(name), &address[split..])
        }
        _ => address.to_string(),
    }
}

/// Quoted MIME parameter value
fn quoted_param(value: &str) -> String {
    if value.is_ascii() {
        format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        format!("\"{}\"", encoded_words(value).join(" "))
    }
}
