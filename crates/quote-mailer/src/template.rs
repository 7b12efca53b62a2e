//! Quotation email content

use quote_pdf::format_currency;

/// Values interpolated into the quotation email
#[derive(Debug, Clone)]
pub struct QuotationEmail {
    pub customer_name: String,
    pub quote_number: String,
    pub company_name: String,
    /// Launch-tier grand total including GST
    pub grand_total: f64,
}

impl QuotationEmail {
    pub fn subject(&self) -> String {
        format!("Quotation {} from {}", self.quote_number, self.company_name)
    }

    pub fn html(&self) -> String {
        let customer_name = escape_html(&self.greeting_name());
        let quote_number = escape_html(&self.quote_number);
        let company_name = escape_html(&self.company_name);
        let grand_total = format_currency(self.grand_total);

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
</head>
<body style="font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
  <div style="border-top: 4px solid #c9a340; padding-top: 20px;">
    <h1 style="color: #212633; font-size: 22px;">Your quotation is ready</h1>
  </div>

  <p style="color: #555; font-size: 16px; line-height: 1.5;">
    Dear {customer_name},
  </p>

  <p style="color: #555; font-size: 16px; line-height: 1.5;">
    Thank you for your interest in {company_name}. Please find attached quotation
    <strong>{quote_number}</strong> for your elevator requirement.
  </p>

  <div style="background: #faf3de; padding: 15px 20px; border-radius: 6px; margin: 25px 0;">
    <p style="color: #6b7280; font-size: 13px; margin: 0;">Launch offer grand total (incl. GST)</p>
    <p style="color: #212633; font-size: 24px; font-weight: 700; margin: 6px 0 0 0;">&#8377; {grand_total}</p>
  </div>

  <p style="color: #555; font-size: 14px; line-height: 1.5;">
    Reply to this email if you have any questions or would like to proceed.
  </p>

  <hr style="border: none; border-top: 1px solid #eee; margin: 30px 0;">

  <p style="color: #999; font-size: 12px;">
    {company_name}<br>
    This quotation is confidential and intended only for the addressee.
  </p>
</body>
</html>"#
        )
    }

    pub fn text(&self) -> String {
        format!(
            "Dear {customer_name},\n\n\
            Thank you for your interest in {company_name}. Please find attached quotation \
            {quote_number} for your elevator requirement.\n\n\
            Launch offer grand total (incl. GST): Rs. {grand_total}\n\n\
            Reply to this email if you have any questions or would like to proceed.\n\n\
            ---\n\
            {company_name}",
            customer_name = self.greeting_name(),
            company_name = self.company_name,
            quote_number = self.quote_number,
            grand_total = format_currency(self.grand_total),
        )
    }

    fn greeting_name(&self) -> String {
        let name = self.customer_name.trim();
        if name.is_empty() {
            "Customer".to_string()
        } else {
            name.to_string()
        }
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email() -> QuotationEmail {
        QuotationEmail {
            customer_name: "Acme Pvt Ltd".to_string(),
            quote_number: "QT-2025-014".to_string(),
            company_name: "Skyline Elevators Pvt Ltd".to_string(),
            grand_total: 547520.0,
        }
    }

    #[test]
    fn test_subject() {
        assert_eq!(
            email().subject(),
            "Quotation QT-2025-014 from Skyline Elevators Pvt Ltd"
        );
    }

    #[test]
    fn test_bodies_interpolate_values() {
        let email = email();
        let html = email.html();
        assert!(html.contains("Dear Acme Pvt Ltd,"));
        assert!(html.contains("<strong>QT-2025-014</strong>"));
        assert!(html.contains("&#8377; 5,47,520"));

        let text = email.text();
        assert!(text.contains("Rs. 5,47,520"));
        assert!(text.contains("quotation QT-2025-014"));
    }

    #[test]
    fn test_html_escapes_customer_input() {
        let mut email = email();
        email.customer_name = "<script>alert(1)</script> & Co".to_string();
        let html = email.html();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt; &amp; Co"));
    }

    #[test]
    fn test_blank_name_falls_back() {
        let mut email = email();
        email.customer_name = "  ".to_string();
        assert!(email.text().starts_with("Dear Customer,"));
    }
}
