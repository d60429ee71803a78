//! Email content builders
//!
//! Text and HTML bodies for the notifications the club sends.

/// Plain-text body for a forwarded contact-us message
pub fn contact_notification_text(
    first_name: &str,
    last_name: &str,
    sender_email: &str,
    phone_number: &str,
    body: &str,
) -> String {
    format!(
        "You have received a new message through the website contact form.\n\
         \n\
         Name: {} {}\n\
         Email: {}\n\
         Phone: {}\n\
         \n\
         Message:\n\
         {}\n",
        first_name, last_name, sender_email, phone_number, body
    )
}

/// HTML body for a forwarded contact-us message
pub fn contact_notification_html(
    first_name: &str,
    last_name: &str,
    sender_email: &str,
    phone_number: &str,
    body: &str,
) -> String {
    format!(
        r#"<html>
<body style="font-family: Arial, sans-serif; color: #222;">
    <h2>New Contact Us Message</h2>
    <p>You have received a new message through the website contact form.</p>
    <table cellpadding="4">
        <tr><td><strong>Name</strong></td><td>{} {}</td></tr>
        <tr><td><strong>Email</strong></td><td>{}</td></tr>
        <tr><td><strong>Phone</strong></td><td>{}</td></tr>
    </table>
    <h3>Message</h3>
    <p style="white-space: pre-wrap;">{}</p>
</body>
</html>"#,
        escape_html(first_name),
        escape_html(last_name),
        escape_html(sender_email),
        escape_html(phone_number),
        escape_html(body)
    )
}

fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_notification_text_includes_details() {
        let text = contact_notification_text(
            "Robin",
            "Hood",
            "robin@sherwood.example",
            "+2348012345678",
            "Interested in joining the club.",
        );

        assert!(text.contains("Robin Hood"));
        assert!(text.contains("robin@sherwood.example"));
        assert!(text.contains("+2348012345678"));
        assert!(text.contains("Interested in joining the club."));
    }

    #[test]
    fn test_contact_notification_html_escapes_input() {
        let html = contact_notification_html(
            "<script>",
            "Hood",
            "robin@sherwood.example",
            "123",
            "a & b < c",
        );

        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("a &amp; b &lt; c"));
        assert!(!html.contains("<script>"));
    }
}
