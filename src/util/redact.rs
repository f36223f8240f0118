/// Replace credential occurrences in response text before it lands in an
/// error value.
pub(crate) fn redact_text(mut text: String, secret: &str) -> String {
    if !secret.is_empty() {
        text = text.replace(secret, "<redacted>");
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redact_text_strips_secret() {
        let redacted = redact_text("token apiapi leaked".to_string(), "apiapi");
        assert_eq!(redacted, "token <redacted> leaked");
    }

    #[test]
    fn redact_text_empty_secret_is_noop() {
        let redacted = redact_text("unchanged".to_string(), "");
        assert_eq!(redacted, "unchanged");
    }
}
