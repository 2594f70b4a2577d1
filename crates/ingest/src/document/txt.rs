/// Decode text bytes. Try UTF-8 first, fall back to lossy conversion.
pub fn extract_txt(bytes: &[u8]) -> String {
    String::from_utf8(bytes.to_vec()).unwrap_or_else(|_| String::from_utf8_lossy(bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_simple_text() {
        let text = extract_txt(b"Hello, world!\nThis is a test file.");
        assert_eq!(text, "Hello, world!\nThis is a test file.");
    }

    #[test]
    fn extract_utf8_text() {
        let content = "Ünïcödé text with émojis 🎉".as_bytes();
        assert_eq!(extract_txt(content), "Ünïcödé text with émojis 🎉");
    }

    #[test]
    fn invalid_bytes_are_replaced() {
        let text = extract_txt(b"caf\xe9 au lait");
        assert_eq!(text, "caf\u{FFFD} au lait");
    }

    #[test]
    fn extract_empty_text() {
        assert_eq!(extract_txt(b""), "");
    }
}
