//! Presentation hints for field values

use serde::{Deserialize, Serialize};

/// How a field value should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// URL column holding an http(s) link
    Link,
    /// Email column holding an address
    Email,
    /// Blank value, shown as a placeholder
    Empty,
    Plain,
}

impl FieldKind {
    pub fn classify(header: &str, value: &str) -> Self {
        let header = header.to_lowercase();
        if header.contains("url") && value.starts_with("http") {
            FieldKind::Link
        } else if header.contains("email") && value.contains('@') {
            FieldKind::Email
        } else if value.trim().is_empty() {
            FieldKind::Empty
        } else {
            FieldKind::Plain
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(FieldKind::classify("URL", "http://a.com"), FieldKind::Link);
        assert_eq!(FieldKind::classify("Profile url", "https://x"), FieldKind::Link);
        assert_eq!(FieldKind::classify("URL", "a.com"), FieldKind::Plain);
        assert_eq!(FieldKind::classify("Email Address", "a@x.com"), FieldKind::Email);
        assert_eq!(FieldKind::classify("Email Address", "none"), FieldKind::Plain);
        assert_eq!(FieldKind::classify("Name", "a@x.com"), FieldKind::Plain);
        assert_eq!(FieldKind::classify("Name", "  "), FieldKind::Empty);
        assert_eq!(FieldKind::classify("URL", ""), FieldKind::Empty);
    }
}
