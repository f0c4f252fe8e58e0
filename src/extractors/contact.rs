// src/extractors/contact.rs

use crate::extractors::record::FieldValue;
use once_cell::sync::Lazy;
use regex::Regex;

// --- Regex Patterns for Contact Info (Lazy Static) ---
// Optional country code, optional separator, then ten digits
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\+?\d{1,3})?[-\s]?\d{10}").expect("Failed to compile PHONE_RE")
});

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("Failed to compile EMAIL_RE")
});

/// Phone and email fields pulled from a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactInfo {
    pub phone: FieldValue,
    pub email: FieldValue,
}

/// Finds every phone number and email address in `text`, in document order.
/// Multiple hits are joined with ", ".
pub fn extract_contact_info(text: &str) -> ContactInfo {
    let phones: Vec<&str> = PHONE_RE.find_iter(text).map(|m| m.as_str().trim()).collect();
    let emails: Vec<&str> = EMAIL_RE.find_iter(text).map(|m| m.as_str()).collect();
    tracing::debug!("Found {} phone number(s) and {} email address(es)", phones.len(), emails.len());

    ContactInfo {
        phone: FieldValue::from_items(phones),
        email: FieldValue::from_items(emails),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_and_email_are_found() {
        let info = extract_contact_info("Jane Doe\njane.doe+cv@mail.example.org | +44 7911123456\n");
        assert_eq!(info.email.as_str(), "jane.doe+cv@mail.example.org");
        assert_eq!(info.phone.as_str(), "+44 7911123456");
    }

    #[test]
    fn test_multiple_matches_are_joined_in_order() {
        let info = extract_contact_info("a@x.io 9876543210\nb@y.co\n1234567890");
        assert_eq!(info.email.as_str(), "a@x.io, b@y.co");
        assert_eq!(info.phone.as_str(), "9876543210, 1234567890");
    }

    #[test]
    fn test_missing_contact_info_is_not_found() {
        let info = extract_contact_info("No contact here, call 555-1234 maybe.");
        assert_eq!(info.phone, FieldValue::NotFound);
        assert_eq!(info.email, FieldValue::NotFound);
    }
}
