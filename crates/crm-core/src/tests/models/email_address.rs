use crate::EmailAddress;

use proptest::prelude::*;

#[test]
fn test_parse_valid() {
    let email = EmailAddress::parse("sam@example.com").unwrap();
    assert_eq!(email.as_str(), "sam@example.com");
}

#[test]
fn test_parse_trims_surrounding_whitespace() {
    let email = EmailAddress::parse("  sam@example.com  ").unwrap();
    assert_eq!(email.as_str(), "sam@example.com");
}

#[test]
fn test_parse_accepts_subdomains() {
    assert!(EmailAddress::parse("ops@mail.eu.example.com").is_ok());
}

#[test]
fn test_parse_rejects_empty() {
    assert!(EmailAddress::parse("").is_err());
    assert!(EmailAddress::parse("   ").is_err());
}

#[test]
fn test_parse_rejects_missing_at() {
    assert!(EmailAddress::parse("sam.example.com").is_err());
}

#[test]
fn test_parse_rejects_multiple_at() {
    assert!(EmailAddress::parse("sam@ops@example.com").is_err());
}

#[test]
fn test_parse_rejects_empty_local_part() {
    assert!(EmailAddress::parse("@example.com").is_err());
}

#[test]
fn test_parse_rejects_domain_without_dot() {
    assert!(EmailAddress::parse("sam@localhost").is_err());
}

#[test]
fn test_parse_rejects_empty_domain_labels() {
    assert!(EmailAddress::parse("sam@example..com").is_err());
    assert!(EmailAddress::parse("sam@.example.com").is_err());
    assert!(EmailAddress::parse("sam@example.com.").is_err());
}

#[test]
fn test_parse_rejects_embedded_whitespace() {
    assert!(EmailAddress::parse("sam smith@example.com").is_err());
}

#[test]
fn test_display_matches_as_str() {
    let email = EmailAddress::parse("sam@example.com").unwrap();
    assert_eq!(email.to_string(), email.as_str());
}

proptest! {
    #[test]
    fn prop_simple_shapes_parse(
        local in "[a-z0-9]{1,12}",
        domain in "[a-z0-9]{1,12}",
        tld in "[a-z]{2,4}",
    ) {
        let raw = format!("{local}@{domain}.{tld}");
        prop_assert!(EmailAddress::parse(&raw).is_ok());
    }

    #[test]
    fn prop_no_at_never_parses(raw in "[a-z0-9.]{1,30}") {
        prop_assert!(EmailAddress::parse(&raw).is_err());
    }

    #[test]
    fn prop_embedded_space_never_parses(
        left in "[a-z]{1,8}",
        right in "[a-z]{1,8}",
    ) {
        let raw = format!("{left} {right}@example.com");
        prop_assert!(EmailAddress::parse(&raw).is_err());
    }
}
