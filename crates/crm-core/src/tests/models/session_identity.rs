use crate::SessionIdentity;

use uuid::Uuid;

#[test]
fn test_authenticated_is_not_anonymous() {
    let subject = Uuid::new_v4();
    let identity = SessionIdentity::authenticated(subject);
    assert_eq!(identity.subject, subject);
    assert!(!identity.anonymous);
}

#[test]
fn test_anonymous_is_flagged() {
    let identity = SessionIdentity::anonymous();
    assert!(identity.anonymous);
}

#[test]
fn test_anonymous_subjects_are_distinct() {
    let a = SessionIdentity::anonymous();
    let b = SessionIdentity::anonymous();
    assert_ne!(a.subject, b.subject);
}
