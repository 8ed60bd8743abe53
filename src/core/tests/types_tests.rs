use crate::core::types::{short_id_of, KeyKind, KeyRecord, Mode, Signer};

#[test]
fn test_short_id_takes_last_eight() {
    assert_eq!(short_id_of("0123456789ABCDEF"), "89ABCDEF");
}

#[test]
fn test_short_id_of_short_key() {
    assert_eq!(short_id_of("ABCD"), "ABCD");
    assert_eq!(short_id_of("AAAA1111"), "AAAA1111");
    assert_eq!(short_id_of(""), "");
}

#[test]
fn test_key_record_derives_short_id() {
    let record = KeyRecord::new("FEDCBA9876543210", "Bob <b@x.com>", true);

    assert_eq!(record.full_id(), "FEDCBA9876543210");
    assert_eq!(record.short_id(), "76543210");
    assert_eq!(record.uid(), "Bob <b@x.com>");
    assert!(record.is_secret());
}

#[test]
fn test_mode_display() {
    assert_eq!(format!("{}", Mode::Symmetric), "symmetric");
    assert_eq!(format!("{}", Mode::Recipients), "recipients");
    assert_eq!(Mode::default(), Mode::Recipients);
}

#[test]
fn test_signer_display() {
    assert_eq!(format!("{}", Signer::None), "none");
    assert_eq!(format!("{}", Signer::Key("AAAA1111".to_string())), "AAAA1111");
    assert_eq!(Signer::None.key_id(), None);
}

#[test]
fn test_key_kind_flags() {
    assert_eq!(KeyKind::Public.primary_tag(), "pub");
    assert_eq!(KeyKind::Secret.primary_tag(), "sec");
    assert_eq!(KeyKind::Public.list_flag(), "--list-keys");
    assert_eq!(KeyKind::Secret.list_flag(), "--list-secret-keys");
}
