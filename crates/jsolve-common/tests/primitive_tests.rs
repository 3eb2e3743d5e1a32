use super::*;

#[test]
fn test_keyword_round_trip() {
    for kind in PrimitiveKind::ALL {
        assert_eq!(PrimitiveKind::from_keyword(kind.keyword()), Some(kind));
    }
    assert_eq!(PrimitiveKind::from_keyword("void"), None);
}

#[test]
fn test_descriptor_characters() {
    let descriptors: String = PrimitiveKind::ALL.iter().map(|k| k.descriptor()).collect();
    assert_eq!(descriptors, "ZBSCIJFD");
    assert_eq!(PrimitiveKind::from_descriptor('J'), Some(PrimitiveKind::Long));
    assert_eq!(PrimitiveKind::from_descriptor('V'), None);
}

#[test]
fn test_widening_conversions() {
    assert!(PrimitiveKind::Int.widens_to(PrimitiveKind::Long));
    assert!(PrimitiveKind::Char.widens_to(PrimitiveKind::Int));
    assert!(PrimitiveKind::Long.widens_to(PrimitiveKind::Float));
    assert!(!PrimitiveKind::Long.widens_to(PrimitiveKind::Int));
    assert!(!PrimitiveKind::Short.widens_to(PrimitiveKind::Char));
    assert!(!PrimitiveKind::Char.widens_to(PrimitiveKind::Short));
    assert!(!PrimitiveKind::Boolean.widens_to(PrimitiveKind::Int));
}

#[test]
fn test_boxing_names() {
    assert_eq!(PrimitiveKind::Char.boxed_name(), "java.lang.Character");
    assert_eq!(
        PrimitiveKind::from_boxed_name("java.lang.Integer"),
        Some(PrimitiveKind::Int)
    );
}
