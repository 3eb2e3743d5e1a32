use super::*;

#[test]
fn test_unescape_plain_char() {
    assert_eq!(unescape_char("a"), Some('a'));
}

#[test]
fn test_unescape_simple_escapes() {
    assert_eq!(unescape_char("\\n"), Some('\n'));
    assert_eq!(unescape_char("\\t"), Some('\t'));
    assert_eq!(unescape_char("\\'"), Some('\''));
    assert_eq!(unescape_char("\\\\"), Some('\\'));
}

#[test]
fn test_unescape_unicode_escape() {
    assert_eq!(unescape_char("\\u0041"), Some('A'));
    assert_eq!(unescape_char("\\uu0041"), Some('A'));
    assert_eq!(unescape_char("\\u00"), None);
}

#[test]
fn test_unescape_octal_escape() {
    assert_eq!(unescape_char("\\101"), Some('A'));
    assert_eq!(unescape_char("\\0"), Some('\0'));
    assert_eq!(unescape_string("\\477"), Some("'7".to_string()));
}

#[test]
fn test_unescape_rejects_multiple_chars() {
    assert_eq!(unescape_char("ab"), None);
    assert_eq!(unescape_char(""), None);
}

#[test]
fn test_unescape_string_mixed() {
    assert_eq!(
        unescape_string("a\\tb\\u0043"),
        Some("a\tbC".to_string())
    );
    assert_eq!(unescape_string("bad\\q"), None);
}
