use mipsasm_rs::literal::{is_marked_literal, parse_literal};

#[test]
fn hash_prefixed_decimal() {
    assert_eq!(parse_literal("#8"), Some(8));
    assert_eq!(parse_literal("#-8"), Some(-8));
    assert_eq!(parse_literal("#0"), Some(0));
    assert_eq!(parse_literal("#"), None);
    assert_eq!(parse_literal("#x"), None);
    assert_eq!(parse_literal("#0x10"), None);
}

#[test]
fn hex_forms() {
    assert_eq!(parse_literal("0x1F"), Some(31));
    assert_eq!(parse_literal("0x1f"), Some(31));
    assert_eq!(parse_literal("0x1FH"), Some(31));
    assert_eq!(parse_literal("1FH"), Some(31));
    assert_eq!(parse_literal("1fh"), Some(31));
    // 'b' is a hex digit when the token carries the H suffix
    assert_eq!(parse_literal("0b1h"), Some(0x0B1));
}

#[test]
fn binary_forms() {
    assert_eq!(parse_literal("0b101"), Some(5));
    assert_eq!(parse_literal("0b101B"), Some(5));
    assert_eq!(parse_literal("101B"), Some(5));
    assert_eq!(parse_literal("0b102"), None);
}

#[test]
fn octal_forms() {
    assert_eq!(parse_literal("17O"), Some(15));
    assert_eq!(parse_literal("17q"), Some(15));
    assert_eq!(parse_literal("017"), Some(15));
    // a non-octal digit disqualifies the leading-zero form; the token then
    // reads as plain decimal
    assert_eq!(parse_literal("08"), Some(8));
    assert_eq!(parse_literal("19O"), None);
}

#[test]
fn decimal_forms() {
    assert_eq!(parse_literal("31"), Some(31));
    assert_eq!(parse_literal("31D"), Some(31));
    assert_eq!(parse_literal("0"), Some(0));
    // a leading zero with non-octal digits still reads as decimal
    assert_eq!(parse_literal("019"), Some(19));
}

#[test]
fn sign_applies_to_any_base() {
    assert_eq!(parse_literal("-9"), Some(-9));
    assert_eq!(parse_literal("-0x10"), Some(-16));
    assert_eq!(parse_literal("-101B"), Some(-5));
    assert_eq!(parse_literal("-17O"), Some(-15));
    assert_eq!(parse_literal("-31D"), Some(-31));
}

#[test]
fn rejects_garbage() {
    assert_eq!(parse_literal(""), None);
    assert_eq!(parse_literal("-"), None);
    assert_eq!(parse_literal("--5"), None);
    assert_eq!(parse_literal("abc"), None);
    assert_eq!(parse_literal("0x"), None);
    assert_eq!(parse_literal("1a"), None);
    assert_eq!(parse_literal("$1"), None);
}

#[test]
fn parsing_is_deterministic() {
    for token in ["0x1F", "#-8", "17O", "101B", "31D", "019"] {
        assert_eq!(parse_literal(token), parse_literal(token));
    }
}

#[test]
fn marked_literals_are_absolute_forms_only() {
    assert!(is_marked_literal("0x14"));
    assert!(is_marked_literal("0b100"));
    assert!(is_marked_literal("14H"));
    assert!(is_marked_literal("100B"));
    assert!(is_marked_literal("24O"));
    assert!(is_marked_literal("24Q"));
    assert!(is_marked_literal("20D"));
    // bare digits and #-prefixed values are offsets, not addresses
    assert!(!is_marked_literal("20"));
    assert!(!is_marked_literal("#20"));
    assert!(!is_marked_literal("label"));
}
