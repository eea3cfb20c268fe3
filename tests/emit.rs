use pretty_assertions::assert_eq;

use mipsasm_rs::emit::hex_lines;
use mipsasm_rs::{AsmOptions, Assembler};

fn assemble(src: &str, comment: bool) -> mipsasm_rs::Listing {
    Assembler::new(AsmOptions {
        strict: false,
        comment,
    })
    .assemble(src)
    .unwrap()
}

#[test]
fn binary_listing_is_pc_ordered_words() {
    let listing = assemble("add $1, $2, $3\nsub $1, $2, $3\n", false);
    assert_eq!(
        listing.binary_lines(),
        vec![
            "00000000010000110000100000100000".to_string(),
            "00000000010000110000100000100010".to_string(),
        ]
    );
}

#[test]
fn comment_mode_prefixes_the_register_report() {
    let listing = assemble("add $x, $tmp, $x\n", true);
    let lines = listing.binary_lines();
    // resolution order: rs=$tmp -> 1, rt=$x -> 2
    assert_eq!(lines[0], "# $1 : $tmp   |   $tmp : $1");
    assert_eq!(lines[1], "# $2 : $x     |   $x   : $2");
    assert_eq!(lines[2].len(), 32);
    assert_eq!(lines.len(), 3);
}

#[test]
fn report_left_column_sorts_by_index_right_by_first_use() {
    // resolution order is b (rs), zero (rt), a (rd): first-use order b,
    // zero, a but index order zero, b, a.
    let listing = assemble("add $a, $b, $zero\n", true);
    let lines = listing.binary_lines();
    assert_eq!(lines[0], "# $0 : $zero   |   $b    : $1");
    assert_eq!(lines[1], "# $1 : $b      |   $zero : $0");
    assert_eq!(lines[2], "# $2 : $a      |   $a    : $2");
}

#[test]
fn no_report_without_comment_mode() {
    let listing = assemble("add $x, $y, $z\n", false);
    assert!(listing.binary_lines().iter().all(|l| !l.starts_with('#')));
}

#[test]
fn hex_listing_never_contains_the_report() {
    let listing = assemble("add $x, $tmp, $x\n", true);
    // rs=$tmp->1, rt=$x->2, rd=$x->2
    // 000000 00001 00010 00010 00000 100000
    assert_eq!(listing.hex_lines(), vec!["00221020".to_string()]);
}

#[test]
fn known_add_word_and_its_hex_projection() {
    let listing = assemble("add $1, $2, $3\n", false);
    assert_eq!(
        listing.binary_lines(),
        vec!["00000000010000110000100000100000".to_string()]
    );
    assert_eq!(listing.hex_lines(), vec!["00431820".to_string()]);
}

#[test]
fn hex_projection_strips_comments_and_spaces() {
    let lines = vec![
        "# register report",
        "0000 0000 0100 0011 0000 1000 0010 0000",
        "00000000000000000000000000000110 // six",
    ];
    assert_eq!(hex_lines(lines), vec!["00431820", "00000006"]);
}

#[test]
fn hex_projection_rejects_non_binary_lines() {
    let lines = vec!["", "  ", "012", "10x1", "101;note", "deadbeef"];
    assert!(hex_lines(lines).is_empty());
}

#[test]
fn hex_projection_pads_to_eight_digits() {
    assert_eq!(hex_lines(vec!["1"]), vec!["00000001"]);
    assert_eq!(hex_lines(vec!["101"]), vec!["00000005"]);
    assert_eq!(
        hex_lines(vec!["11111111111111111111111111111111"]),
        vec!["FFFFFFFF"]
    );
}
