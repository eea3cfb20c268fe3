/// Parse a numeric literal token into a signed value.
///
/// Supported surface syntaxes, checked in this priority order
/// (case-insensitive): `#`-prefixed decimal, hex (`0x1F`, `0x1FH`, `1FH`),
/// binary (`0b101`, `0b101B`, `101B`), octal (`017`, `17O`, `17Q`), decimal
/// (`31`, `31D`). A leading `-` negates the magnitude regardless of base
/// marker. Returns `None` for anything else; callers attach the line
/// diagnostic.
pub fn parse_literal(token: &str) -> Option<i64> {
    let t = token.trim().to_ascii_lowercase();

    // #-prefixed decimal carries its own sign
    if let Some(rest) = t.strip_prefix('#') {
        let digits = rest.strip_prefix('-').unwrap_or(rest);
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            return rest.parse().ok();
        }
        return None;
    }

    let (neg, t) = match t.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, t.as_str()),
    };
    let sign = if neg { -1 } else { 1 };

    let all = |s: &str, pred: fn(u8) -> bool| !s.is_empty() && s.bytes().all(pred);
    let is_hex = |b: u8| b.is_ascii_hexdigit();
    let is_bin = |b: u8| b == b'0' || b == b'1';
    let is_oct = |b: u8| (b'0'..=b'7').contains(&b);
    let is_dec = |b: u8| b.is_ascii_digit();

    // hex: 0x prefix, 0x..h, bare ..h
    if let Some(body) = t.strip_prefix("0x") {
        let body = body.strip_suffix('h').unwrap_or(body);
        if all(body, is_hex) {
            return i64::from_str_radix(body, 16).ok().map(|v| v * sign);
        }
    }
    if let Some(body) = t.strip_suffix('h') {
        if all(body, is_hex) {
            return i64::from_str_radix(body, 16).ok().map(|v| v * sign);
        }
    }

    // binary: 0b prefix, 0b..b, bare ..b
    if let Some(body) = t.strip_prefix("0b") {
        let body = body.strip_suffix('b').unwrap_or(body);
        if all(body, is_bin) {
            return i64::from_str_radix(body, 2).ok().map(|v| v * sign);
        }
    }
    if let Some(body) = t.strip_suffix('b') {
        if all(body, is_bin) {
            return i64::from_str_radix(body, 2).ok().map(|v| v * sign);
        }
    }

    // octal: leading zero (no x/b), bare ..o / ..q
    if let Some(body) = t.strip_prefix('0') {
        if all(body, is_oct) {
            return i64::from_str_radix(body, 8).ok().map(|v| v * sign);
        }
    }
    if let Some(body) = t.strip_suffix('o').or_else(|| t.strip_suffix('q')) {
        if all(body, is_oct) {
            return i64::from_str_radix(body, 8).ok().map(|v| v * sign);
        }
    }

    // decimal: bare digits, bare ..d
    if all(t, is_dec) {
        return t.parse::<i64>().ok().map(|v| v * sign);
    }
    if let Some(body) = t.strip_suffix('d') {
        if all(body, is_dec) {
            return body.parse::<i64>().ok().map(|v| v * sign);
        }
    }

    None
}

/// True when the token is one of the explicitly base-marked literal forms
/// (`0x..`, `0b..`, `..H`, `..B`, `..O`, `..Q`, `..D`). Branch targets in
/// these forms are absolute addresses; bare digits are a relative word
/// offset instead.
pub fn is_marked_literal(token: &str) -> bool {
    let t = token.trim().to_ascii_lowercase();
    let all = |s: &str, pred: fn(u8) -> bool| !s.is_empty() && s.bytes().all(pred);
    let is_hex = |b: u8| b.is_ascii_hexdigit();
    let is_bin = |b: u8| b == b'0' || b == b'1';
    let is_oct = |b: u8| (b'0'..=b'7').contains(&b);
    let is_dec = |b: u8| b.is_ascii_digit();

    if let Some(body) = t.strip_prefix("0x") {
        if all(body, is_hex) {
            return true;
        }
    }
    if let Some(body) = t.strip_prefix("0b") {
        if all(body, is_bin) {
            return true;
        }
    }
    if let Some(body) = t.strip_suffix('h') {
        if all(body, is_hex) {
            return true;
        }
    }
    if let Some(body) = t.strip_suffix('b') {
        if all(body, is_bin) {
            return true;
        }
    }
    if let Some(body) = t.strip_suffix('o').or_else(|| t.strip_suffix('q')) {
        if all(body, is_oct) {
            return true;
        }
    }
    if let Some(body) = t.strip_suffix('d') {
        if all(body, is_dec) {
            return true;
        }
    }
    false
}
