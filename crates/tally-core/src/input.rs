//! Parsing of raw point-entry text.

/// Parse the integer prefix of a point-entry field.
///
/// Leading whitespace and a single sign are accepted, then as many ASCII
/// digits as follow. Anything after the digits is ignored, so `"12abc"` is 12
/// and `"3.9"` is 3. Text without a leading digit run (including the empty
/// string) is 0, as is a digit run too large for an `i64`.
pub fn parse_points(raw: &str) -> i64 {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return 0;
    }

    let mut value: i64 = 0;
    for b in rest[..digits_len].bytes() {
        let digit = i64::from(b - b'0');
        let next = value.checked_mul(10).and_then(|v| {
            if negative {
                v.checked_sub(digit)
            } else {
                v.checked_add(digit)
            }
        });
        match next {
            Some(v) => value = v,
            None => return 0,
        }
    }
    value
}

/// Text shown in a point-entry field for a staged value (empty for zero).
pub fn display_pending(pending: i64) -> String {
    if pending == 0 {
        String::new()
    } else {
        pending.to_string()
    }
}
