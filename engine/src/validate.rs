use crate::error::RollError;

/// Validate a raw dice-count string against `1..=max_dice`.
///
/// Parsing is lenient the way a browser number field is: leading whitespace and a
/// sign are accepted, then the leading run of digits is read and anything after it
/// is ignored (`"4 dice"` is 4, `"3.9"` is 3). A `0x`/`0X` prefix switches to hex
/// digits, so `"0x5"` is 5. Digit runs too long for `i64` saturate, so they still
/// land on the right side of the bounds.
pub fn validate(raw: &str, max_dice: u8) -> Result<u8, RollError> {
    let n = parse_leading_int(raw).ok_or(RollError::NotANumber)?;
    if n <= 0 {
        return Err(RollError::TooFew);
    }
    if n > i64::from(max_dice) {
        return Err(RollError::TooMany { max: max_dice });
    }
    u8::try_from(n).map_err(|_| RollError::TooMany { max: max_dice })
}

fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let (radix, digits) = match rest.get(..2) {
        Some("0x" | "0X") => (16, &rest[2..]),
        _ => (10, rest),
    };
    let run: Vec<i64> = digits
        .chars()
        .map_while(|c| c.to_digit(radix))
        .map(i64::from)
        .collect();
    if run.is_empty() {
        return None;
    }
    let magnitude = run.into_iter().fold(0i64, |acc, d| {
        acc.saturating_mul(i64::from(radix)).saturating_add(d)
    });
    Some(if negative { -magnitude } else { magnitude })
}
