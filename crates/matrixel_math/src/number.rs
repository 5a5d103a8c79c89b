//! Text <-> number conversions that follow the rules browsers use for
//! `Number(text)`, `Number.prototype.toString` and `Number.prototype.toFixed`,
//! so the generated CSS matches what a web page would produce.

pub trait NumberText {
    /// Shortest decimal text that round-trips, switching to exponent form
    /// outside `1e-6..1e21`.
    fn to_number_text(self) -> String;
    /// Decimal text with exactly `places` fractional digits.
    fn to_fixed(self, places: u8) -> String;
    /// The value rounded to `places` fractional digits, as `to_fixed` prints it.
    fn round_to(self, places: u8) -> Self;
}

impl NumberText for f64 {
    fn to_number_text(self) -> String {
        if self.is_nan() {
            return "NaN".to_string();
        }
        if self.is_infinite() {
            return if self > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
        }
        if self == 0.0 {
            return "0".to_string();
        }

        let magnitude = self.abs();
        if magnitude >= 1e21 || magnitude < 1e-6 {
            let text = format!("{:e}", self);
            match text.split_once('e') {
                Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                    format!("{}e+{}", mantissa, exponent)
                }
                _ => text,
            }
        } else {
            format!("{}", self)
        }
    }

    fn to_fixed(self, places: u8) -> String {
        if !self.is_finite() || self.abs() >= 1e21 {
            return self.to_number_text();
        }
        // `-0` prints without a sign, anything below zero keeps it.
        let value = if self == 0.0 { 0.0 } else { self };
        format!("{:.*}", places as usize, value)
    }

    fn round_to(self, places: u8) -> Self {
        self.to_fixed(places).parse().unwrap_or(self)
    }
}

/// Converts text into a number the way `Number(text)` does. Text that is not a
/// numeric literal becomes `NaN`, blank text becomes `0`.
pub fn coerce_number(text: &str) -> f64 {
    let trimmed = text.trim_matches(is_number_whitespace);
    if trimmed.is_empty() {
        return 0.0;
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    if let Some(value) = parse_prefixed_integer(trimmed) {
        return value;
    }

    if is_decimal_literal(trimmed) {
        trimmed.parse().unwrap_or(f64::NAN)
    } else {
        f64::NAN
    }
}

fn is_number_whitespace(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

/// `0x`, `0o` and `0b` literals. Signs are not allowed in front of them.
fn parse_prefixed_integer(text: &str) -> Option<f64> {
    let mut chars = text.chars();
    if chars.next() != Some('0') {
        return None;
    }
    let radix = match chars.next()? {
        'x' | 'X' => 16,
        'o' | 'O' => 8,
        'b' | 'B' => 2,
        _ => return None,
    };

    let digits = &text[2..];
    if digits.is_empty() {
        return Some(f64::NAN);
    }

    let mut value = 0.0;
    for c in digits.chars() {
        match c.to_digit(radix) {
            Some(d) => value = value * radix as f64 + d as f64,
            None => return Some(f64::NAN),
        }
    }
    Some(value)
}

/// `[+-]? (digits [. digits?] | . digits) ([eE] [+-]? digits)?`
fn is_decimal_literal(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let int_digits = i - int_start;

    let mut frac_digits = 0;
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        frac_digits = i - frac_start;
    }

    if int_digits == 0 && frac_digits == 0 {
        return false;
    }

    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        i += 1;
        if i < bytes.len() && matches!(bytes[i], b'+' | b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }

    i == bytes.len()
}
