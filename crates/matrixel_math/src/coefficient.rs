use std::fmt;

use crate::number::{NumberText, coerce_number};

/// How a coefficient is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Notation {
    /// Shortest decimal form, `1`, `0.25`, `NaN`.
    #[default]
    Number,
    /// A fixed number of fractional digits, `0.707`, `-1.000`.
    Fixed(u8),
}

/// One of the six matrix coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coefficient {
    value: f64,
    /// Unrounded input of a `Fixed` coefficient. Rounding first would print a
    /// tiny negative as `0.000` rather than `-0.000`.
    raw: f64,
    notation: Notation,
}

impl Coefficient {
    pub const fn number(value: f64) -> Self {
        Self {
            value,
            raw: value,
            notation: Notation::Number,
        }
    }

    /// Rounds `value` to `places` digits and keeps printing it with exactly
    /// that many digits.
    pub fn fixed(value: f64, places: u8) -> Self {
        Self {
            value: value.round_to(places),
            raw: value,
            notation: Notation::Fixed(places),
        }
    }

    /// Coerces raw input text. Malformed text yields `NaN`.
    pub fn parse(raw: &str) -> Self {
        Self::number(coerce_number(raw))
    }

    pub fn value(self) -> f64 {
        self.value
    }

    pub fn notation(self) -> Notation {
        self.notation
    }
}

impl fmt::Display for Coefficient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.notation {
            Notation::Number => f.write_str(&self.value.to_number_text()),
            Notation::Fixed(places) => f.write_str(&self.raw.to_fixed(places)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_notation_prints_shortest_form() {
        assert_eq!(Coefficient::number(1.0).to_string(), "1");
        assert_eq!(Coefficient::number(-0.35).to_string(), "-0.35");
        assert_eq!(Coefficient::parse("abc").to_string(), "NaN");
    }

    #[test]
    fn fixed_notation_keeps_trailing_zeros() {
        let c = Coefficient::fixed(1.0, 3);
        assert_eq!(c.to_string(), "1.000");
        assert_eq!(c.value(), 1.0);
        assert_eq!(c.notation(), Notation::Fixed(3));
    }

    #[test]
    fn fixed_notation_keeps_the_sign_of_tiny_values() {
        let c = Coefficient::fixed(-1.2246467991473532e-16, 3);
        assert_eq!(c.to_string(), "-0.000");
        assert_eq!(c.value(), 0.0);
        assert_eq!(Coefficient::fixed(1.2246467991473532e-16, 3).to_string(), "0.000");
    }

    #[test]
    fn fixed_and_number_with_same_value_differ() {
        assert_ne!(Coefficient::fixed(0.0, 3), Coefficient::number(0.0));
    }
}
