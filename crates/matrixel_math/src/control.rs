use std::ops::RangeInclusive;

use crate::number::NumberText;

/// Slider groups and the range each one accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlClass {
    Scale,
    Skew,
    Translation,
    Rotation,
}

impl ControlClass {
    pub const fn title(self) -> &'static str {
        match self {
            ControlClass::Scale => "Scale",
            ControlClass::Skew => "Skew",
            ControlClass::Translation => "Translation",
            ControlClass::Rotation => "Rotation",
        }
    }

    pub const fn min(self) -> f64 {
        match self {
            ControlClass::Scale => -3.0,
            ControlClass::Skew => -5.0,
            ControlClass::Translation => -150.0,
            ControlClass::Rotation => -180.0,
        }
    }

    pub const fn max(self) -> f64 {
        -self.min()
    }

    pub const fn step(self) -> f64 {
        match self {
            ControlClass::Rotation => 1.0,
            _ => 0.01,
        }
    }

    /// Fractional digits implied by [`Self::step`].
    pub const fn decimals(self) -> u8 {
        match self {
            ControlClass::Rotation => 0,
            _ => 2,
        }
    }

    pub const fn range(self) -> RangeInclusive<f64> {
        self.min()..=self.max()
    }

    /// Clamps `value` into range and onto the step grid, the way a range input
    /// settles its value.
    pub fn snap(self, value: f64) -> f64 {
        if value.is_nan() {
            return self.min();
        }
        let clamped = value.clamp(self.min(), self.max());
        let steps = ((clamped - self.min()) / self.step()).round();
        let snapped = (self.min() + steps * self.step()).min(self.max());
        let snapped = snapped.round_to(self.decimals());
        if snapped == 0.0 { 0.0 } else { snapped }
    }

    /// The text a range input reports for `value`, e.g. `0.3` rather than
    /// `0.30000000000000004`.
    pub fn value_text(self, value: f64) -> String {
        self.snap(value).to_number_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ControlClass::Scale, 0.1 + 0.2, "0.3")]
    #[case(ControlClass::Scale, 1.004, "1")]
    #[case(ControlClass::Scale, 7.0, "3")]
    #[case(ControlClass::Skew, -5.5, "-5")]
    #[case(ControlClass::Translation, 42.126, "42.13")]
    #[case(ControlClass::Translation, -0.001, "0")]
    #[case(ControlClass::Rotation, 44.6, "45")]
    #[case(ControlClass::Rotation, -200.0, "-180")]
    fn value_text(#[case] class: ControlClass, #[case] value: f64, #[case] expected: &str) {
        assert_eq!(class.value_text(value), expected);
    }

    #[test]
    fn ranges() {
        assert_eq!(ControlClass::Scale.range(), -3.0..=3.0);
        assert_eq!(ControlClass::Skew.range(), -5.0..=5.0);
        assert_eq!(ControlClass::Translation.range(), -150.0..=150.0);
        assert_eq!(ControlClass::Rotation.range(), -180.0..=180.0);
        assert_eq!(ControlClass::Rotation.step(), 1.0);
        assert_eq!(ControlClass::Skew.step(), 0.01);
    }
}
