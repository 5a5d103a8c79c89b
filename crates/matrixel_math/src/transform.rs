use std::f64::consts::PI;

use glam::{DAffine2, DMat2, DVec2};

use crate::{
    coefficient::Coefficient, control::ControlClass, css, number::NumberText, preset::Preset,
};

/// Fractional digits kept for coefficients derived from a rotation angle.
pub const ROTATION_PRECISION: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoefficientKey {
    A,
    B,
    C,
    D,
    X,
    Y,
}

impl CoefficientKey {
    pub const ALL: [CoefficientKey; 6] = [
        CoefficientKey::A,
        CoefficientKey::B,
        CoefficientKey::C,
        CoefficientKey::D,
        CoefficientKey::X,
        CoefficientKey::Y,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            CoefficientKey::A => "a",
            CoefficientKey::B => "b",
            CoefficientKey::C => "c",
            CoefficientKey::D => "d",
            CoefficientKey::X => "x",
            CoefficientKey::Y => "y",
        }
    }

    /// The slider group the coefficient belongs to. `a`/`d` scale, `b`/`c`
    /// skew, `x`/`y` translate.
    pub const fn control_class(self) -> ControlClass {
        match self {
            CoefficientKey::A | CoefficientKey::D => ControlClass::Scale,
            CoefficientKey::B | CoefficientKey::C => ControlClass::Skew,
            CoefficientKey::X | CoefficientKey::Y => ControlClass::Translation,
        }
    }

    /// Axis label inside the slider group. Skew X is `c`, skew Y is `b`.
    pub const fn axis_label(self) -> &'static str {
        match self {
            CoefficientKey::A | CoefficientKey::C | CoefficientKey::X => "X",
            CoefficientKey::B | CoefficientKey::D | CoefficientKey::Y => "Y",
        }
    }
}

/// The coefficients of `matrix(a, b, c, d, x, y)` plus the angle last used to
/// derive them.
///
/// `rotation` is informational only. Setting `a`..`d` directly afterwards
/// leaves it untouched, so it may no longer describe the matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformState {
    pub a: Coefficient,
    pub b: Coefficient,
    pub c: Coefficient,
    pub d: Coefficient,
    pub x: Coefficient,
    pub y: Coefficient,
    pub rotation: f64,
}

impl Default for TransformState {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TransformState {
    pub const DEFAULT: TransformState = TransformState {
        a: Coefficient::number(1.0),
        b: Coefficient::number(0.0),
        c: Coefficient::number(0.0),
        d: Coefficient::number(1.0),
        x: Coefficient::number(0.0),
        y: Coefficient::number(0.0),
        rotation: 0.0,
    };

    pub const fn from_values(values: [f64; 6]) -> Self {
        let [a, b, c, d, x, y] = values;
        Self {
            a: Coefficient::number(a),
            b: Coefficient::number(b),
            c: Coefficient::number(c),
            d: Coefficient::number(d),
            x: Coefficient::number(x),
            y: Coefficient::number(y),
            rotation: 0.0,
        }
    }

    pub fn reset() -> Self {
        Self::DEFAULT
    }

    pub fn get(&self, key: CoefficientKey) -> Coefficient {
        match key {
            CoefficientKey::A => self.a,
            CoefficientKey::B => self.b,
            CoefficientKey::C => self.c,
            CoefficientKey::D => self.d,
            CoefficientKey::X => self.x,
            CoefficientKey::Y => self.y,
        }
    }

    fn get_mut(&mut self, key: CoefficientKey) -> &mut Coefficient {
        match key {
            CoefficientKey::A => &mut self.a,
            CoefficientKey::B => &mut self.b,
            CoefficientKey::C => &mut self.c,
            CoefficientKey::D => &mut self.d,
            CoefficientKey::X => &mut self.x,
            CoefficientKey::Y => &mut self.y,
        }
    }

    pub fn with_coefficient(mut self, key: CoefficientKey, value: Coefficient) -> Self {
        *self.get_mut(key) = value;
        self
    }

    /// Replaces `key` with the coerced raw input. `rotation` is kept as is.
    pub fn update(self, key: CoefficientKey, raw: &str) -> Self {
        self.with_coefficient(key, Coefficient::parse(raw))
    }

    /// Rebuilds the linear part as a pure rotation by `degrees`. Translation is
    /// kept, any skew or scale is lost.
    pub fn set_rotation(self, degrees: f64) -> Self {
        let theta = degrees * PI / 180.0;
        let (sin, cos) = theta.sin_cos();
        Self {
            a: Coefficient::fixed(cos, ROTATION_PRECISION),
            b: Coefficient::fixed(sin, ROTATION_PRECISION),
            c: Coefficient::fixed(-sin, ROTATION_PRECISION),
            d: Coefficient::fixed(cos, ROTATION_PRECISION),
            rotation: degrees,
            ..self
        }
    }

    pub fn with_translation(self, x: f64, y: f64) -> Self {
        Self {
            x: Coefficient::number(x),
            y: Coefficient::number(y),
            ..self
        }
    }

    pub fn apply_preset(self, preset: Preset) -> Self {
        preset.state()
    }

    pub fn values(&self) -> [f64; 6] {
        [
            self.a.value(),
            self.b.value(),
            self.c.value(),
            self.d.value(),
            self.x.value(),
            self.y.value(),
        ]
    }

    pub fn is_finite(&self) -> bool {
        self.values().iter().all(|v| v.is_finite())
    }

    /// Columns `(a, b)` and `(c, d)`, translation `(x, y)`, as CSS lays them out.
    pub fn to_affine(&self) -> DAffine2 {
        DAffine2::from_mat2_translation(
            DMat2::from_cols(
                DVec2::new(self.a.value(), self.b.value()),
                DVec2::new(self.c.value(), self.d.value()),
            ),
            DVec2::new(self.x.value(), self.y.value()),
        )
    }

    /// The matrix as it is usually drawn:
    ///
    /// ```text
    /// a c x
    /// b d y
    /// 0 0 1
    /// ```
    pub fn matrix_rows(&self) -> [[String; 3]; 3] {
        [
            [self.a.to_string(), self.c.to_string(), self.x.to_string()],
            [self.b.to_string(), self.d.to_string(), self.y.to_string()],
            ["0".to_string(), "0".to_string(), "1".to_string()],
        ]
    }

    pub fn rotation_text(&self) -> String {
        self.rotation.to_number_text()
    }

    pub fn to_css(&self) -> String {
        css::to_css_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{coefficient::Notation, number::coerce_number};
    use rstest::rstest;

    #[rstest]
    fn update_replaces_only_the_key(
        #[values(
            CoefficientKey::A,
            CoefficientKey::B,
            CoefficientKey::C,
            CoefficientKey::D,
            CoefficientKey::X,
            CoefficientKey::Y
        )]
        key: CoefficientKey,
        #[values("0.5", "-2.37", "150", "1e-3", "  3 ")] raw: &str,
    ) {
        let before = TransformState::DEFAULT.set_rotation(30.0);
        let after = before.update(key, raw);

        assert_eq!(after.get(key).value(), coerce_number(raw));
        for other in CoefficientKey::ALL.into_iter().filter(|k| *k != key) {
            assert_eq!(after.get(other), before.get(other));
        }
        assert_eq!(after.rotation, 30.0);
    }

    #[test]
    fn malformed_input_becomes_nan() {
        let state = TransformState::DEFAULT.update(CoefficientKey::X, "12px");
        assert!(state.x.value().is_nan());
        assert!(!state.is_finite());
        assert_eq!(state.x.to_string(), "NaN");
    }

    #[test]
    fn rotation_90_rounds_to_three_places() {
        let state = TransformState::DEFAULT.set_rotation(90.0);
        assert_eq!(state.a.value(), 0.0);
        assert_eq!(state.b.value(), 1.0);
        assert_eq!(state.c.value(), -1.0);
        assert_eq!(state.d.value(), 0.0);
        assert_eq!(state.rotation, 90.0);
        assert_eq!(state.a.to_string(), "0.000");
        assert_eq!(state.b.to_string(), "1.000");
        assert_eq!(state.c.to_string(), "-1.000");
        assert_eq!(state.d.to_string(), "0.000");
    }

    #[test]
    fn rotation_keeps_translation() {
        let state = TransformState::DEFAULT
            .update(CoefficientKey::X, "40")
            .update(CoefficientKey::Y, "-12.5")
            .set_rotation(45.0);
        assert_eq!(state.x.value(), 40.0);
        assert_eq!(state.y.value(), -12.5);
        assert_eq!(state.a.to_string(), "0.707");
        assert_eq!(state.c.to_string(), "-0.707");
        assert_eq!(state.a.notation(), Notation::Fixed(ROTATION_PRECISION));
    }

    #[test]
    fn zero_rotation_prints_unsigned_zero() {
        let state = TransformState::DEFAULT.set_rotation(0.0);
        assert_eq!(state.c.to_string(), "0.000");
        assert_eq!(state.a.to_string(), "1.000");
    }

    #[test]
    fn coefficient_after_rotation_leaves_angle_stale() {
        let state = TransformState::DEFAULT
            .set_rotation(60.0)
            .update(CoefficientKey::B, "2");
        assert_eq!(state.rotation, 60.0);
        assert_eq!(state.b.value(), 2.0);
    }

    #[test]
    fn affine_maps_like_css_matrix() {
        let state = TransformState::from_values([2.0, 0.0, 0.5, 3.0, 10.0, -5.0]);
        let p = state.to_affine().transform_point2(DVec2::new(1.0, 1.0));
        assert_eq!(p, DVec2::new(2.0 + 0.5 + 10.0, 3.0 - 5.0));
    }

    #[test]
    fn matrix_rows_follow_column_layout() {
        let state = TransformState::from_values([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let rows = state.matrix_rows();
        assert_eq!(rows[0], ["1", "3", "5"]);
        assert_eq!(rows[1], ["2", "4", "6"]);
        assert_eq!(rows[2], ["0", "0", "1"]);
    }

    #[test]
    fn reset_is_default() {
        assert_eq!(TransformState::reset(), TransformState::default());
        assert_eq!(TransformState::reset().values(), [1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
    }
}
