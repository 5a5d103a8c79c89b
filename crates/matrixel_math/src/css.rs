use crate::transform::TransformState;

/// Property names the declaration is emitted under, unprefixed first.
pub const TRANSFORM_PROPERTIES: [&str; 3] = ["transform", "-ms-transform", "-webkit-transform"];

/// `matrix(a, b, c, d, x,y)`. The translation pair has no space after its
/// comma; existing output depends on that.
pub fn matrix_function(state: &TransformState) -> String {
    format!(
        "matrix({}, {}, {}, {}, {},{})",
        state.a, state.b, state.c, state.d, state.x, state.y
    )
}

/// One `property:matrix(...);` line per entry of [`TRANSFORM_PROPERTIES`].
pub fn to_css_string(state: &TransformState) -> String {
    let matrix = matrix_function(state);
    TRANSFORM_PROPERTIES
        .iter()
        .map(|property| format!("{}:{};\n", property, matrix))
        .collect()
}
