//! Lenient conversion of raw form text into domain values.
//!
//! Form fields arrive as text. Numeric fields never reject input: anything
//! that does not read as a finite decimal number becomes `0.0`.

/// Coerce raw text to a number.
///
/// Leading/trailing whitespace is ignored. Empty, unparsable and non-finite
/// input (`"abc"`, `"NaN"`, `"inf"`) all yield `0.0`.
pub fn coerce_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Read a boolean toggle from text (`"true"` / `"false"`, case-insensitive).
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}
