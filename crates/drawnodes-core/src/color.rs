//! Color values as accepted on the command line and in `@colors=` directives.

/// Names accepted verbatim by the renderer and used by the tool's own defaults.
pub const NAMED_COLORS: &[&str] = &[
    "Black", "Red", "Green", "Yellow", "Blue", "Magenta", "Cyan", "White", "Orange", "Grey",
];

/// Built-in categorical palette (ColorBrewer "Paired", 12 classes).
pub const PAIRED_PALETTE: [&str; 12] = [
    "#A6CEE3", "#1F78B4", "#B2DF8A", "#33A02C", "#FB9A99", "#E31A1C", "#FDBF6F", "#FF7F00",
    "#CAB2D6", "#6A3D9A", "#FFFF99", "#B15928",
];

pub fn is_named_color(value: &str) -> bool {
    NAMED_COLORS.iter().any(|n| n.eq_ignore_ascii_case(value))
}

/// Whether `value` is a bare RGB (6 digits) or RGBA (8 digits) hex string.
pub fn is_hex_digits(value: &str) -> bool {
    matches!(value.len(), 6 | 8) && value.chars().all(|c| c.is_ascii_hexdigit())
}

/// Prefixes bare hex digit strings with `#`; everything else passes through unchanged.
pub fn normalize_color(value: &str) -> String {
    if is_hex_digits(value) {
        format!("#{value}")
    } else {
        value.to_string()
    }
}
