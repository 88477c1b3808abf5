//! Hex color helpers for profile themes

/// `#rgb` or `#rrggbb`
pub fn is_hex_color(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('#') else {
        return false;
    };
    matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

fn expand(value: &str) -> Option<[u8; 3]> {
    if !is_hex_color(value) {
        return None;
    }
    let digits = &value[1..];
    let full: String = if digits.len() == 3 {
        digits.chars().flat_map(|c| [c, c]).collect()
    } else {
        digits.to_string()
    };
    let channel = |i: usize| u8::from_str_radix(&full[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

/// Black or white text, whichever reads better on `background` (YIQ)
///
/// Unparseable colors fall back to black.
pub fn contrast_text_color(background: &str) -> &'static str {
    let Some([r, g, b]) = expand(background) else {
        return "#000000";
    };
    let yiq = (u32::from(r) * 299 + u32::from(g) * 587 + u32::from(b) * 114) / 1000;
    if yiq >= 128 { "#000000" } else { "#ffffff" }
}
