//! Canvas color strings for the avatar renderer.

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

fn channels(rgb: u32) -> (u8, u8, u8) {
    let [_, r, g, b] = rgb.to_be_bytes();
    (r, g, b)
}

/// `0xRRGGBB` as canonical lowercase `#rrggbb`.
pub fn css_hex(rgb: u32) -> String {
    let (r, g, b) = channels(rgb);
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// `0xRRGGBB` with alpha clamped into `0.0..=1.0`.
pub fn css_rgba(rgb: u32, alpha: f64) -> String {
    let (r, g, b) = channels(rgb);
    let alpha = if alpha.is_finite() { alpha.clamp(0.0, 1.0) } else { 1.0 };
    format!("rgba({r}, {g}, {b}, {alpha:.3})")
}

/// Scale each channel by `factor` (clamped at white), used for emissive glow.
pub fn brighten(rgb: u32, factor: f64) -> u32 {
    let (r, g, b) = channels(rgb);
    let scale = |c: u8| -> u32 {
        let v = (f64::from(c) * factor.max(0.0)).round().min(255.0);
        // Bounded to 0..=255 above.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let v = v as u32;
        v
    };
    (scale(r) << 16) | (scale(g) << 8) | scale(b)
}
