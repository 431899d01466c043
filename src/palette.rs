//! Colors for game elements
//!
//! Colors are linear RGBA in 0..1, the same layout the vertex batch uploads.

/// RGBA color, components in 0..1
pub type Rgba = [f32; 4];

/// Build an opaque color from 8-bit channels
pub const fn rgb8(r: u8, g: u8, b: u8) -> Rgba {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
}

/// Build an opaque color from a 0xRRGGBB literal
pub const fn hex(value: u32) -> Rgba {
    rgb8((value >> 16) as u8, (value >> 8) as u8, value as u8)
}

pub const BACKGROUND: Rgba = [0.0, 0.0, 0.0, 1.0];
pub const BALL: Rgba = hex(0xFFEB3B);
pub const PADDLE: Rgba = hex(0x2196F3);
pub const HIGHLIGHT: Rgba = [1.0, 1.0, 1.0, 0.3];
pub const BALL_HIGHLIGHT: Rgba = [1.0, 1.0, 1.0, 0.8];
pub const BRICK_SHEEN: Rgba = [1.0, 1.0, 1.0, 0.2];
pub const BRICK_BORDER: Rgba = [0.0, 0.0, 0.0, 1.0];
pub const TEXT: Rgba = [1.0, 1.0, 1.0, 1.0];
pub const HIT_LINK: Rgba = [1.0, 1.0, 1.0, 200.0 / 255.0];

/// Powerup colors (also used for their collection bursts)
pub const POWERUP_LIFE: Rgba = hex(0xFF5252);
pub const POWERUP_EXPAND: Rgba = hex(0x4CAF50);
pub const POWERUP_SPEEDUP: Rgba = hex(0xFFC107);

/// Fragment colors for brick break bursts, cycled by particle index
pub const BRICK_FRAGMENTS: [Rgba; 3] = [rgb8(255, 100, 100), rgb8(255, 150, 100), rgb8(255, 200, 100)];

/// Brick color themes, one per level (cyclic)
pub const THEMES: [[Rgba; 5]; 3] = [
    [hex(0xFF5722), hex(0xE91E63), hex(0x9C27B0), hex(0x673AB7), hex(0x3F51B5)],
    [hex(0x4CAF50), hex(0x8BC34A), hex(0xCDDC39), hex(0xFFEB3B), hex(0xFFC107)],
    [hex(0x03A9F4), hex(0x00BCD4), hex(0x009688), hex(0x4CAF50), hex(0x8BC34A)],
];

/// Theme index following `index` (wraps around)
pub fn next_theme(index: usize) -> usize {
    (index + 1) % THEMES.len()
}

/// Color for a brick of the given tier (1-based) under a theme
pub fn brick_color(theme_index: usize, tier: u8) -> Rgba {
    let theme = &THEMES[theme_index % THEMES.len()];
    let slot = (tier.max(1) as usize - 1).min(theme.len() - 1);
    theme[slot]
}

/// Impact spark: full red, green in 150..255, no blue
pub fn impact_spark(green: f32) -> Rgba {
    [1.0, green.clamp(150.0, 255.0) / 255.0, 0.0, 1.0]
}
