//! Packed ARGB8888 colors (`0xAARRGGBB`).

pub const BACKGROUND: u32 = 0xFF000000;
pub const GRID: u32 = 0xFF606060;
pub const FILL: u32 = 0xFFFFFFFF;
pub const WIREFRAME: u32 = 0xFF00FF00;

/// Packs 8-bit channels into `0xAARRGGBB`.
#[inline]
pub const fn pack_argb(a: u8, r: u8, g: u8, b: u8) -> u32 {
    ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

/// Splits `0xAARRGGBB` into `[a, r, g, b]`.
#[inline]
pub const fn unpack_argb(color: u32) -> [u8; 4] {
    [
        (color >> 24) as u8,
        (color >> 16) as u8,
        (color >> 8) as u8,
        color as u8,
    ]
}

/// Converts one RGBA8 texel (byte order R, G, B, A) to packed ARGB.
#[inline]
pub const fn from_rgba8(rgba: [u8; 4]) -> u32 {
    let [r, g, b, a] = rgba;
    pack_argb(a, r, g, b)
}
