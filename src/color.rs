//! RGBA pixel values and their packed 32-bit identities.
//!
//! Connected-component labeling runs over a grid of packed color ids so that
//! identical RGBA values, and only identical values, share a label class.
//! Packing is most-significant-first (R, G, B, A) and round-trips exactly for
//! every 8-bit quadruple.

/// Luminance contribution of the red channel (`0.3 R + 0.59 G + 0.11 B`).
pub const LUMA_R: f64 = 0.3;
/// Luminance contribution of the green channel.
pub const LUMA_G: f64 = 0.59;
/// Luminance contribution of the blue channel.
pub const LUMA_B: f64 = 0.11;

/// One 8-bit-per-channel RGBA pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Canonical fully-transparent value. The raster reader normalizes every
    /// alpha-0 pixel to this so transparency forms a single color class.
    pub const TRANSPARENT: Rgba = Rgba {
        r: 255,
        g: 255,
        b: 255,
        a: 0,
    };

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Pack into a 32-bit identity, most-significant-first.
    #[inline]
    pub fn to_id(self) -> u32 {
        (self.r as u32) << 24 | (self.g as u32) << 16 | (self.b as u32) << 8 | self.a as u32
    }

    /// Unpack a 32-bit identity produced by [`Rgba::to_id`].
    #[inline]
    pub fn from_id(id: u32) -> Self {
        Self {
            r: (id >> 24) as u8,
            g: (id >> 16) as u8,
            b: (id >> 8) as u8,
            a: id as u8,
        }
    }

    /// Lowercase `#rrggbb` hex code; alpha travels separately as opacity.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    #[inline]
    pub fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Alpha-weighted luminance in [0, 255].
    #[inline]
    pub fn luminance(self) -> f64 {
        (self.r as f64 * LUMA_R + self.g as f64 * LUMA_G + self.b as f64 * LUMA_B)
            * (self.a as f64 / 255.0)
    }
}

#[cfg(test)]
mod tests {
    use super::Rgba;

    #[test]
    fn id_round_trips_at_channel_boundaries() {
        let boundary = [0u8, 1, 254, 255];
        for &r in &boundary {
            for &g in &boundary {
                for &b in &boundary {
                    for &a in &boundary {
                        let c = Rgba::new(r, g, b, a);
                        assert_eq!(Rgba::from_id(c.to_id()), c);
                    }
                }
            }
        }
    }

    #[test]
    fn id_packs_most_significant_first() {
        assert_eq!(Rgba::new(0x12, 0x34, 0x56, 0x78).to_id(), 0x1234_5678);
        assert_eq!(Rgba::TRANSPARENT.to_id(), 0xffff_ff00);
    }

    #[test]
    fn hex_code_is_lowercase_rgb() {
        assert_eq!(Rgba::new(255, 0, 171, 255).to_hex(), "#ff00ab");
    }

    #[test]
    fn luminance_weights_sum_to_full_scale() {
        let white = Rgba::new(255, 255, 255, 255);
        assert!((white.luminance() - 255.0).abs() < 1e-9);
        assert_eq!(Rgba::new(255, 255, 255, 0).luminance(), 0.0);
    }
}
