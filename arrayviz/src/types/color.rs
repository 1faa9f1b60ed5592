use std::str::FromStr;

use palette::{IntoColor, Oklch, Srgb};

use crate::error::{Error, Result};

/// Space in which two colors are blended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorSpace {
    /// Perceptual lightness/chroma/hue, hue taking the shortest path.
    #[default]
    Oklch,
    /// Straight per-channel blending of the encoded values.
    Srgb,
}

/// An sRGB-encoded color with straight alpha, channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// 8-bit color as written to terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Composite `top` over this color with the given coverage.
    pub fn blend(self, top: Rgb, alpha: f32) -> Rgb {
        let a = alpha.clamp(0.0, 1.0);
        let mix = |under: u8, over: u8| -> u8 {
            (under as f32 + (over as f32 - under as f32) * a).round() as u8
        };
        Rgb::new(mix(self.r, top.r), mix(self.g, top.g), mix(self.b, top.b))
    }
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgba8(r, g, b, 1.0)
    }

    pub fn rgba8(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a,
        }
    }

    /// Create a color from a hex value (0xRRGGBB).
    pub fn hex(value: u32) -> Self {
        Self::rgb8((value >> 16) as u8, (value >> 8) as u8, value as u8)
    }

    /// Parse any CSS color string (`#2196f3`, `rgba(255,255,255,0.54)`, `red`...).
    pub fn parse(s: &str) -> Result<Self> {
        use ::color::{AlphaColor, Srgb as CssSrgb};

        let parsed = ::color::parse_color(s).map_err(|e| Error::InvalidColor {
            input: s.to_string(),
            reason: format!("{e:?}"),
        })?;
        let srgb: AlphaColor<CssSrgb> = parsed.to_alpha_color();
        let [r, g, b, a] = srgb.components;
        Ok(Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
            a: a.clamp(0.0, 1.0),
        })
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub fn to_rgb(self) -> Rgb {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgb::new(q(self.r), q(self.g), q(self.b))
    }

    /// Interpolate towards `to` in the given space.
    ///
    /// The endpoints are returned unchanged so a finished transition lands
    /// exactly on its target.
    pub fn lerp_in(self, to: Color, t: f32, space: ColorSpace) -> Color {
        if t <= 0.0 {
            return self;
        }
        if t >= 1.0 {
            return to;
        }
        let a = self.a + (to.a - self.a) * t;
        match space {
            ColorSpace::Srgb => Color {
                r: self.r + (to.r - self.r) * t,
                g: self.g + (to.g - self.g) * t,
                b: self.b + (to.b - self.b) * t,
                a,
            },
            ColorSpace::Oklch => {
                let (from_l, from_c, mut from_h) = self.to_oklch();
                let (to_l, to_c, mut to_h) = to.to_oklch();

                // Gray has no meaningful hue; keep the other end's hue.
                if from_c < ACHROMATIC {
                    from_h = to_h;
                }
                if to_c < ACHROMATIC {
                    to_h = from_h;
                }

                let l = from_l + (to_l - from_l) * t;
                let c = from_c + (to_c - from_c) * t;

                let mut dh = to_h - from_h;
                if dh > 180.0 {
                    dh -= 360.0;
                } else if dh < -180.0 {
                    dh += 360.0;
                }
                let h = (from_h + dh * t).rem_euclid(360.0);

                Color::from_oklch(l, c, h, a)
            }
        }
    }

    fn to_oklch(self) -> (f32, f32, f32) {
        let oklch: Oklch = Srgb::new(self.r, self.g, self.b).into_color();
        (oklch.l, oklch.chroma, oklch.hue.into_positive_degrees())
    }

    fn from_oklch(l: f32, c: f32, h: f32, a: f32) -> Color {
        let srgb: Srgb = Oklch::new(l, c, h).into_color();
        Color {
            r: srgb.red.clamp(0.0, 1.0),
            g: srgb.green.clamp(0.0, 1.0),
            b: srgb.blue.clamp(0.0, 1.0),
            a,
        }
    }
}

const ACHROMATIC: f32 = 1e-4;

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
