use super::Color;

/// Typeface used for every text node.
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    pub family: String,
    pub weight: u16,
    pub size: f32,
}

/// The palette every container and entry draws from.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Scene backdrop, also the resting box and border color of entries.
    pub background: Color,
    /// Container bodies.
    pub surface: Color,
    pub surface_light: Color,
    /// Neutral foreground for text on dark surfaces.
    pub white_label: Color,
    pub black_label: Color,

    pub keyword: Color,
    pub text: Color,
    pub function: Color,
    pub string: Color,
    pub number: Color,
    pub property: Color,
    pub comment: Color,

    pub red: Color,
    pub green: Color,
    pub blue: Color,

    pub font: Font,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            background: Color::hex(0x141414),
            surface: Color::hex(0x242424),
            surface_light: Color::hex(0xc0b3a3),
            white_label: Color::rgba8(255, 255, 255, 0.54),
            black_label: Color::rgba8(0, 0, 0, 0.87),

            keyword: Color::hex(0xff6470),
            text: Color::hex(0xacb3bf),
            function: Color::hex(0xffc66d),
            string: Color::hex(0x99c47a),
            number: Color::hex(0x68abdf),
            property: Color::hex(0xac7bb5),
            comment: Color::hex(0x808586),

            red: Color::hex(0xef5350),
            green: Color::hex(0x8bc34a),
            blue: Color::hex(0x2196f3),

            font: Font {
                family: "JetBrains Mono".to_string(),
                weight: 700,
                size: 28.0,
            },
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
