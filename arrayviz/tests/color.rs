use arrayviz::{Color, ColorSpace, Error, Rgb, Theme};

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 0.01
}

// =============================================================================
// Construction / Parsing
// =============================================================================

#[test]
fn test_hex_round_trips_to_cells() {
    assert_eq!(Color::hex(0x2196f3).to_rgb(), Rgb::new(0x21, 0x96, 0xf3));
    assert_eq!(Color::hex(0x000000).to_rgb(), Rgb::new(0, 0, 0));
    assert_eq!(Color::hex(0xffffff).to_rgb(), Rgb::new(255, 255, 255));
}

#[test]
fn test_parse_hex() {
    let c = Color::parse("#2196f3").unwrap();
    assert_eq!(c.to_rgb(), Rgb::new(0x21, 0x96, 0xf3));
    assert_eq!(c.a, 1.0);
}

#[test]
fn test_parse_rgba() {
    let c = Color::parse("rgba(255, 255, 255, 0.54)").unwrap();
    assert_eq!(c.to_rgb(), Rgb::new(255, 255, 255));
    assert!(close(c.a, 0.54));
}

#[test]
fn test_parse_named() {
    let c: Color = "red".parse().unwrap();
    assert_eq!(c.to_rgb(), Rgb::new(255, 0, 0));
}

#[test]
fn test_parse_invalid() {
    let err = Color::parse("not a color").unwrap_err();
    assert!(
        matches!(&err, Error::InvalidColor { input, .. } if input == "not a color"),
        "unexpected error: {err:?}"
    );
}

#[test]
fn test_with_alpha() {
    let c = Color::WHITE.with_alpha(0.25);
    assert_eq!(c.a, 0.25);
    assert_eq!(c.to_rgb(), Rgb::new(255, 255, 255));
}

// =============================================================================
// Interpolation
// =============================================================================

#[test]
fn test_srgb_midpoint() {
    let mid = Color::BLACK.lerp_in(Color::WHITE, 0.5, ColorSpace::Srgb);
    assert_eq!(mid, Color::rgba(0.5, 0.5, 0.5, 1.0));
}

#[test]
fn test_oklch_gray_stays_gray() {
    let mid = Color::BLACK.lerp_in(Color::WHITE, 0.5, ColorSpace::Oklch);
    assert!(close(mid.r, mid.g) && close(mid.g, mid.b), "{mid:?}");
    assert!(mid.r > 0.05 && mid.r < 0.95, "{mid:?}");
}

#[test]
fn test_oklch_differs_from_srgb() {
    let from = Color::hex(0xef5350);
    let to = Color::hex(0x2196f3);
    let oklch = from.lerp_in(to, 0.5, ColorSpace::Oklch);
    let srgb = from.lerp_in(to, 0.5, ColorSpace::Srgb);
    assert_ne!(oklch, srgb);
}

#[test]
fn test_alpha_interpolates_linearly() {
    let from = Color::rgba(1.0, 1.0, 1.0, 0.0);
    let to = Color::rgba(1.0, 1.0, 1.0, 1.0);
    for space in [ColorSpace::Oklch, ColorSpace::Srgb] {
        assert_eq!(from.lerp_in(to, 0.5, space).a, 0.5, "{space:?}");
    }
}

#[test]
fn test_endpoints_exact_in_every_space() {
    let from = Color::hex(0x141414);
    let to = Color::hex(0x8bc34a);
    for space in [ColorSpace::Oklch, ColorSpace::Srgb] {
        assert_eq!(from.lerp_in(to, 0.0, space), from);
        assert_eq!(from.lerp_in(to, 1.0, space), to);
        assert_eq!(from.lerp_in(to, -1.0, space), from);
        assert_eq!(from.lerp_in(to, 2.0, space), to);
    }
}

// =============================================================================
// Cells / Theme
// =============================================================================

#[test]
fn test_rgb_blend() {
    let under = Rgb::new(0, 0, 0);
    let over = Rgb::new(255, 255, 255);
    assert_eq!(under.blend(over, 0.0), under);
    assert_eq!(under.blend(over, 1.0), over);
    assert_eq!(under.blend(over, 0.5), Rgb::new(128, 128, 128));
    assert_eq!(under.blend(over, 3.0), over);
}

#[test]
fn test_dark_theme() {
    let theme = Theme::default();
    assert_eq!(theme.background, Color::hex(0x141414));
    assert_eq!(theme.surface, Color::hex(0x242424));
    assert!(close(theme.white_label.a, 0.54));
    assert_eq!(theme.font.size, 28.0);
}
