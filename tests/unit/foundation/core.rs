use super::*;

#[test]
fn canvas_rejects_zero_dimensions() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    assert_eq!(Canvas::square(64).unwrap().width, 64);
}

#[test]
fn canvas_center_and_min_side() {
    let c = Canvas::new(1000, 600).unwrap();
    assert_eq!(c.center(), Point::new(500.0, 300.0));
    assert_eq!(c.min_side(), 600.0);
}

#[test]
fn rgba8_hex_formatting() {
    assert_eq!(Rgba8::rgb(0xb0, 0x8d, 0x57).to_hex(), "#b08d57");
    let translucent = Rgba8 {
        r: 0,
        g: 0,
        b: 255,
        a: 128,
    };
    assert_eq!(translucent.to_hex(), "#0000ff80");
}

#[test]
fn contrasting_text_picks_dark_on_light() {
    assert_eq!(
        Rgba8::rgb(0xff, 0xff, 0xff).contrasting_text(),
        Rgba8::rgb(0x33, 0x33, 0x33)
    );
    assert_eq!(
        Rgba8::rgb(0x10, 0x10, 0x40).contrasting_text(),
        Rgba8::rgb(0xff, 0xff, 0xff)
    );
}
