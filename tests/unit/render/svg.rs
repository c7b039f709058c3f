use std::io::Cursor;

use super::*;
use crate::assets::store::{NoPortraits, Portrait, decode_portrait};
use crate::guests::model::Guest;
use crate::layout::table::{LayoutParams, layout_tables};

struct OnePortrait(Portrait);

impl PortraitSource for OnePortrait {
    fn portrait(&self, rel_path: &str) -> Option<&Portrait> {
        (rel_path == self.0.norm_path).then_some(&self.0)
    }
}

fn tiny_png() -> Vec<u8> {
    let img = image::RgbaImage::from_raw(1, 1, vec![10, 20, 30, 255]).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn sample_table() -> TableLayout {
    let mut a = Guest::new("g1", "山田 太郎").in_group("A", "1");
    a.table = "1".to_string();
    a.title = Some("新郎友人".to_string());
    a.image = Some("img/g1.png".to_string());
    let mut b = Guest::new("g2", "<Tom & Jerry>").in_group("A", "2");
    b.image = None;
    layout_tables(&[a, b], &LayoutParams::default())
        .into_iter()
        .next()
        .unwrap()
}

#[test]
fn emits_center_badge_and_every_seat() {
    let svg = emit_svg(&sample_table(), &ChartStyle::default(), &NoPortraits);
    assert!(svg.starts_with("<?xml"));
    assert!(svg.contains(r#"width="1000" height="1000""#));
    assert!(svg.contains(">TABLE</text>"));
    assert!(svg.contains(">A</text>"));
    assert_eq!(svg.matches(r#"class="seat""#).count(), 2);
    assert!(svg.contains("山田 太郎 様"));
    assert!(svg.contains("新郎友人"));
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn missing_portrait_renders_placeholder_without_dropping_seats() {
    let style = ChartStyle::default();
    let svg = emit_svg(&sample_table(), &style, &NoPortraits);
    assert!(!svg.contains("<image"));
    assert_eq!(
        svg.matches(&format!(r#"fill="{}""#, style.placeholder_fill))
            .count(),
        2
    );
}

#[test]
fn available_portrait_is_embedded_and_clipped() {
    let portrait = decode_portrait("img/g1.png".to_string(), tiny_png()).unwrap();
    let svg = emit_svg(
        &sample_table(),
        &ChartStyle::default(),
        &OnePortrait(portrait),
    );
    assert_eq!(svg.matches("<image").count(), 1);
    assert!(svg.contains("data:image/png;base64,"));

    // The placeholder stays underneath the portrait.
    let placeholder = format!(r#"fill="{}""#, ChartStyle::default().placeholder_fill);
    assert_eq!(svg.matches(&placeholder).count(), 2);
    assert!(svg.find(&placeholder).unwrap() < svg.find("<image").unwrap());
    assert!(svg.contains(r#"clip-path="url(#clip-A-0)""#));
}

#[test]
fn text_is_escaped() {
    let svg = emit_svg(&sample_table(), &ChartStyle::default(), &NoPortraits);
    assert!(svg.contains("&lt;Tom &amp; Jerry&gt; 様"));
    assert!(!svg.contains("<Tom"));
}

#[test]
fn seat_badge_only_when_present() {
    let svg = emit_svg(&sample_table(), &ChartStyle::default(), &NoPortraits);
    assert_eq!(svg.matches(r#"dominant-baseline="central""#).count(), 1);
}

#[test]
fn output_is_byte_identical_across_runs() {
    let table = sample_table();
    let a = emit_svg(&table, &ChartStyle::default(), &NoPortraits);
    let b = emit_svg(&table, &ChartStyle::default(), &NoPortraits);
    assert_eq!(a, b);
}

#[test]
fn output_parses_as_svg() {
    let svg = emit_svg(&sample_table(), &ChartStyle::default(), &NoPortraits);
    let tree = usvg::Tree::from_str(&svg, &usvg::Options::default()).unwrap();
    assert_eq!(tree.size().width(), 1000.0);
}

#[test]
fn background_is_optional() {
    let svg = emit_svg(&sample_table(), &ChartStyle::default(), &NoPortraits);
    assert!(!svg.contains("<rect"));

    let style = ChartStyle {
        background: Some("#fffaf0".to_string()),
        ..ChartStyle::default()
    };
    let svg = emit_svg(&sample_table(), &style, &NoPortraits);
    assert!(svg.contains(r##"fill="#fffaf0""##));
}
