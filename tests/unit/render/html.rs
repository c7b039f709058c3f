use super::*;
use crate::assets::store::NoPortraits;
use crate::guests::model::Guest;
use crate::layout::table::{LayoutParams, layout_tables};

fn tables() -> Vec<TableLayout> {
    let mut a1 = Guest::new("a1", "佐藤").in_group("A", "0");
    a1.table = "1".to_string();
    a1.image = Some("img/a1.jpg".to_string());
    let a2 = Guest::new("a2", "鈴木").in_group("A", "1");
    let b1 = Guest::new("b 1", "高橋").in_group("B", "0");
    layout_tables(&[a1, a2, b1], &LayoutParams::default())
}

#[test]
fn table_document_is_canvas_sized_and_transparent() {
    let html = emit_table_document(
        &tables()[0],
        &ChartStyle::default(),
        &NoPortraits,
        &HtmlOptions::default(),
    );
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("width: 1000px; height: 1000px; background: transparent;"));
    assert_eq!(html.matches(r#"class="seat""#).count(), 2);
    assert!(html.contains("佐藤 様"));
    assert!(!html.contains("<a "));
}

#[test]
fn embedded_mode_without_portrait_leaves_placeholder() {
    let html = emit_table_document(
        &tables()[0],
        &ChartStyle::default(),
        &NoPortraits,
        &HtmlOptions::default(),
    );
    assert!(!html.contains("<img"));
}

#[test]
fn linked_mode_falls_back_on_error() {
    let opts = HtmlOptions {
        embed_portraits: false,
        ..HtmlOptions::default()
    };
    let html = emit_table_document(&tables()[0], &ChartStyle::default(), &NoPortraits, &opts);
    assert!(html.contains(r#"<img alt="" src="img/a1.jpg" onerror="this.remove()">"#));
}

#[test]
fn page_has_deep_links_and_compact_variant() {
    let opts = HtmlOptions {
        deep_links: true,
        ..HtmlOptions::default()
    };
    let policy = ViewportPolicy::default();
    let html = emit_page(
        &tables(),
        &ChartStyle::default(),
        &NoPortraits,
        &policy,
        &opts,
    );

    assert_eq!(html.matches(r#"<section class="table-section""#).count(), 2);
    assert!(html.contains(r#"id="table-A""#));
    assert!(html.contains(r#"href="/guests/a1""#));
    assert!(html.contains(r#"href="/guests/b%201""#));
    assert!(html.contains("@media (max-width: 639px)"));
    // Full variants link, compact variants do not.
    assert_eq!(html.matches("<a class=\"seat\"").count(), 3);
    assert_eq!(html.matches("<div class=\"seat\"").count(), 3);
}

#[test]
fn page_is_deterministic() {
    let t = tables();
    let opts = HtmlOptions::default();
    let policy = ViewportPolicy::default();
    let a = emit_page(&t, &ChartStyle::default(), &NoPortraits, &policy, &opts);
    let b = emit_page(&t, &ChartStyle::default(), &NoPortraits, &policy, &opts);
    assert_eq!(a, b);
}

#[test]
fn empty_page_has_no_sections() {
    let html = emit_page(
        &[],
        &ChartStyle::default(),
        &NoPortraits,
        &ViewportPolicy::default(),
        &HtmlOptions::default(),
    );
    assert!(!html.contains("<section"));
    assert!(html.contains("<main>"));
}
