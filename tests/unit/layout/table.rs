use super::*;

fn guest(id: &str, group: &str, order: &str) -> Guest {
    Guest::new(id, format!("名前{id}")).in_group(group, order)
}

#[test]
fn null_image_does_not_drop_siblings() {
    let mut with_image = guest("1", "A", "0");
    with_image.image = Some("images/1.jpg".to_string());
    let without_image = guest("2", "A", "1");
    let mut blank_image = guest("3", "A", "2");
    blank_image.image = Some(String::new());

    let tables = layout_tables(
        &[with_image, without_image, blank_image],
        &LayoutParams::default(),
    );
    assert_eq!(tables.len(), 1);
    let seats = &tables[0].guests;
    assert_eq!(seats.len(), 3);
    assert_eq!(seats[0].image_path.as_deref(), Some("images/1.jpg"));
    assert_eq!(seats[1].image_path, None);
    assert_eq!(seats[2].image_path, None);
}

#[test]
fn seats_follow_sorted_order_and_ring() {
    let params = LayoutParams {
        geometry: TableGeometry::for_canvas(Canvas::square(1000).unwrap()),
        ..LayoutParams::default()
    };
    let tables = layout_tables(
        &[guest("late", "A", "2"), guest("early", "A", "1")],
        &params,
    );
    let seats = &tables[0].guests;
    assert_eq!(seats[0].guest_id, "early");
    assert!((seats[0].x - 500.0).abs() < 1e-9);
    assert!((seats[0].y - 150.0).abs() < 1e-9);
    assert!((seats[1].y - 850.0).abs() < 1e-9);
}

#[test]
fn table_color_comes_from_palette() {
    let params = LayoutParams {
        palette: TablePalette::from_pairs([("B", "#336699")]),
        ..LayoutParams::default()
    };
    let tables = layout_tables(&[guest("1", "A", "0"), guest("2", "B", "0")], &params);
    assert_eq!(tables[0].color, crate::assets::color::DEFAULT_TABLE_COLOR.to_hex());
    assert_eq!(tables[1].color, "#336699");
    assert_eq!(tables[1].file_stem(), "table-B");
}

#[test]
fn seat_badge_and_title_are_carried() {
    let mut g = guest("1", "A", "0");
    g.table = " 4 ".to_string();
    g.title = Some("新婦友人".to_string());
    g.honorific = Some("さん".to_string());
    let tables = layout_tables(&[g], &LayoutParams::default());
    let seat = &tables[0].guests[0];
    assert_eq!(seat.seat_badge, "4");
    assert_eq!(seat.title.as_deref(), Some("新婦友人"));
    assert_eq!(seat.label_text, "名前1 さん");
}

#[test]
fn layout_serializes_with_camel_case_keys() {
    let tables = layout_tables(&[guest("1", "A", "0")], &LayoutParams::default());
    let v = serde_json::to_value(&tables[0]).unwrap();
    assert_eq!(v["groupKey"], "A");
    assert!(v["guests"][0]["angleRadians"].is_number());
    assert!(v["guests"][0]["imagePath"].is_null());
    assert!(v.get("rgba").is_none());
}

#[test]
fn geometry_scales_with_canvas() {
    let g = TableGeometry::for_canvas(Canvas::new(800, 600).unwrap());
    assert!((g.ring_radius() - 210.0).abs() < 1e-9);
    let half = g.scaled(0.5);
    assert!((half.ring_radius() - 105.0).abs() < 1e-9);
    assert_eq!(half.center(), g.center());
}

#[test]
fn no_tables_is_empty_result() {
    assert!(layout_tables(&[], &LayoutParams::default()).is_empty());
    let ungrouped = Guest::new("solo", "x");
    assert!(layout_tables(&[ungrouped], &LayoutParams::default()).is_empty());
}

#[test]
fn file_stem_replaces_path_separators() {
    let tables = layout_tables(
        &[
            guest("1", "A/B", "0"),
            guest("2", r"C\D", "0"),
            guest("3", "E:F?", "0"),
            guest("4", "松", "0"),
        ],
        &LayoutParams::default(),
    );
    let stems: Vec<String> = tables.iter().map(TableLayout::file_stem).collect();
    assert_eq!(stems, vec!["table-A_B", "table-C_D", "table-E_F_", "table-松"]);
    assert_eq!(tables[0].group_key, "A/B");
}
