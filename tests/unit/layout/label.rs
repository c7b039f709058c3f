use super::*;

#[test]
fn seven_codepoints_use_large_tier() {
    // "山田 花子" + " 様" = 7 codepoints
    let spec = size_label("山田 花子", "様");
    assert_eq!(spec.text, "山田 花子 様");
    assert_eq!(spec.text.chars().count(), 7);
    assert_eq!(spec.font_size_px, FontTiers::default().large_px);
}

#[test]
fn eight_codepoints_use_small_tier() {
    let spec = size_label("山田 花子子", "様");
    assert_eq!(spec.text.chars().count(), 8);
    assert_eq!(spec.font_size_px, FontTiers::default().small_px);
}

#[test]
fn counts_codepoints_not_bytes() {
    // 7 codepoints but 19 UTF-8 bytes.
    let spec = size_label("佐藤花子", "さん");
    assert!(spec.text.len() > LONG_LABEL_THRESHOLD);
    assert_eq!(spec.font_size_px, FontTiers::default().large_px);
}

#[test]
fn blank_honorific_uses_default() {
    assert_eq!(size_label("Ann", "").text, "Ann 様");
    assert_eq!(size_label("Ann", "  ").text, "Ann 様");
}

#[test]
fn missing_name_still_produces_label() {
    let spec = size_label("", "");
    assert_eq!(spec.text, " 様");
    assert_eq!(spec.font_size_px, FontTiers::default().large_px);
}

#[test]
fn truncation_keeps_tier_of_full_text() {
    let policy = LabelPolicy {
        max_chars: Some(6),
        ..LabelPolicy::default()
    };
    let spec = policy.size_label("Alexandria", "様");
    assert_eq!(spec.text, "Alexa…");
    assert_eq!(spec.font_size_px, policy.tiers.small_px);

    let short = policy.size_label("Ann", "様");
    assert_eq!(short.text, "Ann 様");
}

#[test]
fn truncate_edge_cases() {
    assert_eq!(truncate_with_ellipsis("abc", 3), "abc");
    assert_eq!(truncate_with_ellipsis("abcd", 3), "ab…");
    assert_eq!(truncate_with_ellipsis("abcd", 1), "…");
    assert_eq!(truncate_with_ellipsis("abcd", 0), "");
    assert_eq!(truncate_with_ellipsis("日本語テキスト", 4), "日本語…");
}

#[test]
fn custom_tiers_are_respected() {
    let policy = LabelPolicy {
        tiers: FontTiers {
            large_px: 30.0,
            small_px: 20.0,
        },
        ..LabelPolicy::default()
    };
    assert_eq!(policy.size_label("A", "様").font_size_px, 30.0);
    assert_eq!(policy.size_label("ABCDEFGH", "様").font_size_px, 20.0);
}
