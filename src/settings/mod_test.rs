use super::*;

// =============================================================================
// FontSize
// =============================================================================

#[test]
fn font_size_pixels() {
    assert_eq!(FontSize::Small.px(), 14);
    assert_eq!(FontSize::Medium.px(), 16);
    assert_eq!(FontSize::Large.px(), 18);
    assert_eq!(FontSize::ExtraLarge.px(), 20);
}

#[test]
fn font_px_for_known_labels() {
    assert_eq!(font_px_for_label("small"), 14);
    assert_eq!(font_px_for_label("medium"), 16);
    assert_eq!(font_px_for_label("large"), 18);
    assert_eq!(font_px_for_label("x-large"), 20);
}

#[test]
fn font_px_for_unknown_label_is_medium() {
    for label in ["", "huge", "Large", "xl", "x_large", " large"] {
        assert_eq!(font_px_for_label(label), DEFAULT_FONT_PX, "label {label:?}");
    }
}

#[test]
fn font_size_label_roundtrip() {
    for size in FontSize::ALL {
        assert_eq!(FontSize::parse(size.as_str()), Some(size));
    }
}

#[test]
fn font_size_serializes_as_label() {
    assert_eq!(serde_json::to_string(&FontSize::ExtraLarge).unwrap(), "\"x-large\"");
}

// =============================================================================
// AccessibilitySettings
// =============================================================================

#[test]
fn defaults_are_medium_and_all_off() {
    let settings = AccessibilitySettings::default();
    assert_eq!(settings.font_size, FontSize::Medium);
    for key in SettingKey::ALL.into_iter().skip(1) {
        assert_eq!(settings.flag(key), Some(false), "{key:?}");
    }
}

#[test]
fn serializes_with_camel_case_fields() {
    let settings = AccessibilitySettings { font_size: FontSize::Large, dark_mode: true, ..Default::default() };
    let value = serde_json::to_value(settings).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "fontSize": "large",
            "darkMode": true,
            "highContrast": false,
            "signLanguage": false,
            "screenReader": false,
            "reduceMotion": false,
        })
    );
}

#[test]
fn from_json_accepts_full_record() {
    let raw = r#"{"fontSize":"small","darkMode":false,"highContrast":true,"signLanguage":true,"screenReader":false,"reduceMotion":true}"#;
    let settings = AccessibilitySettings::from_json(raw).unwrap();
    assert_eq!(settings.font_size, FontSize::Small);
    assert!(settings.high_contrast);
    assert!(settings.sign_language);
    assert!(settings.reduce_motion);
    assert!(!settings.dark_mode);
}

#[test]
fn from_json_rejects_missing_field() {
    let raw = r#"{"fontSize":"small","darkMode":true}"#;
    assert_eq!(AccessibilitySettings::from_json(raw), None);
}

#[test]
fn from_json_rejects_unknown_field() {
    let raw = r#"{"fontSize":"small","darkMode":false,"highContrast":false,"signLanguage":false,"screenReader":false,"reduceMotion":false,"theme":"blue"}"#;
    assert_eq!(AccessibilitySettings::from_json(raw), None);
}

#[test]
fn from_json_rejects_wrong_types_and_garbage() {
    let wrong_flag = r#"{"fontSize":"small","darkMode":"yes","highContrast":false,"signLanguage":false,"screenReader":false,"reduceMotion":false}"#;
    let wrong_size = r#"{"fontSize":"huge","darkMode":false,"highContrast":false,"signLanguage":false,"screenReader":false,"reduceMotion":false}"#;
    assert_eq!(AccessibilitySettings::from_json(wrong_flag), None);
    assert_eq!(AccessibilitySettings::from_json(wrong_size), None);
    assert_eq!(AccessibilitySettings::from_json("not json"), None);
    assert_eq!(AccessibilitySettings::from_json("null"), None);
}

#[test]
fn with_replaces_exactly_one_field() {
    let base = AccessibilitySettings { high_contrast: true, ..Default::default() };
    let next = base.with(SettingChange::DarkMode(true));
    assert!(next.dark_mode);
    assert!(next.high_contrast);
    assert_eq!(next.font_size, FontSize::Medium);
    assert_eq!(next.with(SettingChange::DarkMode(false)), base);
}

// =============================================================================
// SettingKey / SettingChange
// =============================================================================

#[test]
fn setting_key_parses_camel_and_kebab() {
    assert_eq!(SettingKey::parse("darkMode"), Some(SettingKey::DarkMode));
    assert_eq!(SettingKey::parse("reduce-motion"), Some(SettingKey::ReduceMotion));
    assert_eq!(SettingKey::parse("font-size"), Some(SettingKey::FontSize));
    assert_eq!(SettingKey::parse("dark_mode"), None);
}

#[test]
fn change_parse_font_size() {
    assert_eq!(SettingChange::parse("fontSize", "x-large"), Ok(SettingChange::FontSize(FontSize::ExtraLarge)));
    assert_eq!(
        SettingChange::parse("fontSize", "giant"),
        Err(SettingParseError::InvalidFontSize("giant".into()))
    );
}

#[test]
fn change_parse_flags() {
    assert_eq!(SettingChange::parse("high-contrast", "on"), Ok(SettingChange::HighContrast(true)));
    assert_eq!(SettingChange::parse("screenReader", "false"), Ok(SettingChange::ScreenReader(false)));
    assert_eq!(
        SettingChange::parse("darkMode", "1"),
        Err(SettingParseError::InvalidFlag { key: "darkMode", value: "1".into() })
    );
    assert_eq!(SettingChange::parse("volume", "on"), Err(SettingParseError::UnknownKey("volume".into())));
}

#[test]
fn toggle_flips_flags_only() {
    let settings = AccessibilitySettings { sign_language: true, ..Default::default() };
    assert_eq!(
        SettingChange::toggle(SettingKey::SignLanguage, &settings),
        Some(SettingChange::SignLanguage(false))
    );
    assert_eq!(SettingChange::toggle(SettingKey::DarkMode, &settings), Some(SettingChange::DarkMode(true)));
    assert_eq!(SettingChange::toggle(SettingKey::FontSize, &settings), None);
}

#[test]
fn change_key_matches_variant() {
    for key in SettingKey::ALL.into_iter().skip(1) {
        assert_eq!(SettingChange::flag(key, true).unwrap().key(), key);
    }
    assert_eq!(SettingChange::FontSize(FontSize::Small).key(), SettingKey::FontSize);
}

#[test]
fn describe_texts() {
    assert_eq!(
        SettingChange::FontSize(FontSize::Large).describe(),
        ("Font Size Changed".to_owned(), "Text size has been set to large.".to_owned())
    );
    assert_eq!(SettingChange::DarkMode(true).describe().0, "Dark Mode Activated");
    assert_eq!(SettingChange::DarkMode(false).describe().0, "Light Mode Activated");
    assert_eq!(SettingChange::ReduceMotion(true).describe().0, "Reduced Motion Enabled");
}
