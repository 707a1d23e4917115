use veil_core::config::*;

#[test]
fn config_loads_from_empty_toml_with_all_defaults() {
    let config = VeilConfig::from_toml("").unwrap();

    // Placeholder defaults
    assert_eq!(config.placeholders.open, "⟦");
    assert_eq!(config.placeholders.close, "⟧");

    // Resolver defaults
    assert!(config.resolver.skip_masked);
    assert_eq!(config.resolver.min_confidence, 0.0);

    // Decode tolerance defaults
    assert!(config.decode.match_emphasis);
    assert!(config.decode.ignore_tag_case);
    assert!(config.decode.allow_internal_whitespace);
    assert!(config.decode.allow_leading_zeros);
    assert!(!config.decode.bare_tokens);

    // Legend defaults
    assert!(config.legend.enabled);
}

#[test]
fn config_loads_partial_toml_with_overrides() {
    let toml = r#"
[placeholders]
open = "<<"
close = ">>"

[decode]
bare_tokens = true
"#;
    let config = VeilConfig::from_toml(toml).unwrap();
    assert_eq!(config.placeholders.open, "<<");
    assert_eq!(config.placeholders.close, ">>");
    assert!(config.decode.bare_tokens);
    // Non-overridden fields keep defaults
    assert!(config.decode.match_emphasis);
    assert!(config.resolver.skip_masked);
    assert!(config.legend.enabled);
}

#[test]
fn config_rejects_invalid_toml() {
    assert!(VeilConfig::from_toml("[decode\nbare_tokens = 1").is_err());
}

#[test]
fn config_serde_roundtrip() {
    let config = VeilConfig::default();
    let toml_str = toml::to_string(&config).unwrap();
    let roundtripped = VeilConfig::from_toml(&toml_str).unwrap();
    assert_eq!(roundtripped.placeholders.open, config.placeholders.open);
    assert_eq!(
        roundtripped.decode.bare_tokens,
        config.decode.bare_tokens
    );
    assert_eq!(
        roundtripped.resolver.min_confidence,
        config.resolver.min_confidence
    );
}
