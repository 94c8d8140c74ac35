use super::*;
use std::fs;

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write config");
    path
}

#[test]
fn test_parse_json5_with_comments_and_trailing_commas() {
    let config = parse_config(
        r#"{
            // project name
            name: "site",
            settings: {
                enabled: "yes",
                factoryMethod: "getHandler",
            },
        }"#,
    )
    .unwrap();

    assert_eq!(config.name.as_deref(), Some("site"));
    assert_eq!(config.settings.enabled, Some(true));
    assert_eq!(config.settings.factory_method.as_deref(), Some("getHandler"));
    assert_eq!(config.settings.factory_interface, None);
}

#[test]
fn test_empty_config_resolves_to_defaults() {
    let config = parse_config("{}").unwrap();
    assert_eq!(config, DrexConfig::default());
    assert_eq!(config.settings.resolve(), ProjectSettings::default());
}

#[test]
fn test_boolean_spellings() {
    for (value, expected) in [("true", true), ("\"off\"", false), ("0", false), ("\"1\"", true)] {
        let config = parse_config(&format!("{{ settings: {{ enabled: {value} }} }}")).unwrap();
        assert_eq!(config.settings.enabled, Some(expected), "enabled: {value}");
    }
    assert!(parse_config("{ settings: { enabled: \"maybe\" } }").is_err());
}

#[test]
fn test_into_project() {
    let config = parse_config("{ settings: { enabled: false } }").unwrap();
    let project = config.into_project("fallback", Some(PathBuf::from("/srv/site")));

    assert_eq!(project.name, "fallback");
    assert!(!project.is_enabled());
    assert_eq!(project.root.as_deref(), Some(Path::new("/srv/site")));
    assert_eq!(project.settings.factory_method, "getStorage");
}

#[test]
fn test_extends_merges_child_over_base() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("base")).unwrap();
    write(
        &dir.path().join("base"),
        "drex.json",
        r#"{ name: "base", settings: { enabled: false, factoryInterface: "\\Acme\\Factory" } }"#,
    );
    let child = write(
        dir.path(),
        "drex.json",
        r#"{ extends: "base/drex", settings: { enabled: true } }"#,
    );

    let config = load_config(&child).unwrap();
    assert_eq!(config.extends, None);
    assert_eq!(config.name.as_deref(), Some("base"));

    let settings = config.settings.resolve();
    assert!(settings.enabled);
    assert_eq!(settings.factory_interface, "\\Acme\\Factory");
    assert_eq!(settings.factory_method, "getStorage");
}

#[test]
fn test_extends_cycle_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a.json", r#"{ extends: "b.json" }"#);
    let b = write(dir.path(), "b.json", r#"{ extends: "a" }"#);

    let err = load_config(&b).unwrap_err();
    assert!(
        format!("{err:#}").contains("extends cycle detected"),
        "unexpected error: {err:#}"
    );
}

#[test]
fn test_missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.json");
    let err = load_config(&missing).unwrap_err();
    assert!(err.to_string().contains("nope.json"));
}
