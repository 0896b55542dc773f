//! Integration tests for layered configuration loading.

use tenon_config::load_config;

#[test]
fn defaults_without_file_or_env() {
    figment::Jail::expect_with(|_jail| {
        let config = load_config(None).expect("load");
        assert_eq!(config.http.port, 8080);
        assert!(!config.validation.strict_fields);
        assert!(!config.validation.coerce);
        assert_eq!(config.validation.max_depth, 64);
        assert_eq!(config.logging.level, "info");
        Ok(())
    });
}

#[test]
fn file_overrides_defaults() {
    figment::Jail::expect_with(|jail| {
        jail.create_file(
            "tenon.toml",
            r#"
            [validation]
            strict_fields = true
            max_depth = 16

            [http]
            port = 9090
            "#,
        )?;
        let config = load_config(Some("tenon.toml")).expect("load");
        assert!(config.validation.strict_fields);
        assert_eq!(config.validation.max_depth, 16);
        assert_eq!(config.http.port, 9090);
        // Untouched sections keep their defaults.
        assert_eq!(config.logging.level, "info");
        Ok(())
    });
}

#[test]
fn env_overrides_file() {
    figment::Jail::expect_with(|jail| {
        jail.create_file("tenon.toml", "[http]\nport = 9090\n")?;
        jail.set_env("TENON_HTTP_PORT", "7000");
        let config = load_config(Some("tenon.toml")).expect("load");
        assert_eq!(config.http.port, 7000);
        Ok(())
    });
}

#[test]
fn env_sets_validation_flags() {
    figment::Jail::expect_with(|jail| {
        jail.set_env("TENON_VALIDATION_COERCE", "true");
        let config = load_config(None).expect("load");
        assert!(config.validation.coerce);
        Ok(())
    });
}

#[test]
fn missing_file_is_not_an_error() {
    figment::Jail::expect_with(|_jail| {
        let config = load_config(Some("does-not-exist.toml")).expect("load");
        assert_eq!(config.http.port, 8080);
        Ok(())
    });
}
