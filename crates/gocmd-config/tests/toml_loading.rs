//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for sandboxed working directory and env changes.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use gocmd_config::{GocmdConfig, OutputFormat};
use gocmd_core::UnsafePointerPolicy;
use pretty_assertions::assert_eq;

#[test]
fn loads_scan_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[scan]
exclude = ["zz_*.go", "mock_*.go"]
unsafe_pointer = "skip"
"#,
        )?;

        let config: GocmdConfig = Figment::from(Serialized::defaults(GocmdConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.scan.exclude, vec!["zz_*.go", "mock_*.go"]);
        assert_eq!(config.scan.unsafe_pointer, UnsafePointerPolicy::Skip);
        assert_eq!(config.output.format, OutputFormat::Json);
        Ok(())
    });
}

#[test]
fn project_config_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".gocmd")?;
        jail.create_file(
            ".gocmd/config.toml",
            r#"
[output]
format = "table"
"#,
        )?;

        let config = GocmdConfig::load().expect("config loads");
        assert_eq!(config.output.format, OutputFormat::Table);
        assert!(config.scan.exclude.is_empty());
        Ok(())
    });
}

#[test]
fn partial_sections_keep_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[scan]\nexclude = [\"gen_*.go\"]\n")?;

        let config: GocmdConfig = Figment::from(Serialized::defaults(GocmdConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.scan.exclude, vec!["gen_*.go"]);
        assert_eq!(config.scan.unsafe_pointer, UnsafePointerPolicy::Truncate);
        Ok(())
    });
}

#[test]
fn unknown_policy_fails_extraction() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[scan]\nunsafe_pointer = \"ignore\"\n")?;

        let result: Result<GocmdConfig, _> =
            Figment::from(Serialized::defaults(GocmdConfig::default()))
                .merge(Toml::file("config.toml"))
                .extract();

        assert!(result.is_err());
        Ok(())
    });
}

#[test]
fn invalid_glob_fails_load() {
    Jail::expect_with(|jail| {
        jail.create_dir(".gocmd")?;
        jail.create_file(".gocmd/config.toml", "[scan]\nexclude = [\"[\"]\n")?;

        let err = GocmdConfig::load().expect_err("glob should be rejected");
        assert!(err.to_string().contains("scan.exclude"), "{err}");
        Ok(())
    });
}
