use figment::Jail;
use gocmd_config::{GocmdConfig, OutputFormat};
use gocmd_core::UnsafePointerPolicy;
use pretty_assertions::assert_eq;

#[test]
fn env_sets_nested_values() {
    Jail::expect_with(|jail| {
        jail.set_env("GOCMD_SCAN__UNSAFE_POINTER", "skip");
        jail.set_env("GOCMD_OUTPUT__FORMAT", "raw");

        let config = GocmdConfig::load().expect("config loads");
        assert_eq!(config.scan.unsafe_pointer, UnsafePointerPolicy::Skip);
        assert_eq!(config.output.format, OutputFormat::Raw);
        Ok(())
    });
}

#[test]
fn env_beats_project_config() {
    Jail::expect_with(|jail| {
        jail.create_dir(".gocmd")?;
        jail.create_file(".gocmd/config.toml", "[output]\nformat = \"table\"\n")?;
        jail.set_env("GOCMD_OUTPUT__FORMAT", "json");

        let config = GocmdConfig::load().expect("config loads");
        assert_eq!(config.output.format, OutputFormat::Json);
        Ok(())
    });
}

#[test]
fn env_array_sets_excludes() {
    Jail::expect_with(|jail| {
        jail.set_env("GOCMD_SCAN__EXCLUDE", "[zz_generated.go]");

        let config = GocmdConfig::load().expect("config loads");
        assert_eq!(config.scan.exclude, vec!["zz_generated.go"]);
        Ok(())
    });
}
