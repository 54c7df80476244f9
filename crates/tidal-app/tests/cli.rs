use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use serial_test::serial;
use tidal_app::Cli;
use tidal_config::{CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH};

struct ConfigEnv;

impl ConfigEnv {
    fn set(value: &str) -> Self {
        // SAFETY: every test touching the variable runs under `#[serial]`.
        unsafe { std::env::set_var(CONFIG_PATH_ENV, value) };
        Self
    }

    fn unset() -> Self {
        // SAFETY: every test touching the variable runs under `#[serial]`.
        unsafe { std::env::remove_var(CONFIG_PATH_ENV) };
        Self
    }
}

impl Drop for ConfigEnv {
    fn drop(&mut self) {
        // SAFETY: dropped inside the `#[serial]` test that created it.
        unsafe { std::env::remove_var(CONFIG_PATH_ENV) };
    }
}

#[test]
#[serial]
fn config_path_comes_from_environment() -> Result<()> {
    let _env = ConfigEnv::set("/etc/tidal/settings.yaml");
    let cli = Cli::try_parse_from(["tidal"])?;
    assert_eq!(cli.config, PathBuf::from("/etc/tidal/settings.yaml"));
    Ok(())
}

#[test]
#[serial]
fn config_path_defaults_when_environment_is_unset() -> Result<()> {
    let _env = ConfigEnv::unset();
    let cli = Cli::try_parse_from(["tidal"])?;
    assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_PATH));
    assert_eq!(cli.config, PathBuf::from("./config.yaml"));
    Ok(())
}

#[test]
#[serial]
fn explicit_flag_overrides_environment() -> Result<()> {
    let _env = ConfigEnv::set("/etc/tidal/settings.yaml");
    let cli = Cli::try_parse_from(["tidal", "--config", "/tmp/override.yaml"])?;
    assert_eq!(cli.config, PathBuf::from("/tmp/override.yaml"));
    Ok(())
}
