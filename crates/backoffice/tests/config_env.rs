//! Configuration read from the real process environment.
//!
//! These tests mutate global state, so they run serially.

use std::io::Write;

use backoffice::config::{Theme, ENV_OUTPUT, ENV_PRODUCTS_PAGE_SIZE, ENV_THEME};
use backoffice::{Config, OutputMode, RealEnv};
use serial_test::serial;

struct EnvGuard(&'static [&'static str]);

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for name in self.0 {
            std::env::remove_var(name);
        }
    }
}

#[test]
#[serial]
fn process_environment_overrides_file() {
    let _guard = EnvGuard(&[ENV_THEME, ENV_PRODUCTS_PAGE_SIZE]);
    std::env::set_var(ENV_THEME, "dark");
    std::env::set_var(ENV_PRODUCTS_PAGE_SIZE, "6");

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "theme: light\nproducts_page_size: 24\nusers_page_size: 5").unwrap();

    let config = Config::load(Some(file.path()), &RealEnv).unwrap();
    assert_eq!(config.theme, Theme::Dark);
    assert_eq!(config.products_page_size, 6);
    assert_eq!(config.users_page_size, 5);
}

#[test]
#[serial]
fn invalid_output_mode_in_environment() {
    let _guard = EnvGuard(&[ENV_OUTPUT]);
    std::env::set_var(ENV_OUTPUT, "xml");

    let err = Config::load(None, &RealEnv).unwrap_err();
    assert!(err.to_string().contains(ENV_OUTPUT));
}

#[test]
#[serial]
fn unset_environment_keeps_defaults() {
    let _guard = EnvGuard(&[ENV_OUTPUT]);
    std::env::remove_var(ENV_OUTPUT);

    let config = Config::load(None, &RealEnv).unwrap();
    assert_eq!(config.output, OutputMode::Auto);
}
