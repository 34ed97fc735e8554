//! Global initialization. Kept in a single test: the subscriber is
//! process-wide.

use nebula_log::{Config, DisplayConfig, Format, LogError, WriterConfig};

#[test]
fn initializes_once() {
    let config = Config {
        level: "debug".to_string(),
        format: Format::Json,
        writer: WriterConfig::Stdout,
        display: DisplayConfig {
            colors: false,
            time: false,
            ..DisplayConfig::default()
        },
    };

    let guard = nebula_log::init_with(config).unwrap();
    assert_eq!(guard.format(), Some(Format::Json));
    nebula_log::info!(answer = 42, "logged through the installed subscriber");

    assert!(matches!(nebula_log::init(), Err(LogError::Init(_))));

    let noop = nebula_log::auto_init().unwrap();
    assert_eq!(noop.format(), None);
}
