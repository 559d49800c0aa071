//! Log filter precedence. Kept in its own test binary since it edits the
//! process environment.

use dashkit::logging::{LOG_ENV_VAR, Verbosity, build_env_filter};
use tracing::level_filters::LevelFilter;

fn set(var: &str, value: Option<&str>) {
    // SAFETY: only `test_env_filter_precedence` touches the environment in
    // this binary.
    unsafe {
        match value {
            Some(value) => std::env::set_var(var, value),
            None => std::env::remove_var(var),
        }
    }
}

#[test]
fn test_env_filter_precedence() -> anyhow::Result<()> {
    let saved: Vec<(&str, Option<String>)> = [LOG_ENV_VAR, "RUST_LOG"]
        .into_iter()
        .map(|var| (var, std::env::var(var).ok()))
        .collect();

    set(LOG_ENV_VAR, None);
    set("RUST_LOG", None);
    assert_eq!(
        build_env_filter(Verbosity::Normal).max_level_hint(),
        Some(LevelFilter::WARN)
    );
    assert_eq!(
        build_env_filter(Verbosity::Verbose).max_level_hint(),
        Some(LevelFilter::DEBUG)
    );
    assert_eq!(
        build_env_filter(Verbosity::Quiet).max_level_hint(),
        Some(LevelFilter::ERROR)
    );

    set("RUST_LOG", Some("info"));
    assert_eq!(
        build_env_filter(Verbosity::Quiet).max_level_hint(),
        Some(LevelFilter::INFO)
    );

    set(LOG_ENV_VAR, Some("trace"));
    assert_eq!(
        build_env_filter(Verbosity::Quiet).max_level_hint(),
        Some(LevelFilter::TRACE)
    );

    for (var, value) in &saved {
        set(var, value.as_deref());
    }
    Ok(())
}

#[test]
fn test_verbosity_levels() -> anyhow::Result<()> {
    assert_eq!(Verbosity::from_flags(true, true), Verbosity::Verbose);
    assert_eq!(Verbosity::from_flags(false, true), Verbosity::Quiet);
    assert_eq!(
        Verbosity::from_flags(false, false).default_level(),
        tracing::Level::WARN
    );
    Ok(())
}
