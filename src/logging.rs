use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Environment variable carrying the numeric log level (5 debug, 4 info, lower warn).
pub const LOGLEVEL_ENV: &str = "LOGLEVEL";

/// Map a `LOGLEVEL` value to a tracing level. Unset means info, unparsable means warn.
pub fn level_from_env(value: Option<&str>) -> Level {
    let level = match value.map(str::trim) {
        None | Some("") => 4,
        Some(v) => v.parse::<i64>().unwrap_or(0),
    };
    match level {
        l if l >= 5 => Level::DEBUG,
        4 => Level::INFO,
        _ => Level::WARN,
    }
}

/// Install the stderr subscriber. `verbose` forces debug; RUST_LOG directives still apply.
pub fn init(verbose: bool) {
    let level = if verbose {
        Level::DEBUG
    } else {
        level_from_env(std::env::var(LOGLEVEL_ENV).ok().as_deref())
    };

    let filter = EnvFilter::from_default_env().add_directive(LevelFilter::from_level(level).into());

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
