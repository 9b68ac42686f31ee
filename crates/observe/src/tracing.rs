use {
    crate::Config,
    std::{panic::PanicHookInfo, sync::Once},
    time::macros::format_description,
    tracing_subscriber::{
        EnvFilter,
        fmt::{
            time::UtcTime,
            writer::{BoxMakeWriter, MakeWriterExt as _},
        },
    },
};

/// Initializes the tracing setup of the binary.
/// `env_filter` has similar syntax to env_logger. It is documented at
/// https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html
pub fn initialize(config: &Config) {
    set_tracing_subscriber(config);
    std::panic::set_hook(Box::new(tracing_panic_hook));
}

/// Like [`initialize`], but can be called multiple times in a row. Later calls
/// are ignored.
///
/// Useful for tests.
pub fn initialize_reentrant(env_filter: &str) {
    // The tracing subscriber below is global object so initializing it again in the
    // same process by a different thread would fail.
    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        set_tracing_subscriber(&Config::default().with_env_filter(env_filter));
        std::panic::set_hook(Box::new(tracing_panic_hook));
    });
}

fn set_tracing_subscriber(config: &Config) {
    let writer = match config.stderr_threshold {
        Some(threshold) => BoxMakeWriter::new(
            std::io::stderr
                .with_max_level(threshold)
                .or_else(std::io::stdout),
        ),
        None => BoxMakeWriter::new(std::io::stderr),
    };

    let subscriber_builder = tracing_subscriber::fmt()
        .with_timer(UtcTime::new(format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
        )))
        .with_env_filter(EnvFilter::new(&config.env_filter))
        .with_writer(writer)
        .with_ansi(use_ansi(
            config,
            atty::is(atty::Stream::Stderr),
            atty::is(atty::Stream::Stdout),
        ));

    if config.use_json_format {
        subscriber_builder.json().init();
    } else {
        subscriber_builder.init();
    }
}

/// Colors are only used if every stream events can be written to is a
/// terminal.
fn use_ansi(config: &Config, stderr_is_tty: bool, stdout_is_tty: bool) -> bool {
    if config.use_json_format {
        return false;
    }
    match config.stderr_threshold {
        Some(_) => stderr_is_tty && stdout_is_tty,
        None => stderr_is_tty,
    }
}

/// Panic hook that prints roughly the same message as the default panic hook
/// but uses tracing:error instead of stderr.
///
/// Useful when we want panic messages to have the proper log format.
fn tracing_panic_hook(panic: &PanicHookInfo) {
    let thread = std::thread::current();
    let name = thread.name().unwrap_or("<unnamed>");
    let backtrace = std::backtrace::Backtrace::force_capture();
    tracing::error!("thread '{name}' {panic}\nstack backtrace:\n{backtrace}");
}

#[cfg(test)]
mod tests {
    use {super::*, tracing::Level};

    #[test]
    fn ansi_follows_written_streams() {
        let stderr_only = Config::default();
        assert!(use_ansi(&stderr_only, true, false));
        assert!(!use_ansi(&stderr_only, false, true));

        let split = Config::new("info", Some(Level::WARN), false);
        assert!(use_ansi(&split, true, true));
        assert!(!use_ansi(&split, true, false));
        assert!(!use_ansi(&split, false, true));

        let json = Config::new("info", None, true);
        assert!(!use_ansi(&json, true, true));
    }
}
