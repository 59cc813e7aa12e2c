use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init_cli_logger(verbose: bool) {
    init_stderr_logger(default_directives(verbose), false);
}

/// JSON lines on stderr, for runs driven by another program (`--json`).
pub fn init_json_logger() {
    init_stderr_logger(default_directives(false), true);
}

fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "dsa_feed=debug,info"
    } else {
        "dsa_feed=info"
    }
}

/// `RUST_LOG` wins over `directives` when it is set and parses.
fn init_stderr_logger(directives: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));
    let layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(layer.json()).init();
    } else {
        registry.with(layer.compact()).init();
    }
}
