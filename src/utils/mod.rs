pub mod build_info;

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVE: &str = "budget_probe=warn";

/// Installs the global tracing subscriber, writing to stderr so stdout stays
/// reserved for the plugin line. `RUST_LOG` replaces the default filter when
/// set; `directive` is added on top of either.
pub fn init_tracing(directive: Option<&str>) {
    TRACING_INIT.call_once(|| {
        let mut filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
        if let Some(raw) = directive {
            match raw.parse() {
                Ok(parsed) => filter = filter.add_directive(parsed),
                Err(err) => eprintln!("ignoring log filter `{raw}`: {err}"),
            }
        }

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

/// Maps `-v` repetitions to a directive for this crate.
pub fn verbosity_directive(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("budget_probe=info"),
        2 => Some("budget_probe=debug"),
        _ => Some("budget_probe=trace"),
    }
}
