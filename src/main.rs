//! UCI binary. Protocol traffic uses stdout; diagnostics go to stderr,
//! filtered by `RUST_LOG` (default `warn`).

use std::io;

use tracing_subscriber::EnvFilter;

use pvs_chess::uci::uci_top::run_stdio_loop;

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    run_stdio_loop()
}
