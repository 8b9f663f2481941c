//! Console logging for the server.
//!
//! `RUST_LOG` controls the filter (default: `info`). Rocket's own `log`
//! records are forwarded into the same subscriber.

use tracing_subscriber::EnvFilter;

pub(crate) fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if let Err(err) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .try_init()
    {
        eprintln!("couldn't initialise tracing: {}", err);
    }
}
