//! Direct vs. cached evaluation of a deliberately slow function.
//!
//! Sums 6-dimensional vectors with a 1µs sleep per component, once directly and
//! once through an `ApproxCache` with 64 planes, then reports the speedup,
//! the relative error of the cached total, and the hit rate.
//!
//! ```bash
//! cargo run --release --example slow_sum
//! RUST_LOG=lsh_memo=debug cargo run --example slow_sum -- 200
//! ```

use lsh_memo::harness::{run_comparison, HarnessConfig};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut config = HarnessConfig::default();
    if let Some(samples) = std::env::args().nth(1) {
        config.samples = samples.parse()?;
    }
    config.input_seed = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();

    let report = run_comparison(&config)?;
    println!("{report}");
    Ok(())
}
