//! Opt-in tracing bootstrap for hosts embedding the pane engine.
//!
//! The engine emits structured `tracing` events at canonicalization,
//! reconciliation and synchronizer fan-out; nothing here is installed
//! implicitly. Hosts with their own subscriber stack just wire that up and
//! ignore this module.

/// Filter applied when `RUST_LOG` is unset: engine internals at `debug`,
/// everything else at `warn`.
#[cfg(feature = "telemetry")]
const DEFAULT_FILTER: &str = "pane_rs=debug,warn";

/// Installs a compact stderr subscriber honoring `RUST_LOG`, falling back to
/// the engine-focused default filter.
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber is already installed, so hosts can call this unconditionally
/// without clobbering their own setup.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::init_default_tracing;

    #[cfg(not(feature = "telemetry"))]
    #[test]
    fn init_is_a_no_op_without_the_feature() {
        assert!(!init_default_tracing());
    }

    #[cfg(feature = "telemetry")]
    #[test]
    fn second_init_never_reports_success() {
        // Whether or not the first call won the global-subscriber slot, a
        // repeat call must not claim it did.
        let _ = init_default_tracing();
        assert!(!init_default_tracing());
    }
}
