//! # Logging
//!
//! The library logs through `tracing` and never installs a subscriber on its
//! own. Applications and tests call [`setup_tracing`] once.
//!
//! | Level | What |
//! |-------|------|
//! | `debug` | Every request and response status, pages, per-field diffs |
//! | `info` | Committed updates and invoked actions |
//! | `warn` | Member failures, pagination cycles, aborted fetch tasks |
//!
//! ```bash
//! RUST_LOG=redfish_core=debug cargo test -- --nocapture
//! ```
//!
//! Entry points (`Client::get`, `enumerate`, updates, actions) open spans
//! carrying the resource kind and URI, so the compact format reads like:
//!
//! ```text
//! DEBUG get{uri="/redfish/v1/Chassis/1" kind="Chassis"}: Sending request method=GET
//! WARN  enumerate{uri="/redfish/v1/Chassis" kind="Chassis"}: Member failed uri="/redfish/v1/Chassis/3" error=Not found: /redfish/v1/Chassis/3
//! ```

/// Installs a compact fmt subscriber filtered by `RUST_LOG`.
///
/// Safe to call more than once; later calls are ignored.
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .try_init();
}
