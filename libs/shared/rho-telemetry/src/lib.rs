// [libs/shared/rho-telemetry/src/lib.rs]
/*!
 * =================================================================
 * APARATO: NEURAL OBSERVER (V2.0)
 * CLASIFICACIÓN: SHARED INFRASTRUCTURE (ESTRATO L4)
 * RESPONSABILIDAD: SUSCRIPCIÓN DE TRAZAS Y CAPTURA DE PÁNICOS
 *
 * One entry point, called once per binary's `main`: builds the
 * tracing subscriber and installs a panic hook that routes panics
 * through the same log stream as ordinary events.
 * =================================================================
 */

use tracing_subscriber::{fmt, EnvFilter};

/// Default per-target filter used when `RUST_LOG` is unset: this
/// service at `debug`, the noisier HTTP/transport internals quieted
/// to `warn`.
fn default_filter(service_name: &str) -> String {
    format!("{service_name}=debug,tower_http=warn,hyper=warn,libsql=warn,info")
}

/// Initialise structured logging for `service_name`. Compact formatting
/// in debug builds, JSON in release builds (the shape an operator's log
/// aggregator expects in production).
pub fn init_tracing(service_name: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(service_name)));

    let subscriber = fmt().with_env_filter(filter).with_target(true);

    if cfg!(debug_assertions) {
        subscriber.compact().init();
    } else {
        subscriber.json().init();
    }

    install_panic_hook();
}

fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_else(|| "unknown location".to_string());
        tracing::error!(location = %location, "🔥 [CRITICAL_PANIC]: {info}");
        default_hook(info);
    }));
}
