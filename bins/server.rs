use dotenvy::dotenv;
use tracing::{error, info, warn};
use uuid::Uuid;

use configs::AppConfig;

fn init_logging(cfg: &AppConfig) {
    if let Err(e) = common::utils::logging::init_logging(&cfg.log) {
        common::utils::logging::init_logging_default();
        warn!(error = %e, "log file unavailable, logging to stdout only");
    }
    info!(service = "server", event = "logger_init", format = ?cfg.log.format, "tracing subscriber initialized");
}

fn main() -> std::process::ExitCode {
    // RUST_LOG, DATABASE_URL and CONFIG_PATH may come from .env
    dotenv().ok();
    // A missing file means defaults; anything unreadable or invalid is fatal.
    let cfg = match AppConfig::load_and_validate() {
        Ok(cfg) => cfg,
        Err(e) => {
            common::utils::logging::init_logging_default();
            error!(service = "server", event = "config_invalid", error = %e, "failed to load configuration");
            return std::process::ExitCode::FAILURE;
        }
    };
    init_logging(&cfg);

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = "server",
            event = "panic",
            %service_id,
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    let worker_threads = cfg.server.worker_threads;
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads { builder.worker_threads(w); }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "server", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(
        service = "server",
        event = "start",
        %service_id,
        pid,
        version,
        threads = worker_threads.unwrap_or_default(),
        addr = %cfg.server.bind_addr(),
        "server service starting"
    );

    // run() returns once the shutdown signal has drained in-flight requests
    let result = rt.block_on(server::run(cfg));
    match result {
        Ok(()) => {
            info!(service = "server", event = "stop", %service_id, pid, "server stopped normally");
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "server", event = "run_failed", error = %e, "server::run returned error");
            std::process::ExitCode::FAILURE
        }
    }
}
