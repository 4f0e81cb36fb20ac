use actix_files::Files;
use actix_server::ServerHandle;
use actix_web::{
    web::{self, Data},
    App, HttpServer,
};
use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};
use log::{debug, error, info};
use simgate_ui::{
    api::Api,
    config::AppConfig,
    gateway_client::GatewayHttpClient,
};
use std::io::Write;
use tokio::signal::unix::{signal, SignalKind};

type UiApi = Api<GatewayHttpClient>;

#[actix_web::main]
async fn main() {
    if let Err(e) = run().await {
        error!("application error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    initialize();

    let gateway = GatewayHttpClient::new().context("failed to create gateway client")?;

    let mut sigterm =
        signal(SignalKind::terminate()).context("failed to install SIGTERM handler")?;

    let (server_handle, server_task) = run_server(gateway)?;

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            debug!("ctrl-c received");
        },
        _ = sigterm.recv() => {
            debug!("SIGTERM received");
        },
        result = server_task => {
            match result {
                Ok(Ok(())) => debug!("server stopped normally"),
                Ok(Err(e)) => error!("server stopped with error: {e}"),
                Err(e) => error!("server task panicked: {e}"),
            }
            return Ok(());
        }
    }

    server_handle.stop(true).await;
    info!("shutdown complete");

    Ok(())
}

fn initialize() {
    log_panics::init();

    let mut builder = if cfg!(debug_assertions) {
        Builder::from_env(Env::default().default_filter_or("debug"))
    } else {
        Builder::from_env(Env::default().default_filter_or("info"))
    };

    builder.format(|f, record| match record.level() {
        log::Level::Error => {
            eprintln!("{}", record.args());
            Ok(())
        }
        _ => {
            writeln!(f, "{}", record.args())
        }
    });

    builder.target(Target::Stdout).init();

    info!("module version: {}", env!("CARGO_PKG_VERSION"));
}

fn run_server(
    gateway: GatewayHttpClient,
) -> Result<(
    ServerHandle,
    tokio::task::JoinHandle<Result<(), std::io::Error>>,
)> {
    let api = UiApi::new(gateway);
    let config = &AppConfig::get();
    let ui_port = config.ui.port;
    let static_dir = config.paths.static_dir.clone();

    info!("starting server on port {ui_port}");

    let server = HttpServer::new(move || {
        App::new()
            .app_data(Data::new(api.clone()))
            .route("/", web::get().to(UiApi::index))
            .route("/api/config", web::get().to(UiApi::config))
            .route("/api/status", web::get().to(UiApi::status))
            .route("/api/unlock", web::post().to(UiApi::unlock))
            .route("/healthcheck", web::get().to(UiApi::healthcheck))
            .route("/version", web::get().to(UiApi::version))
            .service(Files::new("/static", static_dir.clone()))
            .default_service(web::route().to(UiApi::index))
    })
    .bind(format!("0.0.0.0:{ui_port}"))
    .context("failed to bind server")?
    .disable_signals()
    .run();

    Ok((server.handle(), tokio::spawn(server)))
}
