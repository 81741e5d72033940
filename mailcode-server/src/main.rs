//! mailcode-server

use anyhow::{anyhow, Result};
use axum::Router;
use axum_server::Handle;
use clap::Parser;
use http::HeaderName;
use mailcode_server::{
    app_state::AppStateBuilder,
    docs::ApiDoc,
    middleware::{request_ulid::MakeRequestUlid, runtime},
    router,
    settings::Settings,
    setups::{
        local::{LocalSetup, LogCodeSender},
        prod::{ProdSetup, SmtpCodeSender},
        ServerSetup,
    },
    tracer::setup_tracing,
};
use std::{
    io,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
    process::exit,
    time::Duration,
};
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, timeout::TimeoutLayer, ServiceBuilderExt};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Request identifier field.
const REQUEST_ID: &str = "x-request-id";

/// Email verification code server
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Path to the settings file. Defaults to the bundled config/settings.toml
    #[arg(long)]
    config_path: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let (stdout_writer, _stdout_guard) = tracing_appender::non_blocking(io::stdout());

    let settings = Settings::load(cli.config_path)?;

    setup_tracing(stdout_writer, settings.server.environment)?;

    info!(
        subject = "app_settings",
        category = "init",
        "starting with settings: {:?}",
        settings,
    );

    let cancellation_token = CancellationToken::new();

    tokio::spawn({
        let cancellation_token = cancellation_token.clone();
        async move {
            capture_sigterm().await;

            cancellation_token.cancel();
            println!("\nCtrl+C received, shutting down. Press Ctrl+C again to force shutdown.");

            capture_sigterm().await;

            exit(130)
        }
    });

    let app = if settings.server.environment.sends_mail() {
        let sender = SmtpCodeSender::new(&settings.smtp)?;
        tokio::spawn(serve_app::<ProdSetup>(settings, sender, cancellation_token))
    } else {
        tokio::spawn(serve_app::<LocalSetup>(
            settings,
            LogCodeSender,
            cancellation_token,
        ))
    };

    if let Err(e) = app.await? {
        tracing::error!("app server crashed: {}", e);
    }

    Ok(())
}

async fn serve_app<S: ServerSetup>(
    settings: Settings,
    verification_code_sender: S::VerificationCodeSender,
    token: CancellationToken,
) -> Result<()> {
    let req_id = HeaderName::from_static(REQUEST_ID);

    let app_state = AppStateBuilder::<S>::default()
        .with_verification_code_sender(verification_code_sender)
        .with_echo_code(settings.verification.echo_code)
        .finalize()?;

    let router = router::setup_app_router(app_state)
        // Set and propagate "x-request-id" (as a ulid) per request.
        .layer(
            ServiceBuilder::new()
                .set_request_id(req_id.clone(), MakeRequestUlid)
                .propagate_request_id(req_id),
        )
        // Applies the `tower_http::timeout::Timeout` middleware which
        // applies a timeout to requests.
        .layer(TimeoutLayer::new(Duration::from_millis(
            settings.server.timeout_ms,
        )))
        // Catches runtime panics and converts them into
        // `500 Internal Server` responses.
        .layer(CatchPanicLayer::custom(runtime::catch_panic))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()));

    let (server, _) = serve("Application", router, settings.server.port).await?;

    token.cancelled().await;
    server.graceful_shutdown(None);

    Ok(())
}

async fn serve(name: &str, app: Router, port: u16) -> Result<(Handle, SocketAddr)> {
    let bind_addr: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), port);
    info!(
        subject = "app_start",
        category = "init",
        "{} server listening on {}",
        name,
        bind_addr
    );

    let handle = Handle::new();

    tokio::spawn({
        let handle = handle.clone();
        async move {
            axum_server::bind(bind_addr)
                .handle(handle)
                .serve(app.into_make_service_with_connect_info::<SocketAddr>())
                .await
        }
    });

    let addr = handle
        .listening()
        .await
        .ok_or_else(|| anyhow!("{name} server failed to bind {bind_addr}"))?;

    Ok((handle, addr))
}

/// Captures and waits for system signals.
async fn capture_sigterm() {
    #[cfg(unix)]
    let term = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await
            }
        }
    };

    #[cfg(not(unix))]
    let term = std::future::pending::<()>();

    tokio::select! {
        _ = signal::ctrl_c() => {},
        _ = term => {}
    };
}
