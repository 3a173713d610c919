use anyhow::{bail, Context, Result};
use axum::serve;
use recepto::core::config::Config;
use recepto::core::routes::build_router;
use recepto::core::startup::{open_storage, open_store};
use recepto::core::state::AppState;
use recepto::core::tracing_init::init_tracing;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::{TcpListener, UnixListener};
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{error, info, Level};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    let config_path = if args.len() > 1 {
        PathBuf::from(&args[1])
    } else {
        PathBuf::from("config.toml")
    };

    // Load and validate configuration
    let config = Config::from_file(&config_path).context(format!(
        "Failed to load configuration from '{}'. \
        If this is your first run, copy config.example.toml to config.toml and adjust the values.",
        config_path.display()
    ))?;

    init_tracing(&config.logging)?;

    // Build Tokio runtime with configured number of threads
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.server.num_threads)
        .enable_all()
        .build()
        .context("Failed to build Tokio runtime")?;

    runtime.block_on(async_main(config, config_path))
}

async fn async_main(config: Config, config_path: PathBuf) -> Result<()> {
    info!(
        config_path = %config_path.display(),
        port = ?config.server.port,
        unix_socket = ?config.server.unix_socket,
        num_threads = config.server.num_threads,
        log_level = %config.logging.level,
        log_format = %config.logging.format,
        "Recepto dashboard starting"
    );

    let storage = open_storage(&config)?;
    let store = open_store(&config, storage);
    let state = Arc::new(AppState::new(config.clone(), store));

    info!(
        org_name = %state.store.org_name(),
        credits = state.store.credits(),
        "Recepto dashboard startup complete"
    );

    // Build the router with middleware
    let app = build_router(Arc::clone(&state)).layer(
        ServiceBuilder::new().layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
        ),
    );

    // Start HTTP server(s)
    let tcp_handle = if let Some(port) = config.server.port {
        let addr = format!("0.0.0.0:{}", port);
        info!(address = %addr, "Starting TCP listener");

        let listener = TcpListener::bind(&addr)
            .await
            .context(format!("Failed to bind TCP listener to {}", addr))?;

        info!(address = %addr, "TCP listener bound successfully");

        let app_clone = app.clone();
        Some(tokio::spawn(async move {
            serve(
                listener,
                app_clone.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("TCP server error")
        }))
    } else {
        None
    };

    let unix_handle = if let Some(unix_socket) = &config.server.unix_socket {
        info!(path = %unix_socket.display(), "Starting Unix socket listener");

        // Remove a stale socket file left by a previous run
        if unix_socket.exists() {
            std::fs::remove_file(unix_socket).context(format!(
                "Failed to remove existing Unix socket: {}",
                unix_socket.display()
            ))?;
        }

        let listener = UnixListener::bind(unix_socket).context(format!(
            "Failed to bind Unix socket listener to {}",
            unix_socket.display()
        ))?;

        info!(path = %unix_socket.display(), "Unix socket listener bound successfully");

        let mut make_service = app.into_make_service();
        Some(tokio::spawn(async move {
            use tower::Service;

            let shutdown = shutdown_signal();
            tokio::pin!(shutdown);

            loop {
                let (socket, _remote_addr) = tokio::select! {
                    accepted = listener.accept() => match accepted {
                        Ok(conn) => conn,
                        Err(e) => {
                            error!(error = %e, "Failed to accept Unix socket connection");
                            continue;
                        }
                    },
                    _ = &mut shutdown => break,
                };

                let tower_service = match make_service.call(&socket).await {
                    Ok(svc) => svc,
                    Err(infallible) => match infallible {},
                };

                tokio::spawn(async move {
                    let socket = hyper_util::rt::TokioIo::new(socket);

                    let hyper_service = hyper::service::service_fn(
                        move |request: hyper::Request<hyper::body::Incoming>| {
                            tower_service.clone().call(request)
                        },
                    );

                    if let Err(err) =
                        hyper_util::server::conn::auto::Builder::new(hyper_util::rt::TokioExecutor::new())
                            .serve_connection_with_upgrades(socket, hyper_service)
                            .await
                    {
                        error!(error = %err, "Error serving Unix socket connection");
                    }
                });
            }

            Ok::<(), anyhow::Error>(())
        }))
    } else {
        None
    };

    info!("HTTP server(s) started, waiting for shutdown signal");

    // Wait for the servers to complete (if they exist)
    match (tcp_handle, unix_handle) {
        (Some(tcp), Some(unix)) => {
            tokio::select! {
                result = tcp => log_server_exit("TCP", result),
                result = unix => log_server_exit("Unix socket", result),
            }
        }
        (Some(tcp), None) => log_server_exit("TCP", tcp.await),
        (None, Some(unix)) => log_server_exit("Unix socket", unix.await),
        (None, None) => {
            error!("No listeners configured");
            bail!("No listeners configured");
        }
    }

    info!("Shutting down gracefully");
    state.store.flush();

    Ok(())
}

fn log_server_exit(listener: &str, result: Result<Result<()>, tokio::task::JoinError>) {
    match result {
        Ok(Ok(())) => {}
        Ok(Err(e)) => error!(listener, error = %e, "Server stopped with an error"),
        Err(e) => error!(listener, error = %e, "Server task failed"),
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }

    info!("Shutdown signal received, starting graceful shutdown");
}
