use std::{net::SocketAddr, path::Path};

use anyhow::Context;
use axum::{middleware, routing::get, Router};
use serde::Deserialize;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    decompression::RequestDecompressionLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};

use crate::{
    book::{repository::BookRepository, seed},
    error::ErrorVerbosity,
    middleware::{
        method_not_allowed::method_not_allowed, not_found::not_found,
        trace_response_body::trace_response_body,
    },
    route,
    state::ApiState,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Dev,
    Test,
    Production,
}

impl Environment {
    /// Demo books are only served in development.
    pub fn seeds_demo_data(&self) -> bool {
        matches!(self, Environment::Dev)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    socket_address: SocketAddr,
    error_verbosity: ErrorVerbosity,
    #[serde(default)]
    environment: Environment,
}

impl ServerConfig {
    pub async fn from_config_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();

        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn with_environment(self, environment: Environment) -> Self {
        Self {
            environment,
            ..self
        }
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }
}

/// Builds the full application: health check, the books API under `/api/v1` and the fallbacks.
pub fn app(state: ApiState) -> Router {
    Router::new()
        .route(
            "/",
            get(|| async { "👍 Okay! The server is responding! 🙌" }),
        )
        .nest("/api/v1", route::books::app::app())
        .fallback(not_found::<ApiState>)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            method_not_allowed::<ApiState>,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            trace_response_body::<ApiState>,
        ))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(tracing::Level::INFO))
                        .on_request(DefaultOnRequest::new().level(tracing::Level::INFO))
                        .on_response(DefaultOnResponse::new().level(tracing::Level::INFO)),
                )
                .layer(RequestDecompressionLayer::new())
                .layer(CompressionLayer::new())
                .layer(CorsLayer::permissive()),
        )
}

pub struct Server {
    config: ServerConfig,
}

impl Server {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let books = match self.config.environment.seeds_demo_data() {
            true => seed::demo_repository(),
            false => BookRepository::new(),
        };

        let state = ApiState::new(self.config.error_verbosity, books);
        let app = app(state);
        let shutdown = ShutdownSignal::install()?;

        tracing::info!(addr = %self.config.socket_address, environment = ?self.config.environment, "Starting server");

        let listener = TcpListener::bind(&self.config.socket_address)
            .await
            .context("Bind failed")?;

        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown.recv())
        .await
        .context("Server failed")?;

        Ok(())
    }
}

/// Shutdown triggers: CTRL+C, plus SIGTERM and SIGHUP on unix.
///
/// The unix handlers are registered on [`ShutdownSignal::install`], so signals arriving
/// before [`ShutdownSignal::recv`] is polled are not lost.
pub(crate) struct ShutdownSignal {
    #[cfg(unix)]
    terminate: tokio::signal::unix::Signal,
    #[cfg(unix)]
    hangup: tokio::signal::unix::Signal,
}

impl ShutdownSignal {
    #[cfg(unix)]
    pub(crate) fn install() -> anyhow::Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};

        Ok(Self {
            terminate: signal(SignalKind::terminate())
                .context("Failed to install SIGTERM signal handler")?,
            hangup: signal(SignalKind::hangup()).context("Failed to install SIGHUP signal handler")?,
        })
    }

    #[cfg(not(unix))]
    pub(crate) fn install() -> anyhow::Result<Self> {
        Ok(Self {})
    }

    pub(crate) async fn recv(self) {
        let ctrl_c = async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => tracing::info!("CTRL+C received"),
                Err(err) => {
                    tracing::error!(%err, "Failed to listen for CTRL+C");
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(unix)]
        {
            let Self {
                mut terminate,
                mut hangup,
            } = self;

            tokio::select! {
                _ = ctrl_c => {},
                _ = terminate.recv() => tracing::info!("SIGTERM received"),
                _ = hangup.recv() => tracing::info!("SIGHUP received"),
            }
        }

        #[cfg(not(unix))]
        ctrl_c.await;

        tracing::info!("Shutting down");
    }
}
