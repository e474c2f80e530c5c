//! Server module for the usersearch serve crate

use crate::api::create_routes;
use crate::handlers::AppState;
use crate::middleware::{handle_panic, request_id_middleware, timing_middleware};
use crate::ServerConfig;

use axum::{
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        HeaderName, Method,
    },
    middleware, Router,
};
use std::path::PathBuf;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use usersearch_core::{Result, SearchError};

/// Usersearch HTTP server
pub struct SearchServer {
    config: ServerConfig,
    app: Router,
}

impl SearchServer {
    /// Create a new server, loading the dataset named in the configuration
    ///
    /// # Errors
    ///
    /// Fails if the configuration is invalid or the dataset cannot be loaded.
    pub fn new(config: ServerConfig) -> Result<Self> {
        config.validate()?;
        let state = AppState::load(&config)?;
        tracing::info!(
            records = state.engine.dataset().len(),
            path = %config.dataset_path.display(),
            "Dataset loaded"
        );
        Ok(Self::from_state(config, state))
    }

    /// Create a server around prebuilt state
    pub fn from_state(config: ServerConfig, state: AppState) -> Self {
        let app = create_app(state, &config);
        Self { config, app }
    }

    /// Bind the configured address and serve until ctrl-c
    pub async fn start(self) -> Result<()> {
        let addr = self.config.socket_addr()?;

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| SearchError::network(format!("Failed to bind to {}: {}", addr, e)))?;

        self.serve(listener).await
    }

    /// Serve on an already bound listener until ctrl-c
    pub async fn serve(self, listener: TcpListener) -> Result<()> {
        let local = listener
            .local_addr()
            .map_err(|e| SearchError::network(format!("Failed to read local address: {}", e)))?;
        tracing::info!("Starting usersearch server on {}", local);

        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| SearchError::network(format!("Server error: {}", e)))?;

        tracing::info!("Server stopped");
        Ok(())
    }

    /// Get the server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get the router, e.g. to drive it with `tower::ServiceExt::oneshot`
    pub fn router(&self) -> Router {
        self.app.clone()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

/// Create the Axum application with middleware
///
/// The panic barrier is the outermost layer so a panic anywhere below it,
/// the access-token gate included, becomes a 500 response. The body limit
/// sits innermost since it changes the request body type.
pub fn create_app(state: AppState, config: &ServerConfig) -> Router {
    let mut app = create_routes(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(middleware::from_fn(request_id_middleware))
            .layer(middleware::from_fn(timing_middleware))
            .layer(RequestBodyLimitLayer::new(config.max_request_size)),
    );

    if config.cors_enabled {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET])
            .allow_headers([
                ACCEPT,
                AUTHORIZATION,
                CONTENT_TYPE,
                HeaderName::from_static(crate::search::ACCESS_TOKEN_HEADER),
            ])
            .expose_headers([
                HeaderName::from_static(crate::search::HAS_NEXT_PAGE_HEADER),
                HeaderName::from_static(crate::search::TOTAL_COUNT_HEADER),
            ]);

        app = app.layer(cors);
    }

    app.layer(CatchPanicLayer::custom(handle_panic))
}

/// Server builder for configuration
pub struct ServerBuilder {
    config: ServerConfig,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self {
            config: ServerConfig::default(),
        }
    }

    /// Start from an existing configuration
    pub fn from_config(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Set the host address
    pub fn host<S: Into<String>>(mut self, host: S) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the dataset file
    pub fn dataset_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.config.dataset_path = path.into();
        self
    }

    /// Accept an additional access token
    pub fn access_token<S: Into<String>>(mut self, token: S) -> Self {
        self.config.access_tokens.push(token.into());
        self
    }

    /// Replace the accepted access tokens
    pub fn access_tokens<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.access_tokens = tokens.into_iter().map(Into::into).collect();
        self
    }

    /// Set the page-size cap
    pub fn max_page_size(mut self, size: usize) -> Self {
        self.config.max_page_size = size;
        self
    }

    /// Enable or disable CORS
    pub fn cors(mut self, enabled: bool) -> Self {
        self.config.cors_enabled = enabled;
        self
    }

    /// Set maximum request size
    pub fn max_request_size(mut self, size: usize) -> Self {
        self.config.max_request_size = size;
        self
    }

    /// Enable or disable the fault-injection token
    pub fn fault_injection(mut self, enabled: bool) -> Self {
        self.config.fault_injection = enabled;
        self
    }

    /// Get the configuration built so far
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the server, loading its dataset
    pub fn build(self) -> Result<SearchServer> {
        SearchServer::new(self.config)
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
