/// HTTP Server
///
/// Actix Web application serving three surfaces over one router:
/// - REST: `POST /api/hello`, `GET /api`, `GET /health`
/// - MCP JSON-RPC 2.0: `POST /mcp`, plus JSON-RPC bodies posted to `/`
/// - Static files: web page, privacy policy, domain verification token and
///   the public asset directory

use actix_cors::Cors;
use actix_web::{
    App, HttpRequest, HttpResponse, HttpServer, Result,
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    http::header,
    middleware::{Compress, Condition, DefaultHeaders, Logger},
    web,
};
use bytes::Bytes;
use serde_json::{Value, json};
use std::time::Duration;

use crate::core::config::{CorsOrigins, ServerConfig};
use crate::core::error::ServerError;
use crate::core::greeting::{GreetingRequest, format_greeting};
use crate::core::rpc::{Dispatcher, MCPResponse, PROTOCOL_VERSION, ServerInfo, looks_like_rpc};
use crate::core::static_files::{self, INDEX_FILE, StaticFiles};
use crate::core::utils::iso_timestamp;
use crate::tools;

/// Metadata reported by the REST endpoints.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Label reported by `/health`
    pub service_name: String,
    /// Version reported by `/api/hello`
    pub api_version: String,
}

/// Everything a worker needs to build the application.
///
/// Cloned once per worker thread; the inner `web::Data` values are shared.
#[derive(Clone)]
pub struct AppContext {
    state: web::Data<AppState>,
    dispatcher: web::Data<Dispatcher>,
    files: web::Data<StaticFiles>,
}

impl AppContext {
    pub fn from_config(config: &ServerConfig) -> Self {
        let info = ServerInfo {
            name: config.server_name.clone(),
            version: config.server_version.clone(),
        };
        Self {
            state: web::Data::new(AppState {
                service_name: config.service_name.clone(),
                api_version: config.server_version.clone(),
            }),
            dispatcher: web::Data::new(Dispatcher::new(info, tools::initialize_tools())),
            files: web::Data::new(StaticFiles::new(&config.public_dir)),
        }
    }

    /// Register shared state and all routes. API routes come first; the
    /// static asset service is mounted at `/` and must stay last.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.state.clone())
            .app_data(self.dispatcher.clone())
            .app_data(self.files.clone())
            .route("/health", web::get().to(health))
            .route("/api", web::get().to(api_info))
            .route("/api/hello", web::post().to(hello))
            .route("/mcp", web::post().to(mcp_handler))
            .route("/mcp", web::get().to(mcp_info))
            .route("/mcp", web::method(actix_web::http::Method::OPTIONS).to(mcp_options))
            .route("/", web::post().to(root_post))
            .route("/", web::get().to(static_files::index))
            .route("/privacy.html", web::get().to(static_files::privacy))
            .route(
                "/.well-known/openai-apps-challenge",
                web::get().to(static_files::domain_challenge),
            )
            .service(static_files::assets(&self.files));
    }
}

/// Build the CORS middleware for the configured origins.
pub fn cors_middleware(origins: &CorsOrigins) -> Cors {
    let cors = Cors::default()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600);

    match origins {
        CorsOrigins::Any => cors.allow_any_origin(),
        CorsOrigins::List(list) => list
            .iter()
            .fold(cors, |cors, origin| cors.allowed_origin(origin)),
    }
}

/// Health check endpoint handler.
///
/// Used by load balancers and deployment platforms to verify availability.
async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "service": state.service_name,
        "timestamp": iso_timestamp()
    }))
}

async fn api_info() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "message": "Hello World GPT App API",
        "endpoints": {
            "hello": "POST /api/hello",
            "health": "GET /health",
            "mcp": "POST /mcp"
        }
    }))
}

/// Greeting endpoint. An empty or `null` body greets the world.
async fn hello(state: web::Data<AppState>, body: Bytes) -> HttpResponse {
    let request = match parse_greeting_request(&body) {
        Ok(request) => request,
        Err(e) => {
            tracing::debug!(error = %e, "rejecting malformed greeting request");
            return HttpResponse::BadRequest().json(json!({
                "error": "Invalid request body",
                "detail": e.to_string()
            }));
        }
    };

    HttpResponse::Ok().json(json!({
        "message": format_greeting(request.name.as_deref()),
        "timestamp": iso_timestamp(),
        "version": state.api_version
    }))
}

fn parse_greeting_request(body: &[u8]) -> serde_json::Result<GreetingRequest> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(GreetingRequest::default());
    }
    match serde_json::from_slice::<Value>(body)? {
        Value::Null => Ok(GreetingRequest::default()),
        value => serde_json::from_value(value),
    }
}

/// MCP JSON-RPC request handler.
///
/// JSON-RPC errors are reported in the body with HTTP 200.
async fn mcp_handler(dispatcher: web::Data<Dispatcher>, body: Bytes) -> HttpResponse {
    let response = match serde_json::from_slice::<Value>(&body) {
        Ok(value) => dispatcher.handle_value(value),
        Err(e) => {
            tracing::debug!(error = %e, "unparseable JSON-RPC body");
            MCPResponse::parse_error(e.to_string())
        }
    };
    HttpResponse::Ok().json(response)
}

/// Describes the MCP endpoint for humans and discovery tools.
async fn mcp_info(dispatcher: web::Data<Dispatcher>) -> HttpResponse {
    let info = dispatcher.server_info();
    let tools: Vec<&str> = dispatcher
        .registry()
        .tools()
        .iter()
        .map(|tool| tool.name.as_str())
        .collect();

    HttpResponse::Ok().json(json!({
        "name": info.name,
        "version": info.version,
        "protocol": "MCP",
        "protocolVersion": PROTOCOL_VERSION,
        "transport": "http",
        "endpoint": "/mcp",
        "methods": ["initialize", "tools/list", "tools/call"],
        "tools": tools
    }))
}

/// Plain `OPTIONS /mcp`. Real CORS preflights are answered by the CORS
/// middleware before reaching this handler.
async fn mcp_options() -> HttpResponse {
    HttpResponse::NoContent()
        .insert_header((header::ALLOW, "GET, POST, OPTIONS"))
        .finish()
}

/// Root fallback: JSON-RPC bodies are dispatched like `/mcp`, anything else
/// gets the web page.
async fn root_post(
    req: HttpRequest,
    dispatcher: web::Data<Dispatcher>,
    files: web::Data<StaticFiles>,
    body: Bytes,
) -> Result<HttpResponse> {
    if let Ok(value) = serde_json::from_slice::<Value>(&body) {
        if looks_like_rpc(&value) {
            return Ok(HttpResponse::Ok().json(dispatcher.handle_value(value)));
        }
    }

    let file = files.open(INDEX_FILE).await?;
    Ok(file.into_response(&req))
}

/// Build the application with its full middleware stack.
///
/// Takes owned values so the returned app borrows nothing; each worker
/// passes its own clones.
pub fn build_app(
    context: AppContext,
    config: ServerConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .configure(|cfg| context.configure(cfg))
        // Enable compression for JSON responses (gzip/brotli)
        .wrap(Compress::default())
        .wrap(
            DefaultHeaders::new()
                .add(("X-Content-Type-Options", "nosniff"))
                .add(("X-Frame-Options", "DENY"))
                .add(("X-XSS-Protection", "1; mode=block")),
        )
        .wrap(Condition::new(
            config.cors_enabled,
            cors_middleware(&config.cors_origins),
        ))
        // %r = request line, %s = status, %Dms = duration in milliseconds
        .wrap(Condition::new(
            config.request_logging,
            Logger::new("%r %s %Dms"),
        ))
}

/// Run the server in HTTP mode.
///
/// # Configuration
/// The server is configured with:
/// - Worker threads: from config (CPU count, max 16)
/// - Max connections: 10,000 concurrent connections
/// - Connection rate limit: 1,000 connections per second
/// - Keep-alive: 30 seconds
/// - Request timeout: 30 seconds
/// - Disconnect timeout: 2 seconds
/// - Shutdown timeout: 10 seconds
pub async fn run_server_http(config: ServerConfig) -> Result<(), ServerError> {
    let bind_addr = config.bind_addr();
    let context = AppContext::from_config(&config);
    let app_config = config.clone();

    tracing::info!(
        name = %config.server_name,
        version = %config.server_version,
        bind = %bind_addr,
        workers = config.workers,
        public_dir = %config.public_dir.display(),
        cors = config.cors_enabled,
        "starting HTTP server"
    );

    let server = HttpServer::new(move || build_app(context.clone(), app_config.clone()))
        .workers(config.workers)
        .max_connections(10000)
        .max_connection_rate(1000)
        .keep_alive(Duration::from_secs(30))
        .client_request_timeout(Duration::from_secs(30))
        .client_disconnect_timeout(Duration::from_secs(2))
        .shutdown_timeout(10)
        .bind(&bind_addr)
        .map_err(|source| ServerError::Bind {
            addr: bind_addr.clone(),
            source,
        })?
        .run();

    tracing::info!("🚀 Server running on port {}", config.port);
    tracing::info!("📍 Health check: http://localhost:{}/health", config.port);
    tracing::info!("🌐 Web interface: http://localhost:{}/", config.port);

    server.await?;
    Ok(())
}
