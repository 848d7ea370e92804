mod models;
mod handlers;
mod services;
mod middleware;
mod policy;
mod config;
mod errors;

use axum::{
    http::HeaderValue,
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use crate::{
    config::Config,
    services::{AppState, RedisStore, TokenService},
};

#[tokio::main]
async fn main() {
    // Initialize basic tracing subscriber
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::load().expect("Failed to load configuration");

    // Initialize Redis client
    let redis_client = if config.redis.sentinel_enabled {
        Arc::new(redis::Client::open(
            config.redis.sentinel_url.clone().expect("Sentinel URL not configured")
        ).expect("Failed to connect to Redis Sentinel"))
    } else {
        Arc::new(redis::Client::open(config.redis.url.clone())
            .expect("Failed to connect to Redis"))
    };

    // One store serves both the user and the task documents
    let store = Arc::new(RedisStore::new(redis_client));

    let state = AppState {
        users: store.clone(),
        tasks: store,
        tokens: TokenService::new(&config.auth.jwt_secret),
        config: config.clone(),
    };

    // The frontend is the only allowed browser origin
    let cors = CorsLayer::new()
        .allow_origin(
            config
                .share
                .frontend_url
                .parse::<HeaderValue>()
                .expect("Invalid frontend URL"),
        )
        .allow_methods(Any)
        .allow_headers(Any);

    // Create router with all routes
    let app = Router::new()
        .route("/", get(handlers::root))

        // User routes
        .route("/api/user/register", post(handlers::register))
        .route("/api/user/login", post(handlers::login))
        .route("/api/user", get(handlers::list_users))
        .route("/api/user/:id", get(handlers::get_user).patch(handlers::update_user))

        // Task routes
        .route("/api/task", post(handlers::create_task).get(handlers::list_tasks))
        .route("/api/task/analytics", get(handlers::get_analytics))
        .route("/api/task/move/:id", put(handlers::move_task))
        .route("/api/task/status/:status", get(handlers::tasks_by_status))
        .route("/api/task/filter/:window", get(handlers::tasks_by_due_date))
        .route("/api/task/assignboard", put(handlers::assign_board))
        .route(
            "/api/task/:id",
            get(handlers::get_task)
                .put(handlers::update_task)
                .delete(handlers::delete_task),
        )

        // Share routes
        .route("/taskshare/share/:id", put(handlers::generate_share_link))
        .route("/taskshare/shared/:id", get(handlers::view_shared_task))

        // Add middleware
        .layer(from_fn_with_state(state.clone(), middleware::require_auth))
        .layer(cors)
        .layer(TraceLayer::new_for_http())

        // Add state
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(
        format!("{}:{}", config.server.host, config.server.port)
    )
    .await
    .expect("Failed to bind server");

    tracing::info!("Server running on {}:{}", config.server.host, config.server.port);
    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
