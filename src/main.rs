use audit_tracker::{
    AppState,
    config::Config,
    db::DbPool,
    init_tracing,
    middleware::{logger::logger, request_tracking_middleware},
    routes::create_router,
};
use axum::{
    Server,
    http::{HeaderValue, Method, header},
    middleware::from_fn,
};
use diesel::{
    PgConnection,
    r2d2::{self, ConnectionManager as DbConnectionManager},
};
use std::{net::SocketAddr, time::Duration};
use tower_http::cors::{Any, CorsLayer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    init_tracing(&config);

    // Initialize database
    let db_config = config.database();
    let manager = DbConnectionManager::<PgConnection>::new(&db_config.url);
    let db: DbPool = r2d2::Pool::builder()
        .max_size(db_config.max_connections)
        .min_idle(Some(db_config.min_connections))
        .connection_timeout(Duration::from_secs(db_config.connection_timeout))
        .build(manager)?;

    // Initialize Redis
    let redis = redis::Client::open(config.redis_url.as_str())?;

    let addr: SocketAddr = config.server_address().parse()?;
    let cors = cors_layer(&config.cors_origins);
    let state = AppState::new(db, redis, config);

    let app = create_router(state)
        .layer(cors)
        .layer(from_fn(request_tracking_middleware))
        .layer(from_fn(logger));

    tracing::info!(%addr, "Audit tracker listening");
    Server::bind(&addr).serve(app.into_make_service()).await?;
    Ok(())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::HeaderName::from_static("hx-request"),
        ]);

    if origins.iter().any(|origin| origin == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(origins)
}
