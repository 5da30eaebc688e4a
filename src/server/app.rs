use anyhow::{anyhow, Result};
use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{crud, fallback, health, method_not_allowed};
use crate::resources::{CrudResource, EventResource, RegionResource};

/// Handles shared by every request. Passed to handlers through `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    /// Held for the whole transaction of every create, update and delete.
    /// SQLite cannot upgrade a read lock while another connection writes,
    /// so mutations run one at a time and the last writer wins.
    pub write_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            write_lock: Arc::new(Mutex::new(())),
        }
    }
}

pub fn create_app(db: DatabaseConnection, cors_origin: Option<&str>) -> Result<Router> {
    let state = AppState::new(db);

    let methods = [
        Method::GET,
        Method::POST,
        Method::PATCH,
        Method::DELETE,
        Method::OPTIONS,
    ];
    let cors = match cors_origin {
        Some(origin) if origin != "*" => CorsLayer::new()
            .allow_origin(
                origin
                    .parse::<HeaderValue>()
                    .map_err(|e| anyhow!("Invalid CORS origin: {}", e))?,
            )
            .allow_methods(methods)
            .allow_headers(Any),
        _ => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any),
    };

    let app = Router::new()
        .route("/health", get(health::health_check))
        .merge(resource_routes::<RegionResource>("/regions", "/regions/:code"))
        .merge(resource_routes::<EventResource>("/events", "/events/:id"))
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(fallback)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state);

    Ok(app)
}

fn resource_routes<R: CrudResource>(collection: &str, item: &str) -> Router<AppState> {
    Router::new()
        .route(collection, get(crud::list::<R>).post(crud::create::<R>))
        .route(
            item,
            get(crud::get_one::<R>)
                .patch(crud::update::<R>)
                .delete(crud::delete::<R>),
        )
}
