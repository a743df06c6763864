// app.rs - Shared state and route table

use std::sync::Arc;

use axum::{
    http::{HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{AppConfig, Environment};
use crate::database::Store;
use crate::handlers;
use crate::middleware::jwt_auth_middleware;
use crate::services::{AccountService, SchoolService};

/// Everything a handler may need, cloned per request
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn Store>,
    pub accounts: AccountService,
    pub schools: SchoolService,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn Store>) -> Self {
        Self {
            config: Arc::new(config),
            accounts: AccountService::new(store.clone()),
            schools: SchoolService::new(store.clone()),
            store,
        }
    }
}

pub fn app(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/", get(root))
        .merge(public_routes())
        .merge(protected_routes(state.clone()));

    if let Some(cors) = cors_layer(&state.config) {
        router = router.layer(cors);
    }
    if state.config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}

fn public_routes() -> Router<AppState> {
    use handlers::public::{self, auth};

    Router::new()
        // Probes
        .route("/test", get(public::test_api))
        .route("/health", get(public::health))
        // Token acquisition
        .route("/signup", post(auth::signup_post))
        .route("/login", post(auth::login_post))
        .route("/token/refresh", post(auth::refresh_post))
        // School browsing
        .route("/filter-schools", get(public::filter_schools))
        .route("/schools/:id/reviews", get(public::school_reviews))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    use handlers::protected;

    Router::new()
        .route(
            "/user",
            get(protected::user_get).patch(protected::user_patch),
        )
        .route("/change-password", post(protected::change_password_post))
        .route("/reviews", post(protected::review_post))
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}

fn cors_layer(config: &AppConfig) -> Option<CorsLayer> {
    if !config.security.enable_cors {
        return None;
    }
    if config.environment == Environment::Development {
        return Some(CorsLayer::permissive());
    }

    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
            .allow_headers(Any),
    )
}

async fn root() -> axum::Json<Value> {
    axum::Json(json!({
        "name": "Transfer Portal API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "public": "/signup, /login, /token/refresh, /filter-schools, /schools/:id/reviews, /test, /health",
            "protected": "/user, /change-password, /reviews (Bearer access token)",
        }
    }))
}
