use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::{self, HeaderName, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use platform_db::DbPool;
use roster::{
    CompensationService, EmployeeService,
    model::{Compensation, Employee, EmployeeInput, ReportingStructure},
};
use sea_orm::{ConnectionTrait, Statement};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::info;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub employees: EmployeeService,
    pub compensation: CompensationService,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(pool: DbPool, config: Arc<AppConfig>) -> Self {
        Self {
            employees: EmployeeService::new(pool.clone()),
            compensation: CompensationService::new(pool.clone()),
            pool,
            config,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ServeConfig {
    addr: SocketAddr,
}

impl ServeConfig {
    pub fn new(host: IpAddr, port: u16) -> Self {
        Self {
            addr: SocketAddr::from((host, port)),
        }
    }
}

pub async fn serve(config: ServeConfig, state: AppState) -> anyhow::Result<()> {
    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;

    info!(%config.addr, "roster server listening");
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;
    Ok(())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed = origins
        .iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect::<Vec<_>>();
    let allow_origin = if allowed.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(allowed)
    };
    CorsLayer::new()
        .allow_headers([http::header::CONTENT_TYPE])
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_origin(allow_origin)
}

pub fn build_router(state: AppState) -> Router {
    let request_id = MakeRequestUuid;
    let header_name = HeaderName::from_static("x-request-id");
    Router::new()
        .route("/health", get(health_handler))
        .route("/employee", post(create_employee_handler))
        .route(
            "/employee/{id}",
            get(read_employee_handler).put(update_employee_handler),
        )
        .route(
            "/employee/{id}/reportingStructure",
            get(reporting_structure_handler),
        )
        .route(
            "/employee/{id}/compensation",
            get(read_compensation_handler),
        )
        .route("/compensation", post(create_compensation_handler))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(header_name.clone(), request_id))
                .layer(PropagateRequestIdLayer::new(header_name))
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&state.config.cors_allowed_origins)),
        )
        .with_state(state)
}

async fn create_employee_handler(
    State(state): State<AppState>,
    Json(input): Json<EmployeeInput>,
) -> HttpResult<Json<Employee>> {
    let created = state.employees.create(input).await?;
    Ok(Json(created))
}

async fn read_employee_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HttpResult<Json<Employee>> {
    let employee = state.employees.read(&id).await?;
    Ok(Json(employee))
}

/// The identity in the path wins; whatever identity the body may carry is
/// ignored by the payload shape.
async fn update_employee_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<EmployeeInput>,
) -> HttpResult<Json<Employee>> {
    let updated = state.employees.update(input.into_employee(id)).await?;
    Ok(Json(updated))
}

async fn reporting_structure_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HttpResult<Json<ReportingStructure>> {
    let structure = state.employees.reporting_structure(&id).await?;
    Ok(Json(structure))
}

async fn create_compensation_handler(
    State(state): State<AppState>,
    Json(compensation): Json<Compensation>,
) -> HttpResult<Json<Compensation>> {
    let created = state.compensation.create(compensation).await?;
    Ok(Json(created))
}

async fn read_compensation_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HttpResult<Json<Compensation>> {
    let compensation = state.compensation.find_by_employee_id(&id).await?;
    Ok(Json(compensation))
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let backend = state.pool.get_database_backend();
    let db_ok = state
        .pool
        .execute(Statement::from_string(backend, "SELECT 1".to_string()))
        .await
        .is_ok();
    Json(HealthResponse {
        ok: db_ok,
        db_ok,
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    db_ok: bool,
    version: &'static str,
}

type HttpResult<T> = Result<T, HttpError>;

#[derive(Debug)]
struct HttpError {
    status: StatusCode,
    message: String,
}

impl HttpError {
    fn new(status: StatusCode, msg: &str) -> Self {
        Self {
            status,
            message: msg.to_string(),
        }
    }
}

impl From<roster::Error> for HttpError {
    fn from(err: roster::Error) -> Self {
        match err {
            roster::Error::NotFound(message) => Self::new(StatusCode::NOT_FOUND, &message),
            other => Self::new(StatusCode::INTERNAL_SERVER_ERROR, &other.to_string()),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        signal(SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    ctrl_c.await;

    #[cfg(unix)]
    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    };
}
