use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock};
use std::time::Instant;
use uuid::Uuid;

use crate::algorithm::engine::{DisjointPathEngine, EngineConfig};
use crate::graph::directed::DirectedGraph;
use crate::graph::topology::parse_topology;
use crate::stats::collect_statistics;
use crate::web::models::*;
use crate::{build_graph, Error};

pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Stored sessions in insertion order
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<Uuid, Session>,
    order: VecDeque<Uuid>,
}

impl SessionStore {
    pub fn get(&self, session_id: &Uuid) -> Option<&Session> {
        self.sessions.get(session_id)
    }

    /// Stores a session, evicting the oldest ones beyond `capacity`
    fn insert(&mut self, session: Session, capacity: usize) {
        while self.sessions.len() >= capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            log::debug!("evicting session {}", oldest);
            self.sessions.remove(&oldest);
        }
        self.order.push_back(session.id);
        self.sessions.insert(session.id, session);
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<RwLock<SessionStore>>,
    pub engine: DisjointPathEngine,
    pub max_sessions: usize,
}

impl AppState {
    pub fn new(max_sessions: usize) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(SessionStore::default())),
            engine: DisjointPathEngine::new(),
            max_sessions: max_sessions.max(1),
        }
    }

    fn graph(&self, session_id: Uuid) -> Result<Arc<DirectedGraph>, ApiError> {
        let sessions = self.sessions.read().map_err(|_| poisoned())?;
        sessions
            .get(&session_id)
            .map(|s| Arc::clone(&s.graph))
            .ok_or_else(|| session_not_found(session_id))
    }

    fn insert(&self, session: Session) -> Result<(), ApiError> {
        let mut sessions = self.sessions.write().map_err(|_| poisoned())?;
        sessions.insert(session, self.max_sessions);
        Ok(())
    }
}

/// Create the API router
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/api/topologies", post(create_topology))
        .route("/api/topologies/:session_id", get(get_topology))
        .route("/api/paths/:session_id", post(find_paths))
        .route("/api/statistics/:session_id", post(run_statistics))
        .route("/api/health", get(health_check))
}

fn error(status: StatusCode, error: &str, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
            message: message.into(),
        }),
    )
}

fn poisoned() -> ApiError {
    error(StatusCode::INTERNAL_SERVER_ERROR, "state_poisoned", "Session store is unavailable")
}

fn session_not_found(session_id: Uuid) -> ApiError {
    error(StatusCode::NOT_FOUND, "session_not_found", format!("Session {} not found", session_id))
}

/// Maps library errors onto HTTP statuses
pub fn api_error(err: Error) -> ApiError {
    let (status, kind) = match &err {
        Error::InvalidGraph(_) => (StatusCode::BAD_REQUEST, "invalid_graph"),
        Error::InvalidNode(_) => (StatusCode::BAD_REQUEST, "invalid_node"),
        Error::Parse { .. } => (StatusCode::BAD_REQUEST, "parse_error"),
        Error::NoInitialPath { .. } | Error::NoPath { .. } => {
            (StatusCode::UNPROCESSABLE_ENTITY, "no_initial_path")
        }
    };
    error(status, kind, err.to_string())
}

/// Store a topology from an edge list or an SNDlib document
pub async fn create_topology(
    State(state): State<AppState>,
    Json(request): Json<TopologyRequest>,
) -> Result<Json<SessionSummary>, ApiError> {
    let session = match (request.edges, request.sndlib) {
        (Some(edges), None) => Session::new(build_graph(edges).map_err(api_error)?, None),
        (None, Some(text)) => {
            let topology = parse_topology(&text).map_err(api_error)?;
            let graph = topology.to_graph().map_err(api_error)?;
            Session::new(graph, Some(topology))
        }
        _ => {
            return Err(error(
                StatusCode::BAD_REQUEST,
                "invalid_request",
                "Provide exactly one of `edges` or `sndlib`",
            ))
        }
    };

    let summary = session.summary();
    state.insert(session)?;
    log::info!(
        "stored topology {} ({} nodes, {} edges)",
        summary.session_id,
        summary.node_count,
        summary.edge_count
    );
    Ok(Json(summary))
}

/// Node and edge listing of a stored topology
pub async fn get_topology(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<WebTopology>, ApiError> {
    let sessions = state.sessions.read().map_err(|_| poisoned())?;
    sessions
        .get(&session_id)
        .map(|s| Json(s.listing()))
        .ok_or_else(|| session_not_found(session_id))
}

/// Primary and disjoint secondary path between two nodes
pub async fn find_paths(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<PathRequest>,
) -> Result<Json<PathResponse>, ApiError> {
    let graph = state.graph(session_id)?;
    let engine = state.engine.clone();

    let start_time = Instant::now();
    let result = tokio::task::spawn_blocking(move || {
        engine.find_disjoint_pair(&graph, &request.source, &request.target, request.method)
    })
    .await
    .map_err(|e| error(StatusCode::INTERNAL_SERVER_ERROR, "query_failed", e.to_string()))?
    .map_err(api_error)?;
    let execution_time = start_time.elapsed();

    Ok(Json(PathResponse {
        execution_id: Uuid::new_v4(),
        execution_time_ms: execution_time.as_secs_f64() * 1000.0,
        total_cost: result.total_cost(),
        result,
    }))
}

/// Compare both methods over every node pair of a stored topology
pub async fn run_statistics(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<StatisticsResponse>, ApiError> {
    let graph = state.graph(session_id)?;
    let config: EngineConfig = *state.engine.config();

    let start_time = Instant::now();
    let statistics = tokio::task::spawn_blocking(move || collect_statistics(&graph, config))
        .await
        .map_err(|e| error(StatusCode::INTERNAL_SERVER_ERROR, "statistics_failed", e.to_string()))?
        .map_err(api_error)?;
    let execution_time = start_time.elapsed();

    Ok(Json(StatisticsResponse::new(
        statistics,
        execution_time.as_secs_f64() * 1000.0,
    )))
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}
