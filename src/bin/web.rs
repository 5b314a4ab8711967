//! Single binary web server: JSON API for host-driven group decision sessions.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT, and CATALOG_PATH (CSV: id,name,category,address,tags).

use actix_web::{
    delete, get, post,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use group_round_picker::{
    GroupConfig, GroupSession, InMemoryCatalog, PlaceCatalog, Scheduler, SessionController,
    SessionView, TokioScheduler, VoteDelta,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use uuid::Uuid;

type SessionId = Uuid;

/// Per-session entry: live controller + last activity time (for auto-cleanup).
struct SessionEntry {
    controller: Arc<SessionController>,
    last_activity: Instant,
}

/// In-memory state: many sessions by ID. Entries are removed after 12h inactivity.
type AppState = Data<RwLock<HashMap<SessionId, SessionEntry>>>;

/// Catalog and scheduler shared by every session.
struct Engine {
    catalog: Arc<dyn PlaceCatalog>,
    scheduler: Arc<dyn Scheduler>,
}

/// Inactivity threshold: sessions not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

struct ServerConfig {
    host: String,
    port: u16,
    catalog_path: Option<String>,
}

impl ServerConfig {
    fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| {
            log::info!("HOST not set, using default: {}", default_host());
            default_host()
        });
        let port = match std::env::var("PORT").ok().map(|p| p.parse::<u16>()) {
            Some(Ok(port)) => port,
            Some(Err(e)) => {
                log::warn!("Invalid PORT value ({}), using default: {}", e, default_port());
                default_port()
            }
            None => default_port(),
        };
        let catalog_path = std::env::var("CATALOG_PATH").ok().filter(|p| !p.trim().is_empty());
        Self {
            host,
            port,
            catalog_path,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

/// Session view plus its id and whether the last action took effect.
#[derive(Serialize)]
struct SessionResponse {
    id: SessionId,
    applied: bool,
    #[serde(flatten)]
    view: SessionView,
}

#[derive(Deserialize)]
struct ToggleCandidateBody {
    candidate: String,
}

#[derive(Deserialize)]
struct CastVoteBody {
    candidate: String,
    delta: VoteDelta,
}

/// Path segment: session id (e.g. /api/sessions/{id})
#[derive(Deserialize)]
struct SessionPath {
    id: SessionId,
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "group-round-picker",
    })
}

/// Look up a session (refreshing its activity time), run `action` on it, respond with its view.
fn with_session(
    state: &AppState,
    id: SessionId,
    action: impl FnOnce(&SessionController) -> bool,
) -> HttpResponse {
    let controller = {
        let mut g = match state.write() {
            Ok(guard) => guard,
            Err(_) => return HttpResponse::InternalServerError().body("lock error"),
        };
        match g.get_mut(&id) {
            Some(entry) => {
                entry.last_activity = Instant::now();
                entry.controller.clone()
            }
            None => {
                return HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" }))
            }
        }
    };
    let applied = action(&controller);
    HttpResponse::Ok().json(SessionResponse {
        id,
        applied,
        view: controller.view(),
    })
}

/// Create a new session in Setup (client stores the id for subsequent requests).
#[post("/api/sessions")]
async fn api_create_session(state: AppState, engine: Data<Engine>) -> HttpResponse {
    let controller = Arc::new(SessionController::new(
        GroupSession::new(),
        engine.catalog.clone(),
        engine.scheduler.clone(),
    ));
    let id = Uuid::new_v4();
    let view = controller.view();
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    g.insert(
        id,
        SessionEntry {
            controller,
            last_activity: Instant::now(),
        },
    );
    log::info!("Created session {} ({})", id, view.group_code);
    HttpResponse::Ok().json(SessionResponse {
        id,
        applied: true,
        view,
    })
}

/// Current view of a session (404 if not found).
#[get("/api/sessions/{id}")]
async fn api_get_session(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    with_session(&state, path.id, |_| false)
}

/// Start the session with the host's configuration (Setup only). A malformed body is a 400;
/// `{}` starts with defaults.
#[post("/api/sessions/{id}/start")]
async fn api_start_session(
    state: AppState,
    path: Path<SessionPath>,
    body: Json<GroupConfig>,
) -> HttpResponse {
    let config = body.into_inner();
    with_session(&state, path.id, |c| c.start(config))
}

/// Add or remove a candidate (Discovery only).
#[post("/api/sessions/{id}/candidates/toggle")]
async fn api_toggle_candidate(
    state: AppState,
    path: Path<SessionPath>,
    body: Json<ToggleCandidateBody>,
) -> HttpResponse {
    let candidate = body.into_inner().candidate;
    with_session(&state, path.id, |c| c.toggle_candidate(candidate))
}

/// Cast or retract one vote (Voting rounds only).
#[post("/api/sessions/{id}/votes")]
async fn api_cast_vote(state: AppState, path: Path<SessionPath>, body: Json<CastVoteBody>) -> HttpResponse {
    let CastVoteBody { candidate, delta } = body.into_inner();
    with_session(&state, path.id, |c| c.cast_vote(candidate, delta))
}

/// Close the current round (ignored when its guard fails; see `can_advance`).
#[post("/api/sessions/{id}/advance")]
async fn api_advance(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    with_session(&state, path.id, SessionController::advance)
}

/// Back to Setup, keeping the group code.
#[post("/api/sessions/{id}/reset")]
async fn api_reset(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    with_session(&state, path.id, SessionController::reset)
}

/// Remove a session; its timer task is cancelled with it.
#[delete("/api/sessions/{id}")]
async fn api_delete_session(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.remove(&path.id) {
        Some(_) => HttpResponse::NoContent().finish(),
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    }
}

fn load_catalog(path: Option<&str>) -> std::io::Result<InMemoryCatalog> {
    let Some(path) = path else {
        log::info!("CATALOG_PATH not set, candidate names fall back to their ids");
        return Ok(InMemoryCatalog::new());
    };
    let catalog = InMemoryCatalog::from_csv_path(path).map_err(|e| {
        log::error!("Failed to load catalog from {}: {}", path, e);
        std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
    })?;
    log::info!("Loaded {} places from {}", catalog.len(), path);
    Ok(catalog)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    let catalog = load_catalog(config.catalog_path.as_deref())?;
    let scheduler = TokioScheduler::from_current().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::Other, "no async runtime for round timers")
    })?;
    let engine = Data::new(Engine {
        catalog: Arc::new(catalog),
        scheduler: Arc::new(scheduler),
    });

    let bind = (config.host.as_str(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(HashMap::<SessionId, SessionEntry>::new()));

    // Background task: every 30 minutes, remove sessions inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive session(s) (no activity for 12h)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(engine.clone())
            .service(api_health)
            .service(api_create_session)
            .service(api_get_session)
            .service(api_start_session)
            .service(api_toggle_candidate)
            .service(api_cast_vote)
            .service(api_advance)
            .service(api_reset)
            .service(api_delete_session)
    })
    .bind(bind)?
    .run()
    .await
}
