//! REST front-end for the bracket engine.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.
//! Set REGISTRATIONS_CSV to preload registrations (category_id,registration_id,affiliation_id,status).

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use martial_bracket::{
    BracketEngine, BracketError, CategoryId, MatchId, Registration, RegistrationId,
    RegistrationStatus, Registry, Slot, Tournament, TournamentId,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

struct AppInner {
    engine: BracketEngine<Registry>,
    tournaments: RwLock<HashMap<TournamentId, Tournament>>,
}

type AppState = Data<AppInner>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct NameBody {
    name: String,
}

#[derive(Deserialize)]
struct RegisterBody {
    #[serde(default)]
    registration_id: Option<RegistrationId>,
    #[serde(default)]
    affiliation_id: Option<Uuid>,
    #[serde(default)]
    status: RegistrationStatus,
}

#[derive(Deserialize)]
struct StatusBody {
    status: RegistrationStatus,
}

#[derive(Deserialize)]
struct AdvanceBody {
    slot: Slot,
}

/// Path segment: resource id (tournament, category, registration or match).
#[derive(Deserialize)]
struct IdPath {
    id: Uuid,
}

/// Map an engine error to a JSON error response.
fn error_response(e: BracketError) -> HttpResponse {
    log::warn!("Request rejected: {}", e);
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        BracketError::MatchNotFound(_) | BracketError::RegistrationNotFound(_) => {
            HttpResponse::NotFound().json(body)
        }
        BracketError::Storage(_) => HttpResponse::InternalServerError().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

fn no_tournament() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "martial-bracket",
    })
}

/// Create a tournament (returns it with id).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<NameBody>) -> HttpResponse {
    let tournament = Tournament::new(body.name.trim());
    let mut g = match state.tournaments.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    g.insert(tournament.id, tournament.clone());
    HttpResponse::Ok().json(tournament)
}

#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let g = match state.tournaments.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get(&path.id) {
        Some(t) => HttpResponse::Ok().json(t),
        None => no_tournament(),
    }
}

/// Add a category (modality) to a tournament.
#[post("/api/tournaments/{id}/categories")]
async fn api_add_category(state: AppState, path: Path<IdPath>, body: Json<NameBody>) -> HttpResponse {
    let mut g = match state.tournaments.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&path.id) {
        Some(t) => {
            t.add_category(body.name.as_str());
            HttpResponse::Ok().json(&*t)
        }
        None => no_tournament(),
    }
}

/// Whether every category of the tournament has a champion.
#[get("/api/tournaments/{id}/status")]
async fn api_stage_status(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let categories = {
        let g = match state.tournaments.read() {
            Ok(guard) => guard,
            Err(_) => return HttpResponse::InternalServerError().body("lock error"),
        };
        match g.get(&path.id) {
            Some(t) => t.category_ids(),
            None => return no_tournament(),
        }
    };
    match state.engine.stage_status(&categories) {
        Ok(status) => HttpResponse::Ok().json(status),
        Err(e) => error_response(e),
    }
}

#[post("/api/categories/{id}/registrations")]
async fn api_register(state: AppState, path: Path<IdPath>, body: Json<RegisterBody>) -> HttpResponse {
    let registration = Registration::new(
        body.registration_id.unwrap_or_else(Uuid::new_v4),
        path.id,
        body.affiliation_id,
        body.status,
    );
    match state.engine.registrations().register(registration.clone()) {
        Ok(()) => HttpResponse::Ok().json(registration),
        Err(e) => error_response(e),
    }
}

#[get("/api/categories/{id}/registrations")]
async fn api_list_registrations(state: AppState, path: Path<IdPath>) -> HttpResponse {
    match state.engine.registrations().list(path.id) {
        Ok(list) => HttpResponse::Ok().json(list),
        Err(e) => error_response(e),
    }
}

#[put("/api/registrations/{id}/status")]
async fn api_set_registration_status(
    state: AppState,
    path: Path<IdPath>,
    body: Json<StatusBody>,
) -> HttpResponse {
    match state.engine.registrations().set_status(path.id, body.status) {
        Ok(r) => HttpResponse::Ok().json(r),
        Err(e) => error_response(e),
    }
}

/// Import registrations from a CSV request body.
#[post("/api/registrations/import")]
async fn api_import_registrations(state: AppState, body: String) -> HttpResponse {
    match state.engine.registrations().load_csv(body.as_bytes()) {
        Ok(imported) => HttpResponse::Ok().json(serde_json::json!({ "imported": imported })),
        Err(e) => error_response(e),
    }
}

/// Generate the bracket of a category.
#[post("/api/categories/{id}/bracket")]
async fn api_generate(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let category: CategoryId = path.id;
    match state.engine.generate(category) {
        Ok(summary) => HttpResponse::Ok().json(summary),
        Err(e) => error_response(e),
    }
}

/// Delete every match of a category.
#[delete("/api/categories/{id}/bracket")]
async fn api_reset(state: AppState, path: Path<IdPath>) -> HttpResponse {
    match state.engine.reset(path.id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_response(e),
    }
}

#[get("/api/categories/{id}/matches")]
async fn api_list_matches(state: AppState, path: Path<IdPath>) -> HttpResponse {
    match state.engine.list_matches(path.id) {
        Ok(matches) => HttpResponse::Ok().json(matches),
        Err(e) => error_response(e),
    }
}

/// Record the winner of a match.
#[post("/api/matches/{id}/advance")]
async fn api_advance(state: AppState, path: Path<IdPath>, body: Json<AdvanceBody>) -> HttpResponse {
    let match_id: MatchId = path.id;
    match state.engine.advance(match_id, body.slot) {
        Ok(advance) => HttpResponse::Ok().json(advance),
        Err(e) => error_response(e),
    }
}

/// Revert the recorded winner of a match.
#[post("/api/matches/{id}/undo")]
async fn api_undo(state: AppState, path: Path<IdPath>) -> HttpResponse {
    match state.engine.undo(path.id) {
        Ok(()) => match state.engine.get_match(path.id) {
            Ok(m) => HttpResponse::Ok().json(m),
            Err(e) => error_response(e),
        },
        Err(e) => error_response(e),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);

    let registry = Registry::new();
    if let Ok(path) = std::env::var("REGISTRATIONS_CSV") {
        let text = tokio::fs::read_to_string(&path).await?;
        if let Err(e) = registry.load_csv(text.as_bytes()) {
            log::error!("Could not load registrations from {}: {}", path, e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidData, e));
        }
    }

    let state = Data::new(AppInner {
        engine: BracketEngine::new(registry),
        tournaments: RwLock::new(HashMap::new()),
    });

    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_add_category)
            .service(api_stage_status)
            .service(api_register)
            .service(api_list_registrations)
            .service(api_set_registration_status)
            .service(api_import_registrations)
            .service(api_generate)
            .service(api_reset)
            .service(api_list_matches)
            .service(api_advance)
            .service(api_undo)
    })
    .bind(bind)?
    .run()
    .await
}
