//! Web front end for the tournament core: REST API over in-memory tournaments.
//! The client is the decision provider: it reads the bracket and posts winners.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use team_rotation::{
    import_players, set_match_winner, start_round, start_tournament, submit_round, Side,
    Tournament, TournamentConfig, TournamentError, TournamentId,
};
use uuid::Uuid;

/// Per-tournament entry: tournament data + last activity time (for auto-cleanup).
struct TournamentEntry {
    tournament: Tournament,
    last_activity: Instant,
}

/// In-memory state: many tournaments by ID. Entries are removed after inactivity.
type AppState = Data<RwLock<HashMap<TournamentId, TournamentEntry>>>;

/// Inactivity threshold: tournaments not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize, Default)]
struct CreateTournamentBody {
    #[serde(default)]
    config: TournamentConfig,
    seed: Option<u64>,
}

#[derive(Deserialize)]
struct AddPlayerBody {
    name: String,
}

#[derive(Deserialize)]
struct SetMatchWinnerBody {
    match_id: Uuid,
    side: Side,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and player id (e.g. /api/tournaments/{id}/players/{player_id})
#[derive(Deserialize)]
struct TournamentPlayerPath {
    id: TournamentId,
    player_id: Uuid,
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
}

/// Look up a tournament, refresh its activity time, apply `action`, and reply with the
/// tournament.
///
/// On failure the reply is a 400 carrying both the error and the tournament as it stands,
/// since a multi-step action may already have applied its first step.
fn with_tournament<F>(state: &AppState, id: TournamentId, action: F) -> HttpResponse
where
    F: FnOnce(&mut Tournament) -> Result<(), TournamentError>,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&id) {
        Some(e) => e,
        None => return not_found(),
    };
    entry.last_activity = Instant::now();
    match action(&mut entry.tournament) {
        Ok(()) => HttpResponse::Ok().json(&entry.tournament),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({
            "error": e.to_string(),
            "tournament": &entry.tournament,
        })),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "team-rotation",
    })
}

/// Create a new tournament (returns it with id; client stores id for subsequent requests).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Option<Json<CreateTournamentBody>>) -> HttpResponse {
    let body = body.map(Json::into_inner).unwrap_or_default();
    if let Err(e) = body.config.validate() {
        return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }));
    }
    let mut tournament = Tournament::new(body.config);
    tournament.seed = body.seed;
    let id = tournament.id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let response = HttpResponse::Ok().json(&tournament);
    g.insert(
        id,
        TournamentEntry {
            tournament,
            last_activity: Instant::now(),
        },
    );
    response
}

/// Get a tournament by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |_| Ok(()))
}

/// Current standings, best score first.
#[get("/api/tournaments/{id}/standings")]
async fn api_standings(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get(&path.id) {
        Some(entry) => HttpResponse::Ok().json(entry.tournament.standings()),
        None => not_found(),
    }
}

/// Register a player (tournament must be in Setup).
#[post("/api/tournaments/{id}/players")]
async fn api_add_player(state: AppState, path: Path<TournamentPath>, body: Json<AddPlayerBody>) -> HttpResponse {
    with_tournament(&state, path.id, |t| t.register_player(body.name.trim()).map(|_| ()))
}

/// Register every player in a CSV body (tournament must be in Setup).
#[post("/api/tournaments/{id}/players/import")]
async fn api_import_players(state: AppState, path: Path<TournamentPath>, body: String) -> HttpResponse {
    with_tournament(&state, path.id, |t| import_players(t, body.as_bytes()).map(|_| ()))
}

/// Remove a player by id (tournament must be in Setup).
#[delete("/api/tournaments/{id}/players/{player_id}")]
async fn api_remove_player(state: AppState, path: Path<TournamentPlayerPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| t.remove_player(path.player_id))
}

/// Replace the round structure (tournament must be in Setup).
#[put("/api/tournaments/{id}/config")]
async fn api_set_config(state: AppState, path: Path<TournamentPath>, body: Json<TournamentConfig>) -> HttpResponse {
    with_tournament(&state, path.id, |t| t.set_config(body.into_inner()))
}

/// Start the tournament and form the first round's teams.
#[post("/api/tournaments/{id}/start")]
async fn api_start_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        start_tournament(t)?;
        start_round(t).map(|_| ())
    })
}

/// Set winner for one matchup of the current round.
#[put("/api/tournaments/{id}/matches/winner")]
async fn api_set_match_winner(state: AppState, path: Path<TournamentPath>, body: Json<SetMatchWinnerBody>) -> HttpResponse {
    with_tournament(&state, path.id, |t| set_match_winner(t, body.match_id, body.side))
}

/// Submit the current round's results and form the next round's teams, if any.
#[post("/api/tournaments/{id}/matches/submit")]
async fn api_submit_match_results(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        submit_round(t)?;
        start_round(t).map(|_| ())
    })
}

/// Restart tournament: back to Setup with same player names.
#[post("/api/tournaments/{id}/restart")]
async fn api_restart_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, Tournament::restart_tournament)
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
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(HashMap::<TournamentId, TournamentEntry>::new()));

    // Background task: every 30 minutes, remove tournaments inactive for 12+ hours
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
                log::info!("Cleaned up {} inactive tournament(s) (no activity for 12h)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_standings)
            .service(api_add_player)
            .service(api_import_players)
            .service(api_remove_player)
            .service(api_set_config)
            .service(api_start_tournament)
            .service(api_set_match_winner)
            .service(api_submit_match_results)
            .service(api_restart_tournament)
    })
    .bind(bind)?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;
    use team_rotation::TournamentState;

    fn state_with(tournament: Tournament) -> AppState {
        let mut map = HashMap::new();
        map.insert(
            tournament.id,
            TournamentEntry {
                tournament,
                last_activity: Instant::now(),
            },
        );
        Data::new(RwLock::new(map))
    }

    fn tournament_with_players(n: usize, config: TournamentConfig) -> Tournament {
        let mut t = Tournament::new(config).with_seed(5);
        for i in 0..n {
            t.register_player(format!("P{i}")).unwrap();
        }
        t
    }

    #[actix_web::test]
    async fn failed_start_reports_error_and_tournament() {
        let t = tournament_with_players(1, TournamentConfig::new(2, 1, 1));
        let id = t.id;
        let state = state_with(t);
        let app = test::init_service(App::new().app_data(state.clone()).service(api_start_tournament)).await;

        let req = test::TestRequest::post()
            .uri(&format!("/api/tournaments/{id}/start"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().unwrap().contains("Not enough players"));
        assert_eq!(body["tournament"]["state"], "setup");
        assert_eq!(body["tournament"]["id"], id.to_string());
    }

    #[actix_web::test]
    async fn failed_submit_returns_the_round_still_open() {
        let mut t = tournament_with_players(4, TournamentConfig::new(2, 2, 1));
        start_tournament(&mut t).unwrap();
        start_round(&mut t).unwrap();
        let id = t.id;
        let state = state_with(t);
        let app = test::init_service(App::new().app_data(state.clone()).service(api_submit_match_results)).await;

        let req = test::TestRequest::post()
            .uri(&format!("/api/tournaments/{id}/matches/submit"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["tournament"]["current_round"], 1);
        assert_eq!(body["tournament"]["bracket"].as_array().unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn submit_applies_results_and_opens_the_next_round() {
        let mut t = tournament_with_players(4, TournamentConfig::new(2, 2, 1));
        start_tournament(&mut t).unwrap();
        start_round(&mut t).unwrap();
        let match_id = t.bracket[0].id;
        set_match_winner(&mut t, match_id, Side::First).unwrap();
        let id = t.id;
        let state = state_with(t);
        let app = test::init_service(App::new().app_data(state.clone()).service(api_submit_match_results)).await;

        let req = test::TestRequest::post()
            .uri(&format!("/api/tournaments/{id}/matches/submit"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let g = state.read().unwrap();
        let t = &g[&id].tournament;
        assert_eq!(t.history.len(), 1);
        assert_eq!(t.current_round, 2);
        assert_eq!(t.state, TournamentState::Deciding);
        assert!(t.final_teams.is_some());
    }
}
