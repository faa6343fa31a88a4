//! Single binary web server: JSON REST API over the league + knockout engine.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Env: HOST, PORT, SNAPSHOT_DIR (optional, persist each tournament as <id>.json),
//! INACTIVITY_HOURS (default 12).

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use league_knockout_web::{
    champion, Invalidation, MatchId, Participant, ParticipantId, Side, Snapshot, Tournament,
    TournamentError, TournamentId,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

/// Per-tournament entry: tournament data + last activity time (for auto-cleanup).
struct TournamentEntry {
    tournament: Tournament,
    last_activity: Instant,
    /// Bumped on every mutation.
    version: u64,
    /// Highest version written to disk. Held while writing, so writes for one
    /// tournament never interleave.
    saved: Arc<tokio::sync::Mutex<u64>>,
}

impl TournamentEntry {
    fn new(tournament: Tournament) -> Self {
        Self {
            tournament,
            last_activity: Instant::now(),
            version: 0,
            saved: Arc::new(tokio::sync::Mutex::new(0)),
        }
    }
}

/// State captured under the write lock for one snapshot file write.
struct SnapshotWrite {
    id: TournamentId,
    version: u64,
    snapshot: Snapshot,
    saved: Arc<tokio::sync::Mutex<u64>>,
}

/// Result of a successful mutation: the new state and its pending snapshot write.
struct Mutation {
    tournament: Tournament,
    write: SnapshotWrite,
}

impl Mutation {
    fn capture(entry: &mut TournamentEntry) -> Self {
        entry.version += 1;
        Self {
            tournament: entry.tournament.clone(),
            write: SnapshotWrite {
                id: entry.tournament.id,
                version: entry.version,
                snapshot: entry.tournament.snapshot(),
                saved: Arc::clone(&entry.saved),
            },
        }
    }
}

/// Server settings read from the environment.
#[derive(Clone, Debug)]
struct Config {
    host: String,
    port: u16,
    snapshot_dir: Option<PathBuf>,
    inactivity_timeout: Duration,
}

impl Config {
    fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);
        let snapshot_dir = std::env::var("SNAPSHOT_DIR")
            .ok()
            .filter(|d| !d.trim().is_empty())
            .map(PathBuf::from);
        let hours: u64 = std::env::var("INACTIVITY_HOURS")
            .ok()
            .and_then(|h| h.parse().ok())
            .unwrap_or(12);
        Self {
            host,
            port,
            snapshot_dir,
            inactivity_timeout: inactivity_timeout(hours),
        }
    }
}

fn inactivity_timeout(hours: u64) -> Duration {
    Duration::from_secs(hours.saturating_mul(3600))
}

struct AppData {
    tournaments: RwLock<HashMap<TournamentId, TournamentEntry>>,
    config: Config,
}

type AppState = Data<AppData>;

/// Tournament plus the derived views clients always want alongside it.
#[derive(Serialize)]
struct TournamentView {
    #[serde(flatten)]
    tournament: Tournament,
    standings: Vec<Participant>,
    champion: Option<ParticipantId>,
}

impl From<Tournament> for TournamentView {
    fn from(tournament: Tournament) -> Self {
        let standings = tournament.standings();
        let champion = champion(&tournament.knockout_rounds);
        Self {
            tournament,
            standings,
            champion,
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct NameBody {
    name: String,
}

#[derive(Deserialize)]
struct GenerateLeagueBody {
    #[serde(default = "default_rounds")]
    rounds: u32,
}

fn default_rounds() -> u32 {
    1
}

#[derive(Deserialize)]
struct ScoreBody {
    match_id: MatchId,
    side: Side,
    /// `null` clears the score.
    score: Option<u32>,
}

#[derive(Deserialize)]
struct WinnerBody {
    round_index: usize,
    match_index: usize,
    winner_id: ParticipantId,
}

#[derive(Deserialize)]
struct InvalidationBody {
    invalidation: Invalidation,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and participant id.
#[derive(Deserialize)]
struct TournamentParticipantPath {
    id: TournamentId,
    participant_id: ParticipantId,
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
}

fn bad_request(e: TournamentError) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

/// Apply one operation to a tournament under the write lock and capture the result.
fn mutate<F>(state: &AppState, id: TournamentId, op: F) -> Result<Mutation, HttpResponse>
where
    F: FnOnce(&mut Tournament) -> Result<(), TournamentError>,
{
    let mut g = state.tournaments.write().map_err(|_| lock_error())?;
    let entry = g.get_mut(&id).ok_or_else(not_found)?;
    entry.last_activity = Instant::now();
    op(&mut entry.tournament).map_err(bad_request)?;
    Ok(Mutation::capture(entry))
}

/// Read a tournament (refreshes last_activity).
fn read(state: &AppState, id: TournamentId) -> Result<Tournament, HttpResponse> {
    let mut g = state.tournaments.write().map_err(|_| lock_error())?;
    let entry = g.get_mut(&id).ok_or_else(not_found)?;
    entry.last_activity = Instant::now();
    Ok(entry.tournament.clone())
}

/// Write `<dir>/<id>.json` if a snapshot directory is configured. A write older
/// than the last one saved is dropped. Failures are logged only.
async fn persist(config: &Config, write: &SnapshotWrite) {
    let Some(dir) = &config.snapshot_dir else {
        return;
    };
    let mut saved = write.saved.lock().await;
    if *saved >= write.version {
        log::debug!(
            "Skipping snapshot v{} of {} (v{} already saved)",
            write.version,
            write.id,
            *saved
        );
        return;
    }
    let json = match write.snapshot.to_json() {
        Ok(json) => json,
        Err(e) => {
            log::error!("Could not serialize tournament {}: {}", write.id, e);
            return;
        }
    };
    let path = dir.join(format!("{}.json", write.id));
    if let Err(e) = tokio::fs::create_dir_all(dir).await {
        log::error!("Could not create snapshot dir {}: {}", dir.display(), e);
        return;
    }
    match tokio::fs::write(&path, json).await {
        Ok(()) => *saved = write.version,
        Err(e) => log::error!("Could not write snapshot {}: {}", path.display(), e),
    }
}

/// Persist a successful mutation and render it.
async fn respond(state: &AppState, result: Result<Mutation, HttpResponse>) -> HttpResponse {
    match result {
        Ok(m) => {
            persist(&state.config, &m.write).await;
            HttpResponse::Ok().json(TournamentView::from(m.tournament))
        }
        Err(resp) => resp,
    }
}

fn insert(state: &AppState, tournament: Tournament) -> Result<Mutation, HttpResponse> {
    let mut g = state.tournaments.write().map_err(|_| lock_error())?;
    let entry = g
        .entry(tournament.id)
        .or_insert_with(|| TournamentEntry::new(tournament));
    Ok(Mutation::capture(entry))
}

/// Load every `<id>.json` in the snapshot directory. Unreadable files are skipped.
async fn load_snapshots(dir: &std::path::Path) -> HashMap<TournamentId, TournamentEntry> {
    let mut loaded = HashMap::new();
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) => {
            log::info!("No snapshots loaded from {}: {}", dir.display(), e);
            return loaded;
        }
    };
    while let Ok(Some(entry)) = entries.next_entry().await {
        let path = entry.path();
        let Some(id) = path
            .file_stem()
            .and_then(|s| s.to_str())
            .and_then(|s| s.parse::<TournamentId>().ok())
        else {
            continue;
        };
        let json = match tokio::fs::read_to_string(&path).await {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read {}: {}", path.display(), e);
                continue;
            }
        };
        match Snapshot::from_json(&json) {
            Ok(snapshot) => {
                let mut tournament = Tournament::from_snapshot(snapshot);
                tournament.id = id;
                loaded.insert(id, TournamentEntry::new(tournament));
            }
            Err(e) => log::warn!("Skipping {}: {}", path.display(), e),
        }
    }
    log::info!("Loaded {} tournament snapshot(s) from {}", loaded.len(), dir.display());
    loaded
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "league-knockout-web",
    })
}

/// Create a new, empty tournament (client stores the id for subsequent requests).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState) -> HttpResponse {
    let result = insert(&state, Tournament::new());
    respond(&state, result).await
}

/// Create a tournament from a snapshot document (full or legacy participant list).
#[post("/api/tournaments/import")]
async fn api_import_tournament(state: AppState, body: String) -> HttpResponse {
    let snapshot = match Snapshot::from_json(&body) {
        Ok(s) => s,
        Err(e) => return bad_request(e),
    };
    let result = insert(&state, Tournament::from_snapshot(snapshot));
    respond(&state, result).await
}

#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    match read(&state, path.id) {
        Ok(t) => HttpResponse::Ok().json(TournamentView::from(t)),
        Err(resp) => resp,
    }
}

/// Download the persisted document for this tournament.
#[get("/api/tournaments/{id}/export")]
async fn api_export_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    match read(&state, path.id) {
        Ok(t) => HttpResponse::Ok()
            .insert_header((
                "Content-Disposition",
                "attachment; filename=\"tournament_data.json\"",
            ))
            .json(t.snapshot()),
        Err(resp) => resp,
    }
}

#[post("/api/tournaments/{id}/participants")]
async fn api_add_participant(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<NameBody>,
) -> HttpResponse {
    let result = mutate(&state, path.id, |t| t.add_participant(body.name.as_str()).map(|_| ()));
    respond(&state, result).await
}

#[put("/api/tournaments/{id}/participants/{participant_id}")]
async fn api_rename_participant(
    state: AppState,
    path: Path<TournamentParticipantPath>,
    body: Json<NameBody>,
) -> HttpResponse {
    let result = mutate(&state, path.id, |t| {
        t.rename_participant(path.participant_id, body.name.as_str())
    });
    respond(&state, result).await
}

/// Remove a participant. Resets league and bracket.
#[delete("/api/tournaments/{id}/participants/{participant_id}")]
async fn api_remove_participant(
    state: AppState,
    path: Path<TournamentParticipantPath>,
) -> HttpResponse {
    let result = mutate(&state, path.id, |t| t.remove_participant(path.participant_id));
    respond(&state, result).await
}

/// Generate league fixtures (replaces league and bracket).
#[post("/api/tournaments/{id}/league")]
async fn api_generate_league(
    state: AppState,
    path: Path<TournamentPath>,
    body: Option<Json<GenerateLeagueBody>>,
) -> HttpResponse {
    let rounds = body.map(|b| b.rounds).unwrap_or_else(default_rounds);
    let result = mutate(&state, path.id, |t| t.generate_league(rounds));
    respond(&state, result).await
}

#[delete("/api/tournaments/{id}/league")]
async fn api_reset_league(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let result = mutate(&state, path.id, |t| {
        t.reset_league();
        Ok(())
    });
    respond(&state, result).await
}

/// Enter or clear one side's score of a league match.
#[put("/api/tournaments/{id}/league/score")]
async fn api_set_score(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<ScoreBody>,
) -> HttpResponse {
    let result = mutate(&state, path.id, |t| {
        t.record_score(body.match_id, body.side, body.score);
        Ok(())
    });
    respond(&state, result).await
}

#[get("/api/tournaments/{id}/standings")]
async fn api_standings(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    match read(&state, path.id) {
        Ok(t) => HttpResponse::Ok().json(t.standings()),
        Err(resp) => resp,
    }
}

#[get("/api/tournaments/{id}/standings.csv")]
async fn api_standings_csv(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let t = match read(&state, path.id) {
        Ok(t) => t,
        Err(resp) => return resp,
    };
    match league_knockout_web::standings_csv(&t.standings()) {
        Ok(csv) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .body(csv),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Seed the knockout bracket from the current standings.
#[post("/api/tournaments/{id}/bracket")]
async fn api_generate_bracket(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let result = mutate(&state, path.id, |t| t.generate_bracket());
    respond(&state, result).await
}

#[put("/api/tournaments/{id}/bracket/winner")]
async fn api_set_winner(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<WinnerBody>,
) -> HttpResponse {
    let result = mutate(&state, path.id, |t| {
        t.record_winner(body.round_index, body.match_index, body.winner_id)
    });
    respond(&state, result).await
}

#[put("/api/tournaments/{id}/bracket/invalidation")]
async fn api_set_invalidation(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<InvalidationBody>,
) -> HttpResponse {
    let result = mutate(&state, path.id, |t| {
        t.set_invalidation(body.invalidation);
        Ok(())
    });
    respond(&state, result).await
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    let tournaments = match &config.snapshot_dir {
        Some(dir) => load_snapshots(dir).await,
        None => HashMap::new(),
    };
    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(AppData {
        tournaments: RwLock::new(tournaments),
        config,
    });

    // Background task: every 30 minutes, drop tournaments that have been idle too long.
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let timeout = state_cleanup.config.inactivity_timeout;
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.tournaments.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < timeout);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive tournament(s)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_tournament)
            .service(api_import_tournament)
            .service(api_get_tournament)
            .service(api_export_tournament)
            .service(api_add_participant)
            .service(api_rename_participant)
            .service(api_remove_participant)
            .service(api_generate_league)
            .service(api_reset_league)
            .service(api_set_score)
            .service(api_standings)
            .service(api_standings_csv)
            .service(api_generate_bracket)
            .service(api_set_winner)
            .service(api_set_invalidation)
    })
    .bind(bind)?
    .run()
    .await
}
