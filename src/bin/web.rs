//! Single binary web server: one shared game exposed via REST.
//! Run with: cargo run --bin web
//! Configured from env: HOST, PORT, DATA_DIR, DICTIONARY_URL, VALIDATION_TIMEOUT_MS.

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use ghost_word_web::config::Config;
use ghost_word_web::{
    spawn_check, DictionaryClient, FileStore, GameError, GameSnapshot, KeyValueStore,
    MemoryStore, PendingCheck, PlayerId, PlayerLedger, Resolution, RoundEngine, Submission,
    WordValidator,
};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

/// The game lives behind a std mutex; it is never held across an await.
type AppState = Data<Mutex<RoundEngine>>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct PlayerNameBody {
    name: String,
}

#[derive(Deserialize)]
struct LetterBody {
    letter: String,
}

#[derive(Deserialize)]
struct PlayerPath {
    id: PlayerId,
}

/// Snapshot plus what the last action did.
#[derive(Serialize)]
struct ActionResponse<'a> {
    #[serde(flatten)]
    game: GameSnapshot,
    outcome: &'a str,
    player: Option<PlayerId>,
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

fn game_error(e: GameError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        GameError::PlayerNotFound(_) => HttpResponse::NotFound().json(body),
        GameError::ValidationPending | GameError::InvalidPhase(_) => {
            HttpResponse::Conflict().json(body)
        }
        _ => HttpResponse::BadRequest().json(body),
    }
}

fn action_response(engine: &RoundEngine, resolution: &Resolution) -> HttpResponse {
    let (outcome, player) = match resolution {
        Resolution::Advanced { next_player } => ("advanced", Some(*next_player)),
        Resolution::Accepted => ("accepted", None),
        Resolution::Eliminated { player, concluded: false } => ("eliminated", Some(*player)),
        Resolution::Eliminated { player, concluded: true } => ("eliminated_game_over", Some(*player)),
        Resolution::Concluded { winner } => ("concluded", *winner),
        Resolution::Stale => ("stale", None),
    };
    HttpResponse::Ok().json(ActionResponse {
        game: engine.snapshot(),
        outcome,
        player,
    })
}

/// Run the lookup on a detached task so a dropped request still settles it.
async fn complete_check(state: &AppState, check: PendingCheck) -> HttpResponse {
    let resolution = match spawn_check(state.clone().into_inner(), check).await {
        Ok(Some(resolution)) => resolution,
        Ok(None) => return lock_error(),
        Err(e) => {
            log::error!("Word check task failed: {}", e);
            return HttpResponse::InternalServerError().body("word check failed");
        }
    };
    match state.lock() {
        Ok(g) => action_response(&g, &resolution),
        Err(_) => lock_error(),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "ghost-word-web",
    })
}

/// Current game snapshot.
#[get("/api/game")]
async fn api_get_game(state: AppState) -> HttpResponse {
    match state.lock() {
        Ok(g) => HttpResponse::Ok().json(g.snapshot()),
        Err(_) => lock_error(),
    }
}

/// Results table.
#[get("/api/standings")]
async fn api_standings(state: AppState) -> HttpResponse {
    match state.lock() {
        Ok(g) => HttpResponse::Ok().json(g.ledger().standings()),
        Err(_) => lock_error(),
    }
}

#[post("/api/players")]
async fn api_add_player(state: AppState, body: Json<PlayerNameBody>) -> HttpResponse {
    let mut g = match state.lock() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.add_player(&body.name) {
        Ok(_) => HttpResponse::Ok().json(g.snapshot()),
        Err(e) => game_error(e),
    }
}

#[put("/api/players/{id}")]
async fn api_rename_player(
    state: AppState,
    path: Path<PlayerPath>,
    body: Json<PlayerNameBody>,
) -> HttpResponse {
    let mut g = match state.lock() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.rename_player(path.id, &body.name) {
        Ok(_) => HttpResponse::Ok().json(g.snapshot()),
        Err(e) => game_error(e),
    }
}

#[delete("/api/players/{id}")]
async fn api_remove_player(state: AppState, path: Path<PlayerPath>) -> HttpResponse {
    let mut g = match state.lock() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.remove_player(path.id) {
        Ok(()) => HttpResponse::Ok().json(g.snapshot()),
        Err(e) => game_error(e),
    }
}

/// Wipe every player and their stats.
#[post("/api/players/reset")]
async fn api_reset_players(state: AppState) -> HttpResponse {
    let mut g = match state.lock() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    g.reset_ledger();
    HttpResponse::Ok().json(g.snapshot())
}

#[post("/api/game/start")]
async fn api_start_game(state: AppState) -> HttpResponse {
    let mut g = match state.lock() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.start_game() {
        Ok(()) => HttpResponse::Ok().json(g.snapshot()),
        Err(e) => game_error(e),
    }
}

/// Add a letter for the current player; checks the word when it reaches 2+ letters.
#[post("/api/game/letter")]
async fn api_submit_letter(state: AppState, body: Json<LetterBody>) -> HttpResponse {
    let check = {
        let mut g = match state.lock() {
            Ok(guard) => guard,
            Err(_) => return lock_error(),
        };
        match g.submit_letter(&body.letter) {
            Ok(Submission::Settled(resolution)) => return action_response(&g, &resolution),
            Ok(Submission::Pending(check)) => check,
            Err(e) => return game_error(e),
        }
    };
    complete_check(&state, check).await
}

/// Check the current fragment as a finished word.
#[post("/api/game/check")]
async fn api_check_word(state: AppState) -> HttpResponse {
    let check = {
        let mut g = match state.lock() {
            Ok(guard) => guard,
            Err(_) => return lock_error(),
        };
        match g.manual_check() {
            Ok(check) => check,
            Err(e) => return game_error(e),
        }
    };
    complete_check(&state, check).await
}

/// Current player withdraws.
#[post("/api/game/quit")]
async fn api_quit(state: AppState) -> HttpResponse {
    let mut g = match state.lock() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.quit_current_player() {
        Ok(resolution) => action_response(&g, &resolution),
        Err(e) => game_error(e),
    }
}

#[post("/api/game/next")]
async fn api_next_player(state: AppState) -> HttpResponse {
    let mut g = match state.lock() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.next_player() {
        Ok(resolution) => action_response(&g, &resolution),
        Err(e) => game_error(e),
    }
}

/// End the game with the current word.
#[post("/api/game/end")]
async fn api_end_game(state: AppState) -> HttpResponse {
    let mut g = match state.lock() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.end_game() {
        Ok(()) => HttpResponse::Ok().json(g.snapshot()),
        Err(e) => game_error(e),
    }
}

#[post("/api/game/reset")]
async fn api_reset_game(state: AppState) -> HttpResponse {
    let mut g = match state.lock() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    g.reset_round();
    HttpResponse::Ok().json(g.snapshot())
}

/// Same roster, everyone back in, ready to start again.
#[post("/api/game/new")]
async fn api_new_game(state: AppState) -> HttpResponse {
    let mut g = match state.lock() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.new_game() {
        Ok(()) => HttpResponse::Ok().json(g.snapshot()),
        Err(e) => game_error(e),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    let store: Box<dyn KeyValueStore> = match &config.data_dir {
        Some(dir) => {
            log::info!("Storing players in {}", dir.display());
            Box::new(FileStore::new(dir.clone()))
        }
        None => {
            log::info!("DATA_DIR empty; players are kept in memory");
            Box::new(MemoryStore::new())
        }
    };
    let client = DictionaryClient::new(&config.dictionary_url, config.validation_timeout)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    let engine = RoundEngine::new(PlayerLedger::load(store), WordValidator::new(Arc::new(client)))
        .with_validation_timeout(config.validation_timeout);

    let bind = (config.host.as_str(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(Mutex::new(engine));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_get_game)
            .service(api_standings)
            .service(api_reset_players)
            .service(api_add_player)
            .service(api_rename_player)
            .service(api_remove_player)
            .service(api_start_game)
            .service(api_submit_letter)
            .service(api_check_word)
            .service(api_quit)
            .service(api_next_player)
            .service(api_end_game)
            .service(api_reset_game)
            .service(api_new_game)
    })
    .bind(bind)?
    .run()
    .await
}
