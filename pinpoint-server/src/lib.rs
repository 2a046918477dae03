use serde::Serialize;
use std::sync::Arc;
use warp::Filter;
use warp::http::StatusCode;
use warp::reply::{Json, WithStatus};

use crate::error::ApiError;
use crate::session::{SessionId, SessionManager};
use pinpoint_core::RoundAdvance;
use pinpoint_types::{CreateGameRequest, GameSnapshot, LatLng};

pub mod config;
pub mod error;
pub mod session;
pub mod street_view;
pub mod websocket;

const MAX_BODY_BYTES: u64 = 16 * 1024;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateSessionResponse {
    session_id: SessionId,
    snapshot: GameSnapshot,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NextRoundResponse {
    game_over: bool,
    snapshot: GameSnapshot,
}

pub fn create_routes(
    session_manager: Arc<SessionManager>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let manager_filter = warp::any().map({
        let session_manager = session_manager.clone();
        move || session_manager.clone()
    });

    // Health check endpoint
    let health = warp::path!("health")
        .and(warp::get())
        .map(|| warp::reply::with_status("OK", StatusCode::OK));

    let create_session = warp::path!("sessions")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json::<CreateGameRequest>())
        .and(manager_filter.clone())
        .and_then(handle_create_session);

    let state = warp::path!("sessions" / String / "state")
        .and(warp::get())
        .and(manager_filter.clone())
        .and_then(handle_state);

    let start = warp::path!("sessions" / String / "start")
        .and(warp::post())
        .and(manager_filter.clone())
        .and_then(handle_start);

    let guess = warp::path!("sessions" / String / "guess")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json::<LatLng>())
        .and(manager_filter.clone())
        .and_then(handle_guess);

    let next = warp::path!("sessions" / String / "next")
        .and(warp::post())
        .and(manager_filter.clone())
        .and_then(handle_next_round);

    let reset = warp::path!("sessions" / String / "reset")
        .and(warp::post())
        .and(manager_filter.clone())
        .and_then(handle_reset);

    let summary = warp::path!("sessions" / String / "summary")
        .and(warp::get())
        .and(manager_filter.clone())
        .and_then(handle_summary);

    let leave = warp::path!("sessions" / String)
        .and(warp::delete())
        .and(manager_filter.clone())
        .and_then(handle_leave);

    // WebSocket endpoint
    let websocket = warp::path!("sessions" / String / "ws")
        .and(warp::ws())
        .and(manager_filter.clone())
        .and_then(handle_ws_upgrade);

    // CORS configuration
    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["content-type"])
        .allow_methods(vec!["GET", "POST", "DELETE"]);

    health
        .or(create_session)
        .or(state)
        .or(start)
        .or(guess)
        .or(next)
        .or(reset)
        .or(summary)
        .or(leave)
        .or(websocket)
        .with(cors)
        .with(warp::log("pinpoint"))
}

fn reply_json<T: Serialize>(result: Result<T, ApiError>, status: StatusCode) -> WithStatus<Json> {
    match result {
        Ok(body) => warp::reply::with_status(warp::reply::json(&body), status),
        Err(err) => {
            tracing::debug!("Request failed: {}", err);
            err.into_reply()
        }
    }
}

async fn handle_create_session(
    request: CreateGameRequest,
    session_manager: Arc<SessionManager>,
) -> Result<WithStatus<Json>, warp::Rejection> {
    let result = session_manager
        .create_session(request)
        .await
        .map(|(session_id, snapshot)| CreateSessionResponse {
            session_id,
            snapshot,
        });
    Ok(reply_json(result, StatusCode::CREATED))
}

async fn handle_state(
    session_id: String,
    session_manager: Arc<SessionManager>,
) -> Result<WithStatus<Json>, warp::Rejection> {
    Ok(reply_json(
        session_manager.snapshot(&session_id).await,
        StatusCode::OK,
    ))
}

async fn handle_start(
    session_id: String,
    session_manager: Arc<SessionManager>,
) -> Result<WithStatus<Json>, warp::Rejection> {
    // Target lookup keeps running after the response; the socket reports
    // when round one begins.
    if let Err(err) = session_manager.start_game(&session_id).await {
        return Ok(err.into_reply());
    }
    Ok(reply_json(
        session_manager.snapshot(&session_id).await,
        StatusCode::ACCEPTED,
    ))
}

async fn handle_guess(
    session_id: String,
    location: LatLng,
    session_manager: Arc<SessionManager>,
) -> Result<WithStatus<Json>, warp::Rejection> {
    Ok(reply_json(
        session_manager.submit_guess(&session_id, location).await,
        StatusCode::OK,
    ))
}

async fn handle_next_round(
    session_id: String,
    session_manager: Arc<SessionManager>,
) -> Result<WithStatus<Json>, warp::Rejection> {
    let advance = match session_manager.next_round(&session_id).await {
        Ok(advance) => advance,
        Err(err) => return Ok(err.into_reply()),
    };
    let result = session_manager
        .snapshot(&session_id)
        .await
        .map(|snapshot| NextRoundResponse {
            game_over: advance == RoundAdvance::GameOver,
            snapshot,
        });
    Ok(reply_json(result, StatusCode::OK))
}

async fn handle_reset(
    session_id: String,
    session_manager: Arc<SessionManager>,
) -> Result<WithStatus<Json>, warp::Rejection> {
    Ok(reply_json(
        session_manager.reset_game(&session_id).await,
        StatusCode::OK,
    ))
}

async fn handle_summary(
    session_id: String,
    session_manager: Arc<SessionManager>,
) -> Result<WithStatus<Json>, warp::Rejection> {
    Ok(reply_json(
        session_manager.summary(&session_id).await,
        StatusCode::OK,
    ))
}

async fn handle_leave(
    session_id: String,
    session_manager: Arc<SessionManager>,
) -> Result<WithStatus<Json>, warp::Rejection> {
    let result = session_manager
        .remove_session(&session_id)
        .await
        .map(|()| serde_json::json!({ "removed": session_id }));
    Ok(reply_json(result, StatusCode::OK))
}

async fn handle_ws_upgrade(
    session_id: String,
    ws: warp::ws::Ws,
    session_manager: Arc<SessionManager>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let updates = session_manager
        .subscribe(&session_id)
        .await
        .map_err(|_| warp::reject::not_found())?;

    Ok(ws.on_upgrade(move |socket| {
        websocket::handle_connection(socket, session_id, session_manager, updates)
    }))
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use async_trait::async_trait;
    use pinpoint_core::{GameSettings, LocationError, LocationProvider};
    use pinpoint_types::{ClientMessage, GameStatus, PlayerGuess, ServerMessage};
    use std::time::Duration;

    struct EchoProvider;

    #[async_trait]
    impl LocationProvider for EchoProvider {
        async fn resolve_playable_location(
            &self,
            candidate: LatLng,
            _radius_meters: u32,
        ) -> Result<Option<LatLng>, LocationError> {
            Ok(Some(candidate))
        }

        fn name(&self) -> &str {
            "echo"
        }
    }

    fn create_test_manager() -> Arc<SessionManager> {
        Arc::new(SessionManager::new(
            Arc::new(EchoProvider),
            GameSettings::new(2, 60).unwrap(),
            1000,
        ))
    }

    fn create_test_app(
        manager: Arc<SessionManager>,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        create_routes(manager)
    }

    async fn create_session_via_http(manager: &Arc<SessionManager>) -> String {
        let app = create_test_app(manager.clone());
        let response = warp::test::request()
            .method("POST")
            .path("/sessions")
            .json(&serde_json::json!({ "mode": "single", "playerName": "Alice" }))
            .reply(&app)
            .await;
        assert_eq!(response.status(), 201);

        let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body["snapshot"]["state"]["status"], "lobby");
        assert_eq!(body["snapshot"]["state"]["players"][0]["name"], "Alice");
        body["sessionId"].as_str().unwrap().to_string()
    }

    /// Waits until the background start has put the game into play.
    async fn wait_until_playing(manager: &SessionManager, session_id: &str) {
        for _ in 0..100 {
            if manager.snapshot(session_id).await.unwrap().state.status == GameStatus::Playing {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("game never started");
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_test_app(create_test_manager());

        let response = warp::test::request()
            .method("GET")
            .path("/health")
            .reply(&app)
            .await;

        assert_eq!(response.status(), 200);
        assert_eq!(response.body(), "OK");

        let response = warp::test::request()
            .method("GET")
            .path("/health/extra")
            .reply(&app)
            .await;
        assert_eq!(response.status(), 404);
    }

    #[tokio::test]
    async fn test_multiplayer_session_gets_join_code() {
        let app = create_test_app(create_test_manager());

        let response = warp::test::request()
            .method("POST")
            .path("/sessions")
            .json(&serde_json::json!({ "mode": "multiplayer" }))
            .reply(&app)
            .await;
        assert_eq!(response.status(), 201);
        let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        let game_id = body["snapshot"]["state"]["gameId"].as_str().unwrap();
        assert_eq!(game_id.len(), 6);
        assert!(game_id.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
        assert_eq!(body["snapshot"]["state"]["players"][0]["name"], "Player");

        let response = warp::test::request()
            .method("POST")
            .path("/sessions")
            .json(&serde_json::json!({ "mode": "multiplayer", "join": "QX7Z2A" }))
            .reply(&app)
            .await;
        let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body["snapshot"]["state"]["gameId"], "QX7Z2A");

        let response = warp::test::request()
            .method("POST")
            .path("/sessions")
            .json(&serde_json::json!({ "mode": "multiplayer", "join": "no spaces" }))
            .reply(&app)
            .await;
        assert_eq!(response.status(), 400);
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let app = create_test_app(create_test_manager());

        for (method, path) in [
            ("GET", "/sessions/missing/state"),
            ("POST", "/sessions/missing/start"),
            ("POST", "/sessions/missing/next"),
            ("GET", "/sessions/missing/summary"),
            ("DELETE", "/sessions/missing"),
        ] {
            let response = warp::test::request()
                .method(method)
                .path(path)
                .reply(&app)
                .await;
            assert_eq!(response.status(), 404, "{} {}", method, path);
            let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
            assert!(body["error"].as_str().unwrap().contains("missing"));
        }
    }

    #[tokio::test]
    async fn test_full_game_over_http() {
        let manager = create_test_manager();
        let app = create_test_app(manager.clone());
        let session_id = create_session_via_http(&manager).await;

        // Guessing in the lobby is an invalid transition.
        let response = warp::test::request()
            .method("POST")
            .path(&format!("/sessions/{}/guess", session_id))
            .json(&LatLng::new(10.0, 10.0))
            .reply(&app)
            .await;
        assert_eq!(response.status(), 409);

        let response = warp::test::request()
            .method("POST")
            .path(&format!("/sessions/{}/start", session_id))
            .reply(&app)
            .await;
        assert_eq!(response.status(), 202);
        wait_until_playing(&manager, &session_id).await;

        for round in 1..=2 {
            let response = warp::test::request()
                .method("POST")
                .path(&format!("/sessions/{}/guess", session_id))
                .json(&LatLng::new(10.0, 10.0))
                .reply(&app)
                .await;
            assert_eq!(response.status(), 200);
            let guess: PlayerGuess = serde_json::from_slice(response.body()).unwrap();
            assert_eq!(guess.player_name, "Alice");

            let response = warp::test::request()
                .method("POST")
                .path(&format!("/sessions/{}/next", session_id))
                .reply(&app)
                .await;
            assert_eq!(response.status(), 200);
            let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
            assert_eq!(body["gameOver"], round == 2);
        }

        let response = warp::test::request()
            .method("GET")
            .path(&format!("/sessions/{}/summary", session_id))
            .reply(&app)
            .await;
        assert_eq!(response.status(), 200);
        let summary: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(summary["rounds"].as_array().unwrap().len(), 2);
        assert_eq!(summary["totalPossibleScore"], 10000);

        let response = warp::test::request()
            .method("DELETE")
            .path(&format!("/sessions/{}", session_id))
            .reply(&app)
            .await;
        assert_eq!(response.status(), 200);
        assert_eq!(manager.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_invalid_guess_body() {
        let manager = create_test_manager();
        let app = create_test_app(manager.clone());
        let session_id = create_session_via_http(&manager).await;
        manager.start_game(&session_id).await.unwrap().await.unwrap();

        let response = warp::test::request()
            .method("POST")
            .path(&format!("/sessions/{}/guess", session_id))
            .json(&LatLng::new(120.0, 0.0))
            .reply(&app)
            .await;
        assert_eq!(response.status(), 400);

        let response = warp::test::request()
            .method("POST")
            .path(&format!("/sessions/{}/guess", session_id))
            .header("content-type", "application/json")
            .body("{\"lat\": \"north\"}")
            .reply(&app)
            .await;
        assert_eq!(response.status(), 400);

        let snapshot = manager.snapshot(&session_id).await.unwrap();
        assert!(!snapshot.has_guessed);
    }

    #[tokio::test]
    async fn test_websocket_receives_state_and_heartbeat() {
        let manager = create_test_manager();
        let app = create_test_app(manager.clone());
        let session_id = create_session_via_http(&manager).await;

        let mut ws = warp::test::ws()
            .path(&format!("/sessions/{}/ws", session_id))
            .handshake(app)
            .await
            .expect("WebSocket handshake should succeed");

        let msg = ws.recv().await.unwrap();
        let server_msg: ServerMessage = serde_json::from_str(msg.to_str().unwrap()).unwrap();
        match server_msg {
            ServerMessage::GameStateUpdate { snapshot } => {
                assert_eq!(snapshot.state.status, GameStatus::Lobby);
            }
            other => panic!("Expected state update, got: {:?}", other),
        }

        ws.send_text(serde_json::to_string(&ClientMessage::Heartbeat).unwrap())
            .await;
        let msg = ws.recv().await.unwrap();
        let server_msg: ServerMessage = serde_json::from_str(msg.to_str().unwrap()).unwrap();
        assert!(matches!(server_msg, ServerMessage::Heartbeat));
    }

    #[tokio::test]
    async fn test_websocket_invalid_message_handling() {
        let manager = create_test_manager();
        let app = create_test_app(manager.clone());
        let session_id = create_session_via_http(&manager).await;

        let mut ws = warp::test::ws()
            .path(&format!("/sessions/{}/ws", session_id))
            .handshake(app)
            .await
            .expect("WebSocket handshake should succeed");
        let _initial_state = ws.recv().await.unwrap();

        ws.send_text("invalid json").await;
        let msg = ws.recv().await.unwrap();
        let server_msg: ServerMessage = serde_json::from_str(msg.to_str().unwrap()).unwrap();
        match server_msg {
            ServerMessage::Error { message } => assert!(message.contains("Invalid JSON message")),
            other => panic!("Expected error message, got: {:?}", other),
        }

        // Commands that are invalid for the current status come back as errors.
        ws.send_text(serde_json::to_string(&ClientMessage::NextRound).unwrap())
            .await;
        let msg = ws.recv().await.unwrap();
        let server_msg: ServerMessage = serde_json::from_str(msg.to_str().unwrap()).unwrap();
        match server_msg {
            ServerMessage::Error { message } => assert!(message.contains("lobby")),
            other => panic!("Expected error message, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_websocket_unknown_session_rejected() {
        let app = create_test_app(create_test_manager());
        let result = warp::test::ws()
            .path("/sessions/nope/ws")
            .handshake(app)
            .await;
        assert!(result.is_err());
    }
}
