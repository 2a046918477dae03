use pinpoint_types::GameError;
use warp::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Game(#[from] GameError),

    #[error("invalid request: {0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn session_not_found(session_id: &str) -> Self {
        ApiError::Game(GameError::SessionNotFound {
            session_id: session_id.to_string(),
        })
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Game(GameError::SessionNotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Game(GameError::PlayerNotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Game(GameError::InvalidLocation { .. }) => StatusCode::BAD_REQUEST,
            ApiError::Game(GameError::TargetCountMismatch { .. }) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Game(_) => StatusCode::CONFLICT,
        }
    }

    pub fn into_reply(self) -> warp::reply::WithStatus<warp::reply::Json> {
        warp::reply::with_status(
            warp::reply::json(&serde_json::json!({
                "error": self.to_string()
            })),
            self.status_code(),
        )
    }
}
