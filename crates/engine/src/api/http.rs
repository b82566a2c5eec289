//! HTTP routes.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use blackwood_domain::{CharacterId, GameState, Message};

use crate::app::App;
use crate::moderation::Severity;
use crate::stores::{CharacterStatus, OfflineEvent};
use crate::use_cases::{MessageCheck, SelectCharacterError, SendMessageError, SendOutcome};

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route("/api/characters", get(list_characters))
        .route("/api/characters/{id}/select", post(select_character))
        .route("/api/characters/{id}/status", get(character_status))
        .route("/api/chat", post(chat))
        .route("/api/abuse-check", post(abuse_check))
        .route("/api/state", get(game_state))
        .route("/api/accuse", post(accuse))
        .route("/api/reset", post(reset))
}

async fn health() -> &'static str {
    "OK"
}

// =============================================================================
// Characters
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CharacterSummary {
    id: String,
    name: String,
    role: String,
}

async fn list_characters(State(app): State<Arc<App>>) -> Json<Vec<CharacterSummary>> {
    let mut characters: Vec<_> = app
        .case
        .suspects()
        .map(|s| CharacterSummary {
            id: s.id.to_string(),
            name: s.name.clone(),
            role: s.role.clone(),
        })
        .collect();
    characters.sort_by(|a, b| a.id.cmp(&b.id));
    Json(characters)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SelectResponse {
    conversation: blackwood_domain::Conversation,
    status: CharacterStatus,
    first_interview: bool,
}

async fn select_character(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
) -> Result<Json<SelectResponse>, ApiError> {
    let character_id = parse_character_id(&id)?;
    let selected = app.use_cases.select_character.execute(character_id)?;
    Ok(Json(SelectResponse {
        conversation: selected.conversation,
        status: selected.status,
        first_interview: selected.first_interview,
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusResponse {
    #[serde(flatten)]
    status: CharacterStatus,
    seconds_remaining: i64,
}

async fn character_status(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
) -> Result<Json<StatusResponse>, ApiError> {
    let character_id = parse_character_id(&id)?;
    if app.case.suspect(&character_id).is_none() {
        return Err(ApiError::NotFound);
    }
    let status = app.presence.status(&character_id);
    let seconds_remaining = app.presence.time_until_online(&character_id);
    Ok(Json(StatusResponse {
        status,
        seconds_remaining,
    }))
}

// =============================================================================
// Chat
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChatRequest {
    character_id: String,
    message: String,
}

#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase", rename_all_fields = "camelCase")]
enum ChatData {
    Delivered {
        message: Message,
        trust_level: u8,
        progress: u8,
        redacted: bool,
    },
    Refused {
        message: Message,
        reason: String,
        severity: Severity,
        cooldown_secs: i64,
    },
}

#[derive(Debug, Serialize)]
struct Envelope<T> {
    success: bool,
    data: T,
}

async fn chat(
    State(app): State<Arc<App>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<Envelope<ChatData>>, ApiError> {
    let character_id = parse_character_id(&request.character_id)?;
    let outcome = app
        .use_cases
        .send_message
        .execute(character_id, request.message)
        .await?;

    let data = match outcome {
        SendOutcome::Delivered {
            reply,
            trust,
            progress,
            redacted,
        } => ChatData::Delivered {
            message: reply,
            trust_level: trust.value(),
            progress: progress.percent(),
            redacted,
        },
        SendOutcome::Refused {
            classification,
            refusal,
            cooldown_secs,
        } => ChatData::Refused {
            message: refusal,
            reason: classification.reason,
            severity: classification.severity,
            cooldown_secs,
        },
    };

    Ok(Json(Envelope {
        success: true,
        data,
    }))
}

// =============================================================================
// Moderation
// =============================================================================

#[derive(Debug, Deserialize)]
struct AbuseCheckRequest {
    message: String,
}

async fn abuse_check(
    State(app): State<Arc<App>>,
    Json(request): Json<AbuseCheckRequest>,
) -> Json<Envelope<MessageCheck>> {
    let check = app.use_cases.check_message.execute(&request.message);
    Json(Envelope {
        success: true,
        data: check,
    })
}

// =============================================================================
// Game state
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StateResponse {
    game_state: GameState,
    offline_events: Vec<OfflineEvent>,
}

async fn game_state(State(app): State<Arc<App>>) -> Json<StateResponse> {
    Json(StateResponse {
        game_state: app.store.game_state(),
        offline_events: app.presence.recent_events(),
    })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccuseRequest {
    character_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AccuseResponse {
    correct: bool,
    case_solved: bool,
}

async fn accuse(
    State(app): State<Arc<App>>,
    Json(request): Json<AccuseRequest>,
) -> Result<Json<Envelope<AccuseResponse>>, ApiError> {
    let character_id = parse_character_id(&request.character_id)?;
    if app.case.suspect(&character_id).is_none() {
        return Err(ApiError::NotFound);
    }
    let correct = app
        .store
        .accuse(&character_id)
        .ok_or_else(|| ApiError::Conflict("The investigation has not begun".to_string()))?;
    Ok(Json(Envelope {
        success: true,
        data: AccuseResponse {
            correct,
            case_solved: app.store.game_state().case_solved,
        },
    }))
}

async fn reset(State(app): State<Arc<App>>) -> Json<Envelope<()>> {
    app.use_cases.reset_game.execute();
    Json(Envelope {
        success: true,
        data: (),
    })
}

// =============================================================================
// Errors
// =============================================================================

fn parse_character_id(raw: &str) -> Result<CharacterId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("not a valid character id: {raw:?}")))
}

#[derive(Debug)]
pub enum ApiError {
    NotFound,
    BadRequest(String),
    /// Cooldown active; carries the user-facing message and remaining seconds.
    Locked(String, i64),
    Conflict(String),
    Upstream(String),
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;

        match self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Not found").into_response(),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            ApiError::Locked(msg, seconds_remaining) => (
                StatusCode::LOCKED,
                Json(serde_json::json!({
                    "success": false,
                    "error": msg,
                    "secondsRemaining": seconds_remaining,
                })),
            )
                .into_response(),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg).into_response(),
            ApiError::Upstream(msg) => (
                StatusCode::BAD_GATEWAY,
                Json(serde_json::json!({
                    "success": false,
                    "error": msg,
                })),
            )
                .into_response(),
        }
    }
}

impl From<SendMessageError> for ApiError {
    fn from(e: SendMessageError) -> Self {
        match e {
            SendMessageError::EmptyMessage | SendMessageError::MessageTooLong => {
                ApiError::BadRequest(e.to_string())
            }
            SendMessageError::UnknownCharacter(_) => ApiError::NotFound,
            SendMessageError::CharacterOffline {
                ref seconds_remaining,
                ..
            } => {
                let remaining = *seconds_remaining;
                ApiError::Locked(e.to_string(), remaining)
            }
            SendMessageError::ResponsePending(_) => ApiError::Conflict(e.to_string()),
            SendMessageError::Generator(_) => ApiError::Upstream(e.to_string()),
        }
    }
}

impl From<SelectCharacterError> for ApiError {
    fn from(e: SelectCharacterError) -> Self {
        match e {
            SelectCharacterError::UnknownCharacter(_) => ApiError::NotFound,
            SelectCharacterError::Unavailable { .. } => ApiError::Conflict(e.to_string()),
        }
    }
}
