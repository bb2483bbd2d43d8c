use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::{Path as PathParam, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tower_http::services::ServeDir;
use tracing::warn;

use control::{DispatchError, Dispatcher};
use device::Transport;
use shared::command::{command_groups, Command};
use shared::protocol::{CommandOutcome, CommandsResponse, StatusResponse};

use crate::version;

#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    pub transport: Arc<dyn Transport>,
}

pub fn build_router(state: Arc<AppState>, www_dir: &Path) -> Router {
    Router::new()
        .route("/api/commands", get(list_commands))
        .route("/api/command/:name", get(run_command).post(run_command))
        .route("/api/status", get(status))
        // `/` and every other unmatched path serve the static UI
        .fallback_service(ServeDir::new(www_dir))
        .with_state(state)
}

async fn list_commands() -> Json<CommandsResponse> {
    Json(CommandsResponse {
        commands: Command::ALL.iter().map(|c| c.name().to_string()).collect(),
        groups: command_groups()
            .into_iter()
            .map(|(group, names)| {
                (
                    group.to_string(),
                    names.into_iter().map(str::to_string).collect(),
                )
            })
            .collect(),
    })
}

async fn run_command(
    State(state): State<Arc<AppState>>,
    PathParam(name): PathParam<String>,
) -> (StatusCode, Json<CommandOutcome>) {
    match state.dispatcher.dispatch_name(&name).await {
        Ok(()) => (StatusCode::OK, Json(CommandOutcome { success: true })),
        Err(error) => {
            warn!(command = %name, %error, "http command rejected");
            let status = match error {
                DispatchError::UnknownCommand(_) => StatusCode::BAD_REQUEST,
                DispatchError::Transport(_) => StatusCode::BAD_GATEWAY,
            };
            (status, Json(CommandOutcome { success: false }))
        }
    }
}

async fn status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let beamer_online = state.transport.probe().await;
    let power = state.dispatcher.power_state().await;
    Json(StatusResponse {
        beamer_online,
        git_hash: version::git_hash().to_string(),
        git_dirty: version::git_dirty().to_string(),
        last_power_command: power.last_power_command(),
    })
}
