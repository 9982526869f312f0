use crate::activity::SignInRecord;
use crate::auth::SignInRequest;
use crate::errors::AppError;
use crate::models::{
    BadgeRequest, EnabledRequest, SelectRequest, SelectionResponse, SessionResponse,
    SurfaceSnapshot, ViewStatus,
};
use crate::registry::ViewId;
use crate::shell::AppShell;
use crate::state::AppState;
use crate::storage::persist_preferences;
use crate::surface::{APP_TITLE, AUTH_SECTION, TAB_NAVIGATION, USER_NAME};
use crate::ui::render_index;
use axum::{
    Form, Json,
    extract::{Path, State},
    response::{Html, Redirect},
};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let shell = state.shell.lock().await;
    Html(render_index(shell.tabs().surface()))
}

pub async fn select_tab(
    State(state): State<AppState>,
    Path(view): Path<ViewId>,
) -> Result<Redirect, AppError> {
    apply_selection(&state, view).await?;
    Ok(Redirect::to("/"))
}

pub async fn login(
    State(state): State<AppState>,
    Form(request): Form<SignInRequest>,
) -> Result<Redirect, AppError> {
    apply_sign_in(&state, request).await?;
    Ok(Redirect::to("/"))
}

pub async fn logout(State(state): State<AppState>) -> Result<Redirect, AppError> {
    state.shell.lock().await.sign_out()?;
    Ok(Redirect::to("/"))
}

pub async fn get_views(State(state): State<AppState>) -> Json<Vec<ViewStatus>> {
    let shell = state.shell.lock().await;
    Json(shell.view_statuses())
}

pub async fn get_selection(State(state): State<AppState>) -> Json<SelectionResponse> {
    let shell = state.shell.lock().await;
    Json(selection_of(&shell))
}

pub async fn select(
    State(state): State<AppState>,
    Json(payload): Json<SelectRequest>,
) -> Result<Json<SelectionResponse>, AppError> {
    let response = apply_selection(&state, payload.view).await?;
    Ok(Json(response))
}

pub async fn set_enabled(
    State(state): State<AppState>,
    Path(view): Path<ViewId>,
    Json(payload): Json<EnabledRequest>,
) -> Json<Vec<ViewStatus>> {
    let mut shell = state.shell.lock().await;
    shell.set_enabled(view, payload.enabled);
    Json(shell.view_statuses())
}

pub async fn set_badge(
    State(state): State<AppState>,
    Path(view): Path<ViewId>,
    Json(payload): Json<BadgeRequest>,
) -> Json<Vec<ViewStatus>> {
    let mut shell = state.shell.lock().await;
    shell.set_badge(view, payload.label.as_deref());
    Json(shell.view_statuses())
}

pub async fn get_session(State(state): State<AppState>) -> Json<SessionResponse> {
    let shell = state.shell.lock().await;
    Json(session_of(&shell))
}

pub async fn sign_in(
    State(state): State<AppState>,
    Json(request): Json<SignInRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let response = apply_sign_in(&state, request).await?;
    Ok(Json(response))
}

pub async fn sign_out(State(state): State<AppState>) -> Result<Json<SessionResponse>, AppError> {
    let mut shell = state.shell.lock().await;
    shell.sign_out()?;
    Ok(Json(session_of(&shell)))
}

pub async fn get_history(State(state): State<AppState>) -> Json<Vec<SignInRecord>> {
    Json(state.activity.records())
}

pub async fn get_surface(State(state): State<AppState>) -> Json<SurfaceSnapshot> {
    let shell = state.shell.lock().await;
    let surface = shell.tabs().surface();
    let text_of = |id: &str| {
        surface
            .get(id)
            .map(|element| element.text.clone())
            .unwrap_or_default()
    };

    Json(SurfaceSnapshot {
        login_visible: surface.is_visible(AUTH_SECTION),
        shell_visible: surface.is_visible(TAB_NAVIGATION),
        user_name: text_of(USER_NAME),
        title: text_of(APP_TITLE),
        visible_views: surface.visible_containers(),
    })
}

async fn apply_selection(state: &AppState, view: ViewId) -> Result<SelectionResponse, AppError> {
    let mut shell = state.shell.lock().await;
    shell.switch_to(view);

    persist_preferences(&state.data_path, shell.tabs().store()).await?;

    Ok(selection_of(&shell))
}

// Sign-in restores a view, which rewrites the stored selection.
async fn apply_sign_in(
    state: &AppState,
    request: SignInRequest,
) -> Result<SessionResponse, AppError> {
    let mut shell = state.shell.lock().await;
    shell.sign_in(request)?;

    persist_preferences(&state.data_path, shell.tabs().store()).await?;

    Ok(session_of(&shell))
}

fn selection_of(shell: &AppShell) -> SelectionResponse {
    let view = shell.tabs().current();
    let registry = shell.tabs().registry();
    SelectionResponse {
        view,
        title: view
            .filter(|view| registry.contains(*view))
            .map(|view| registry.describe(view).display_title()),
    }
}

fn session_of(shell: &AppShell) -> SessionResponse {
    SessionResponse {
        signed_in: shell.auth().is_signed_in(),
        session: shell.auth().session().cloned(),
    }
}
