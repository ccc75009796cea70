//! Request handlers: build events, submit them, render state views.
//!
//! Each POST form carries an id minted when the form was rendered, so a
//! retried submission reuses the same idempotency key and the store absorbs
//! the duplicate.

use axum::extract::State;
use axum::response::{Html, Redirect};
use axum::routing::get;
use axum::{Form, Router};
use chrono::Utc;
use minijinja::context;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use openspace_events::{
    DateRangeProjection, EventId, EventStore, Projection, SessionsProjection, SpaceEvent,
    SpaceNameProjection,
};

use crate::error::AppError;
use crate::state::AppState;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/create_space", get(create_space_form).post(create_space))
        .route("/set_dates", get(set_dates_form).post(set_dates))
        .route("/submit_topic", get(submit_topic_form).post(submit_topic))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index() -> Redirect {
    Redirect::to("/create_space")
}

#[derive(Debug, Deserialize)]
struct CreateSpaceForm {
    #[serde(rename = "spaceName")]
    space_name: String,
    id: String,
}

async fn create_space_form(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let view = SpaceNameProjection::new()
        .rebuild(state.store.as_ref())
        .await?;
    let html = state.render(
        "create_space",
        context! {
            space_name => view.space_name,
            id => EventId::generate().to_string(),
        },
    )?;
    Ok(Html(html))
}

async fn create_space(
    State(state): State<AppState>,
    Form(form): Form<CreateSpaceForm>,
) -> Result<Html<String>, AppError> {
    if form.space_name.trim().is_empty() {
        return Err(AppError::BadRequest("Space name is required".into()));
    }

    let event = SpaceEvent::space_named(EventId::new(form.id), form.space_name, Utc::now());
    state.store.append(event).await.map_err(|err| {
        tracing::error!(error = %err, "failed to persist naming event");
        AppError::Internal("Failed to write event to the file system".into())
    })?;

    let view = SpaceNameProjection::new()
        .rebuild(state.store.as_ref())
        .await?;
    let html = state.render("space_created", context! { space_name => view.space_name })?;
    Ok(Html(html))
}

#[derive(Debug, Deserialize)]
struct SetDatesForm {
    #[serde(rename = "startDate")]
    start_date: String,
    #[serde(rename = "endDate")]
    end_date: String,
    id: String,
}

async fn set_dates_form(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let view = SpaceNameProjection::new()
        .rebuild(state.store.as_ref())
        .await?;
    let html = state.render(
        "set_dates",
        context! {
            event_name => view.space_name,
            id => EventId::generate().to_string(),
        },
    )?;
    Ok(Html(html))
}

async fn set_dates(
    State(state): State<AppState>,
    Form(form): Form<SetDatesForm>,
) -> Result<Html<String>, AppError> {
    let event = SpaceEvent::date_range_set(
        EventId::new(form.id),
        form.start_date,
        form.end_date,
        Utc::now(),
    );
    state.store.append(event).await.map_err(|err| {
        tracing::error!(error = %err, "failed to persist date range event");
        AppError::Internal("Failed to write date range event to the file system".into())
    })?;

    let view = DateRangeProjection::new()
        .rebuild(state.store.as_ref())
        .await?;
    let html = state.render(
        "dates_confirmed",
        context! {
            start_date => view.start_date,
            end_date => view.end_date,
        },
    )?;
    Ok(Html(html))
}

#[derive(Debug, Deserialize)]
struct SubmitTopicForm {
    name: String,
    category: String,
    topic: String,
    id: String,
}

async fn submit_topic_form(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let view = SpaceNameProjection::new()
        .rebuild(state.store.as_ref())
        .await?;
    let html = state.render(
        "submit_topic",
        context! {
            event_name => view.space_name,
            id => EventId::generate().to_string(),
        },
    )?;
    Ok(Html(html))
}

async fn submit_topic(
    State(state): State<AppState>,
    Form(form): Form<SubmitTopicForm>,
) -> Result<Html<String>, AppError> {
    let event = SpaceEvent::topic_submitted(
        EventId::new(form.id),
        form.name,
        form.category,
        form.topic,
        Utc::now(),
    );
    state.store.append(event).await.map_err(|err| {
        tracing::error!(error = %err, "failed to persist topic event");
        AppError::Internal("Failed to write event to the file system".into())
    })?;

    let view = SessionsProjection::new()
        .rebuild(state.store.as_ref())
        .await?;
    let html = state.render("sessions", context! { sessions => view.sessions })?;
    Ok(Html(html))
}
