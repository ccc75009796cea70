//! Shared application state: the event store and the template engine.

use std::sync::Arc;

use minijinja::Environment;

use openspace_events::EventStore;

use crate::error::AppError;

/// State shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    /// The append-only event store; the single source of truth.
    pub store: Arc<dyn EventStore>,
    templates: Arc<Environment<'static>>,
}

impl AppState {
    /// Build the state, loading every embedded template.
    pub fn new(store: Arc<dyn EventStore>) -> Result<Self, AppError> {
        let mut env = Environment::new();
        env.add_template("create_space", include_str!("../templates/create_space.html"))?;
        env.add_template(
            "space_created",
            include_str!("../templates/space_created.html"),
        )?;
        env.add_template("set_dates", include_str!("../templates/set_dates.html"))?;
        env.add_template(
            "dates_confirmed",
            include_str!("../templates/dates_confirmed.html"),
        )?;
        env.add_template("submit_topic", include_str!("../templates/submit_topic.html"))?;
        env.add_template("sessions", include_str!("../templates/sessions.html"))?;

        Ok(Self {
            store,
            templates: Arc::new(env),
        })
    }

    /// Render a named template with the given context.
    pub fn render(&self, name: &str, ctx: minijinja::Value) -> Result<String, AppError> {
        Ok(self.templates.get_template(name)?.render(ctx)?)
    }
}
