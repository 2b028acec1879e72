//! HTTP presentation layer.
//!
//! Serves the single form page and maps each button to an explicit POST
//! handler that runs one [`App`] action and re-renders the page with its
//! [`Outcome`]. Submitted values are echoed back so the form keeps its state.

use crate::app::{App, Outcome};
use crate::models::{FutureYear, Tone};
use crate::{Error, Result};
use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use minijinja::Environment;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

const INDEX_TEMPLATE: &str = include_str!("../data/templates/index.html");
const OUTCOME_TEMPLATE: &str = include_str!("../data/templates/outcome.html");

#[derive(Clone)]
pub struct AppState {
    app: Arc<App>,
    templates: Arc<Environment<'static>>,
}

impl AppState {
    pub fn new(app: App) -> Result<Self> {
        let mut env = Environment::new();
        env.add_template("index.html", INDEX_TEMPLATE)?;
        env.add_template("outcome.html", OUTCOME_TEMPLATE)?;

        Ok(Self {
            app: Arc::new(app),
            templates: Arc::new(env),
        })
    }

    fn render(
        &self,
        form: &MessageForm,
        action: Option<Action>,
        outcome: Option<&Outcome>,
    ) -> Result<Html<String>> {
        let view = PageView {
            message: &form.message,
            year: form.year,
            year_min: FutureYear::MIN,
            year_max: FutureYear::MAX,
            tone: form.tone.label(),
            tones: Tone::ALL.iter().map(|tone| tone.label()).collect(),
            action,
            outcome,
        };

        let html = self.templates.get_template("index.html")?.render(&view)?;
        Ok(Html(html))
    }
}

/// Fields posted by the form. Both buttons submit the same form.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageForm {
    #[serde(default)]
    pub message: String,
    pub year: u16,
    pub tone: Tone,
}

impl Default for MessageForm {
    fn default() -> Self {
        Self {
            message: String::new(),
            year: FutureYear::DEFAULT,
            tone: Tone::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
enum Action {
    Send,
    Visual,
}

#[derive(Serialize)]
struct PageView<'a> {
    message: &'a str,
    year: u16,
    year_min: u16,
    year_max: u16,
    tone: &'static str,
    tones: Vec<&'static str>,
    action: Option<Action>,
    outcome: Option<&'a Outcome>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/send", post(send_message))
        .route("/visual", post(generate_visual))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve `router` on `listener` until the process stops.
pub async fn serve(listener: TcpListener, router: Router) -> Result<()> {
    info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}

/// `GET /` — the empty form with default year and tone.
async fn index(State(state): State<AppState>) -> Result<Html<String>> {
    state.render(&MessageForm::default(), None, None)
}

/// `POST /send` — validate, ask the chat service, render the reply or banner.
async fn send_message(
    State(state): State<AppState>,
    Form(form): Form<MessageForm>,
) -> Result<Html<String>> {
    let outcome = state
        .app
        .send_message(&form.message, form.year, form.tone)
        .await;
    state.render(&form, Some(Action::Send), Some(&outcome))
}

/// `POST /visual` — generate the fixed futuristic image.
async fn generate_visual(
    State(state): State<AppState>,
    Form(form): Form<MessageForm>,
) -> Result<Html<String>> {
    let outcome = state.app.generate_visual().await;
    state.render(&form, Some(Action::Visual), Some(&outcome))
}

async fn healthz() -> &'static str {
    "ok"
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        error!(error = %self, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
    }
}
