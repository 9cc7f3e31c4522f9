use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    Dataset, DatasetError, DatasetSource, Locale, Resolution, ResolvedView, ScheduleResolver,
    calendar,
    render::{HtmlRenderer, RenderOptions, Renderer, TownPalette},
};

#[derive(Clone)]
pub struct AppState {
    source: Arc<dyn DatasetSource + Send + Sync>,
    locale: Locale,
    palette: TownPalette,
    reference_date: Option<NaiveDate>,
}

impl AppState {
    pub fn new<S>(source: S, locale: Locale) -> Self
    where
        S: DatasetSource + Send + Sync + 'static,
    {
        Self {
            source: Arc::new(source),
            locale,
            palette: TownPalette::default(),
            reference_date: None,
        }
    }

    pub fn with_palette(mut self, palette: TownPalette) -> Self {
        self.palette = palette;
        self
    }

    /// Pins "today" instead of sampling the local date per request.
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    fn reference_date(&self) -> NaiveDate {
        self.reference_date.unwrap_or_else(calendar::today)
    }

    fn locale_for(&self, lang: Option<&str>) -> Locale {
        lang.and_then(|code| code.parse().ok())
            .unwrap_or(self.locale)
    }

    fn renderer(&self, locale: Locale) -> HtmlRenderer {
        HtmlRenderer::new(locale).with_palette(self.palette.clone())
    }

    async fn load_dataset(&self) -> Result<Dataset, ApiError> {
        let source = self.source.clone();
        let loaded = tokio::task::spawn_blocking(move || source.load())
            .await
            .map_err(|err| ApiError::internal(format!("dataset loader panicked: {err}")))?;
        loaded.map_err(ApiError::from)
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

#[derive(Debug)]
enum ApiError {
    NotFound(String),
    Invalid(String),
    Unavailable(String),
    Internal(String),
}

impl ApiError {
    fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    fn invalid(message: impl Into<String>) -> Self {
        ApiError::Invalid(message.into())
    }

    fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Invalid(_) => StatusCode::BAD_REQUEST,
            ApiError::Unavailable(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DatasetError> for ApiError {
    fn from(value: DatasetError) -> Self {
        tracing::error!(error = %value, "dataset unavailable");
        ApiError::Unavailable(value.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error, message) = match self {
            ApiError::NotFound(message) => ("not_found", message),
            ApiError::Invalid(message) => ("invalid_request", message),
            ApiError::Unavailable(message) => ("data_unavailable", message),
            ApiError::Internal(message) => ("internal_error", message),
        };
        (status, Json(ErrorBody { error, message })).into_response()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct HoursQuery {
    town: Option<String>,
    office: Option<String>,
    contacts: Option<String>,
    embed: Option<String>,
    lang: Option<String>,
}

impl HoursQuery {
    /// Both keys, exactly as sent. Only absent or empty keys are rejected.
    fn keys(&self) -> Option<(&str, &str)> {
        let town = self.town.as_deref().filter(|t| !t.is_empty())?;
        let office = self.office.as_deref().filter(|o| !o.is_empty())?;
        Some((town, office))
    }

    fn render_options(&self) -> RenderOptions {
        RenderOptions::default()
            .with_contacts(is_flag_set(self.contacts.as_deref()))
            .with_height_reporting(is_flag_set(self.embed.as_deref()))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct OverviewQuery {
    lang: Option<String>,
}

fn is_flag_set(value: Option<&str>) -> bool {
    value.is_some_and(|v| {
        matches!(
            v.trim().to_ascii_lowercase().as_str(),
            "" | "1" | "true" | "yes" | "on"
        )
    })
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/hours", get(office_hours_page))
        .route("/api/hours", get(office_hours_json))
        .route("/changes", get(changes_page))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "office-hours HTTP API listening");
    axum::serve(listener, app).await
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn office_hours_page(
    State(state): State<AppState>,
    Query(query): Query<HoursQuery>,
) -> Response {
    let locale = state.locale_for(query.lang.as_deref());
    let renderer = state.renderer(locale);
    let labels = locale.labels();

    let Some((town, office)) = query.keys() else {
        return (
            StatusCode::BAD_REQUEST,
            Html(renderer.render_error(labels.missing_parameters)),
        )
            .into_response();
    };

    let dataset = match state.load_dataset().await {
        Ok(dataset) => dataset,
        Err(err) => {
            return (err.status(), Html(renderer.render_error(labels.load_error))).into_response();
        }
    };

    let resolver = ScheduleResolver::new(locale);
    match resolver.resolve(&dataset, town, office, state.reference_date()) {
        Resolution::Found(view) => {
            Html(renderer.render_view(&view, &query.render_options())).into_response()
        }
        Resolution::NotFound { town, office } => (
            StatusCode::NOT_FOUND,
            Html(renderer.render_not_found(&town, &office)),
        )
            .into_response(),
    }
}

async fn office_hours_json(
    State(state): State<AppState>,
    Query(query): Query<HoursQuery>,
) -> Result<Json<ResolvedView>, ApiError> {
    let locale = state.locale_for(query.lang.as_deref());
    let (town, office) = query
        .keys()
        .ok_or_else(|| ApiError::invalid("both `town` and `office` query parameters are required"))?;
    let dataset = state.load_dataset().await?;
    match ScheduleResolver::new(locale).resolve(&dataset, town, office, state.reference_date()) {
        Resolution::Found(view) => Ok(Json(view)),
        Resolution::NotFound { town, office } => Err(ApiError::not_found(format!(
            "no office hours for {town} / {office}"
        ))),
    }
}

async fn changes_page(
    State(state): State<AppState>,
    Query(query): Query<OverviewQuery>,
) -> Response {
    let locale = state.locale_for(query.lang.as_deref());
    let renderer = state.renderer(locale);
    match state.load_dataset().await {
        Ok(dataset) => {
            let towns = ScheduleResolver::new(locale).overview(&dataset, state.reference_date());
            Html(renderer.render_overview(&towns)).into_response()
        }
        Err(err) => (
            err.status(),
            Html(renderer.render_error(locale.labels().load_error)),
        )
            .into_response(),
    }
}
