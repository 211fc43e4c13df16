pub mod async_tasks;

use std::sync::Arc;

use anyhow::Result;
use breezybrief_api::{AirportSearch, ApiClient, ForecastClient, SuggestionFetcher};
use breezybrief_core::url::absolute_map_url;
use breezybrief_core::{AppConfig, ForecastRequest, ForecastResponse, FormPayload};
use chrono::{DateTime, Local};
use ratatui::layout::{Position, Rect};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::{debug, info, warn};

use crate::autocomplete::{FieldId, FieldSettings};
use crate::form::RouteForm;
use crate::theme::NordTheme;
use async_tasks::{AsyncResult, spawn_forecast};

/// Forecast page status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// A received forecast, ready for display.
#[derive(Debug, Clone)]
pub struct ForecastView {
    pub request: ForecastRequest,
    pub response: ForecastResponse,
    /// `map_url` resolved against the API base.
    pub map_url: Option<String>,
    pub received_at: DateTime<Local>,
}

/// Screen rectangles of one autocomplete field, as drawn last frame.
#[derive(Debug, Clone, Default)]
pub struct FieldHitArea {
    pub input: Rect,
    pub dropdown: Option<Rect>,
    /// One rectangle per visible suggestion row.
    pub rows: Vec<Rect>,
}

impl FieldHitArea {
    /// The field container: the input plus its open dropdown.
    pub fn contains(&self, pos: Position) -> bool {
        self.input.contains(pos) || self.dropdown.is_some_and(|d| d.contains(pos))
    }

    pub fn row_at(&self, pos: Position) -> Option<usize> {
        self.rows.iter().position(|r| r.contains(pos))
    }
}

/// Clickable regions recorded by the renderer for mouse handling.
#[derive(Debug, Clone, Default)]
pub struct HitAreas {
    pub origin: FieldHitArea,
    pub destination: FieldHitArea,
    pub cruise: Rect,
    pub calm: Rect,
    pub submit: Rect,
    pub results: Rect,
}

impl HitAreas {
    pub fn field(&self, id: FieldId) -> &FieldHitArea {
        match id {
            FieldId::Origin => &self.origin,
            FieldId::Destination => &self.destination,
        }
    }

    pub fn field_mut(&mut self, id: FieldId) -> &mut FieldHitArea {
        match id {
            FieldId::Origin => &mut self.origin,
            FieldId::Destination => &mut self.destination,
        }
    }
}

/// Main application state.
pub struct App {
    pub config: AppConfig,
    pub form: RouteForm,
    pub status: PageStatus,
    /// Banner text for a failed forecast.
    pub error: Option<String>,
    pub forecast: Option<ForecastView>,
    pub status_message: String,
    pub should_quit: bool,
    pub theme: NordTheme,
    pub hit_areas: HitAreas,
    pub briefing_scroll: u16,
    /// Frames drawn while loading; drives the spinner.
    pub tick: usize,
    forecast_client: ForecastClient,
    tx: UnboundedSender<AsyncResult>,
    rx: UnboundedReceiver<AsyncResult>,
}

impl App {
    /// Build the app with real HTTP clients for the configured API.
    pub fn from_config(config: AppConfig) -> Result<Self> {
        let client = ApiClient::from_config(&config)?;
        let search = Arc::new(SuggestionFetcher::with_limit(
            client.clone(),
            config.api.search_limit,
        ));
        let forecast = ForecastClient::with_timeout(client, config.forecast_timeout());
        Ok(Self::new(config, search, forecast))
    }

    pub fn new(
        config: AppConfig,
        search: Arc<dyn AirportSearch>,
        forecast_client: ForecastClient,
    ) -> Self {
        let (tx, rx) = unbounded_channel();
        let form = RouteForm::new(
            search,
            tx.clone(),
            FieldSettings::from(&config),
            config.ui.default_calm,
        );

        Self {
            form,
            status: PageStatus::Idle,
            error: None,
            forecast: None,
            status_message: String::new(),
            should_quit: false,
            theme: NordTheme::default(),
            hit_areas: HitAreas::default(),
            briefing_scroll: 0,
            tick: 0,
            forecast_client,
            tx,
            rx,
            config,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status == PageStatus::Loading
    }

    /// Start a forecast for a validated form. Returns `false` when a forecast
    /// is already in flight and the submission was ignored.
    pub fn handle_submit(&mut self, payload: FormPayload) -> bool {
        if self.is_loading() {
            debug!("forecast already in flight, ignoring submit");
            return false;
        }

        let request = payload.into_request(self.config.ui.default_cruise_fl);
        info!(
            origin = %request.origin,
            destination = %request.destination,
            "submitting forecast"
        );

        self.error = None;
        self.forecast = None;
        self.briefing_scroll = 0;
        self.status = PageStatus::Loading;
        self.form.set_disabled(true);
        self.status_message = format!("Briefing {} → {}", request.origin, request.destination);

        spawn_forecast(self.tx.clone(), self.forecast_client.clone(), request);
        true
    }

    /// Apply every finished background task. Called once per loop iteration.
    pub fn drain_async(&mut self) {
        while let Ok(result) = self.rx.try_recv() {
            self.apply_async(result);
        }
    }

    pub fn apply_async(&mut self, result: AsyncResult) {
        match result {
            AsyncResult::Suggestions(outcome) => {
                if !self.form.apply_suggestions(outcome) {
                    debug!("dropped stale suggestions");
                }
            }
            AsyncResult::ForecastLoaded { request, result } => {
                self.form.set_disabled(false);
                match result {
                    Ok(response) => {
                        let map_url =
                            absolute_map_url(self.forecast_client.base_url(), &response.map_url);
                        self.status = PageStatus::Success;
                        self.status_message =
                            format!("Briefing ready: {} → {}", request.origin, request.destination);
                        self.forecast = Some(ForecastView {
                            request,
                            response,
                            map_url,
                            received_at: Local::now(),
                        });
                    }
                    Err(e) => {
                        warn!(error = %e, "forecast failed");
                        self.status = PageStatus::Error;
                        self.status_message.clear();
                        self.error = Some(e.to_string());
                    }
                }
            }
        }
    }

    pub fn map_url(&self) -> Option<&str> {
        self.forecast.as_ref().and_then(|f| f.map_url.as_deref())
    }

    /// Open the route map in the system browser.
    pub fn open_map(&mut self) {
        let Some(url) = self.map_url().map(str::to_string) else {
            self.status_message = "No map to open".to_string();
            return;
        };
        match open::that_detached(&url) {
            Ok(()) => self.status_message = format!("Opened {url}"),
            Err(e) => {
                warn!(error = %e, %url, "failed to open map");
                self.status_message = format!("Failed to open map: {e}");
            }
        }
    }

    pub fn scroll_briefing(&mut self, delta: i32) {
        let next = i32::from(self.briefing_scroll) + delta;
        self.briefing_scroll = next.clamp(0, i32::from(u16::MAX)) as u16;
    }

    pub fn on_tick(&mut self) {
        if self.is_loading() {
            self.tick = self.tick.wrapping_add(1);
        }
    }
}
