pub mod errors;
pub mod models;
pub mod providers;
pub mod services;

use models::{
    chart::{ChartData, ChartStyle},
    quote::HeadlineQuote,
    range::TimeRange,
    rate::RawRatePoint,
    series::{LabeledSeries, TableRow},
    settings::FeedSettings,
    window::DateWindow,
};
use providers::registry::RateFeedRegistry;
use providers::traits::RateFeed;
use services::clock::{Clock, SystemClock};
use services::range_controller::{FetchTicket, RangeController, SelectionOutcome, ViewState};

use errors::CoreError;

/// Main entry point for the FX rate chart core library.
/// Holds the selection state and everything needed to refresh it.
#[must_use]
pub struct FxRateChart {
    settings: FeedSettings,
    controller: RangeController,
    style: ChartStyle,
}

impl std::fmt::Debug for FxRateChart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.controller.state();
        f.debug_struct("FxRateChart")
            .field("pair", &self.settings.currency_pair)
            .field("selected", &state.selected)
            .field("generation", &state.generation)
            .field("loading", &state.loading)
            .field("labels", &self.series().len())
            .finish()
    }
}

impl FxRateChart {
    /// Create a chart backed by the default feed registry for `settings`.
    pub fn new(settings: FeedSettings) -> Result<Self, CoreError> {
        let registry = RateFeedRegistry::new_with_defaults(&settings);
        Self::with_feed(settings, Box::new(registry), Box::new(SystemClock))
    }

    /// Create a chart with an explicit feed and clock (tests, custom hosts).
    pub fn with_feed(
        settings: FeedSettings,
        feed: Box<dyn RateFeed>,
        clock: Box<dyn Clock>,
    ) -> Result<Self, CoreError> {
        settings.validate()?;
        let pair = settings.pair()?;
        let controller = RangeController::new(
            feed,
            clock,
            pair,
            settings.default_range,
            settings.reduction,
        );
        Ok(Self {
            settings,
            controller,
            style: ChartStyle::default(),
        })
    }

    /// Replace the presentation options handed to the chart renderer.
    pub fn set_style(&mut self, style: ChartStyle) {
        self.style = style;
    }

    // ── Selection ───────────────────────────────────────────────────

    /// Select a range, fetch its window and publish the result if it is
    /// still current when the fetch completes.
    pub async fn select_range(&mut self, range: TimeRange) -> SelectionOutcome {
        self.controller.select_range(range).await
    }

    /// Load the configured default range.
    pub async fn load_default(&mut self) -> SelectionOutcome {
        let range = self.settings.default_range;
        self.select_range(range).await
    }

    /// First half of a selection: update state and get the request to fetch.
    pub fn begin_selection(&mut self, range: TimeRange) -> FetchTicket {
        self.controller.begin_selection(range)
    }

    /// Fetch the raw points for an issued ticket.
    pub async fn fetch(&self, ticket: &FetchTicket) -> Result<Vec<RawRatePoint>, CoreError> {
        self.controller.fetch(ticket).await
    }

    /// Second half of a selection: apply the fetch result for `ticket`.
    pub fn apply_response(
        &mut self,
        ticket: &FetchTicket,
        result: Result<Vec<RawRatePoint>, CoreError>,
    ) -> SelectionOutcome {
        self.controller.apply_response(ticket, result)
    }

    // ── Views ───────────────────────────────────────────────────────

    #[must_use]
    pub fn state(&self) -> &ViewState {
        self.controller.state()
    }

    #[must_use]
    pub fn selected_range(&self) -> TimeRange {
        self.state().selected
    }

    /// Window of the most recent selection, if any was made.
    #[must_use]
    pub fn window(&self) -> Option<DateWindow> {
        self.state().window
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state().loading
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.state().last_error.as_deref()
    }

    /// Published series, empty before the first successful fetch.
    #[must_use]
    pub fn series(&self) -> LabeledSeries {
        self.state()
            .published
            .as_ref()
            .map(|v| v.series.clone())
            .unwrap_or_default()
    }

    /// Published table rows, empty before the first successful fetch.
    #[must_use]
    pub fn table_rows(&self) -> &[TableRow] {
        self.state()
            .published
            .as_ref()
            .map(|v| v.rows.as_slice())
            .unwrap_or(&[])
    }

    #[must_use]
    pub fn headline(&self) -> Option<&HeadlineQuote> {
        self.state().published.as_ref()?.headline.as_ref()
    }

    /// Dataset for the chart renderer: published series plus static style.
    #[must_use]
    pub fn chart_data(&self) -> ChartData {
        ChartData::from_series(
            self.controller.pair().identifier(),
            &self.series(),
            self.style.clone(),
        )
    }

    #[must_use]
    pub fn settings(&self) -> &FeedSettings {
        &self.settings
    }
}
