use serde::Serialize;
use tracing::{debug, info, warn};

use crate::errors::CoreError;
use crate::models::pair::CurrencyPair;
use crate::models::quote::HeadlineQuote;
use crate::models::range::TimeRange;
use crate::models::rate::RawRatePoint;
use crate::models::series::{table_rows, BucketReduction, LabeledSeries, TableRow};
use crate::models::window::DateWindow;
use crate::providers::traits::{RateFeed, RateFeedRequest};
use super::bucketizer::bucketize_with;
use super::clock::Clock;
use super::date_window::compute_window;

/// Everything the views render for one successful fetch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublishedView {
    pub range: TimeRange,
    pub window: DateWindow,
    pub series: LabeledSeries,
    pub rows: Vec<TableRow>,
    pub headline: Option<HeadlineQuote>,
}

impl PublishedView {
    /// Derive series, table and headline from ordered points.
    pub fn build(
        range: TimeRange,
        window: DateWindow,
        points: &[RawRatePoint],
        reduction: BucketReduction,
    ) -> Self {
        Self {
            range,
            window,
            series: bucketize_with(points, range, reduction),
            rows: table_rows(points),
            headline: HeadlineQuote::from_points(points),
        }
    }
}

/// The whole view state as one value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewState {
    /// Currently selected range.
    pub selected: TimeRange,
    /// Generation of the most recently issued request (0 = none yet).
    pub generation: u64,
    /// Window of the most recently issued request.
    pub window: Option<DateWindow>,
    /// A request for `generation` is in flight.
    pub loading: bool,
    /// Last good data. Survives failed fetches.
    pub published: Option<PublishedView>,
    /// Message of the last failed fetch for the current generation.
    pub last_error: Option<String>,
}

impl ViewState {
    pub fn new(selected: TimeRange) -> Self {
        Self {
            selected,
            generation: 0,
            window: None,
            loading: false,
            published: None,
            last_error: None,
        }
    }

    /// Whether a response tagged with `generation` may still update the view.
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }
}

#[derive(Debug, Clone)]
pub enum ViewEvent {
    RangeSelected { range: TimeRange, window: DateWindow },
    FetchSucceeded { generation: u64, view: PublishedView },
    FetchFailed { generation: u64, message: String },
}

/// Pure state transition. Responses for a superseded generation leave
/// the state untouched.
pub fn reduce(state: ViewState, event: ViewEvent) -> ViewState {
    match event {
        ViewEvent::RangeSelected { range, window } => ViewState {
            selected: range,
            generation: state.generation + 1,
            window: Some(window),
            loading: true,
            ..state
        },
        ViewEvent::FetchSucceeded { generation, view } if state.is_current(generation) => {
            ViewState {
                loading: false,
                published: Some(view),
                last_error: None,
                ..state
            }
        }
        ViewEvent::FetchFailed { generation, message } if state.is_current(generation) => {
            ViewState {
                loading: false,
                last_error: Some(message),
                ..state
            }
        }
        ViewEvent::FetchSucceeded { .. } | ViewEvent::FetchFailed { .. } => state,
    }
}

/// A request issued by [`RangeController::begin_selection`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub range: TimeRange,
    pub request: RateFeedRequest,
}

/// What happened to a fetch response.
#[derive(Debug)]
pub enum SelectionOutcome {
    /// The response was current and is now the published view.
    Published,
    /// A newer selection superseded this request; the response was dropped.
    Stale,
    /// The fetch failed; the previously published view is unchanged.
    Failed(CoreError),
}

impl SelectionOutcome {
    pub fn is_published(&self) -> bool {
        matches!(self, SelectionOutcome::Published)
    }

    pub fn is_stale(&self) -> bool {
        matches!(self, SelectionOutcome::Stale)
    }
}

/// Re-sort points ascending by timestamp if a feed returned them out of
/// order. Returns `true` when a sort was needed.
pub fn ensure_sorted(points: &mut [RawRatePoint]) -> bool {
    let sorted = points.windows(2).all(|w| w[0].timestamp <= w[1].timestamp);
    if !sorted {
        points.sort_by_key(|p| p.timestamp);
    }
    !sorted
}

/// Owns the current selection and ties window computation, fetching and
/// bucketing together.
///
/// Every selection bumps a generation number. Only the response for the
/// latest generation may replace the published view; older ones are
/// dropped. In-flight requests are not cancelled.
pub struct RangeController {
    feed: Box<dyn RateFeed>,
    clock: Box<dyn Clock>,
    pair: CurrencyPair,
    reduction: BucketReduction,
    state: ViewState,
}

impl RangeController {
    pub fn new(
        feed: Box<dyn RateFeed>,
        clock: Box<dyn Clock>,
        pair: CurrencyPair,
        initial: TimeRange,
        reduction: BucketReduction,
    ) -> Self {
        Self {
            feed,
            clock,
            pair,
            reduction,
            state: ViewState::new(initial),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn pair(&self) -> &CurrencyPair {
        &self.pair
    }

    pub fn reduction(&self) -> BucketReduction {
        self.reduction
    }

    /// Select `range`: compute its window from today and issue a new
    /// generation. The caller fetches with the returned ticket.
    pub fn begin_selection(&mut self, range: TimeRange) -> FetchTicket {
        let window = compute_window(range, self.clock.today());
        let state = std::mem::replace(&mut self.state, ViewState::new(range));
        self.state = reduce(state, ViewEvent::RangeSelected { range, window });

        let generation = self.state.generation;
        debug!(
            %range,
            generation,
            from = %window.from(),
            to = %window.to(),
            "range selected"
        );

        FetchTicket {
            generation,
            range,
            request: RateFeedRequest::new(self.pair.clone(), window),
        }
    }

    /// Ask the feed for the ticket's window. Does not touch the state.
    pub async fn fetch(&self, ticket: &FetchTicket) -> Result<Vec<RawRatePoint>, CoreError> {
        self.feed.fetch_rates(&ticket.request).await
    }

    /// Apply a fetch result for `ticket`.
    ///
    /// Stale results are dropped without bucketing. Failures are logged and
    /// keep the last published view.
    pub fn apply_response(
        &mut self,
        ticket: &FetchTicket,
        result: Result<Vec<RawRatePoint>, CoreError>,
    ) -> SelectionOutcome {
        if !self.state.is_current(ticket.generation) {
            debug!(
                generation = ticket.generation,
                current = self.state.generation,
                range = %ticket.range,
                "discarding stale response"
            );
            return SelectionOutcome::Stale;
        }

        let state = std::mem::replace(&mut self.state, ViewState::new(ticket.range));

        match result {
            Ok(mut points) => {
                if ensure_sorted(&mut points) {
                    warn!(
                        feed = self.feed.name(),
                        generation = ticket.generation,
                        "feed returned points out of order, re-sorted"
                    );
                }

                let view = PublishedView::build(
                    ticket.range,
                    ticket.request.window,
                    &points,
                    self.reduction,
                );
                info!(
                    range = %ticket.range,
                    generation = ticket.generation,
                    points = points.len(),
                    labels = view.series.len(),
                    "publishing series"
                );

                self.state = reduce(
                    state,
                    ViewEvent::FetchSucceeded {
                        generation: ticket.generation,
                        view,
                    },
                );
                SelectionOutcome::Published
            }
            Err(e) => {
                warn!(
                    feed = self.feed.name(),
                    range = %ticket.range,
                    generation = ticket.generation,
                    error = %e,
                    "rate fetch failed, keeping last published series"
                );

                self.state = reduce(
                    state,
                    ViewEvent::FetchFailed {
                        generation: ticket.generation,
                        message: e.to_string(),
                    },
                );
                SelectionOutcome::Failed(e)
            }
        }
    }

    /// Select, fetch and apply in one step.
    pub async fn select_range(&mut self, range: TimeRange) -> SelectionOutcome {
        let ticket = self.begin_selection(range);
        let result = self.fetch(&ticket).await;
        self.apply_response(&ticket, result)
    }
}
