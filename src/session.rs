//! One page session: the canonical donor list for the current load plus the
//! view state derived from it. Every external control arrives as a typed
//! `Event` and is routed by `dispatch`; time is passed in by the caller so
//! the debounce and count-up stay deterministic.

use crate::aggregate::{CountUp, Totals};
use crate::config::{Config, SortMode};
use crate::debounce::Debouncer;
use crate::model::Donor;
use crate::reveal::{self, LoadStatus, Materializer, Pager, ProximityProbe, RevealController};
use crate::source::DonorSource;
use crate::view;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Pending,
    Ready,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Raw search box text; debounced.
    SearchInput(String),
    ClearSearch,
    /// Result-count selection; 0 means "unparseable".
    BatchSize(usize),
    SortMode(SortMode),
    LoadMore,
    /// Sentinel distance below the viewport bottom, in px.
    Proximity(f64),
    NextPage,
    PrevPage,
    /// Page scroll offset, in px.
    Scroll(f64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Display {
    Loading,
    Failed(String),
    NoMatches,
    Results,
}

pub struct Session<M: Materializer> {
    config: Config,
    state: LoadState,
    donors: Vec<Donor>,
    totals: Totals,
    view: Vec<Donor>,
    query: String,
    sort_mode: SortMode,
    reveal: RevealController,
    pager: Pager,
    probe: ProximityProbe,
    search: Debouncer<String>,
    loaded_at: Option<Instant>,
    scroll_top_visible: bool,
    out: M,
}

impl<M: Materializer> Session<M> {
    pub fn new(config: Config, out: M) -> Self {
        let reveal = RevealController::new(config.effective_batch_size(0));
        let probe = ProximityProbe::new(config.scroll_margin_px);
        let search = Debouncer::new(Duration::from_millis(config.search_debounce_ms));
        Self {
            sort_mode: config.sort_mode,
            config,
            state: LoadState::Pending,
            donors: Vec::new(),
            totals: Totals::default(),
            view: Vec::new(),
            query: String::new(),
            reveal,
            pager: Pager::default(),
            probe,
            search,
            loaded_at: None,
            scroll_top_visible: false,
            out,
        }
    }

    /// Replaces all load-derived state. A failed fetch or unparseable
    /// payload leaves the session in the terminal `Failed` state with no
    /// donors and zero totals.
    pub fn load(&mut self, source: &dyn DonorSource, now: Instant) -> &LoadState {
        self.state = LoadState::Pending;
        let result = source
            .fetch()
            .and_then(|text| crate::build_board(&text, &self.config));

        match result {
            Ok(board) => {
                info!(donors = board.totals.count, total = board.totals.total, "donor data loaded");
                self.donors = board.donors;
                self.totals = board.totals;
                self.loaded_at = Some(now);
                self.state = LoadState::Ready;
                self.refresh_view();
            }
            Err(err) => {
                error!(error = %err, "donor data unavailable");
                self.donors.clear();
                self.view.clear();
                self.totals = Totals::default();
                self.loaded_at = None;
                self.search.cancel();
                self.pager.reset();
                self.reveal.reset_and_render(&[], &mut self.out);
                self.state = LoadState::Failed(err.to_string());
            }
        }
        &self.state
    }

    pub fn dispatch(&mut self, event: Event, now: Instant) {
        match event {
            Event::SearchInput(text) => self.search.push(now, text),
            Event::ClearSearch => {
                self.search.cancel();
                self.set_query(String::new());
            }
            Event::BatchSize(n) => {
                let size = self.config.effective_batch_size(n);
                self.reveal.set_batch_size(size);
                self.pager.reset();
                self.reveal.reset_and_render(&self.view, &mut self.out);
            }
            Event::SortMode(mode) => {
                self.sort_mode = mode;
                self.refresh_view();
            }
            Event::LoadMore => {
                self.append_next_batch();
            }
            Event::Proximity(distance) => {
                if self.probe.in_range(distance) {
                    self.append_next_batch();
                }
            }
            Event::NextPage => {
                self.pager.next(self.view.len(), self.reveal.batch_size());
            }
            Event::PrevPage => {
                self.pager.prev();
            }
            Event::Scroll(offset) => {
                self.scroll_top_visible = reveal::scroll_top_visible(offset);
            }
        }
    }

    /// Runs any debounced search whose quiet period has elapsed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.search.poll(now) {
            Some(text) => {
                self.set_query(text);
                true
            }
            None => false,
        }
    }

    pub fn append_next_batch(&mut self) -> usize {
        self.reveal.append_next_batch(&self.view, &mut self.out)
    }

    fn set_query(&mut self, text: String) {
        self.query = text.trim().to_string();
        debug!(query = %self.query, "search applied");
        self.refresh_view();
    }

    fn refresh_view(&mut self) {
        self.view = view::build_view(&self.donors, &self.query, self.sort_mode);
        self.pager.reset();
        self.reveal.reset_and_render(&self.view, &mut self.out);
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn donors(&self) -> &[Donor] {
        &self.donors
    }

    pub fn view(&self) -> &[Donor] {
        &self.view
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn sort_mode(&self) -> SortMode {
        self.sort_mode
    }

    pub fn batch_size(&self) -> usize {
        self.reveal.batch_size()
    }

    pub fn visible_count(&self) -> usize {
        self.reveal.visible_count()
    }

    pub fn totals(&self) -> Totals {
        self.totals
    }

    pub fn status(&self) -> LoadStatus {
        self.reveal.status(self.view.len())
    }

    pub fn podium(&self) -> Vec<&Donor> {
        view::podium(&self.donors)
    }

    pub fn page(&self) -> usize {
        self.pager.page()
    }

    pub fn page_items(&self) -> &[Donor] {
        &self.view[self.pager.range(self.view.len(), self.reveal.batch_size())]
    }

    pub fn search_pending(&self) -> bool {
        self.search.is_pending()
    }

    pub fn scroll_top_visible(&self) -> bool {
        self.scroll_top_visible
    }

    pub fn count_up(&self) -> CountUp {
        CountUp::new(self.totals.total, Duration::from_millis(self.config.count_up_ms))
    }

    /// The animated total as it should read at `now`.
    pub fn displayed_total(&self, now: Instant) -> u64 {
        match self.loaded_at {
            Some(start) => self.count_up().value_at(now.saturating_duration_since(start)),
            None => 0,
        }
    }

    pub fn display(&self) -> Display {
        match &self.state {
            LoadState::Pending => Display::Loading,
            LoadState::Failed(msg) => Display::Failed(msg.clone()),
            LoadState::Ready if self.view.is_empty() => Display::NoMatches,
            LoadState::Ready => Display::Results,
        }
    }

    pub fn output(&self) -> &M {
        &self.out
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
