//! Movies screen
//!
//! Owns the catalog list and everything that mutates it. The screen issues
//! fetches through the injected `CatalogService`; each fetch runs on its own
//! tokio task and reports back over an mpsc channel. The event loop feeds
//! those outcomes into `apply_outcome` on the UI task, so the list has a
//! single writer.
//!
//! ```text
//! appear() ───────────────┐
//! search_text_changed() ──┼─► issue() ──► tokio::spawn(service future)
//!                         │                       │
//!                         │            FetchOutcome via mpsc
//!                         │                       ▼
//!                         └──────────── apply_outcome() ─► reload_data()
//! ```

use crate::catalog::{
    CatalogEntry, CatalogService, FetchError, FetchResult, PosterLoader, SearchHit,
};
use crate::config::ResponseOrdering;
use crate::theme::Theme;
use crate::tui::components::movie_cell::{MovieCell, CELL_HEIGHT};
use crate::tui::components::scrollbar::{render_scrollbar, ScrollbarStyle};
use crate::tui::components::search_bar::SearchBar;
use crate::tui::components::title_bar;
use crate::tui::scroll::ScrollState;
use crate::tui::traits::{
    split_slots, Component, ComponentId, Handled, Interactive, RenderContext, ViewCode,
};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Rect},
    style::Style,
    widgets::{Block, Borders},
    Frame,
};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Which endpoint the list currently reflects
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryMode {
    Unfiltered,
    Filtered(String),
}

/// Monotonic id stamped on every fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestId(u64);

/// Raw result of one fetch
#[derive(Debug)]
pub enum FetchPayload {
    List(FetchResult<Vec<CatalogEntry>>),
    Search(FetchResult<Vec<SearchHit>>),
}

/// Message sent from a fetch task back to the UI task
#[derive(Debug)]
pub struct FetchOutcome {
    pub request: RequestId,
    pub payload: FetchPayload,
}

impl FetchOutcome {
    pub fn error(&self) -> Option<&FetchError> {
        match &self.payload {
            FetchPayload::List(Err(e)) | FetchPayload::Search(Err(e)) => Some(e),
            _ => None,
        }
    }
}

pub type OutcomeSender = mpsc::UnboundedSender<FetchOutcome>;
pub type OutcomeReceiver = mpsc::UnboundedReceiver<FetchOutcome>;

/// Screen regions, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScreenSlot {
    Title,
    Search,
    List,
}

/// The list screen
pub struct MoviesScreen {
    service: Arc<dyn CatalogService>,
    posters: Arc<dyn PosterLoader>,
    outcomes: OutcomeSender,
    ordering: ResponseOrdering,
    theme: Theme,

    /// `None` until the first fetch lands, and again after any failure
    movies: Option<Vec<CatalogEntry>>,
    mode: QueryMode,
    search: SearchBar,

    next_request: u64,
    latest_issued: Option<RequestId>,
    in_flight: usize,
    reload_generation: u64,

    selected: usize,
    scroll: ScrollState,

    slots: Vec<ScreenSlot>,
    constraints: Vec<Constraint>,
    title: String,
    list_border: Style,
}

impl MoviesScreen {
    pub fn new(
        service: Arc<dyn CatalogService>,
        posters: Arc<dyn PosterLoader>,
        outcomes: OutcomeSender,
        ordering: ResponseOrdering,
        theme: Theme,
    ) -> Self {
        let mut screen = Self {
            service,
            posters,
            outcomes,
            ordering,
            theme,
            movies: None,
            mode: QueryMode::Unfiltered,
            search: SearchBar::new("Search"),
            next_request: 0,
            latest_issued: None,
            in_flight: 0,
            reload_generation: 0,
            selected: 0,
            scroll: ScrollState::manual(),
            slots: Vec::new(),
            constraints: Vec::new(),
            title: String::new(),
            list_border: Style::default(),
        };
        screen.setup_view();
        screen
    }

    // ─────────────────────────────────────────────────────────────
    // Query mode transitions
    // ─────────────────────────────────────────────────────────────

    /// Screen became visible: load the default listing
    pub fn appear(&mut self) {
        self.mode = QueryMode::Unfiltered;
        self.issue();
    }

    /// Search text changed: search for it, or go back to the default listing
    ///
    /// Every change issues a fresh request. Nothing is cached or debounced.
    pub fn search_text_changed(&mut self, text: &str) {
        self.mode = if text.is_empty() {
            QueryMode::Unfiltered
        } else {
            QueryMode::Filtered(text.to_string())
        };
        self.issue();
    }

    fn issue(&mut self) {
        self.next_request += 1;
        let request = RequestId(self.next_request);
        self.latest_issued = Some(request);
        self.in_flight += 1;

        let tx = self.outcomes.clone();
        match &self.mode {
            QueryMode::Unfiltered => {
                tracing::debug!("Fetching catalog listing (request {})", request.0);
                let fetch = self.service.fetch_list();
                tokio::spawn(async move {
                    let payload = FetchPayload::List(fetch.await);
                    let _ = tx.send(FetchOutcome { request, payload });
                });
            }
            QueryMode::Filtered(term) => {
                tracing::debug!("Searching {:?} (request {})", term, request.0);
                let fetch = self.service.fetch_results(term);
                tokio::spawn(async move {
                    let payload = FetchPayload::Search(fetch.await);
                    let _ = tx.send(FetchOutcome { request, payload });
                });
            }
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Outcomes
    // ─────────────────────────────────────────────────────────────

    /// Apply a finished fetch. Returns false if it was dropped as stale.
    pub fn apply_outcome(&mut self, outcome: FetchOutcome) -> bool {
        self.in_flight = self.in_flight.saturating_sub(1);

        if self.ordering == ResponseOrdering::LatestRequest
            && Some(outcome.request) < self.latest_issued
        {
            tracing::debug!(
                "Dropping stale response for request {} (latest is {:?})",
                outcome.request.0,
                self.latest_issued.map(|r| r.0)
            );
            return false;
        }

        let movies = match outcome.payload {
            FetchPayload::List(Ok(entries)) => Some(entries),
            FetchPayload::Search(Ok(hits)) => {
                Some(hits.into_iter().filter_map(|hit| hit.show).collect())
            }
            FetchPayload::List(Err(e)) | FetchPayload::Search(Err(e)) => {
                tracing::warn!("Fetch failed (request {}): {}", outcome.request.0, e);
                None
            }
        };

        if let Some(entries) = &movies {
            tracing::info!("Loaded {} entries", entries.len());
        }

        self.set_movies(movies);
        true
    }

    /// Replace the whole list; every replacement is a full reload
    fn set_movies(&mut self, movies: Option<Vec<CatalogEntry>>) {
        self.movies = movies;
        self.reload_data();
    }

    fn reload_data(&mut self) {
        self.reload_generation += 1;
        self.selected = 0;
        self.scroll.scroll_to_top();
        let viewport = self.scroll.viewport();
        self.scroll.update_dimensions(self.number_of_rows(), viewport);
    }

    // ─────────────────────────────────────────────────────────────
    // Data source
    // ─────────────────────────────────────────────────────────────

    pub fn number_of_rows(&self) -> usize {
        self.movies.as_ref().map_or(0, Vec::len)
    }

    pub fn movie_at(&self, row: usize) -> Option<&CatalogEntry> {
        self.movies.as_ref().and_then(|movies| movies.get(row))
    }

    /// Build the cell for `row`; out-of-range rows get a bare cell
    pub fn cell_for_row(&self, row: usize) -> MovieCell {
        let mut cell = MovieCell::new(&self.theme);
        if let Some(entry) = self.movie_at(row) {
            cell.configure(entry, self.posters.as_ref());
        }
        cell
    }

    // ─────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────

    pub fn mode(&self) -> &QueryMode {
        &self.mode
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn reload_generation(&self) -> u64 {
        self.reload_generation
    }

    pub fn selected(&self) -> Option<usize> {
        (self.selected < self.number_of_rows()).then_some(self.selected)
    }

    pub fn ordering(&self) -> ResponseOrdering {
        self.ordering
    }

    pub fn search(&self) -> &SearchBar {
        &self.search
    }

    /// Route a key to the search input and fire a fetch if the text changed
    pub fn handle_search_key(&mut self, key: KeyEvent) -> Handled {
        let before = self.search.text().to_string();
        let handled = self.search.handle_key(key);
        if self.search.text() != before {
            let text = self.search.text().to_string();
            self.search_text_changed(&text);
        }
        handled
    }

    // ─────────────────────────────────────────────────────────────
    // Selection
    // ─────────────────────────────────────────────────────────────

    fn select(&mut self, row: usize) {
        let rows = self.number_of_rows();
        if rows == 0 {
            return;
        }
        self.selected = row.min(rows - 1);
        self.scroll.ensure_visible(self.selected);
    }

    // ─────────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────────

    /// Sync viewport size before drawing. Call once per frame.
    pub fn prepare_frame(&mut self, area: Rect) {
        let list_area = split_slots(area, Direction::Vertical, &self.slots, &self.constraints)
            .into_iter()
            .find(|(slot, _)| *slot == ScreenSlot::List)
            .map(|(_, rect)| rect)
            .unwrap_or_default();

        let viewport = cells_that_fit(list_area.height);
        self.scroll.update_dimensions(self.number_of_rows(), viewport);
        if self.number_of_rows() > 0 {
            self.scroll.ensure_visible(self.selected);
        }
    }

    fn render_list(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let focused = ctx.is_focused(ComponentId::Movies);
        let border = if focused {
            self.list_border.fg(self.theme.highlight)
        } else {
            self.list_border
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(self.theme.border_type)
            .border_style(border)
            .style(Style::default().bg(self.theme.background));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let (start, end) = self.scroll.visible_range();
        for (i, row) in (start..end).enumerate() {
            let y = inner.y + i as u16 * CELL_HEIGHT;
            if y + CELL_HEIGHT > inner.y + inner.height {
                break;
            }
            let cell_area = Rect::new(
                inner.x,
                y,
                inner.width.saturating_sub(1), // scrollbar column
                CELL_HEIGHT,
            );
            let cell = self.cell_for_row(row);
            cell.render(f, cell_area, ctx, focused && row == self.selected);
        }

        render_scrollbar(f, area, &self.scroll, ScrollbarStyle::Minimal);
    }
}

/// Whole cells that fit in a bordered list of `list_height` rows
///
/// Zero when not even one cell fits; a partial cell is never counted.
fn cells_that_fit(list_height: u16) -> usize {
    (list_height.saturating_sub(2) / CELL_HEIGHT) as usize
}

impl ViewCode for MoviesScreen {
    fn build_hierarchy(&mut self) {
        self.slots = vec![ScreenSlot::Title, ScreenSlot::Search, ScreenSlot::List];
    }

    fn setup_constraints(&mut self) {
        self.constraints = self
            .slots
            .iter()
            .map(|slot| match slot {
                ScreenSlot::Title => Constraint::Length(3),
                ScreenSlot::Search => Constraint::Length(3),
                ScreenSlot::List => Constraint::Min(CELL_HEIGHT + 2),
            })
            .collect();
    }

    fn apply_additional_changes(&mut self) {
        self.title = "My movies".to_string();
        self.search.set_placeholder("Search shows");
        self.list_border = Style::default().fg(self.theme.border);
    }
}

impl Component for MoviesScreen {
    fn id(&self) -> ComponentId {
        ComponentId::Movies
    }

    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        for (slot, rect) in split_slots(area, Direction::Vertical, &self.slots, &self.constraints)
        {
            match slot {
                ScreenSlot::Title => {
                    title_bar::render(f, rect, &self.title, self.is_loading(), ctx)
                }
                ScreenSlot::Search => self.search.render(f, rect, ctx),
                ScreenSlot::List => self.render_list(f, rect, ctx),
            }
        }
    }
}

impl Interactive for MoviesScreen {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.select(self.selected.saturating_sub(1));
                Handled::Yes
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select(self.selected + 1);
                Handled::Yes
            }
            KeyCode::PageUp => {
                let page = self.scroll.viewport().max(1);
                self.select(self.selected.saturating_sub(page));
                Handled::Yes
            }
            KeyCode::PageDown => {
                let page = self.scroll.viewport().max(1);
                self.select(self.selected + page);
                Handled::Yes
            }
            KeyCode::Home | KeyCode::Char('g') => {
                self.select(0);
                Handled::Yes
            }
            KeyCode::End | KeyCode::Char('G') => {
                self.select(usize::MAX);
                Handled::Yes
            }
            KeyCode::Char('r') => {
                // Re-run whatever the current mode is
                self.issue();
                Handled::Yes
            }
            _ => Handled::No,
        }
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some("↑↓:select  /:search  r:reload  l:logs  q:quit")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{NoPosterLoader, PosterImage, Rating};
    use futures::future::BoxFuture;
    use futures::FutureExt;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use tokio::sync::oneshot;

    /// What the fake service should hand back for the next call
    enum Scripted {
        List(FetchResult<Vec<CatalogEntry>>),
        Search(FetchResult<Vec<SearchHit>>),
        /// Resolve later, when the test sends on the channel
        DeferredSearch(oneshot::Receiver<Vec<SearchHit>>),
    }

    #[derive(Default)]
    struct FakeService {
        script: Mutex<VecDeque<Scripted>>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeService {
        fn push(&self, step: Scripted) {
            self.script.lock().unwrap().push_back(step);
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn next(&self) -> Scripted {
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .expect("unscripted fetch")
        }
    }

    impl CatalogService for FakeService {
        fn fetch_list(&self) -> BoxFuture<'static, FetchResult<Vec<CatalogEntry>>> {
            self.calls.lock().unwrap().push("list".to_string());
            match self.next() {
                Scripted::List(result) => async move { result }.boxed(),
                _ => panic!("expected a list step"),
            }
        }

        fn fetch_results(&self, term: &str) -> BoxFuture<'static, FetchResult<Vec<SearchHit>>> {
            self.calls.lock().unwrap().push(format!("search:{}", term));
            match self.next() {
                Scripted::Search(result) => async move { result }.boxed(),
                Scripted::DeferredSearch(rx) => {
                    async move { Ok(rx.await.unwrap_or_default()) }.boxed()
                }
                Scripted::List(_) => panic!("expected a search step"),
            }
        }
    }

    fn movie(name: &str) -> CatalogEntry {
        CatalogEntry {
            name: name.to_string(),
            genres: vec![format!("{} genre", name), "Drama".to_string()],
            rating: Some(Rating {
                average: Some(7.5),
            }),
            image: Some(PosterImage {
                medium: Some(format!("https://img.example/{}.jpg", name)),
                original: None,
            }),
        }
    }

    fn hit(entry: Option<CatalogEntry>) -> SearchHit {
        SearchHit {
            score: Some(1.0),
            show: entry,
        }
    }

    fn screen_with(
        service: Arc<FakeService>,
        ordering: ResponseOrdering,
    ) -> (MoviesScreen, OutcomeReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        let screen = MoviesScreen::new(
            service,
            Arc::new(NoPosterLoader),
            tx,
            ordering,
            Theme::default(),
        );
        (screen, rx)
    }

    /// Wait for the next outcome and apply it
    async fn settle(screen: &mut MoviesScreen, rx: &mut OutcomeReceiver) -> bool {
        let outcome = rx.recv().await.expect("fetch task dropped");
        screen.apply_outcome(outcome)
    }

    fn names(screen: &MoviesScreen) -> Vec<String> {
        (0..screen.number_of_rows())
            .map(|i| screen.cell_for_row(i).title_text().to_string())
            .collect()
    }

    #[test]
    fn test_new_screen_has_no_rows() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let screen = MoviesScreen::new(
            Arc::new(FakeService::default()),
            Arc::new(NoPosterLoader),
            tx,
            ResponseOrdering::LatestRequest,
            Theme::default(),
        );
        assert_eq!(screen.number_of_rows(), 0);
        assert_eq!(screen.selected(), None);
        assert_eq!(screen.mode(), &QueryMode::Unfiltered);
    }

    #[tokio::test]
    async fn test_unfiltered_success_sets_row_count() {
        let service = Arc::new(FakeService::default());
        service.push(Scripted::List(Ok(vec![movie("A"), movie("B"), movie("C")])));
        let (mut screen, mut rx) = screen_with(service.clone(), ResponseOrdering::LatestRequest);

        screen.appear();
        assert!(screen.is_loading());
        assert!(settle(&mut screen, &mut rx).await);

        assert_eq!(screen.number_of_rows(), 3);
        assert!(!screen.is_loading());
        assert_eq!(service.calls(), vec!["list"]);
    }

    #[tokio::test]
    async fn test_filtered_success_drops_absent_entries_in_order() {
        let service = Arc::new(FakeService::default());
        service.push(Scripted::Search(Ok(vec![
            hit(Some(movie("D"))),
            hit(None),
            hit(Some(movie("E"))),
            hit(None),
        ])));
        let (mut screen, mut rx) = screen_with(service.clone(), ResponseOrdering::LatestRequest);

        screen.search_text_changed("x");
        settle(&mut screen, &mut rx).await;

        assert_eq!(screen.mode(), &QueryMode::Filtered("x".to_string()));
        assert_eq!(names(&screen), vec!["D", "E"]);
        assert_eq!(service.calls(), vec!["search:x"]);
    }

    #[tokio::test]
    async fn test_failure_clears_list_in_either_mode() {
        let service = Arc::new(FakeService::default());
        service.push(Scripted::List(Ok(vec![movie("A")])));
        service.push(Scripted::Search(Err(FetchError::Network("reset".into()))));
        service.push(Scripted::List(Ok(vec![movie("A")])));
        service.push(Scripted::List(Err(FetchError::Decode("eof".into()))));
        let (mut screen, mut rx) = screen_with(service, ResponseOrdering::LatestRequest);

        screen.appear();
        settle(&mut screen, &mut rx).await;
        assert_eq!(screen.number_of_rows(), 1);

        screen.search_text_changed("x");
        settle(&mut screen, &mut rx).await;
        assert_eq!(screen.number_of_rows(), 0);

        screen.search_text_changed("");
        settle(&mut screen, &mut rx).await;
        assert_eq!(screen.number_of_rows(), 1);

        screen.appear();
        settle(&mut screen, &mut rx).await;
        assert_eq!(screen.number_of_rows(), 0);
        assert!(screen.movie_at(0).is_none());
    }

    #[tokio::test]
    async fn test_every_replacement_reloads() {
        let service = Arc::new(FakeService::default());
        service.push(Scripted::List(Ok(vec![movie("A"), movie("B")])));
        service.push(Scripted::List(Err(FetchError::Network("down".into()))));
        let (mut screen, mut rx) = screen_with(service, ResponseOrdering::LatestRequest);

        assert_eq!(screen.reload_generation(), 0);
        screen.appear();
        settle(&mut screen, &mut rx).await;
        assert_eq!(screen.reload_generation(), 1);

        screen.handle_key(KeyEvent::from(KeyCode::Down));
        assert_eq!(screen.selected(), Some(1));

        screen.appear();
        settle(&mut screen, &mut rx).await;
        assert_eq!(screen.reload_generation(), 2);
        assert_eq!(screen.selected(), None);
    }

    #[tokio::test]
    async fn test_row_reflects_entry_fields() {
        let service = Arc::new(FakeService::default());
        service.push(Scripted::List(Ok(vec![movie("A"), movie("B"), movie("C")])));
        let (mut screen, mut rx) = screen_with(service, ResponseOrdering::LatestRequest);

        screen.appear();
        settle(&mut screen, &mut rx).await;

        let cell = screen.cell_for_row(1);
        assert_eq!(cell.title_text(), "B");
        assert_eq!(cell.genre_text(), "B genre, Drama");
        assert_eq!(cell.rating_text(), "7.5");
        assert_eq!(
            cell.poster_url().map(|u| u.as_str()),
            Some("https://img.example/B.jpg")
        );
    }

    #[tokio::test]
    async fn test_out_of_range_row_is_default_cell() {
        let service = Arc::new(FakeService::default());
        service.push(Scripted::List(Ok(vec![movie("A")])));
        let (mut screen, mut rx) = screen_with(service, ResponseOrdering::LatestRequest);

        // Before any data, and past the end after data
        assert_eq!(screen.cell_for_row(0).title_text(), "");
        screen.appear();
        settle(&mut screen, &mut rx).await;

        let cell = screen.cell_for_row(5);
        assert_eq!(cell.title_text(), "");
        assert_eq!(cell.genre_text(), "");
        assert_eq!(cell.rating_text(), "");
        assert!(cell.poster_url().is_none());
    }

    #[tokio::test]
    async fn test_search_then_clear_scenario() {
        let service = Arc::new(FakeService::default());
        service.push(Scripted::List(Ok(vec![movie("A"), movie("B"), movie("C")])));
        service.push(Scripted::Search(Ok(vec![
            hit(Some(movie("D"))),
            hit(None),
            hit(Some(movie("E"))),
        ])));
        service.push(Scripted::List(Ok(vec![movie("A"), movie("B"), movie("C")])));
        let (mut screen, mut rx) = screen_with(service.clone(), ResponseOrdering::LatestRequest);

        screen.appear();
        settle(&mut screen, &mut rx).await;
        assert_eq!(screen.number_of_rows(), 3);
        assert_eq!(screen.cell_for_row(1).title_text(), "B");

        screen.search_text_changed("x");
        settle(&mut screen, &mut rx).await;
        assert_eq!(screen.number_of_rows(), 2);
        assert_eq!(screen.cell_for_row(0).title_text(), "D");
        assert_eq!(screen.cell_for_row(1).title_text(), "E");

        screen.search_text_changed("");
        assert_eq!(screen.mode(), &QueryMode::Unfiltered);
        settle(&mut screen, &mut rx).await;
        assert_eq!(names(&screen), vec!["A", "B", "C"]);

        assert_eq!(service.calls(), vec!["list", "search:x", "list"]);
    }

    #[tokio::test]
    async fn test_search_keys_fire_one_fetch_per_change() {
        let service = Arc::new(FakeService::default());
        service.push(Scripted::Search(Ok(vec![])));
        service.push(Scripted::Search(Ok(vec![hit(Some(movie("Girls")))])));
        service.push(Scripted::Search(Ok(vec![])));
        let (mut screen, mut rx) = screen_with(service.clone(), ResponseOrdering::LatestRequest);

        screen.handle_search_key(KeyEvent::from(KeyCode::Char('g')));
        screen.handle_search_key(KeyEvent::from(KeyCode::Char('i')));
        // Not a text change: no fetch
        screen.handle_search_key(KeyEvent::from(KeyCode::Left));
        screen.handle_search_key(KeyEvent::from(KeyCode::Char('r')));

        assert_eq!(
            service.calls(),
            vec!["search:g", "search:gi", "search:gir"]
        );
        assert_eq!(screen.in_flight(), 3);

        for _ in 0..3 {
            settle(&mut screen, &mut rx).await;
        }
        assert_eq!(screen.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_latest_request_drops_stale_response() {
        let service = Arc::new(FakeService::default());
        let (slow_tx, slow_rx) = oneshot::channel();
        service.push(Scripted::DeferredSearch(slow_rx));
        service.push(Scripted::Search(Ok(vec![hit(Some(movie("Newer")))])));
        let (mut screen, mut rx) = screen_with(service, ResponseOrdering::LatestRequest);

        screen.search_text_changed("o");
        screen.search_text_changed("ol");

        // The newer request completes first
        assert!(settle(&mut screen, &mut rx).await);
        assert_eq!(names(&screen), vec!["Newer"]);

        // Then the older one straggles in and is ignored
        slow_tx.send(vec![hit(Some(movie("Older")))]).unwrap();
        assert!(!settle(&mut screen, &mut rx).await);
        assert_eq!(names(&screen), vec!["Newer"]);
        assert!(!screen.is_loading());
    }

    #[tokio::test]
    async fn test_completion_order_lets_last_response_win() {
        let service = Arc::new(FakeService::default());
        let (slow_tx, slow_rx) = oneshot::channel();
        service.push(Scripted::DeferredSearch(slow_rx));
        service.push(Scripted::Search(Ok(vec![hit(Some(movie("Newer")))])));
        let (mut screen, mut rx) = screen_with(service, ResponseOrdering::CompletionOrder);

        screen.search_text_changed("o");
        screen.search_text_changed("ol");

        settle(&mut screen, &mut rx).await;
        assert_eq!(names(&screen), vec!["Newer"]);

        slow_tx.send(vec![hit(Some(movie("Older")))]).unwrap();
        assert!(settle(&mut screen, &mut rx).await);
        assert_eq!(names(&screen), vec!["Older"]);
    }

    #[test]
    fn test_cells_that_fit_counts_whole_cells_only() {
        assert_eq!(cells_that_fit(0), 0);
        assert_eq!(cells_that_fit(CELL_HEIGHT + 1), 0);
        assert_eq!(cells_that_fit(CELL_HEIGHT + 2), 1);
        assert_eq!(cells_that_fit(3 * CELL_HEIGHT + 3), 3);
    }

    #[tokio::test]
    async fn test_no_rows_visible_when_no_cell_fits() {
        let service = Arc::new(FakeService::default());
        service.push(Scripted::List(Ok(vec![movie("A"), movie("B")])));
        let (mut screen, mut rx) = screen_with(service, ResponseOrdering::LatestRequest);

        screen.appear();
        settle(&mut screen, &mut rx).await;

        screen.prepare_frame(Rect::new(0, 0, 80, 0));
        assert_eq!(screen.scroll.viewport(), 0);
        let (start, end) = screen.scroll.visible_range();
        assert_eq!(start, end);

        // Title 3 + search 3 leaves 34 rows: 32 inside the border
        screen.prepare_frame(Rect::new(0, 0, 80, 40));
        assert_eq!(screen.scroll.viewport(), 32 / CELL_HEIGHT as usize);
        assert_eq!(screen.scroll.visible_range(), (0, 2));
    }

    #[tokio::test]
    async fn test_selection_stays_in_range() {
        let service = Arc::new(FakeService::default());
        service.push(Scripted::List(Ok(vec![movie("A"), movie("B"), movie("C")])));
        let (mut screen, mut rx) = screen_with(service, ResponseOrdering::LatestRequest);

        screen.appear();
        settle(&mut screen, &mut rx).await;
        screen.prepare_frame(Rect::new(0, 0, 80, 40));

        screen.handle_key(KeyEvent::from(KeyCode::End));
        assert_eq!(screen.selected(), Some(2));
        screen.handle_key(KeyEvent::from(KeyCode::Down));
        assert_eq!(screen.selected(), Some(2));
        screen.handle_key(KeyEvent::from(KeyCode::Home));
        screen.handle_key(KeyEvent::from(KeyCode::Up));
        assert_eq!(screen.selected(), Some(0));
    }
}
