// TUI application state
//
// App owns the movies screen, the logs panel, and the focus/animation state
// shared by the shell. Key routing lives here so it can be unit tested
// without a terminal.

use super::components::LogsPanel;
use super::screen::{FetchOutcome, MoviesScreen};
use super::traits::{ComponentId, Handled, Interactive, RenderContext};
use crate::catalog::PosterLoader;
use crate::logging::LogBuffer;
use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;

/// Main application state for the TUI
pub struct App {
    pub screen: MoviesScreen,

    /// Log buffer for the logs panel
    pub log_buffer: LogBuffer,
    pub logs_panel: LogsPanel,
    pub show_logs: bool,

    pub focus: ComponentId,
    pub theme: Theme,
    posters: Arc<dyn PosterLoader>,

    /// Animation frame counter for spinners
    animation_frame: usize,

    pub should_quit: bool,
}

impl App {
    pub fn new(
        screen: MoviesScreen,
        log_buffer: LogBuffer,
        posters: Arc<dyn PosterLoader>,
        theme: Theme,
        show_logs: bool,
    ) -> Self {
        Self {
            screen,
            log_buffer,
            logs_panel: LogsPanel::new(),
            show_logs,
            focus: ComponentId::Movies,
            theme,
            posters,
            animation_frame: 0,
            should_quit: false,
        }
    }

    /// Advance the spinner
    pub fn tick_animation(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
    }

    pub fn render_context(&self) -> RenderContext<'_> {
        RenderContext {
            theme: &self.theme,
            focus: self.focus,
            animation_frame: self.animation_frame,
            posters: self.posters.as_ref(),
        }
    }

    pub fn apply_outcome(&mut self, outcome: FetchOutcome) {
        self.screen.apply_outcome(outcome);
    }

    pub fn toggle_logs(&mut self) {
        self.show_logs = !self.show_logs;
        if !self.show_logs && self.focus == ComponentId::Logs {
            self.focus = ComponentId::Movies;
        }
    }

    /// Key hint for the status bar
    pub fn focus_hint(&self) -> Option<&'static str> {
        match self.focus {
            ComponentId::Movies => self.screen.focus_hint(),
            ComponentId::Search => self.screen.search().focus_hint(),
            ComponentId::Logs => self.logs_panel.focus_hint(),
        }
    }

    /// Layered dispatch: global keys, then the focused component
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if key.code == KeyCode::Tab {
            self.focus = self.focus.next_focus(self.show_logs);
            return;
        }

        // The search bar swallows printable keys, so globals don't apply there
        if self.focus == ComponentId::Search {
            match key.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Down => {
                    self.focus = ComponentId::Movies;
                }
                _ => {
                    self.screen.handle_search_key(key);
                }
            }
            return;
        }

        if self.dispatch_to_focused(key) == Handled::Yes {
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('/') => self.focus = ComponentId::Search,
            KeyCode::Char('l') => self.toggle_logs(),
            KeyCode::Esc if self.focus == ComponentId::Logs => self.focus = ComponentId::Movies,
            _ => {}
        }
    }

    fn dispatch_to_focused(&mut self, key: KeyEvent) -> Handled {
        match self.focus {
            ComponentId::Movies => self.screen.handle_key(key),
            ComponentId::Logs => self.logs_panel.handle_key(key),
            ComponentId::Search => self.screen.handle_search_key(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{
        CatalogEntry, CatalogService, FetchResult, NoPosterLoader, SearchHit,
    };
    use crate::config::ResponseOrdering;
    use futures::future::BoxFuture;
    use futures::FutureExt;
    use std::sync::Mutex;
    use tokio::sync::mpsc;

    #[derive(Default)]
    struct EmptyService {
        terms: Mutex<Vec<String>>,
    }

    impl CatalogService for EmptyService {
        fn fetch_list(&self) -> BoxFuture<'static, FetchResult<Vec<CatalogEntry>>> {
            async { Ok(Vec::new()) }.boxed()
        }

        fn fetch_results(&self, term: &str) -> BoxFuture<'static, FetchResult<Vec<SearchHit>>> {
            self.terms.lock().unwrap().push(term.to_string());
            async { Ok(Vec::new()) }.boxed()
        }
    }

    fn app(service: Arc<EmptyService>) -> App {
        let (tx, _rx) = mpsc::unbounded_channel();
        let posters: Arc<dyn PosterLoader> = Arc::new(NoPosterLoader);
        let screen = MoviesScreen::new(
            service,
            posters.clone(),
            tx,
            ResponseOrdering::LatestRequest,
            Theme::default(),
        );
        App::new(screen, LogBuffer::new(), posters, Theme::default(), false)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[tokio::test]
    async fn test_slash_focuses_search_and_typing_searches() {
        let service = Arc::new(EmptyService::default());
        let mut app = app(service.clone());

        app.handle_key(key(KeyCode::Char('/')));
        assert_eq!(app.focus, ComponentId::Search);

        // 'q' is text while searching, not quit
        app.handle_key(key(KeyCode::Char('q')));
        assert!(!app.should_quit);
        assert_eq!(*service.terms.lock().unwrap(), vec!["q".to_string()]);

        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.focus, ComponentId::Movies);
    }

    #[test]
    fn test_q_quits_from_list() {
        let mut app = app(Arc::new(EmptyService::default()));
        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits_anywhere() {
        let mut app = app(Arc::new(EmptyService::default()));
        app.focus = ComponentId::Search;
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn test_hiding_logs_moves_focus_back() {
        let mut app = app(Arc::new(EmptyService::default()));
        app.handle_key(key(KeyCode::Char('l')));
        assert!(app.show_logs);

        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.focus, ComponentId::Logs);

        app.handle_key(key(KeyCode::Char('l')));
        assert!(!app.show_logs);
        assert_eq!(app.focus, ComponentId::Movies);
    }
}
