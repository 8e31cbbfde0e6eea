//! Movie cell component
//!
//! Renders one catalog entry as a bordered card:
//!
//! ```text
//! ╭──────────────────────────────────────────────╮
//! │▓▓▓▓▓▓▓▓▓▓  Under the Dome                    │
//! │▓▓▓▓▓▓▓▓▓▓  Drama, Science-Fiction, Thriller  │
//! │▓▓▓▓ 24K ▓  6.5 ★                             │
//! ╰──────────────────────────────────────────────╯
//! ```
//!
//! Pure presentation: `configure` copies display text out of the entry and
//! hands the poster URL to the loader. The cell never errors.

use super::formatters::{format_bytes, format_genres, format_rating, truncate_to_width};
use crate::catalog::{CatalogEntry, PosterLoader, PosterState};
use crate::theme::Theme;
use crate::tui::layout::Breakpoint;
use crate::tui::traits::{split_slots, RenderContext, ViewCode};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use reqwest::Url;

/// Rows taken by one cell, borders included
pub const CELL_HEIGHT: u16 = 5;

/// Poster column width in terminal columns
const POSTER_WIDTH: u16 = 12;

const STAR: &str = "★";

/// Horizontal slots inside the card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CardSlot {
    Poster,
    Gap,
    Details,
}

/// Vertical slots in the details stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DetailSlot {
    Title,
    Genres,
    Rating,
}

/// Styles resolved once from the theme
#[derive(Debug, Clone, Default)]
struct CellStyles {
    container: Style,
    border: Style,
    title: Style,
    genres: Style,
    rating: Style,
    star: Style,
    poster: Style,
    border_type: ratatui::widgets::BorderType,
}

/// One rendered row of the movie list
#[derive(Debug, Clone)]
pub struct MovieCell {
    theme: Theme,

    card_slots: Vec<CardSlot>,
    card_constraints: Vec<Constraint>,
    detail_slots: Vec<DetailSlot>,
    detail_constraints: Vec<Constraint>,
    styles: CellStyles,

    title_text: String,
    genre_text: String,
    /// Empty when the entry has no rating
    rating_text: String,
    poster_url: Option<Url>,
}

impl MovieCell {
    /// Build an unconfigured cell; `configure` fills in the text
    pub fn new(theme: &Theme) -> Self {
        let mut cell = Self {
            theme: theme.clone(),
            card_slots: Vec::new(),
            card_constraints: Vec::new(),
            detail_slots: Vec::new(),
            detail_constraints: Vec::new(),
            styles: CellStyles::default(),
            title_text: String::new(),
            genre_text: String::new(),
            rating_text: String::new(),
            poster_url: None,
        };
        cell.setup_view();
        cell
    }

    /// Copy display fields out of `entry` and request its poster
    ///
    /// The poster is only requested when the entry has a medium image
    /// reference that parses as an absolute URL. Otherwise the poster slot
    /// keeps whatever it had.
    pub fn configure(&mut self, entry: &CatalogEntry, posters: &dyn PosterLoader) {
        self.rating_text = entry.average_rating().map(format_rating).unwrap_or_default();
        self.title_text = entry.name.clone();
        self.genre_text = format_genres(&entry.genres);

        let Some(reference) = entry.poster_ref() else {
            return;
        };
        match Url::parse(reference) {
            Ok(url) => {
                posters.request(&url);
                self.poster_url = Some(url);
            }
            Err(e) => {
                tracing::debug!("Ignoring poster reference {:?}: {}", reference, e);
            }
        }
    }

    pub fn title_text(&self) -> &str {
        &self.title_text
    }

    pub fn genre_text(&self) -> &str {
        &self.genre_text
    }

    pub fn rating_text(&self) -> &str {
        &self.rating_text
    }

    pub fn poster_url(&self) -> Option<&Url> {
        self.poster_url.as_ref()
    }

    /// Plain-text rendering for headless output
    pub fn to_plain_line(&self) -> String {
        let rating = if self.rating_text.is_empty() {
            "   -".to_string()
        } else {
            format!("{:>4} {}", self.rating_text, STAR)
        };
        format!("{}  {}  [{}]", rating, self.title_text, self.genre_text)
    }

    pub fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext, selected: bool) {
        let container = if selected {
            self.styles
                .container
                .bg(self.theme.selection)
                .fg(self.theme.selection_fg)
        } else {
            self.styles.container
        };
        let border = if selected {
            Style::default().fg(self.theme.highlight)
        } else {
            self.styles.border
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(self.styles.border_type)
            .border_style(border)
            .style(container);
        let inner = block.inner(area);
        f.render_widget(block, area);

        // Narrow terminals drop the poster column entirely
        let show_poster = Breakpoint::from_width(area.width).at_least(Breakpoint::Normal);

        for (slot, rect) in split_slots(
            inner,
            Direction::Horizontal,
            &self.card_slots,
            &self.card_constraints,
        ) {
            match slot {
                CardSlot::Poster if show_poster => self.render_poster(f, rect, ctx),
                CardSlot::Poster | CardSlot::Gap => {}
                CardSlot::Details => {
                    let details = if show_poster {
                        rect
                    } else {
                        Rect {
                            x: inner.x,
                            width: inner.width,
                            ..rect
                        }
                    };
                    self.render_details(f, details);
                }
            }
        }
    }

    fn render_details(&self, f: &mut Frame, area: Rect) {
        let width = area.width as usize;

        for (slot, rect) in split_slots(
            area,
            Direction::Vertical,
            &self.detail_slots,
            &self.detail_constraints,
        ) {
            let line = match slot {
                DetailSlot::Title => Line::from(Span::styled(
                    truncate_to_width(&self.title_text, width),
                    self.styles.title,
                )),
                DetailSlot::Genres => Line::from(Span::styled(
                    truncate_to_width(&self.genre_text, width),
                    self.styles.genres,
                )),
                DetailSlot::Rating => Line::from(vec![
                    Span::styled(self.rating_text.clone(), self.styles.rating),
                    Span::raw(" "),
                    Span::styled(STAR, self.styles.star),
                ]),
            };
            f.render_widget(Paragraph::new(line), rect);
        }
    }

    fn render_poster(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let Some(url) = &self.poster_url else {
            return;
        };

        let lines: Vec<Line> = match ctx.posters.state(url) {
            Some(PosterState::Loading) => vec![Line::from(ctx.spinner_char().to_string())],
            Some(PosterState::Ready { size }) => {
                let fill = "▓".repeat(area.width as usize);
                let mut lines: Vec<Line> = (0..area.height.saturating_sub(1))
                    .map(|_| Line::from(fill.clone()))
                    .collect();
                lines.push(Line::from(format_bytes(size)));
                lines
            }
            // Failed or never requested: leave the slot as it is
            Some(PosterState::Failed) | None => return,
        };

        f.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .style(self.styles.poster),
            area,
        );
    }
}

impl ViewCode for MovieCell {
    fn build_hierarchy(&mut self) {
        self.card_slots = vec![CardSlot::Poster, CardSlot::Gap, CardSlot::Details];
        self.detail_slots = vec![DetailSlot::Title, DetailSlot::Genres, DetailSlot::Rating];
    }

    fn setup_constraints(&mut self) {
        self.card_constraints = self
            .card_slots
            .iter()
            .map(|slot| match slot {
                CardSlot::Poster => Constraint::Length(POSTER_WIDTH),
                CardSlot::Gap => Constraint::Length(2),
                CardSlot::Details => Constraint::Min(0),
            })
            .collect();

        // One line per detail row, card is CELL_HEIGHT minus borders
        self.detail_constraints = self
            .detail_slots
            .iter()
            .map(|_| Constraint::Length(1))
            .collect();
    }

    fn apply_additional_changes(&mut self) {
        let theme = &self.theme;
        self.styles = CellStyles {
            container: Style::default().bg(theme.background).fg(theme.foreground),
            border: Style::default().fg(theme.border),
            title: Style::default()
                .fg(theme.foreground)
                .add_modifier(Modifier::BOLD),
            genres: Style::default().fg(theme.muted),
            rating: Style::default().fg(theme.foreground),
            star: Style::default().fg(theme.star),
            poster: Style::default().fg(theme.muted),
            border_type: theme.border_type,
        };
    }
}
