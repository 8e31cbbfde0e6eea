// Theme support for the TUI
//
// "auto" uses the terminal's ANSI palette, named themes use true color (RGB).

use ratatui::style::Color;
use ratatui::widgets::BorderType;

/// Color palette for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    pub background: Color,
    pub foreground: Color,
    pub muted: Color,

    pub title: Color,
    pub border: Color,
    pub highlight: Color,
    pub selection: Color,
    pub selection_fg: Color,

    /// Rating star
    pub star: Color,
    pub error: Color,
    pub warn: Color,
    pub status_bar: Color,

    pub border_type: BorderType,
}

impl Theme {
    /// Load theme by name, falling back to "auto"
    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "dark" => Self::dark(),
            "nord" => Self::nord(),
            "gruvbox" => Self::gruvbox(),
            _ => Self::auto(),
        }
    }

    pub fn list_available() -> &'static [&'static str] {
        &["auto", "dark", "nord", "gruvbox"]
    }

    /// Auto theme - uses terminal's ANSI palette
    pub fn auto() -> Self {
        Self {
            name: "auto".to_string(),
            background: Color::Reset,
            foreground: Color::Reset,
            muted: Color::Gray,
            title: Color::Cyan,
            border: Color::White,
            highlight: Color::Yellow,
            selection: Color::DarkGray,
            selection_fg: Color::White,
            star: Color::Yellow,
            error: Color::Red,
            warn: Color::Yellow,
            status_bar: Color::Green,
            border_type: BorderType::Rounded,
        }
    }

    /// Black background, white text; closest to a phone's dark list screen
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            background: Color::Rgb(0x00, 0x00, 0x00),
            foreground: Color::Rgb(0xff, 0xff, 0xff),
            muted: Color::Rgb(0xaa, 0xaa, 0xaa),       // light gray
            title: Color::Rgb(0xff, 0xff, 0xff),
            border: Color::Rgb(0x44, 0x44, 0x44),
            highlight: Color::Rgb(0xff, 0xd6, 0x0a),   // yellow
            selection: Color::Rgb(0x2c, 0x2c, 0x2e),
            selection_fg: Color::Rgb(0xff, 0xff, 0xff),
            star: Color::Rgb(0xff, 0xd6, 0x0a),
            error: Color::Rgb(0xff, 0x45, 0x3a),
            warn: Color::Rgb(0xff, 0x9f, 0x0a),
            status_bar: Color::Rgb(0x30, 0xd1, 0x58),
            border_type: BorderType::Rounded,
        }
    }

    /// Nord theme - https://www.nordtheme.com
    pub fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            background: Color::Rgb(0x2e, 0x34, 0x40),  // nord0
            foreground: Color::Rgb(0xec, 0xef, 0xf4),  // nord6
            muted: Color::Rgb(0x81, 0xa1, 0xc1),       // nord9
            title: Color::Rgb(0x88, 0xc0, 0xd0),       // nord8
            border: Color::Rgb(0x4c, 0x56, 0x6a),      // nord3
            highlight: Color::Rgb(0xeb, 0xcb, 0x8b),   // nord13
            selection: Color::Rgb(0x43, 0x4c, 0x5e),   // nord2
            selection_fg: Color::Rgb(0xec, 0xef, 0xf4),
            star: Color::Rgb(0xeb, 0xcb, 0x8b),
            error: Color::Rgb(0xbf, 0x61, 0x6a),       // nord11
            warn: Color::Rgb(0xd0, 0x87, 0x70),        // nord12
            status_bar: Color::Rgb(0xa3, 0xbe, 0x8c),  // nord14
            border_type: BorderType::Plain,
        }
    }

    /// Gruvbox dark theme
    pub fn gruvbox() -> Self {
        Self {
            name: "gruvbox".to_string(),
            background: Color::Rgb(0x28, 0x28, 0x28),
            foreground: Color::Rgb(0xeb, 0xdb, 0xb2),
            muted: Color::Rgb(0xa8, 0x99, 0x84),
            title: Color::Rgb(0x83, 0xa5, 0x98),       // blue
            border: Color::Rgb(0x66, 0x5c, 0x54),
            highlight: Color::Rgb(0xfa, 0xbd, 0x2f),   // yellow
            selection: Color::Rgb(0x50, 0x49, 0x45),
            selection_fg: Color::Rgb(0xfb, 0xf1, 0xc7),
            star: Color::Rgb(0xfa, 0xbd, 0x2f),
            error: Color::Rgb(0xfb, 0x49, 0x34),
            warn: Color::Rgb(0xfe, 0x80, 0x19),
            status_bar: Color::Rgb(0xb8, 0xbb, 0x26),  // green
            border_type: BorderType::Plain,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::auto()
    }
}
