//! View model for the roller and its text/HTML renderings.
//!
//! The presenter holds no business logic: it turns rolls, statistics and
//! messages into a [`Page`] that a front end draws however it likes.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::stats::Statistics;
use crate::theme::Theme;
use crate::RollResult;

pub const READY_TEXT: &str = "Ready to roll!";
pub const READY_AGAIN_TEXT: &str = "Ready to roll again!";
pub const ROLLING_TEXT: &str = "Rolling dice...";

const GLYPHS: [char; 6] = ['⚀', '⚁', '⚂', '⚃', '⚄', '⚅'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Info,
    Error,
}

impl Tone {
    pub fn css_class(self) -> &'static str {
        match self {
            Tone::Info => "info",
            Tone::Error => "error",
        }
    }
}

/// One rendered die. The image key is the face value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DieImage {
    face: u8,
}

impl DieImage {
    pub fn face(self) -> u8 {
        self.face
    }

    pub fn src(self) -> String {
        format!("dice_images/{}.png", self.face)
    }

    pub fn alt(self) -> String {
        format!("Dice {}", self.face)
    }

    pub fn glyph(self) -> char {
        usize::from(self.face)
            .checked_sub(1)
            .and_then(|i| GLYPHS.get(i))
            .copied()
            .unwrap_or('?')
    }
}

impl Serialize for DieImage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("DieImage", 3)?;
        s.serialize_field("face", &self.face)?;
        s.serialize_field("src", &self.src())?;
        s.serialize_field("alt", &self.alt())?;
        s.end()
    }
}

/// Contents of the result area: message line, dice images, optional stats block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultView {
    pub message: String,
    pub tone: Tone,
    pub images: Vec<DieImage>,
    pub stats: Option<Statistics>,
}

impl ResultView {
    fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            tone: Tone::Info,
            images: Vec::new(),
            stats: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThemeView {
    pub theme: Theme,
    pub toggle_label: &'static str,
    pub body_class: Option<&'static str>,
}

impl From<Theme> for ThemeView {
    fn from(theme: Theme) -> Self {
        Self {
            theme,
            toggle_label: theme.toggle_label(),
            body_class: theme.body_class(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub result: ResultView,
    pub theme: ThemeView,
}

#[derive(Debug, Clone)]
pub struct Presenter {
    page: Page,
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

impl Presenter {
    pub fn new(theme: Theme) -> Self {
        Self {
            page: Page {
                result: ResultView::info(READY_TEXT),
                theme: theme.into(),
            },
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn view(&self) -> &ResultView {
        &self.page.result
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.page.result = ResultView {
            tone: Tone::Error,
            ..ResultView::info(message)
        };
    }

    pub fn show_rolling(&mut self) {
        self.page.result = ResultView::info(ROLLING_TEXT);
    }

    pub fn show_result(&mut self, roll: &RollResult) {
        self.show_values("Dice rolled", roll);
    }

    /// Attach a statistics block below the current images.
    pub fn show_statistics(&mut self, stats: Statistics) {
        self.page.result.stats = Some(stats);
    }

    pub fn show_last_roll(&mut self, roll: &RollResult, stats: Statistics) {
        self.show_values("Last roll", roll);
        self.show_statistics(stats);
    }

    pub fn reset(&mut self) {
        self.page.result = ResultView::info(READY_AGAIN_TEXT);
    }

    pub fn show_theme(&mut self, theme: Theme) {
        self.page.theme = theme.into();
    }

    fn show_values(&mut self, label: &str, roll: &RollResult) {
        let images = roll.values().iter().map(|&face| DieImage { face }).collect();
        self.page.result = ResultView {
            images,
            ..ResultView::info(format!("{}: {}", label, join_values(roll.values())))
        };
    }
}

fn join_values(values: &[u8]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/* ---------------- renderers ---------------- */

pub fn render_text(view: &ResultView) -> String {
    let mut lines = Vec::new();
    match view.tone {
        Tone::Error => lines.push(format!("⚠ {}", view.message)),
        Tone::Info => lines.push(view.message.clone()),
    }
    if !view.images.is_empty() {
        let glyphs: Vec<String> = view.images.iter().map(|i| i.glyph().to_string()).collect();
        lines.push(glyphs.join(" "));
    }
    if let Some(stats) = &view.stats {
        lines.extend(stat_rows(stats).into_iter().map(|(k, v)| format!("{} {}", k, v)));
    }
    lines.join("\n")
}

pub fn render_theme_text(theme: &ThemeView) -> String {
    format!("Theme: {} (toggle: {})", theme.theme, theme.toggle_label)
}

/// Markup for the whole widget, mirroring the element ids the page stylesheet targets.
pub fn render_html(page: &Page) -> String {
    let result = &page.result;
    let main_open = match page.theme.body_class {
        Some(class) => format!("<main class=\"{}\">", class),
        None => "<main>".to_string(),
    };
    let mut images: String = result
        .images
        .iter()
        .map(|i| {
            format!(
                "<img src=\"{}\" alt=\"{}\" class=\"dice-image\">",
                i.src(),
                i.alt()
            )
        })
        .collect();
    if let Some(stats) = &result.stats {
        images.push_str("<div class=\"dice-stats\">");
        for (k, v) in stat_rows(stats) {
            images.push_str(&format!("<p><strong>{}</strong> {}</p>", k, v));
        }
        images.push_str("</div>");
    }
    [
        main_open,
        format!(
            "<button id=\"themeToggle\">{}</button>",
            page.theme.toggle_label
        ),
        format!(
            "<p id=\"diceResult\" class=\"{}\">{}</p>",
            result.tone.css_class(),
            escape_html(&result.message)
        ),
        format!("<div id=\"diceImages\">{}</div>", images),
        "</main>".to_string(),
    ]
    .join("\n")
}

fn stat_rows(stats: &Statistics) -> [(&'static str, String); 4] {
    [
        ("Total:", stats.total.to_string()),
        ("Average:", stats.average.to_string()),
        ("Highest Roll:", stats.highest.to_string()),
        ("Lowest Roll:", stats.lowest.to_string()),
    ]
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
