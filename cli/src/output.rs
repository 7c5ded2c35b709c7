use clap::ValueEnum;
use dicecup_engine::presenter::{render_html, render_text, render_theme_text};
use dicecup_engine::Page;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
    Html,
}

pub fn render_page(page: &Page, format: Format) -> anyhow::Result<String> {
    Ok(match format {
        Format::Text => render_text(&page.result),
        Format::Json => serde_json::to_string_pretty(page)?,
        Format::Html => render_html(page),
    })
}

pub fn render_theme(page: &Page, format: Format) -> anyhow::Result<String> {
    Ok(match format {
        Format::Text => render_theme_text(&page.theme),
        Format::Json => serde_json::to_string_pretty(&page.theme)?,
        Format::Html => render_html(page),
    })
}
