//! Text renderer for the widget view model.
//!
//! Produces a line-oriented rendering suitable for a terminal host. Fuzzy
//! match highlights are drawn with ANSI bold, or with square brackets when
//! the output is not a terminal.

use crate::ui::viewmodel::{DetailsView, ModalView, PanelView, WidgetViewModel};
use std::fmt::Write;

/// How highlight ranges are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightStyle {
    /// `\x1b[1m` … `\x1b[0m`
    Ansi,
    /// `[` … `]`
    Brackets,
}

impl HighlightStyle {
    const fn delimiters(self) -> (&'static str, &'static str) {
        match self {
            Self::Ansi => ("\u{1b}[1m", "\u{1b}[0m"),
            Self::Brackets => ("[", "]"),
        }
    }
}

/// Wraps the character `ranges` of `text` in highlight delimiters.
#[must_use]
pub fn highlight(text: &str, ranges: &[(usize, usize)], style: HighlightStyle) -> String {
    if ranges.is_empty() {
        return text.to_string();
    }

    let (open, close) = style.delimiters();
    let mut out = String::with_capacity(text.len() + ranges.len() * (open.len() + close.len()));
    let mut ranges = ranges.iter().peekable();

    for (idx, ch) in text.chars().enumerate() {
        while ranges.peek().is_some_and(|&&(_, end)| end <= idx) {
            ranges.next();
        }
        let range = ranges.peek().copied();
        if range.is_some_and(|&(start, _)| start == idx) {
            out.push_str(open);
        }
        out.push(ch);
        if range.is_some_and(|&(_, end)| end == idx + 1) {
            out.push_str(close);
        }
    }
    out
}

/// Renders the whole view model.
#[must_use]
pub fn render_to_string(vm: &WidgetViewModel, style: HighlightStyle) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Search: {}", vm.search_text);
    if !vm.badges.is_empty() {
        let labels: Vec<&str> = vm.badges.iter().map(|b| b.label.as_str()).collect();
        let _ = writeln!(out, "Filters: {}", labels.join(" | "));
    }

    if let Some(panel) = &vm.panel {
        render_panel(&mut out, panel);
    }
    if let Some(modal) = &vm.modal {
        render_modal(&mut out, modal, style);
    }
    render_details(&mut out, &vm.details);

    out
}

fn render_panel(out: &mut String, panel: &PanelView) {
    let _ = writeln!(out, "── Results ──");
    if panel.loading {
        let _ = writeln!(out, "  Loading…");
    }
    if panel.show_no_results {
        let _ = writeln!(out, "  No results");
    }
    for (idx, row) in panel.rows.iter().enumerate() {
        let _ = writeln!(out, "  {:>2}. {}", idx + 1, row.name);
    }
    if panel.hidden_count > 0 {
        let _ = writeln!(out, "  … {} more", panel.hidden_count);
    }
}

fn render_modal(out: &mut String, modal: &ModalView, style: HighlightStyle) {
    match modal {
        ModalView::Facets(rows) => {
            let _ = writeln!(out, "── Filters ──");
            for row in rows {
                match &row.summary {
                    Some(summary) => {
                        let _ = writeln!(out, "  {:<10} {summary}", row.title);
                    }
                    None => {
                        let _ = writeln!(out, "  {}", row.title);
                    }
                }
            }
        }
        ModalView::Options { facet, query, rows } => {
            let _ = writeln!(out, "── {} ──", facet.title());
            if !query.is_empty() {
                let _ = writeln!(out, "  filter: {query}");
            }
            for (idx, row) in rows.iter().enumerate() {
                let marker = if row.is_selected { "(•)" } else { "( )" };
                let label = highlight(&row.label, &row.highlight_ranges, style);
                let _ = writeln!(out, "  {:>2}. {marker} {label}", idx + 1);
            }
        }
    }
}

fn render_details(out: &mut String, details: &DetailsView) {
    match details {
        DetailsView::Hidden => {}
        DetailsView::Placeholder { loading } => {
            let _ = writeln!(out, "── Details ──");
            let _ = writeln!(out, "  {}", if *loading { "Loading…" } else { "Unavailable" });
        }
        DetailsView::Loaded(card) => {
            let _ = writeln!(out, "── {} ──", card.name);
            let _ = writeln!(out, "  Category:  {}", card.category);
            let _ = writeln!(out, "  Price:     {}", card.pricing);
            if let Some(duration) = &card.duration {
                let _ = writeln!(out, "  Duration:  {duration}");
            }
            let _ = writeln!(out, "  Online:    {}", card.online);
            let _ = writeln!(out, "  In person: {}", card.in_person);
            if !card.description.is_empty() {
                let _ = writeln!(out, "  {}", card.description);
            }
            for image in &card.images {
                let _ = writeln!(out, "  image: {image}");
            }
        }
    }
}
