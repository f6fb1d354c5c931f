//! Line-oriented terminal host for the skill search widget.
//!
//! Each line read from stdin is either search box text or a `:command`.
//! Timer and worker events are interleaved with input on a single-threaded
//! tokio runtime, and the widget is re-rendered to stdout whenever the event
//! handler asks for it.
//!
//! # Commands
//!
//! - `text`: Replace the search box contents
//! - `:select N`: Open details for result row N
//! - `:more`: Reveal the next batch of results
//! - `:filters`: Open the filter editor
//! - `:facet NAME`: Edit one facet (location, category, rate, delivery)
//! - `:query TEXT`: Narrow the facet options
//! - `:option N`: Pick facet option N
//! - `:back`, `:reset`, `:done`, `:close`: Filter editor navigation
//! - `:remove NAME`: Remove a filter badge
//! - `:category ID NAME`: Search a category directly
//! - `:blur`: Leave the search box
//! - `:quit`: Tear down and exit

#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use skillsearch::app::{Alert, WidgetState};
use skillsearch::domain::{Category, FacetKind};
use skillsearch::ui::{render_to_string, HighlightStyle};
use skillsearch::{infrastructure, observability, Config, Event, HttpSkillApi, NoRegions, Widget};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Debug, Parser)]
#[command(name = "skillsearch", version, about = "Incremental skill search in the terminal")]
struct Args {
    /// TOML config file. Defaults to the platform config dir.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the search service root URL.
    #[arg(long)]
    base_url: Option<String>,

    /// Override the tracing filter directive.
    #[arg(long)]
    trace_level: Option<String>,
}

/// Prints alerts to stderr.
struct StderrAlerts;

impl skillsearch::AlertSink for StderrAlerts {
    fn alert(&self, alert: &Alert) {
        eprintln!("! {}: {}", alert.title, alert.text);
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Command {
    Input(Vec<Event>),
    Quit,
}

fn load_config(args: &Args) -> skillsearch::Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => match infrastructure::default_config_file() {
            Some(path) if path.exists() => Config::from_file(path)?,
            _ => Config::default(),
        },
    };

    if let Some(base_url) = &args.base_url {
        config.base_url.clone_from(base_url);
    }
    if let Some(level) = &args.trace_level {
        config.trace_level = Some(level.clone());
    }
    Ok(config)
}

/// Parses one input line against the current widget state.
fn parse_command(line: &str, state: &WidgetState) -> Result<Command, String> {
    let Some(command) = line.strip_prefix(':') else {
        return Ok(Command::Input(vec![
            Event::Focus,
            Event::TextChanged(line.to_string()),
        ]));
    };

    let (name, rest) = command
        .split_once(char::is_whitespace)
        .map_or((command, ""), |(name, rest)| (name, rest.trim()));

    let event = match name {
        "quit" | "q" => return Ok(Command::Quit),
        "select" => {
            let index = row_index(rest)?;
            let vm = state.compute_viewmodel();
            let row = vm
                .panel
                .and_then(|panel| panel.rows.into_iter().nth(index))
                .ok_or_else(|| format!("no result row {rest}"))?;
            Event::SelectResult(row.id)
        }
        "more" => Event::RevealMore,
        "filters" => Event::OpenFilters,
        "facet" => Event::PickFacet(facet(rest)?),
        "query" => Event::FacetQueryChanged(rest.to_string()),
        "option" => {
            let index = row_index(rest)?;
            let option = state
                .editor
                .options()
                .into_iter()
                .nth(index)
                .ok_or_else(|| format!("no option {rest}"))?;
            Event::SelectFacetOption(option.value)
        }
        "back" => Event::FilterBack,
        "reset" => Event::ResetFilters,
        "done" => Event::CommitFilters,
        "close" => Event::CloseFilters,
        "remove" => Event::RemoveBadge(facet(rest)?),
        "category" => {
            let (id, name) = rest
                .split_once(char::is_whitespace)
                .ok_or("usage: :category ID NAME")?;
            Event::PickCategory(Category::new(id, name.trim()))
        }
        "blur" => Event::Blur,
        other => return Err(format!("unknown command :{other}")),
    };
    Ok(Command::Input(vec![event]))
}

fn row_index(arg: &str) -> Result<usize, String> {
    match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(format!("expected a row number, got {arg:?}")),
    }
}

fn facet(arg: &str) -> Result<FacetKind, String> {
    FacetKind::parse(arg).ok_or_else(|| format!("unknown facet {arg:?}"))
}

fn print(widget: &Widget, style: HighlightStyle) {
    println!("{}", render_to_string(&widget.viewmodel(), style));
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("skillsearch: {e}");
            std::process::exit(2);
        }
    };

    if let Err(e) = observability::init_tracing(&config) {
        eprintln!("skillsearch: tracing disabled: {e}");
    }

    tracing::debug!(base_url = %config.base_url, "host starting");

    let api = match HttpSkillApi::new(
        &config.base_url,
        Duration::from_millis(config.request_timeout_ms),
    ) {
        Ok(api) => api,
        Err(e) => {
            eprintln!("skillsearch: {e}");
            std::process::exit(1);
        }
    };

    let state = skillsearch::initialize(&config, Arc::new(NoRegions));
    let mut widget = Widget::new(state, Arc::new(api), Arc::new(StderrAlerts));
    let style = if std::io::stdout().is_terminal() {
        HighlightStyle::Ansi
    } else {
        HighlightStyle::Brackets
    };

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        tracing::error!(error = %e, "failed to read stdin");
                        break;
                    }
                };

                match parse_command(&line, widget.state()) {
                    Ok(Command::Quit) => break,
                    Ok(Command::Input(events)) => {
                        let mut render = false;
                        for event in events {
                            render |= widget.process(event);
                        }
                        if render {
                            print(&widget, style);
                        }
                    }
                    Err(message) => eprintln!("{message}"),
                }
            }
            Some(event) = widget.next_event() => {
                if widget.process(event) {
                    print(&widget, style);
                }
            }
        }
    }

    widget.teardown();
    tracing::debug!("host exiting");
}

#[cfg(test)]
mod tests {
    use super::*;
    use skillsearch::app::TriggerSource;
    use skillsearch::domain::{DeliveryChoice, FacetValue, SkillSummary};

    fn state() -> WidgetState {
        skillsearch::initialize(&Config::default(), Arc::new(NoRegions))
    }

    #[test]
    fn plain_text_focuses_and_types() {
        assert_eq!(
            parse_command("plumb", &state()),
            Ok(Command::Input(vec![
                Event::Focus,
                Event::TextChanged("plumb".to_string())
            ]))
        );
    }

    #[test]
    fn facet_commands_parse_names() {
        let state = state();
        assert_eq!(
            parse_command(":facet Delivery", &state),
            Ok(Command::Input(vec![Event::PickFacet(FacetKind::Delivery)]))
        );
        assert_eq!(
            parse_command(":remove rate", &state),
            Ok(Command::Input(vec![Event::RemoveBadge(FacetKind::Rate)]))
        );
        assert!(parse_command(":facet colour", &state).is_err());
    }

    #[test]
    fn option_resolves_against_open_facet() {
        let mut state = state();
        state.editor.open();
        state.editor.pick_facet(FacetKind::Delivery).unwrap();

        assert_eq!(
            parse_command(":option 2", &state),
            Ok(Command::Input(vec![Event::SelectFacetOption(
                FacetValue::Delivery(DeliveryChoice::Online)
            )]))
        );
        assert!(parse_command(":option 0", &state).is_err());
    }

    #[test]
    fn select_resolves_visible_row() {
        let mut state = state();
        assert!(parse_command(":select 1", &state).is_err());

        state.text = "tiling".into();
        state.visibility.on_focus();
        state.search(TriggerSource::TextTyped);
        let generation = state.coordinator.current_generation();
        state.coordinator.apply_success(
            generation,
            vec![SkillSummary {
                id: "s-9".into(),
                name: "Tiling".into(),
                image: String::new(),
            }],
        );

        assert_eq!(
            parse_command(":select 1", &state),
            Ok(Command::Input(vec![Event::SelectResult("s-9".into())]))
        );
        assert!(parse_command(":select 2", &state).is_err());
    }

    #[test]
    fn category_needs_id_and_name() {
        let state = state();
        assert_eq!(
            parse_command(":category c1 Home repair", &state),
            Ok(Command::Input(vec![Event::PickCategory(Category::new(
                "c1",
                "Home repair"
            ))]))
        );
        assert!(parse_command(":category c1", &state).is_err());
        assert_eq!(parse_command(":quit", &state), Ok(Command::Quit));
        assert!(parse_command(":frobnicate", &state).is_err());
    }
}
