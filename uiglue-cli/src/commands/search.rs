//! `uiglue search` - feed stdin lines into a debounced search controller
//!
//! Every stdin line becomes the input's new value. Lines starting with `:`
//! are commands:
//!
//!   :select <id>   pick a result from the current list
//!   :disable       disable the controller
//!   :enable        enable it again
//!   :wait <ms>     pause reading stdin (events keep printing)
//!   :quit          exit without waiting for outstanding lookups
//!
//! At end of input the command waits one debounce window plus the simulated
//! latency so the last lookup can settle, then exits.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::{sleep_until, Instant};
use tracing::{info, warn};
use uiglue_core::{
    CatalogSearch, MemoryElement, ResultItem, SearchController, SearchEvent, SearchOptions,
};

use super::load_config;

/// Extra settle time on top of delay + latency at end of input
const SETTLE_MARGIN: Duration = Duration::from_millis(50);

const DEMO_LABELS: &[&str] = &[
    "Apple",
    "Apricot",
    "Avocado",
    "Banana",
    "Blackberry",
    "Blueberry",
    "Cherry",
    "Coconut",
    "Cranberry",
    "Date",
    "Dragon Fruit",
    "Elderberry",
    "Fig",
    "Grape",
    "Grapefruit",
    "Guava",
    "Kiwi",
    "Lemon",
    "Lime",
    "Lychee",
    "Mango",
    "Nectarine",
    "Orange",
    "Papaya",
    "Passion Fruit",
    "Peach",
    "Pear",
    "Pineapple",
    "Plum",
    "Pomegranate",
    "Raspberry",
    "Strawberry",
    "Watermelon",
];

#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// JSON array of {"id", "label"} objects (defaults to a built-in fruit list)
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Debounce window in milliseconds (overrides config)
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Minimum trimmed query length (overrides config)
    #[arg(long)]
    pub min_length: Option<usize>,

    /// Simulated lookup latency in milliseconds
    #[arg(long, default_value_t = 0)]
    pub latency_ms: u64,

    /// Probability in [0, 1] that a lookup fails
    #[arg(long, default_value_t = 0.0)]
    pub failure_rate: f64,

    /// Print events as JSON lines instead of text
    #[arg(long)]
    pub json: bool,
}

/// One parsed stdin line
#[derive(Debug, Clone, PartialEq)]
enum Line {
    Input(String),
    Select(String),
    Disable,
    Enable,
    Wait(Duration),
    Quit,
}

fn parse_line(line: &str) -> Result<Line> {
    let Some(command) = line.strip_prefix(':') else {
        return Ok(Line::Input(line.to_string()));
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let arg = parts.next();

    match (name, arg) {
        ("select", Some(id)) => Ok(Line::Select(id.to_string())),
        ("select", None) => bail!(":select needs a result id"),
        ("disable", _) => Ok(Line::Disable),
        ("enable", _) => Ok(Line::Enable),
        ("wait", Some(ms)) => {
            let ms: u64 = ms
                .parse()
                .with_context(|| format!("invalid :wait duration {:?}", ms))?;
            Ok(Line::Wait(Duration::from_millis(ms)))
        }
        ("wait", None) => bail!(":wait needs a duration in milliseconds"),
        ("quit", _) => Ok(Line::Quit),
        (other, _) => Err(anyhow!("unknown command :{}", other)),
    }
}

fn demo_catalog() -> Vec<ResultItem> {
    DEMO_LABELS
        .iter()
        .map(|label| ResultItem::new(label.to_lowercase().replace(' ', "-"), *label))
        .collect()
}

/// Headless stand-in for the search markup
fn search_markup() -> Arc<MemoryElement> {
    MemoryElement::with_classes(&["search"])
        .with_child(MemoryElement::with_classes(&["input"]))
        .with_child(MemoryElement::with_classes(&["status"]))
        .with_child(MemoryElement::with_classes(&["results"]))
        .into_ref()
}

struct Printer {
    json: bool,
}

impl Printer {
    fn event(&self, event: &SearchEvent) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string(event)?);
            return Ok(());
        }

        println!(
            "{} {}",
            event.timestamp().format("%H:%M:%S%.3f"),
            event.summary()
        );
        if let SearchEvent::Resolved { items, .. } = event {
            for item in items {
                println!("    {:<16} {}", item.id, item.label);
            }
        }
        Ok(())
    }
}

pub async fn run_search(args: SearchArgs, config_path: Option<&Path>) -> Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(delay_ms) = args.delay_ms {
        config.search.delay_ms = delay_ms;
    }
    if let Some(min_length) = args.min_length {
        config.search.min_length = min_length;
    }

    let catalog = match &args.catalog {
        Some(path) => CatalogSearch::from_json_file(path)
            .with_context(|| format!("Failed to load catalog {}", path.display()))?,
        None => CatalogSearch::new(demo_catalog()),
    };
    let latency = Duration::from_millis(args.latency_ms);
    let catalog = catalog
        .with_latency(latency)
        .with_failure_rate(args.failure_rate);
    info!(
        items = catalog.len(),
        delay_ms = config.search.delay_ms,
        min_length = config.search.min_length,
        "catalog loaded"
    );

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let settle = config.search.delay() + latency + SETTLE_MARGIN;
    let options = SearchOptions::new(config.search)
        .search(Arc::new(catalog))
        .events(tx);

    let controller = SearchController::bind(search_markup(), options)
        .ok_or_else(|| anyhow!("search controller did not activate"))?;
    let printer = Printer { json: args.json };

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            Some(event) = rx.recv() => printer.event(&event)?,
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read stdin")? else {
                    break;
                };
                match parse_line(&line) {
                    Ok(Line::Input(value)) => controller.input(&value),
                    Ok(Line::Select(id)) => {
                        if controller.select(&id).is_none() {
                            warn!(id = %id, "no selectable result with that id");
                        }
                    }
                    Ok(Line::Disable) => controller.set_disabled(true),
                    Ok(Line::Enable) => controller.set_disabled(false),
                    Ok(Line::Wait(duration)) => {
                        drain_for(&mut rx, duration, &printer).await?;
                    }
                    Ok(Line::Quit) => {
                        while let Ok(event) = rx.try_recv() {
                            printer.event(&event)?;
                        }
                        return Ok(());
                    }
                    Err(err) => warn!("{:#}", err),
                }
            }
        }
    }

    drain_for(&mut rx, settle, &printer).await
}

/// Print events as they arrive for `duration`
async fn drain_for(
    rx: &mut UnboundedReceiver<SearchEvent>,
    duration: Duration,
    printer: &Printer,
) -> Result<()> {
    let deadline = Instant::now() + duration;
    loop {
        tokio::select! {
            Some(event) = rx.recv() => printer.event(&event)?,
            _ = sleep_until(deadline) => break,
        }
    }
    while let Ok(event) = rx.try_recv() {
        printer.event(&event)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_input() {
        assert_eq!(parse_line("ap").unwrap(), Line::Input("ap".into()));
        assert_eq!(parse_line("").unwrap(), Line::Input(String::new()));
        assert_eq!(parse_line("  pe ").unwrap(), Line::Input("  pe ".into()));
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_line(":select apple").unwrap(), Line::Select("apple".into()));
        assert_eq!(parse_line(":disable").unwrap(), Line::Disable);
        assert_eq!(parse_line(":enable").unwrap(), Line::Enable);
        assert_eq!(
            parse_line(":wait 250").unwrap(),
            Line::Wait(Duration::from_millis(250))
        );
        assert_eq!(parse_line(":quit").unwrap(), Line::Quit);
    }

    #[test]
    fn test_parse_rejects_bad_commands() {
        assert!(parse_line(":select").is_err());
        assert!(parse_line(":wait soon").is_err());
        assert!(parse_line(":frobnicate").is_err());
    }

    #[test]
    fn test_demo_catalog_ids_are_slugs() {
        let catalog = demo_catalog();
        assert_eq!(catalog.len(), DEMO_LABELS.len());
        assert!(catalog
            .iter()
            .any(|item| item.id == "dragon-fruit" && item.label == "Dragon Fruit"));
    }
}
