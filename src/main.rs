use anyhow::{Context, Result};
use clap::Parser;
use donorboard::config::{Config, SortMode};
use donorboard::reveal::VisibleList;
use donorboard::session::{Event, Session};
use donorboard::source::FileSource;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "donorboard", about = "Donor leaderboard — rank, search and page through donor records")]
struct Cli {
    /// Donor JSON file (default: data_path from config)
    input: Option<PathBuf>,

    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Search query (name, username, uid or platform)
    #[arg(short, long)]
    query: Option<String>,

    /// Sort mode: amount-desc, amount-asc, date-desc, date-asc, name-asc
    #[arg(short, long)]
    sort: Option<String>,

    /// Donors revealed per batch
    #[arg(short, long)]
    batch_size: Option<usize>,

    /// Press "load more" N times after the first batch
    #[arg(long, default_value_t = 0)]
    more: usize,

    /// Reveal every matching donor
    #[arg(long)]
    all: bool,

    /// Show page N (0-based) instead of the revealed list
    #[arg(long)]
    page: Option<usize>,

    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,
}

fn load_config(path: &Path) -> Result<Config> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("cannot read config {}", path.display()))?;
    let config: Config = serde_json::from_str(&text)
        .with_context(|| format!("invalid config JSON in {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("rejected config {}", path.display()))?;
    Ok(config)
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "donorboard=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // Load config
    let config = if let Some(ref config_path) = cli.config {
        load_config(config_path)?
    } else {
        let defaults = ["donorboard.config.json", "config/donorboard.config.json"];
        let mut loaded = None;
        for p in &defaults {
            let path = PathBuf::from(p);
            if path.is_file() {
                loaded = Some(load_config(&path)?);
                break;
            }
        }
        loaded.unwrap_or_default()
    };

    let input = cli.input.clone().unwrap_or_else(|| config.data_path.clone());
    let debounce = Duration::from_millis(config.search_debounce_ms);
    let count_up = Duration::from_millis(config.count_up_ms);

    let mut session = Session::new(config, VisibleList::default());
    let now = Instant::now();
    session.load(&FileSource::new(input), now);

    // CLI overrides, replayed as the events the page controls would fire
    if let Some(ref mode) = cli.sort {
        session.dispatch(Event::SortMode(SortMode::parse(mode)), now);
    }
    if let Some(n) = cli.batch_size {
        session.dispatch(Event::BatchSize(n), now);
    }
    if let Some(ref q) = cli.query {
        session.dispatch(Event::SearchInput(q.clone()), now);
        session.tick(now + debounce);
    }
    for _ in 0..cli.more {
        session.dispatch(Event::LoadMore, now);
    }
    if cli.all {
        while session.status().load_more_visible() {
            if session.append_next_batch() == 0 {
                break;
            }
        }
    }
    if let Some(page) = cli.page {
        for _ in 0..page {
            session.dispatch(Event::NextPage, now);
        }
    }

    let shown = match cli.page {
        Some(_) => session.page_items(),
        None => session.output().items.as_slice(),
    };

    if cli.json {
        let doc = serde_json::json!({
            "totals": session.totals(),
            "status": {
                "total": session.status().total,
                "shown": session.status().shown,
            },
            "page": cli.page.map(|_| session.page()),
            "donors": shown,
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else if cli.page.is_some() {
        let config = session.config();
        println!("Page {}", session.page() + 1);
        for donor in shown {
            println!("{}", donorboard::render::render_card(donor, false, config));
        }
    } else {
        print!("{}", donorboard::render::render_session(&session, now + count_up));
    }

    Ok(())
}
