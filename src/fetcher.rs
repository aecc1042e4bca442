use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use chrono::{DateTime, Local};
use crossbeam_channel::Sender;
use feed_rs::model::Entry;
use feed_rs::parser;
use reqwest::blocking::Client;
use tracing::{error, info};

use crate::config::Config;
use crate::error::Result;
use crate::feeds;
use crate::headline::Headline;

/// Something that can return the raw body of a feed URL.
pub trait FeedSource {
    fn get(&self, url: &str) -> Result<Vec<u8>>;
}

pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self { client })
    }
}

impl FeedSource for HttpSource {
    fn get(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send()?.error_for_status()?;
        Ok(response.bytes()?.to_vec())
    }
}

/// Headlines from one refresh cycle.
#[derive(Debug, Clone)]
pub struct RefreshBatch {
    pub headlines: Vec<Headline>,
    pub fetched_at: DateTime<Local>,
}

/// Fetch every URL in order and concatenate their entries.
/// Failed feeds are logged and skipped; an empty result becomes a single placeholder.
pub fn fetch_headlines(source: &impl FeedSource, urls: &[String]) -> Vec<Headline> {
    info!("Fetching {} feeds", urls.len());
    let mut headlines = Vec::new();

    for url in urls {
        info!("Fetching: {url}");
        match source.get(url).and_then(|body| parse_headlines(&body)) {
            Ok(mut entries) => {
                info!("Got {} headlines from {url}", entries.len());
                headlines.append(&mut entries);
            }
            Err(e) => error!("Error fetching {url}: {e}"),
        }
    }

    if headlines.is_empty() {
        headlines.push(Headline::placeholder());
    }
    headlines
}

/// Parse an RSS or Atom document into headlines, in entry order.
pub fn parse_headlines(body: &[u8]) -> Result<Vec<Headline>> {
    let feed = parser::parse(body)?;
    Ok(feed.entries.iter().map(headline_from_entry).collect())
}

fn headline_from_entry(entry: &Entry) -> Headline {
    let title = entry
        .title
        .as_ref()
        .map(|t| collapse_whitespace(&t.content))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "Untitled".to_string());

    // Prefer the alternate link; the article is usually that one.
    let link = entry
        .links
        .iter()
        .find(|l| matches!(l.rel.as_deref(), None | Some("alternate")))
        .or_else(|| entry.links.first())
        .map(|l| l.href.clone())
        .unwrap_or_default();

    Headline::new(title, link)
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Run refresh cycles forever on a background thread: once immediately, then
/// every `interval`. The feed list is re-read each cycle.
pub fn start_background_refresh<S>(
    source: S,
    feeds_file: PathBuf,
    interval: Duration,
    tx: Sender<RefreshBatch>,
    ctx: eframe::egui::Context,
) -> thread::JoinHandle<()>
where
    S: FeedSource + Send + 'static,
{
    thread::spawn(move || loop {
        let urls = feeds::load_or_create(&feeds_file);
        let batch = RefreshBatch {
            headlines: fetch_headlines(&source, &urls),
            fetched_at: Local::now(),
        };
        info!("Refresh complete: {} headlines", batch.headlines.len());

        if tx.send(batch).is_err() {
            // UI is gone.
            break;
        }
        ctx.request_repaint();
        thread::sleep(interval);
    })
}
