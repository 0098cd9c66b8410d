mod client;
mod config;
mod csv_io;
mod error;

use crate::client::GeniusClient;
use crate::config::Config;
use crate::csv_io::{read_roster, stamp_last_updated, write_events};
use anyhow::{bail, Context, Result};
use cfl_play_parser::{DirectoryFeed, GameAssembler, PlayByPlayFeed, RetryingFeed, ScheduleFeed};
use chrono::Utc;
use clap::Parser;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{filter::EnvFilter, fmt::format::JsonFields, layer::SubscriberExt, util::SubscriberInitExt, Layer};

pub fn init_tracing(config: &Config) {
	let filter = EnvFilter::try_new(&config.rust_log).unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::registry()
		.with(if config.log_json {
			Box::new(
				tracing_subscriber::fmt::layer()
					.fmt_fields(JsonFields::default())
					.event_format(tracing_subscriber::fmt::format().json().flatten_event(true).with_span_list(false))
					.with_filter(filter),
			) as Box<dyn Layer<_> + Send + Sync>
		} else {
			Box::new(tracing_subscriber::fmt::layer().event_format(tracing_subscriber::fmt::format().pretty()).with_filter(filter))
		})
		.init();
}

#[tokio::main]
async fn main() -> Result<()> {
	dotenv::dotenv().ok();
	let config = Config::parse();
	init_tracing(&config);

	let backoff = Duration::from_millis(config.retry_backoff_ms);
	match &config.input_dir {
		Some(dir) => {
			info!(input_dir = %dir.display(), "Reading saved feed payloads");
			run(&config, RetryingFeed::new(DirectoryFeed::new(dir), backoff)).await
		}
		None => {
			let client = GeniusClient::new(&config.feed_url, &config.schedule_url)?;
			run(&config, RetryingFeed::new(client, backoff)).await
		}
	}
}

async fn run<F>(config: &Config, feed: F) -> Result<()>
where
	F: PlayByPlayFeed + ScheduleFeed,
{
	let mut games = feed.fetch_schedule(config.season).await.with_context(|| format!("Failed to fetch the {} schedule", config.season))?;
	if let Some(fixture) = config.fixture {
		games.retain(|game| game.fixture_id == Some(fixture));
		if games.is_empty() {
			bail!("Fixture {fixture} is not on the {} schedule", config.season);
		}
	}
	info!(season = config.season, games = games.len(), "Fetched schedule");

	let assembler = GameAssembler::new(feed);
	let mut report = assembler.run_season(config.season, &games, Duration::from_millis(config.request_delay_ms)).await;

	if let Some(path) = &config.roster_file {
		let roster = read_roster(path)?;
		info!(players = roster.len(), roster = %path.display(), "Resolving player ids");
		for event in report.events.iter_mut() {
			roster.annotate(event);
		}
	}

	stamp_last_updated(&mut report.events, Utc::now());
	let path = write_events(&config.output_dir, config.season, &report.events).context("Failed to write play-by-play CSV")?;
	info!(
		season = config.season,
		games = report.games,
		failed = report.failed.len(),
		plays = report.events.len(),
		output = %path.display(),
		"Wrote season play-by-play"
	);

	for failed in &report.failed {
		warn!(game_id = failed.game_id, fixture_id = failed.fixture_id, error = %failed.error, "Game left out of the season file");
	}
	Ok(())
}
