use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_FEED_URL: &str = "https://gsm-widgets.betstream.betgenius.com/widget-data/multisportgametracker";
pub const DEFAULT_SCHEDULE_URL: &str = "https://www.cfl.ca/wp-content/themes/cfl.ca/inc/admin-ajax.php";

#[derive(Parser, Clone, Debug)]
#[command(author, version, about = "Decodes a CFL season's play-by-play into CSV", long_about = None)]
pub struct Config {
	/// Season to process
	#[arg(long, env = "CFL_SEASON")]
	pub season: i32,

	/// Directory the season CSV is written to
	#[arg(long, env = "CSV_OUTPUT_DIR", default_value = "pbp")]
	pub output_dir: PathBuf,

	/// Read saved feed payloads from this directory instead of over HTTP
	#[arg(long, env = "PBP_INPUT_DIR")]
	pub input_dir: Option<PathBuf>,

	/// Season scoreboard endpoint
	#[arg(long, env = "CFL_SCHEDULE_URL", default_value = DEFAULT_SCHEDULE_URL)]
	pub schedule_url: String,

	/// Game tracker endpoint
	#[arg(long, env = "CFL_FEED_URL", default_value = DEFAULT_FEED_URL)]
	pub feed_url: String,

	/// Pause between games in milliseconds
	#[arg(long, env = "REQUEST_DELAY_MS", default_value = "2000")]
	pub request_delay_ms: u64,

	/// Pause before retrying a failed request in milliseconds
	#[arg(long, env = "RETRY_BACKOFF_MS", default_value = "5000")]
	pub retry_backoff_ms: u64,

	/// Only process this fixture
	#[arg(long, env = "CFL_FIXTURE")]
	pub fixture: Option<i64>,

	/// CSV of player_id,first_name,last_name,team used to fill player ids
	#[arg(long, env = "ROSTER_FILE")]
	pub roster_file: Option<PathBuf>,

	/// Log level
	#[arg(long, env = "RUST_LOG", default_value = "info")]
	pub rust_log: String,

	/// Use JSON formatting for tracing
	#[arg(long, env = "LOG_JSON", default_value = "false")]
	pub log_json: bool,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults() {
		let config = Config::try_parse_from(["cfl_pbp", "--season", "2024"]).unwrap();
		assert_eq!(config.season, 2024);
		assert_eq!(config.output_dir, PathBuf::from("pbp"));
		assert_eq!(config.request_delay_ms, 2000);
		assert_eq!(config.retry_backoff_ms, 5000);
		assert_eq!(config.feed_url, DEFAULT_FEED_URL);
		assert!(config.input_dir.is_none());
		assert!(!config.log_json);
	}

	#[test]
	fn test_single_fixture_from_saved_payloads() {
		let config = Config::try_parse_from(["cfl_pbp", "--season", "2023", "--input-dir", "saved", "--fixture", "9001"]).unwrap();
		assert_eq!(config.input_dir, Some(PathBuf::from("saved")));
		assert_eq!(config.fixture, Some(9001));
	}
}
