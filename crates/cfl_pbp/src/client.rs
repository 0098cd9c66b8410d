use crate::error::PbpError;
use async_trait::async_trait;
use cfl_play_parser::schema::{FeedEnvelope, Phase, PlayByPlayResponse, ScheduledGame};
use cfl_play_parser::{FeedError, PlayByPlayFeed, ScheduleFeed};
use reqwest::{Client, RequestBuilder};
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_4) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125.0.0.0 Safari/537.36";
const PRODUCT_NAME: &str = "democfl_light";
const SPORT: &str = "AmericanFootball";
const SPORT_ID: &str = "17";

/// Game tracker and scoreboard endpoints over HTTP.
#[derive(Debug, Clone)]
pub struct GeniusClient {
	client: Client,
	feed_url: String,
	schedule_url: String,
}

impl GeniusClient {
	pub fn new(feed_url: impl Into<String>, schedule_url: impl Into<String>) -> Result<Self, PbpError> {
		let client = Client::builder().user_agent(USER_AGENT).timeout(Duration::from_secs(30)).build()?;

		Ok(Self {
			client,
			feed_url: feed_url.into(),
			schedule_url: schedule_url.into(),
		})
	}

	fn phase_request(&self, fixture_id: i64, game_id: i64, phase: Phase) -> RequestBuilder {
		self.client.get(&self.feed_url).query(&[
			("productName", PRODUCT_NAME.to_string()),
			("fixtureId", fixture_id.to_string()),
			("activeContent", "playByPlay".to_string()),
			("phase", phase.feed_label().to_string()),
			("sport", SPORT.to_string()),
			("sportId", SPORT_ID.to_string()),
			("competitionId", game_id.to_string()),
			("isUsingBetGeniusId", "true".to_string()),
		])
	}

	fn schedule_request(&self, season: i32) -> RequestBuilder {
		self.client.get(&self.schedule_url).query(&[
			("action", "scoreboard".to_string()),
			("lang", "en".to_string()),
			("week", "all".to_string()),
			("season", season.to_string()),
		])
	}
}

// Non-success statuses and dropped connections are both transport failures.
async fn body(request: RequestBuilder) -> Result<String, FeedError> {
	let response = request.send().await.map_err(|e| FeedError::Transport(e.to_string()))?;

	let status = response.status();
	if !status.is_success() {
		let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
		return Err(FeedError::Transport(format!("HTTP {}: {}", status.as_u16(), error_text)));
	}

	response.text().await.map_err(|e| FeedError::Transport(e.to_string()))
}

#[async_trait]
impl PlayByPlayFeed for GeniusClient {
	async fn fetch_phase(&self, fixture_id: i64, game_id: i64, phase: Phase) -> Result<PlayByPlayResponse, FeedError> {
		debug!(fixture_id, game_id, %phase, "Fetching play-by-play");
		let raw = body(self.phase_request(fixture_id, game_id, phase)).await?;
		let envelope: FeedEnvelope<PlayByPlayResponse> = serde_json::from_str(&raw).map_err(|e| FeedError::malformed(fixture_id, phase.feed_label(), e.to_string()))?;
		Ok(envelope.data)
	}
}

#[async_trait]
impl ScheduleFeed for GeniusClient {
	async fn fetch_schedule(&self, season: i32) -> Result<Vec<ScheduledGame>, FeedError> {
		debug!(season, "Fetching schedule");
		let raw = body(self.schedule_request(season)).await?;
		Ok(serde_json::from_str(&raw)?)
	}
}
