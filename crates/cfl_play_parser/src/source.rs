use crate::error::FeedError;
use crate::schema::{FeedEnvelope, Phase, PlayByPlayResponse, ScheduledGame};
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

/// Source of per-phase play-by-play payloads.
#[async_trait]
pub trait PlayByPlayFeed: Send + Sync {
	async fn fetch_phase(&self, fixture_id: i64, game_id: i64, phase: Phase) -> Result<PlayByPlayResponse, FeedError>;
}

/// Source of a season's scheduled games.
#[async_trait]
pub trait ScheduleFeed: Send + Sync {
	async fn fetch_schedule(&self, season: i32) -> Result<Vec<ScheduledGame>, FeedError>;
}

/// Retries a failed fetch once after a fixed backoff.
///
/// The first phase of a game must carry match info; a payload without it is
/// treated like a transient failure.
pub struct RetryingFeed<F> {
	inner: F,
	backoff: Duration,
}

impl<F> RetryingFeed<F> {
	pub fn new(inner: F, backoff: Duration) -> Self {
		RetryingFeed { inner, backoff }
	}

	pub fn inner(&self) -> &F {
		&self.inner
	}
}

impl<F: PlayByPlayFeed> RetryingFeed<F> {
	async fn attempt(&self, fixture_id: i64, game_id: i64, phase: Phase) -> Result<PlayByPlayResponse, FeedError> {
		let response = self.inner.fetch_phase(fixture_id, game_id, phase).await?;
		if phase == Phase::Q1 {
			response.require_match_info(fixture_id)?;
		}
		Ok(response)
	}
}

#[async_trait]
impl<F: PlayByPlayFeed> PlayByPlayFeed for RetryingFeed<F> {
	async fn fetch_phase(&self, fixture_id: i64, game_id: i64, phase: Phase) -> Result<PlayByPlayResponse, FeedError> {
		match self.attempt(fixture_id, game_id, phase).await {
			Err(err) if err.is_retryable() => {
				warn!(fixture_id, %phase, error = %err, "Feed request failed, retrying after backoff");
				tokio::time::sleep(self.backoff).await;
				self.attempt(fixture_id, game_id, phase).await
			}
			result => result,
		}
	}
}

#[async_trait]
impl<F: ScheduleFeed> ScheduleFeed for RetryingFeed<F> {
	async fn fetch_schedule(&self, season: i32) -> Result<Vec<ScheduledGame>, FeedError> {
		match self.inner.fetch_schedule(season).await {
			Err(err) if err.is_retryable() => {
				warn!(season, error = %err, "Schedule request failed, retrying after backoff");
				tokio::time::sleep(self.backoff).await;
				self.inner.fetch_schedule(season).await
			}
			result => result,
		}
	}
}

/// Reads feeds saved to disk as `<fixtureId>_<PHASE>.json` and `schedule_<season>.json`.
#[derive(Debug, Clone)]
pub struct DirectoryFeed {
	root: PathBuf,
}

impl DirectoryFeed {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		DirectoryFeed { root: root.into() }
	}

	pub fn phase_path(&self, fixture_id: i64, phase: Phase) -> PathBuf {
		self.root.join(format!("{fixture_id}_{}.json", phase.feed_label()))
	}

	pub fn schedule_path(&self, season: i32) -> PathBuf {
		self.root.join(format!("schedule_{season}.json"))
	}
}

#[async_trait]
impl PlayByPlayFeed for DirectoryFeed {
	async fn fetch_phase(&self, fixture_id: i64, _game_id: i64, phase: Phase) -> Result<PlayByPlayResponse, FeedError> {
		let path = self.phase_path(fixture_id, phase);
		if phase != Phase::Q1 && !tokio::fs::try_exists(&path).await? {
			return Ok(PlayByPlayResponse::default());
		}
		let raw = tokio::fs::read_to_string(&path).await?;
		let envelope: FeedEnvelope<PlayByPlayResponse> = serde_json::from_str(&raw).map_err(|err| FeedError::malformed(fixture_id, phase.feed_label(), err.to_string()))?;
		Ok(envelope.data)
	}
}

#[async_trait]
impl ScheduleFeed for DirectoryFeed {
	async fn fetch_schedule(&self, season: i32) -> Result<Vec<ScheduledGame>, FeedError> {
		let raw = tokio::fs::read_to_string(self.schedule_path(season)).await?;
		Ok(serde_json::from_str(&raw)?)
	}
}
