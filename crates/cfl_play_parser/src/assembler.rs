use crate::error::AssemblyError;
use crate::game_state::{GameContext, GameTracker};
use crate::schema::{DecodedEvent, Phase, PlayByPlayResponse, ScheduledGame};
use crate::source::PlayByPlayFeed;
use std::time::Duration;
use tracing::{error, info, warn};

/// A game that could not be assembled, kept for the end-of-season report.
#[derive(Debug)]
pub struct FailedGame {
	pub game_id: i64,
	pub fixture_id: i64,
	pub error: AssemblyError,
}

#[derive(Debug, Default)]
pub struct SeasonReport {
	pub events: Vec<DecodedEvent>,
	pub games: usize,
	pub failed: Vec<FailedGame>,
}

/// Fetches each phase of a game in order and threads one tracker through them.
pub struct GameAssembler<F> {
	feed: F,
}

impl<F: PlayByPlayFeed> GameAssembler<F> {
	pub fn new(feed: F) -> Self {
		GameAssembler { feed }
	}

	pub fn feed(&self) -> &F {
		&self.feed
	}

	pub async fn assemble_game(&self, season: i32, game: &ScheduledGame, fixture_id: i64) -> Result<Vec<DecodedEvent>, AssemblyError> {
		let first = self.feed.fetch_phase(fixture_id, game.event_id, Phase::Q1).await?;
		let match_info = first.require_match_info(fixture_id)?;
		let overtimes = match_info.overtime_count();
		if overtimes > 1 {
			return Err(AssemblyError::MultipleOvertimes { fixture_id, count: overtimes });
		}

		let mut tracker = GameTracker::new(GameContext::new(season, game, fixture_id, match_info.matchup()));
		let mut events = decode_phase(&mut tracker, fixture_id, Phase::Q1, &first)?;

		let mut remaining = Phase::REGULATION[1..].to_vec();
		if overtimes == 1 {
			remaining.push(Phase::Overtime);
		}
		for phase in remaining {
			let response = self.feed.fetch_phase(fixture_id, game.event_id, phase).await?;
			events.extend(decode_phase(&mut tracker, fixture_id, phase, &response)?);
		}

		let context = tracker.into_context();
		check_final_score(game, &context);
		info!(
			fixture_id,
			game_id = game.event_id,
			plays = events.len(),
			home = %context.matchup.home.abbreviation,
			away = %context.matchup.away.abbreviation,
			home_score = context.home_score,
			away_score = context.away_score,
			"Assembled game"
		);
		Ok(events)
	}

	/// Assembles every played game, isolating failures per game.
	pub async fn run_season(&self, season: i32, games: &[ScheduledGame], delay: Duration) -> SeasonReport {
		let mut report = SeasonReport::default();
		let playable: Vec<(&ScheduledGame, i64)> = games
			.iter()
			.filter(|game| game.has_been_played())
			.filter_map(|game| game.fixture_id.map(|fixture_id| (game, fixture_id)))
			.collect();

		for (index, (game, fixture_id)) in playable.into_iter().enumerate() {
			if index > 0 && !delay.is_zero() {
				tokio::time::sleep(delay).await;
			}
			report.games += 1;
			match self.assemble_game(season, game, fixture_id).await {
				Ok(events) => report.events.extend(events),
				Err(err) => {
					error!(fixture_id, game_id = game.event_id, error = %err, "Failed to assemble game");
					report.failed.push(FailedGame {
						game_id: game.event_id,
						fixture_id,
						error: err,
					});
				}
			}
		}
		report
	}
}

fn decode_phase(tracker: &mut GameTracker, fixture_id: i64, phase: Phase, response: &PlayByPlayResponse) -> Result<Vec<DecodedEvent>, AssemblyError> {
	tracker.process_quarter(phase, response.plays(phase)).map_err(|source| AssemblyError::Decode { fixture_id, phase, source })
}

fn check_final_score(game: &ScheduledGame, context: &GameContext) {
	let Some(expected) = game.final_scores() else {
		return;
	};
	let (home, away) = (context.home_score, context.away_score);
	let decoded = (home.min(away), home.max(away));
	if decoded != expected {
		warn!(
			fixture_id = context.fixture_id,
			game_id = game.event_id,
			?expected,
			?decoded,
			"Decoded final score differs from the scoreboard"
		);
	}
}
