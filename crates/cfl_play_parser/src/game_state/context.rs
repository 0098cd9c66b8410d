use crate::schema::{Matchup, ScheduledGame, TeamSide};

pub const TIMEOUTS_PER_HALF: u8 = 2;

/// Everything about a game that outlives a single play.
#[derive(Debug, Clone, PartialEq)]
pub struct GameContext {
	pub season: i32,
	pub season_type: String,
	pub week: Option<u32>,
	pub game_id: i64,
	pub fixture_id: i64,
	pub matchup: Matchup,
	pub home_score: u32,
	pub away_score: u32,
	pub home_timeouts: u8,
	pub away_timeouts: u8,
	pub home_opening_kickoff: bool,
}

impl GameContext {
	pub fn new(season: i32, game: &ScheduledGame, fixture_id: i64, matchup: Matchup) -> Self {
		GameContext {
			season,
			season_type: game.season_type(),
			week: game.week,
			game_id: game.event_id,
			fixture_id,
			matchup,
			home_score: 0,
			away_score: 0,
			home_timeouts: TIMEOUTS_PER_HALF,
			away_timeouts: TIMEOUTS_PER_HALF,
			home_opening_kickoff: false,
		}
	}

	pub fn score(&self, side: TeamSide) -> u32 {
		match side {
			TeamSide::Home => self.home_score,
			TeamSide::Away => self.away_score,
		}
	}

	/// Each half starts with a fresh allotment; overtime keeps the second-half counts.
	pub fn reset_timeouts(&mut self) {
		self.home_timeouts = TIMEOUTS_PER_HALF;
		self.away_timeouts = TIMEOUTS_PER_HALF;
	}
}
