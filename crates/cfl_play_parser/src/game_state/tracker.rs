use crate::error::DecodeError;
use crate::game_state::{GameContext, PlayState};
use crate::parsers::decode_play;
use crate::schema::{resolve_yardline, side_of_field, ClockReading, DecodedEvent, DownAndDistance, FieldPosition, GameClock, Phase, PlayCategory, PlayFamily, RawPlay, TeamSide};
use tracing::warn;

/// What the next snap needs to know about the one before it.
#[derive(Debug, Clone)]
struct PreviousPlay {
	posteam: String,
	family: PlayFamily,
	down_and_distance: DownAndDistance,
	yardline_100: Option<i32>,
	yards_gained: Option<i32>,
	first_down: bool,
	scored: bool,
	turnover: bool,
	replayed: bool,
}

impl PreviousPlay {
	fn from_event(event: &DecodedEvent, family: PlayFamily, down_and_distance: DownAndDistance) -> Self {
		PreviousPlay {
			posteam: event.posteam.clone(),
			family,
			down_and_distance,
			yardline_100: event.yardline_100,
			yards_gained: event.yards_gained,
			first_down: event.is_first_down(),
			scored: event.posteam_score_post != event.posteam_score || event.defteam_score_post != event.defteam_score,
			turnover: event.is_interception || event.fumble_lost,
			replayed: event.is_no_play || event.is_penalty_only,
		}
	}

	/// The series ends and the next snap is a fresh first down.
	fn ends_series(&self) -> bool {
		self.first_down || self.scored || self.turnover || !self.family.has_down() || matches!(self.family, PlayFamily::Punt | PlayFamily::FieldGoal)
	}
}

/// Walks a game's plays in order, carrying score, timeouts and the down series.
#[derive(Debug, Clone)]
pub struct GameTracker {
	context: GameContext,
	previous: Option<PreviousPlay>,
	opening_kickoff_decided: bool,
}

impl GameTracker {
	pub fn new(context: GameContext) -> Self {
		GameTracker {
			context,
			previous: None,
			opening_kickoff_decided: false,
		}
	}

	pub fn context(&self) -> &GameContext {
		&self.context
	}

	pub fn into_context(self) -> GameContext {
		self.context
	}

	/// Decodes one quarter. The feed lists plays newest first.
	pub fn process_quarter(&mut self, phase: Phase, plays: &[RawPlay]) -> Result<Vec<DecodedEvent>, DecodeError> {
		if phase == Phase::Q3 {
			self.context.reset_timeouts();
			self.previous = None;
		}
		plays.iter().rev().map(|play| self.process_play(phase, play)).collect()
	}

	pub fn process_play(&mut self, phase: Phase, play: &RawPlay) -> Result<DecodedEvent, DecodeError> {
		let category = PlayCategory::from_tags(&play.play_type, play.sub_type.as_deref()).map_err(|err| DecodeError::unrecognized(err, play))?;
		let play_id = play.play_id().map_err(|err| DecodeError::invalid_play_id(err, play))?;
		let clock = GameClock::parse_optional(&play.clock).map_err(|err| DecodeError::invalid_clock(err, play))?;
		let posteam_side = self.context.matchup.side_of_id(play.team_id).ok_or_else(|| DecodeError::unknown_team(play.team_id, play))?;

		let posteam = self.context.matchup.abbreviation(posteam_side).to_string();
		let defteam = self.context.matchup.abbreviation(posteam_side.opposite()).to_string();
		let yardline_100 = resolve_yardline(&play.play_start_position, &posteam);
		let down_and_distance = self.next_down(category.family(), &posteam, &yardline_100);

		let state = PlayState {
			posteam_side,
			posteam,
			defteam,
			posteam_score: self.context.score(posteam_side),
			defteam_score: self.context.score(posteam_side.opposite()),
			down_and_distance,
			side_of_field: side_of_field(&play.play_start_position),
			yardline_100,
			clock: ClockReading::new(phase, clock),
			drive: play_id.drive,
			home_timeouts: self.context.home_timeouts,
			away_timeouts: self.context.away_timeouts,
		};
		let mut event = decode_play(play, &state)?;

		if !self.opening_kickoff_decided && event.drive == 0 {
			self.opening_kickoff_decided = true;
			self.context.home_opening_kickoff = category.family() == PlayFamily::Kickoff && posteam_side == TeamSide::Home;
		}
		self.stamp(&mut event);

		self.context.home_score = event.total_home_score;
		self.context.away_score = event.total_away_score;
		self.context.home_timeouts = event.home_timeouts_remaining;
		self.context.away_timeouts = event.away_timeouts_remaining;
		self.previous = Some(PreviousPlay::from_event(&event, category.family(), down_and_distance));
		Ok(event)
	}

	fn stamp(&self, event: &mut DecodedEvent) {
		event.season = self.context.season;
		event.season_type = self.context.season_type.clone();
		event.week = self.context.week;
		event.game_id = self.context.game_id;
		event.home_team = self.context.matchup.home.abbreviation.clone();
		event.away_team = self.context.matchup.away.abbreviation.clone();
		event.home_opening_kickoff = self.context.home_opening_kickoff;
	}

	fn next_down(&self, family: PlayFamily, posteam: &str, yardline_100: &FieldPosition) -> DownAndDistance {
		if !family.has_down() {
			return DownAndDistance::none();
		}
		let Some(previous) = &self.previous else {
			return DownAndDistance::first_and_ten(yardline_100);
		};
		if previous.posteam != posteam || previous.ends_series() {
			return DownAndDistance::first_and_ten(yardline_100);
		}

		let field_change = previous.yardline_100.zip(yardline_100.absolute()).map(|(before, now)| before - now);
		let Some(down) = previous.down_and_distance.down else {
			return DownAndDistance::first_and_ten(yardline_100);
		};

		if previous.replayed {
			let ydstogo = previous.down_and_distance.ydstogo - field_change.unwrap_or(0);
			if ydstogo <= 0 {
				return DownAndDistance::first_and_ten(yardline_100);
			}
			return DownAndDistance::new(down, ydstogo);
		}

		let gained = field_change.or(previous.yards_gained).unwrap_or(0);
		let ydstogo = previous.down_and_distance.ydstogo - gained;
		if ydstogo <= 0 {
			return DownAndDistance::first_and_ten(yardline_100);
		}
		match down.next() {
			Some(next) => DownAndDistance::new(next, ydstogo),
			None => {
				warn!(posteam, down = %down, ydstogo, "Down series ran past fourth down, restarting at first and ten");
				DownAndDistance::first_and_ten(yardline_100)
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::schema::{Down, Matchup, ScheduledGame, Team};

	fn tracker() -> GameTracker {
		let game = ScheduledGame {
			event_id: 6001,
			fixture_id: Some(9001),
			event_type_name: "Regular Season".to_string(),
			team_1_score: Some(17),
			team_2_score: Some(10),
			week: Some(3),
		};
		let matchup = Matchup::new(Team::new(10, "HAM"), Team::new(20, "OTT"));
		GameTracker::new(GameContext::new(2024, &game, 9001, matchup))
	}

	fn play(id: &str, team_id: i64, (play_type, sub_type): (&str, Option<&str>), start: &str, description: &str) -> RawPlay {
		RawPlay {
			play_type: play_type.to_string(),
			sub_type: sub_type.map(str::to_string),
			description: description.to_string(),
			team_id,
			id: id.to_string(),
			timestamp: 0,
			clock: "10:00".to_string(),
			phase: "Q1".to_string(),
			phase_qualifier: 0,
			play_start_position: start.to_string(),
			is_scoring: false,
		}
	}

	#[test]
	fn test_down_series_progression() {
		let mut tracker = tracker();
		// Newest first, as delivered.
		let plays = vec![
			play("1-4", 20, ("run", None), "OTT 48", "#20 A.Back rush left for 3 yards to the OTT 51 (#55 B.Lee)"),
			play("1-3", 20, ("pass", Some("completePass")), "OTT 40", "#9 J.Smith pass complete short right to #88 T.Jones for 8 yards to the OTT 48 (#55 B.Lee)"),
			play("1-2", 20, ("run", None), "OTT 35", "#20 A.Back rush right for 5 yards to the OTT 40 (#44 C.Doe)"),
			play("0-1", 10, ("kickoff", None), "HAM 35", "#3 L.Kicker kicks off 60 yards to the OTT 15, #20 K.Return returns 20 yards to the OTT 35 (#55 B.Lee)"),
		];

		let events = tracker.process_quarter(Phase::Q1, &plays).unwrap();
		let downs: Vec<_> = events.iter().map(|event| (event.down, event.ydstogo)).collect();
		assert_eq!(downs, vec![(None, None), (Some(1), Some(10)), (Some(2), Some(5)), (Some(1), Some(10))]);
		let drives: Vec<_> = events.iter().map(|event| event.drive).collect();
		assert_eq!(drives, vec![0, 1, 1, 1]);
		assert!(events[2].first_down_pass);
		assert!(events.iter().all(|event| event.home_opening_kickoff));
		assert!(events.iter().all(|event| event.game_id == 6001 && event.season == 2024 && event.week == Some(3)));
		assert_eq!(events[1].posteam, "OTT");
		assert_eq!(events[1].defteam, "HAM");
		assert_eq!(events[0].posteam, "HAM");
	}

	#[test]
	fn test_penalty_replays_down_with_shifted_distance() {
		let mut tracker = tracker();
		let plays = vec![
			play("2-3", 20, ("run", None), "OTT 30", "#20 A.Back rush left for 2 yards to the OTT 32"),
			play("2-2", 20, ("penalty", Some("penalty")), "OTT 35", "PENALTY OTT Offside, 5 yards"),
			play("2-1", 20, ("run", None), "OTT 32", "#20 A.Back rush left for 3 yards to the OTT 35"),
		];

		let events = tracker.process_quarter(Phase::Q2, &plays).unwrap();
		assert_eq!(events[1].down, Some(2));
		assert_eq!(events[1].ydstogo, Some(7));
		assert_eq!(events[2].down, Some(2));
		assert_eq!(events[2].ydstogo, Some(12));
	}

	#[test]
	fn test_unknown_team_is_rejected() {
		let mut tracker = tracker();
		let plays = vec![play("1-1", 99, ("run", None), "OTT 35", "#20 A.Back rush left for 3 yards")];
		let err = tracker.process_quarter(Phase::Q1, &plays).unwrap_err();
		assert!(matches!(err, DecodeError::UnknownTeam { team_id: 99, .. }));
	}

	#[test]
	fn test_third_quarter_resets_timeouts() {
		let mut tracker = tracker();
		let first_half = vec![play("4-2", 20, ("run", None), "OTT 35", "#20 A.Back rush left for 3 yards. Timeout #1 by OTT")];
		let events = tracker.process_quarter(Phase::Q2, &first_half).unwrap();
		assert_eq!(events[0].away_timeouts_remaining, 1);
		assert_eq!(tracker.context().away_timeouts, 1);

		let second_half = vec![play("5-1", 10, ("run", None), "HAM 35", "#30 B.Runner rush left for 3 yards")];
		let events = tracker.process_quarter(Phase::Q3, &second_half).unwrap();
		assert_eq!(events[0].away_timeouts_remaining, 2);
		assert_eq!(events[0].down, Some(Down::First.number()));
	}

	#[test]
	fn test_scores_carry_between_plays() {
		let mut tracker = tracker();
		let plays = vec![
			play("3-2", 20, ("onepoint", Some("success")), "HAM 25", "#3 L.Kicker convert is good"),
			play("3-1", 20, ("run", Some("touchdown")), "HAM 3", "#20 A.Back rush left for 3 yards, touchdown"),
		];

		let events = tracker.process_quarter(Phase::Q1, &plays).unwrap();
		assert_eq!(events[0].total_away_score, 6);
		assert!(events[0].rush_touchdown);
		assert_eq!(events[1].posteam_score, 6);
		assert_eq!(events[1].total_away_score, 7);
		assert_eq!(tracker.context().away_score, 7);
		assert_eq!(events[1].down, None);
	}
}
