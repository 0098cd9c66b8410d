use crate::game_state::PlayState;
use crate::parsers::patterns::players_in;
use crate::schema::{resolve_yardline, DecodedEvent, PlayCategory, PlayFamily, RawPlay, ScoringEvent};

/// Whoever holds the ball at the end of the phrase decoded so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BallCarrier {
	pub name: Option<String>,
	pub team: String,
}

/// Mutable working copy of one play while its clauses are applied.
pub struct PlayBuilder<'a> {
	pub play: &'a RawPlay,
	pub state: &'a PlayState,
	pub category: PlayCategory,
	pub event: DecodedEvent,
	pub carrier: Option<BallCarrier>,
	pub scoring: Vec<ScoringEvent>,
}

impl<'a> PlayBuilder<'a> {
	pub fn new(play: &'a RawPlay, state: &'a PlayState, category: PlayCategory) -> Self {
		let down = state.down_and_distance.down;
		let mut event = DecodedEvent {
			drive: state.drive,
			posteam: state.posteam.clone(),
			posteam_type: Some(state.posteam_side),
			defteam: state.defteam.clone(),
			side_of_field: state.side_of_field.clone(),
			yardline_100: state.yardline_100.absolute(),
			quarter: state.clock.phase.quarter(),
			game_half: Some(state.clock.phase.game_half()),
			time: state.clock.clock.map(|clock| clock.to_string()),
			quarter_seconds_remaining: state.clock.quarter_seconds_remaining(),
			half_seconds_remaining: state.clock.half_seconds_remaining(),
			game_seconds_remaining: state.clock.game_seconds_remaining(),
			down: down.map(|d| d.number()),
			ydstogo: down.map(|_| state.down_and_distance.ydstogo),
			goal_to_go: state.goal_to_go(),
			desc: play.description.clone(),
			play_type: category.family().label().to_string(),
			raw_type: play.play_type.clone(),
			raw_sub_type: play.sub_type.clone(),
			home_timeouts_remaining: state.home_timeouts,
			away_timeouts_remaining: state.away_timeouts,
			posteam_timeouts_remaining: state.posteam_timeouts(),
			defteam_timeouts_remaining: state.defteam_timeouts(),
			posteam_score: state.posteam_score,
			defteam_score: state.defteam_score,
			score_differential: state.score_differential(),
			..DecodedEvent::default()
		};

		match category.family() {
			PlayFamily::Pass | PlayFamily::Sack => event.is_pass = true,
			PlayFamily::Run => event.is_rush = true,
			PlayFamily::Kneel => event.is_kneel = true,
			PlayFamily::Fumble => event.is_fumble_only = true,
			PlayFamily::Punt => event.is_punt = true,
			PlayFamily::Kickoff => event.is_kickoff = true,
			PlayFamily::FieldGoal => event.is_field_goal_attempt = true,
			PlayFamily::OnePoint => event.is_extra_point_attempt = true,
			PlayFamily::TwoPoint => event.is_two_point_attempt = true,
			PlayFamily::Penalty => event.is_penalty_only = true,
		}

		PlayBuilder {
			play,
			state,
			category,
			event,
			carrier: None,
			scoring: Vec::new(),
		}
	}

	pub fn family(&self) -> PlayFamily {
		self.category.family()
	}

	pub fn posteam(&self) -> &str {
		&self.state.posteam
	}

	pub fn defteam(&self) -> &str {
		&self.state.defteam
	}

	/// Spot resolved from the possession team's side.
	pub fn resolve(&self, spot: &str) -> Option<i32> {
		resolve_yardline(spot, &self.state.posteam).absolute()
	}

	pub fn set_gain(&mut self, yards: Option<i32>) {
		self.event.yards_gained = yards;
	}

	pub fn carry(&mut self, name: Option<String>, team: &str) {
		self.carrier = Some(BallCarrier { name, team: team.to_string() });
	}

	pub fn carry_for_offense(&mut self, name: Option<String>) {
		let team = self.state.posteam.clone();
		self.carry(name, &team);
	}

	pub fn carry_for_defense(&mut self, name: Option<String>) {
		let team = self.state.defteam.clone();
		self.carry(name, &team);
	}

	pub fn carrier_team(&self) -> &str {
		self.carrier.as_ref().map_or(self.state.posteam.as_str(), |carrier| carrier.team.as_str())
	}

	pub fn carrier_is(&self, name: &str) -> bool {
		self.carrier.as_ref().and_then(|carrier| carrier.name.as_deref()) == Some(name)
	}

	/// Tacklers on the primary action: one name is solo, two are assisted.
	pub fn primary_tacklers(&mut self, list: Option<String>) {
		let names = list.as_deref().map(players_in).unwrap_or_default();
		match names.as_slice() {
			[] => {}
			[solo] => self.event.solo_tackle_1_player_name = Some(solo.clone()),
			[first, second, ..] => {
				self.event.assist_tackle_1_player_name = Some(first.clone());
				self.event.assist_tackle_2_player_name = Some(second.clone());
			}
		}
	}

	/// Tacklers after a fumble return or lateral.
	pub fn secondary_tacklers(&mut self, list: Option<String>) {
		let names = list.as_deref().map(players_in).unwrap_or_default();
		if let Some(first) = names.into_iter().next() {
			if self.event.solo_tackle_2_player_name.is_none() {
				self.event.solo_tackle_2_player_name = Some(first);
			}
		}
	}

	pub fn first_tackler(&self) -> Option<String> {
		self.event
			.solo_tackle_1_player_name
			.clone()
			.or_else(|| self.event.assist_tackle_1_player_name.clone())
			.or_else(|| self.event.sack_player_name.clone())
			.or_else(|| self.event.half_sack_1_player_name.clone())
	}

	pub fn has_tackler(&self) -> bool {
		self.event.solo_tackle_1_player_name.is_some() || self.event.assist_tackle_1_player_name.is_some()
	}

	pub fn finish(self) -> DecodedEvent {
		self.event
	}
}
