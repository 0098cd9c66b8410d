use crate::schema::{ClockReading, DownAndDistance, FieldPosition, TeamSide};

/// Situation before the snap, as seen by the decoder.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayState {
	pub posteam_side: TeamSide,
	pub posteam: String,
	pub defteam: String,
	pub posteam_score: u32,
	pub defteam_score: u32,
	pub down_and_distance: DownAndDistance,
	pub yardline_100: FieldPosition,
	pub side_of_field: Option<String>,
	pub clock: ClockReading,
	pub drive: u32,
	pub home_timeouts: u8,
	pub away_timeouts: u8,
}

impl PlayState {
	pub fn timeouts(&self, side: TeamSide) -> u8 {
		match side {
			TeamSide::Home => self.home_timeouts,
			TeamSide::Away => self.away_timeouts,
		}
	}

	pub fn posteam_timeouts(&self) -> u8 {
		self.timeouts(self.posteam_side)
	}

	pub fn defteam_timeouts(&self) -> u8 {
		self.timeouts(self.posteam_side.opposite())
	}

	/// Side of the game owning an abbreviation, if it is one of the two teams on the field.
	pub fn side_of(&self, abbreviation: &str) -> Option<TeamSide> {
		if abbreviation.eq_ignore_ascii_case(&self.posteam) {
			Some(self.posteam_side)
		} else if abbreviation.eq_ignore_ascii_case(&self.defteam) {
			Some(self.posteam_side.opposite())
		} else {
			None
		}
	}

	pub fn score_differential(&self) -> i32 {
		self.posteam_score as i32 - self.defteam_score as i32
	}

	pub fn goal_to_go(&self) -> bool {
		self.down_and_distance.is_goal_to_go(&self.yardline_100)
	}
}
