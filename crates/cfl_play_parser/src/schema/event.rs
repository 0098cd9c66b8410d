use crate::schema::{GameHalf, TeamSide};
use serde::Serialize;

/// One decoded play, flattened into the columns of the play-by-play table.
///
/// Player fields hold names exactly as the statistician typed them; the
/// `*_player_id` columns are only filled by roster post-processing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DecodedEvent {
	pub season: i32,
	pub season_type: String,
	pub week: Option<u32>,
	pub game_id: i64,
	pub play_id: u64,
	pub drive: u32,
	pub home_team: String,
	pub away_team: String,
	pub home_opening_kickoff: bool,

	pub posteam: String,
	pub posteam_type: Option<TeamSide>,
	pub defteam: String,
	pub side_of_field: Option<String>,
	pub yardline_100: Option<i32>,
	pub quarter: u8,
	pub game_half: Option<GameHalf>,
	pub time: Option<String>,
	pub quarter_seconds_remaining: Option<u32>,
	pub half_seconds_remaining: Option<u32>,
	pub game_seconds_remaining: Option<u32>,
	pub down: Option<u8>,
	pub ydstogo: Option<i32>,
	pub goal_to_go: bool,
	pub desc: String,
	pub play_type: String,
	pub raw_type: String,
	pub raw_sub_type: Option<String>,

	pub is_pass: bool,
	pub is_rush: bool,
	pub is_punt: bool,
	pub is_kickoff: bool,
	pub is_field_goal_attempt: bool,
	pub is_extra_point_attempt: bool,
	pub is_two_point_attempt: bool,
	pub is_penalty_only: bool,
	pub is_fumble_only: bool,
	pub is_kneel: bool,

	pub is_sack: bool,
	pub is_penalty: bool,
	pub is_fumble: bool,
	pub is_interception: bool,
	pub is_touchdown: bool,
	pub is_safety: bool,
	pub is_rouge: bool,
	pub is_complete_pass: bool,
	pub is_incomplete_pass: bool,
	pub is_no_play: bool,
	pub qb_spike: bool,
	pub qb_scramble: bool,
	pub pass_touchdown: bool,
	pub rush_touchdown: bool,
	pub return_touchdown: bool,
	pub first_down_rush: bool,
	pub first_down_pass: bool,
	pub first_down_penalty: bool,
	pub third_down_converted: bool,
	pub third_down_failed: bool,
	pub fourth_down_converted: bool,
	pub fourth_down_failed: bool,
	pub punt_blocked: bool,
	pub punt_inside_twenty: bool,
	pub punt_in_endzone: bool,
	pub punt_out_of_bounds: bool,
	pub kickoff_inside_twenty: bool,
	pub kickoff_in_endzone: bool,
	pub kickoff_out_of_bounds: bool,
	pub onside_kick: bool,
	pub own_kickoff_recovery: bool,
	pub field_goal_blocked: bool,
	pub extra_point_blocked: bool,
	pub defensive_conversion: bool,
	pub fumble_forced: bool,
	pub fumble_not_forced: bool,
	pub fumble_out_of_bounds: bool,
	pub fumble_lost: bool,
	pub penalty_declined: bool,
	pub penalty_offsetting: bool,
	pub tackled_for_loss: bool,
	pub timeout: bool,
	pub success: Option<bool>,

	pub pass_length: Option<String>,
	pub pass_location: Option<String>,
	pub run_location: Option<String>,
	pub run_gap: Option<String>,
	pub field_goal_result: Option<String>,
	pub extra_point_result: Option<String>,
	pub two_point_conv_result: Option<String>,
	pub timeout_team: Option<String>,
	pub td_team: Option<String>,
	pub return_team: Option<String>,
	pub penalty_team: Option<String>,
	pub penalty_type: Option<String>,
	pub field_goal_miss_reason: Option<String>,

	pub yards_gained: Option<i32>,
	pub passing_yards: Option<i32>,
	pub receiving_yards: Option<i32>,
	pub rushing_yards: Option<i32>,
	pub air_yards: Option<i32>,
	pub yards_after_catch: Option<i32>,
	pub return_yards: Option<i32>,
	pub penalty_yards: Option<i32>,
	pub kick_distance: Option<i32>,
	pub fumble_recovery_1_yards: Option<i32>,
	pub fumble_recovery_2_yards: Option<i32>,
	pub lateral_return_yards: Option<i32>,
	pub end_yardline_100: Option<i32>,

	pub passer_player_name: Option<String>,
	pub receiver_player_name: Option<String>,
	pub rusher_player_name: Option<String>,
	pub interception_player_name: Option<String>,
	pub punter_player_name: Option<String>,
	pub kicker_player_name: Option<String>,
	pub punt_returner_player_name: Option<String>,
	pub kickoff_returner_player_name: Option<String>,
	pub field_goal_returner_player_name: Option<String>,
	pub lateral_punt_returner_player_name: Option<String>,
	pub lateral_kickoff_returner_player_name: Option<String>,
	pub lateral_fumble_recovery_player_name: Option<String>,
	pub own_kickoff_recovery_player_name: Option<String>,
	pub blocked_player_name: Option<String>,
	pub pass_defense_1_player_name: Option<String>,
	pub solo_tackle_1_player_name: Option<String>,
	pub solo_tackle_2_player_name: Option<String>,
	pub assist_tackle_1_player_name: Option<String>,
	pub assist_tackle_2_player_name: Option<String>,
	pub sack_player_name: Option<String>,
	pub half_sack_1_player_name: Option<String>,
	pub half_sack_2_player_name: Option<String>,
	pub fumbled_1_team: Option<String>,
	pub fumbled_1_player_name: Option<String>,
	pub fumbled_2_team: Option<String>,
	pub fumbled_2_player_name: Option<String>,
	pub forced_fumble_player_1_player_name: Option<String>,
	pub forced_fumble_player_2_player_name: Option<String>,
	pub fumble_recovery_1_team: Option<String>,
	pub fumble_recovery_1_player_name: Option<String>,
	pub fumble_recovery_2_team: Option<String>,
	pub fumble_recovery_2_player_name: Option<String>,
	pub penalty_player_name: Option<String>,
	pub safety_player_name: Option<String>,
	pub td_player_name: Option<String>,
	pub defensive_conversion_player_name: Option<String>,

	pub passer_player_id: Option<i64>,
	pub receiver_player_id: Option<i64>,
	pub rusher_player_id: Option<i64>,
	pub kicker_player_id: Option<i64>,
	pub punter_player_id: Option<i64>,

	pub home_timeouts_remaining: u8,
	pub away_timeouts_remaining: u8,
	pub posteam_timeouts_remaining: u8,
	pub defteam_timeouts_remaining: u8,
	pub total_home_score: u32,
	pub total_away_score: u32,
	pub posteam_score: u32,
	pub defteam_score: u32,
	pub score_differential: i32,
	pub posteam_score_post: u32,
	pub defteam_score_post: u32,
	pub score_differential_post: i32,

	pub last_updated: Option<String>,
}

impl DecodedEvent {
	/// Exactly one of these is set on every decoded play.
	pub fn primary_flags(&self) -> [bool; 10] {
		[
			self.is_pass,
			self.is_rush,
			self.is_punt,
			self.is_kickoff,
			self.is_field_goal_attempt,
			self.is_extra_point_attempt,
			self.is_two_point_attempt,
			self.is_penalty_only,
			self.is_fumble_only,
			self.is_kneel,
		]
	}

	pub fn is_first_down(&self) -> bool {
		self.first_down_rush || self.first_down_pass || self.first_down_penalty
	}
}
