use crate::schema::{Phase, PlayCategory, PlayId, RawPlay};
use std::num::ParseIntError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GameClockError {
	#[error("Invalid phase: {phase}")]
	InvalidPhase { phase: String },

	#[error("Invalid minutes: {minutes}, must be between 0 and 15")]
	InvalidMinutes { minutes: u8 },

	#[error("Invalid seconds: {seconds}, must be between 0 and 59")]
	InvalidSeconds { seconds: u8 },

	#[error("Failed to parse game clock format: {0}")]
	InvalidFormat(String),

	#[error("Parse error occurred for number: {source}")]
	ParseError {
		#[from]
		source: ParseIntError,
	},
}

impl GameClockError {
	pub fn invalid_phase_error(phase: &str) -> Self {
		GameClockError::InvalidPhase { phase: phase.to_string() }
	}

	pub fn invalid_minutes_error(minutes: u8) -> Self {
		GameClockError::InvalidMinutes { minutes }
	}

	pub fn invalid_seconds_error(seconds: u8) -> Self {
		GameClockError::InvalidSeconds { seconds }
	}

	pub fn invalid_format_error(input: &str) -> Self {
		GameClockError::InvalidFormat(input.to_string())
	}
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlayIdError {
	#[error("Play id must look like <drive>-<sequence>, got: {0}")]
	InvalidFormat(String),

	#[error("Play id {0} does not fit the composite encoding")]
	OutOfRange(PlayId),

	#[error("Play id component is not a number: {source}")]
	ParseError {
		#[from]
		source: ParseIntError,
	},
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlayTypeError {
	#[error("Unable to determine play category from ({play_type}, {sub_type:?})")]
	UnknownPlayType { play_type: String, sub_type: Option<String> },
}

impl PlayTypeError {
	pub fn unknown_play_type(play_type: &str, sub_type: Option<&str>) -> Self {
		PlayTypeError::UnknownPlayType {
			play_type: play_type.to_string(),
			sub_type: sub_type.map(str::to_string),
		}
	}
}

/// Why a single play could not be turned into an event.
///
/// Every variant keeps the offending play so the batch that aborts on it can
/// be debugged from the log line alone.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DecodeError {
	#[error("Unrecognized play category ({play_type}, {sub_type:?}) on play {}: {}", .play.id, .play.description)]
	UnrecognizedPlay {
		play_type: String,
		sub_type: Option<String>,
		play: Box<RawPlay>,
	},

	#[error("No {category} pattern matched play {}: {}", .play.id, .play.description)]
	Unmatched { category: PlayCategory, play: Box<RawPlay> },

	#[error("Not yet supported ({feature}) on play {}: {}", .play.id, .play.description)]
	NotYetSupported { feature: &'static str, play: Box<RawPlay> },

	#[error("Invalid play id on play {}: {source}", .play.id)]
	InvalidPlayId { source: PlayIdError, play: Box<RawPlay> },

	#[error("Invalid clock on play {}: {source}", .play.id)]
	InvalidClock { source: GameClockError, play: Box<RawPlay> },

	#[error("Team id {team_id} on play {} is neither the home nor the away team", .play.id)]
	UnknownTeam { team_id: i64, play: Box<RawPlay> },

	#[error("{team} has no timeouts remaining on play {}: {}", .play.id, .play.description)]
	TimeoutsExhausted { team: String, play: Box<RawPlay> },
}

impl DecodeError {
	pub fn unrecognized(err: PlayTypeError, play: &RawPlay) -> Self {
		let PlayTypeError::UnknownPlayType { play_type, sub_type } = err;
		DecodeError::UnrecognizedPlay {
			play_type,
			sub_type,
			play: Box::new(play.clone()),
		}
	}

	pub fn unmatched(category: PlayCategory, play: &RawPlay) -> Self {
		DecodeError::Unmatched {
			category,
			play: Box::new(play.clone()),
		}
	}

	pub fn not_yet_supported(feature: &'static str, play: &RawPlay) -> Self {
		DecodeError::NotYetSupported {
			feature,
			play: Box::new(play.clone()),
		}
	}

	pub fn invalid_play_id(source: PlayIdError, play: &RawPlay) -> Self {
		DecodeError::InvalidPlayId {
			source,
			play: Box::new(play.clone()),
		}
	}

	pub fn invalid_clock(source: GameClockError, play: &RawPlay) -> Self {
		DecodeError::InvalidClock {
			source,
			play: Box::new(play.clone()),
		}
	}

	pub fn unknown_team(team_id: i64, play: &RawPlay) -> Self {
		DecodeError::UnknownTeam {
			team_id,
			play: Box::new(play.clone()),
		}
	}

	pub fn timeouts_exhausted(team: &str, play: &RawPlay) -> Self {
		DecodeError::TimeoutsExhausted {
			team: team.to_string(),
			play: Box::new(play.clone()),
		}
	}

	/// The play that could not be decoded.
	pub fn play(&self) -> &RawPlay {
		match self {
			DecodeError::UnrecognizedPlay { play, .. }
			| DecodeError::Unmatched { play, .. }
			| DecodeError::NotYetSupported { play, .. }
			| DecodeError::InvalidPlayId { play, .. }
			| DecodeError::InvalidClock { play, .. }
			| DecodeError::UnknownTeam { play, .. }
			| DecodeError::TimeoutsExhausted { play, .. } => play,
		}
	}
}

#[derive(Debug, Error)]
pub enum FeedError {
	#[error("Request failed: {0}")]
	Transport(String),

	#[error("Malformed feed payload for fixture {fixture_id} ({phase}): {message}")]
	Malformed { fixture_id: i64, phase: String, message: String },

	#[error("Feed for fixture {fixture_id} has no match info")]
	MissingMatchInfo { fixture_id: i64 },

	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	Json(#[from] serde_json::Error),
}

impl FeedError {
	pub fn malformed(fixture_id: i64, phase: &str, message: impl Into<String>) -> Self {
		FeedError::Malformed {
			fixture_id,
			phase: phase.to_string(),
			message: message.into(),
		}
	}

	/// Transient failures get one more attempt after the backoff.
	pub fn is_retryable(&self) -> bool {
		matches!(self, FeedError::Transport(_) | FeedError::Malformed { .. } | FeedError::MissingMatchInfo { .. })
	}
}

#[derive(Debug, Error)]
pub enum AssemblyError {
	#[error("Failed to decode {phase} of fixture {fixture_id}: {source}")]
	Decode {
		fixture_id: i64,
		phase: Phase,
		#[source]
		source: DecodeError,
	},

	#[error(transparent)]
	Feed(#[from] FeedError),

	#[error("Fixture {fixture_id} played {count} overtime periods, only a single overtime is supported")]
	MultipleOvertimes { fixture_id: i64, count: usize },
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample_play() -> RawPlay {
		RawPlay {
			play_type: "pass".to_string(),
			sub_type: Some("lateral".to_string()),
			description: "#9 J.Smith pass complete".to_string(),
			team_id: 1,
			id: "3-7".to_string(),
			timestamp: 0,
			clock: "12:00".to_string(),
			phase: "Q1".to_string(),
			phase_qualifier: 0,
			play_start_position: "OTT 35".to_string(),
			is_scoring: false,
		}
	}

	#[test]
	fn test_decode_error_keeps_offending_play() {
		let play = sample_play();
		let err = DecodeError::not_yet_supported("timeouts", &play);
		assert_eq!(err.play(), &play);
		assert_eq!(err.to_string(), "Not yet supported (timeouts) on play 3-7: #9 J.Smith pass complete");
	}

	#[test]
	fn test_unrecognized_carries_tags() {
		let play = sample_play();
		let err = DecodeError::unrecognized(PlayTypeError::unknown_play_type("pass", Some("lateral")), &play);
		match err {
			DecodeError::UnrecognizedPlay { play_type, sub_type, .. } => {
				assert_eq!(play_type, "pass");
				assert_eq!(sub_type.as_deref(), Some("lateral"));
			}
			other => panic!("unexpected error {other:?}"),
		}
	}

	#[test]
	fn test_retryable_feed_errors() {
		assert!(FeedError::MissingMatchInfo { fixture_id: 1 }.is_retryable());
		assert!(FeedError::malformed(1, "Q1", "bad json").is_retryable());
		assert!(!FeedError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone")).is_retryable());
	}
}
