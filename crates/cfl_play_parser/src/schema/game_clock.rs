use crate::error::GameClockError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

const QUARTER_SECONDS: u32 = 900;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Phase {
	Q1,
	Q2,
	Q3,
	Q4,
	Overtime,
}

impl Phase {
	pub const REGULATION: [Phase; 4] = [Phase::Q1, Phase::Q2, Phase::Q3, Phase::Q4];

	pub fn quarter(self) -> u8 {
		match self {
			Phase::Q1 => 1,
			Phase::Q2 => 2,
			Phase::Q3 => 3,
			Phase::Q4 => 4,
			Phase::Overtime => 5,
		}
	}

	/// Label used by the play-by-play feed to key this phase.
	pub fn feed_label(self) -> &'static str {
		match self {
			Phase::Q1 => "Q1",
			Phase::Q2 => "Q2",
			Phase::Q3 => "Q3",
			Phase::Q4 => "Q4",
			Phase::Overtime => "OT",
		}
	}

	pub fn game_half(self) -> GameHalf {
		match self {
			Phase::Q1 | Phase::Q2 => GameHalf::Half1,
			Phase::Q3 | Phase::Q4 => GameHalf::Half2,
			Phase::Overtime => GameHalf::Overtime,
		}
	}

	fn half_offset(self) -> Option<u32> {
		match self {
			Phase::Q1 | Phase::Q3 => Some(QUARTER_SECONDS),
			Phase::Q2 | Phase::Q4 => Some(0),
			Phase::Overtime => None,
		}
	}

	fn game_offset(self) -> Option<u32> {
		match self {
			Phase::Q1 => Some(3 * QUARTER_SECONDS),
			Phase::Q2 => Some(2 * QUARTER_SECONDS),
			Phase::Q3 => Some(QUARTER_SECONDS),
			Phase::Q4 => Some(0),
			Phase::Overtime => None,
		}
	}
}

impl FromStr for Phase {
	type Err = GameClockError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim() {
			"Q1" => Ok(Phase::Q1),
			"Q2" => Ok(Phase::Q2),
			"Q3" => Ok(Phase::Q3),
			"Q4" => Ok(Phase::Q4),
			"OT" | "Overtime" => Ok(Phase::Overtime),
			other => Err(GameClockError::invalid_phase_error(other)),
		}
	}
}

impl fmt::Display for Phase {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.feed_label())
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameHalf {
	Half1,
	Half2,
	Overtime,
}

/// Struct to represent minutes (valid range: 0-15)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Minutes(u8);

impl Minutes {
	pub fn new(value: u8) -> Result<Self, GameClockError> {
		if value > 15 {
			Err(GameClockError::invalid_minutes_error(value))
		} else {
			Ok(Minutes(value))
		}
	}
}

impl FromStr for Minutes {
	type Err = GameClockError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let value = s.parse::<u8>()?;
		Minutes::new(value)
	}
}

/// Struct to represent seconds (valid range: 0-59)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seconds(u8);

impl Seconds {
	pub fn new(value: u8) -> Result<Self, GameClockError> {
		if value >= 60 {
			Err(GameClockError::invalid_seconds_error(value))
		} else {
			Ok(Seconds(value))
		}
	}
}

impl FromStr for Seconds {
	type Err = GameClockError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let value = s.parse::<u8>()?;
		Seconds::new(value)
	}
}

/// Time left in the current quarter, as shown by the `MM:SS` feed clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameClock {
	minutes: Minutes,
	seconds: Seconds,
}

impl GameClock {
	pub fn new(minutes: Minutes, seconds: Seconds) -> Self {
		GameClock { minutes, seconds }
	}

	/// Overtime plays and some administrative plays carry an empty clock.
	pub fn parse_optional(s: &str) -> Result<Option<Self>, GameClockError> {
		if s.trim().is_empty() {
			Ok(None)
		} else {
			s.parse().map(Some)
		}
	}

	pub fn seconds_remaining(&self) -> u32 {
		u32::from(self.minutes.0) * 60 + u32::from(self.seconds.0)
	}
}

impl FromStr for GameClock {
	type Err = GameClockError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let (minutes_str, seconds_str) = s.trim().split_once(':').ok_or_else(|| GameClockError::invalid_format_error(s))?;

		let minutes = minutes_str.parse::<Minutes>()?;
		let seconds = seconds_str.parse::<Seconds>()?;

		Ok(GameClock::new(minutes, seconds))
	}
}

impl fmt::Display for GameClock {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:02}:{:02}", self.minutes.0, self.seconds.0)
	}
}

/// Phase plus optional clock, from which the remaining-time columns derive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockReading {
	pub phase: Phase,
	pub clock: Option<GameClock>,
}

impl ClockReading {
	pub fn new(phase: Phase, clock: Option<GameClock>) -> Self {
		ClockReading { phase, clock }
	}

	pub fn quarter_seconds_remaining(&self) -> Option<u32> {
		self.clock.map(|c| c.seconds_remaining())
	}

	pub fn half_seconds_remaining(&self) -> Option<u32> {
		Some(self.quarter_seconds_remaining()? + self.phase.half_offset()?)
	}

	pub fn game_seconds_remaining(&self) -> Option<u32> {
		Some(self.quarter_seconds_remaining()? + self.phase.game_offset()?)
	}
}
