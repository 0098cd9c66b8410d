use crate::error::PlayIdError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const PLAY_ID_DELIMITER: char = '-';
const SEQUENCE_WIDTH: u32 = 3;

/// One statistician-recorded play as delivered by the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPlay {
	#[serde(rename = "type")]
	pub play_type: String,
	#[serde(default)]
	pub sub_type: Option<String>,
	#[serde(default)]
	pub description: String,
	pub team_id: i64,
	pub id: String,
	#[serde(default)]
	pub timestamp: i64,
	#[serde(default)]
	pub clock: String,
	pub phase: String,
	#[serde(default)]
	pub phase_qualifier: i64,
	#[serde(default)]
	pub play_start_position: String,
	#[serde(default)]
	pub is_scoring: bool,
}

impl RawPlay {
	pub fn play_id(&self) -> Result<PlayId, PlayIdError> {
		self.id.parse()
	}
}

/// `<drive>-<sequence>` identifier of a play inside a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayId {
	pub drive: u32,
	pub sequence: u32,
}

impl PlayId {
	pub fn new(drive: u32, sequence: u32) -> Self {
		PlayId { drive, sequence }
	}

	/// Zero-padded drive (2) and sequence (3) concatenated, read back as an integer.
	/// A longer sequence keeps all of its digits rather than carrying into the drive.
	pub fn composite(&self) -> Result<u64, PlayIdError> {
		let width = self.sequence.checked_ilog10().map_or(1, |log| log + 1).max(SEQUENCE_WIDTH);
		10u64
			.checked_pow(width)
			.and_then(|scale| u64::from(self.drive).checked_mul(scale))
			.and_then(|shifted| shifted.checked_add(u64::from(self.sequence)))
			.ok_or(PlayIdError::OutOfRange(*self))
	}
}

impl FromStr for PlayId {
	type Err = PlayIdError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let (drive, sequence) = s.trim().split_once(PLAY_ID_DELIMITER).ok_or_else(|| PlayIdError::InvalidFormat(s.to_string()))?;

		if drive.is_empty() || sequence.is_empty() {
			return Err(PlayIdError::InvalidFormat(s.to_string()));
		}

		Ok(PlayId::new(drive.parse()?, sequence.parse()?))
	}
}

impl fmt::Display for PlayId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}-{}", self.drive, self.sequence)
	}
}
