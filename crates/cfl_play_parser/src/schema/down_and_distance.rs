use crate::schema::yards::FieldPosition;
use std::fmt;

pub const FIRST_DOWN_DISTANCE: i32 = 10;

/// CFL downs; a fourth down only appears when a team gambles past third.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Down {
	First,
	Second,
	Third,
	Fourth,
}

impl Down {
	pub fn number(self) -> u8 {
		match self {
			Down::First => 1,
			Down::Second => 2,
			Down::Third => 3,
			Down::Fourth => 4,
		}
	}

	pub fn from_number(value: u8) -> Option<Self> {
		match value {
			1 => Some(Down::First),
			2 => Some(Down::Second),
			3 => Some(Down::Third),
			4 => Some(Down::Fourth),
			_ => None,
		}
	}

	pub fn next(self) -> Option<Self> {
		Down::from_number(self.number() + 1)
	}

	/// Share of the distance a play has to gain to count as successful.
	pub fn success_ratio(self) -> f64 {
		match self {
			Down::First => 0.4,
			Down::Second => 0.6,
			Down::Third | Down::Fourth => 1.0,
		}
	}
}

impl fmt::Display for Down {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let label = match self {
			Down::First => "1st",
			Down::Second => "2nd",
			Down::Third => "3rd",
			Down::Fourth => "4th",
		};
		f.write_str(label)
	}
}

/// Down and yards to go before the snap. Kickoffs and converts carry no down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownAndDistance {
	pub down: Option<Down>,
	pub ydstogo: i32,
}

impl DownAndDistance {
	pub fn new(down: Down, ydstogo: i32) -> Self {
		DownAndDistance { down: Some(down), ydstogo }
	}

	pub fn none() -> Self {
		DownAndDistance { down: None, ydstogo: 0 }
	}

	/// 1st and 10, or 1st and goal when the line to gain is past the goal line.
	pub fn first_and_ten(yardline: &FieldPosition) -> Self {
		let ydstogo = yardline.absolute().map_or(FIRST_DOWN_DISTANCE, |yards| yards.min(FIRST_DOWN_DISTANCE));
		DownAndDistance::new(Down::First, ydstogo)
	}

	pub fn down_number(&self) -> u8 {
		self.down.map_or(0, Down::number)
	}

	pub fn is_goal_to_go(&self, yardline: &FieldPosition) -> bool {
		match (self.down, yardline.absolute()) {
			(Some(_), Some(yards)) => self.ydstogo >= yards,
			_ => false,
		}
	}

	/// Converted on any down once the gain covers the distance.
	pub fn is_converted(&self, yards_gained: i32) -> bool {
		self.down.is_some() && yards_gained >= self.ydstogo
	}

	/// A zero distance counts any positive gain as a success.
	pub fn is_successful(&self, yards_gained: i32) -> Option<bool> {
		let down = self.down?;
		if self.ydstogo == 0 {
			return Some(yards_gained > 0);
		}
		Some(f64::from(yards_gained) / f64::from(self.ydstogo) > down.success_ratio())
	}
}

impl fmt::Display for DownAndDistance {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.down {
			Some(down) => write!(f, "{down} & {}", self.ydstogo),
			None => f.write_str("-"),
		}
	}
}
