use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringEventType {
	Touchdown,
	FieldGoal,
	Convert,
	TwoPointConversion,
	DefensiveConversion,
	Safety,
	Rouge,
}

impl ScoringEventType {
	pub fn points(self) -> u32 {
		match self {
			ScoringEventType::Touchdown => 6,
			ScoringEventType::FieldGoal => 3,
			ScoringEventType::TwoPointConversion | ScoringEventType::DefensiveConversion | ScoringEventType::Safety => 2,
			ScoringEventType::Convert | ScoringEventType::Rouge => 1,
		}
	}
}

impl fmt::Display for ScoringEventType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let label = match self {
			ScoringEventType::Touchdown => "touchdown",
			ScoringEventType::FieldGoal => "field goal",
			ScoringEventType::Convert => "convert",
			ScoringEventType::TwoPointConversion => "two-point convert",
			ScoringEventType::DefensiveConversion => "defensive conversion",
			ScoringEventType::Safety => "safety",
			ScoringEventType::Rouge => "rouge",
		};
		f.write_str(label)
	}
}

/// Which side of the current play a score is credited to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringSide {
	Posteam,
	Defteam,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringEvent {
	pub event_type: ScoringEventType,
	pub side: ScoringSide,
}

impl ScoringEvent {
	pub fn new(event_type: ScoringEventType, side: ScoringSide) -> Self {
		ScoringEvent { event_type, side }
	}
}

/// Points added by one play, split by possession.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreDelta {
	pub posteam: u32,
	pub defteam: u32,
}

impl ScoreDelta {
	pub fn from_events(events: &[ScoringEvent]) -> Self {
		events.iter().fold(ScoreDelta::default(), |mut delta, event| {
			match event.side {
				ScoringSide::Posteam => delta.posteam += event.event_type.points(),
				ScoringSide::Defteam => delta.defteam += event.event_type.points(),
			}
			delta
		})
	}

	pub fn is_empty(&self) -> bool {
		self.posteam == 0 && self.defteam == 0
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_points_per_event() {
		let test_cases = vec![
			(ScoringEventType::Touchdown, 6),
			(ScoringEventType::FieldGoal, 3),
			(ScoringEventType::Convert, 1),
			(ScoringEventType::TwoPointConversion, 2),
			(ScoringEventType::DefensiveConversion, 2),
			(ScoringEventType::Safety, 2),
			(ScoringEventType::Rouge, 1),
		];

		for (event_type, expected) in test_cases {
			assert_eq!(event_type.points(), expected, "Failed for {event_type}");
		}
	}

	#[test]
	fn test_delta_splits_by_side() {
		let events = vec![
			ScoringEvent::new(ScoringEventType::Touchdown, ScoringSide::Defteam),
			ScoringEvent::new(ScoringEventType::Rouge, ScoringSide::Posteam),
		];
		assert_eq!(ScoreDelta::from_events(&events), ScoreDelta { posteam: 1, defteam: 6 });
		assert!(ScoreDelta::from_events(&[]).is_empty());
	}
}
