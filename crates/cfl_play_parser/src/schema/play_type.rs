use crate::error::PlayTypeError;
use std::fmt;

/// Broad play family; each family shares one rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayFamily {
	Pass,
	Sack,
	Run,
	Kneel,
	Fumble,
	Punt,
	Kickoff,
	FieldGoal,
	OnePoint,
	TwoPoint,
	Penalty,
}

impl PlayFamily {
	/// Value written to the `play_type` column.
	pub fn label(self) -> &'static str {
		match self {
			PlayFamily::Pass | PlayFamily::Sack => "pass",
			PlayFamily::Run => "run",
			PlayFamily::Kneel => "qb_kneel",
			PlayFamily::Fumble => "fumble",
			PlayFamily::Punt => "punt",
			PlayFamily::Kickoff => "kickoff",
			PlayFamily::FieldGoal => "field_goal",
			PlayFamily::OnePoint => "extra_point",
			PlayFamily::TwoPoint => "two_point",
			PlayFamily::Penalty => "no_play",
		}
	}

	/// Plays snapped from scrimmage that carry a down.
	pub fn has_down(self) -> bool {
		!matches!(self, PlayFamily::Kickoff | PlayFamily::OnePoint | PlayFamily::TwoPoint)
	}

	pub fn is_kick(self) -> bool {
		matches!(self, PlayFamily::Punt | PlayFamily::Kickoff | PlayFamily::FieldGoal | PlayFamily::OnePoint)
	}
}

/// The `(type, subType)` pair of a feed play, narrowed to the combinations the decoder knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayCategory {
	PassIncomplete,
	PassComplete,
	PassTouchdown,
	PassInterception,
	PassPenalty,
	Sack,
	SackPenalty,
	Run,
	RunTouchdown,
	RunPenalty,
	Kneel,
	KneelPenalty,
	Fumble,
	FumblePenalty,
	Punt,
	PuntSingle,
	PuntPenalty,
	Kickoff,
	KickoffPenalty,
	KickoffSingle,
	FieldGoalSuccess,
	FieldGoalFailed,
	OnePointSuccess,
	OnePointFailed,
	OnePointPenalty,
	TwoPointSuccess,
	TwoPointFailed,
	TwoPointPenalty,
	Penalty,
}

impl PlayCategory {
	pub fn from_tags(play_type: &str, sub_type: Option<&str>) -> Result<Self, PlayTypeError> {
		let category = match (play_type, sub_type) {
			("pass", Some("incompletePass")) => PlayCategory::PassIncomplete,
			("pass", Some("completePass")) => PlayCategory::PassComplete,
			("pass", Some("touchdown")) => PlayCategory::PassTouchdown,
			("pass", Some("interception")) => PlayCategory::PassInterception,
			("pass", Some("penalty")) => PlayCategory::PassPenalty,
			("sack", None) => PlayCategory::Sack,
			("sack", Some("penalty")) => PlayCategory::SackPenalty,
			("run", None) => PlayCategory::Run,
			("run", Some("touchdown")) => PlayCategory::RunTouchdown,
			("run", Some("penalty")) => PlayCategory::RunPenalty,
			("kneel", None) => PlayCategory::Kneel,
			("kneel", Some("penalty")) => PlayCategory::KneelPenalty,
			("fumble", None) => PlayCategory::Fumble,
			("fumble", Some("penalty")) => PlayCategory::FumblePenalty,
			("punt", None) => PlayCategory::Punt,
			("punt", Some("single")) => PlayCategory::PuntSingle,
			("punt", Some("penalty")) => PlayCategory::PuntPenalty,
			("kickoff", None) => PlayCategory::Kickoff,
			("kickoff", Some("penalty")) => PlayCategory::KickoffPenalty,
			("kickoff", Some("single")) => PlayCategory::KickoffSingle,
			("fieldgoal", Some("success")) => PlayCategory::FieldGoalSuccess,
			("fieldgoal", Some("failed")) => PlayCategory::FieldGoalFailed,
			("onepoint", Some("success")) => PlayCategory::OnePointSuccess,
			("onepoint", Some("failed")) => PlayCategory::OnePointFailed,
			("onepoint", Some("penalty")) => PlayCategory::OnePointPenalty,
			("twopoints", Some("success")) => PlayCategory::TwoPointSuccess,
			("twopoints", Some("failed")) => PlayCategory::TwoPointFailed,
			("twopoints", Some("penalty")) => PlayCategory::TwoPointPenalty,
			("penalty", Some("penalty")) => PlayCategory::Penalty,
			_ => return Err(PlayTypeError::unknown_play_type(play_type, sub_type)),
		};
		Ok(category)
	}

	pub fn family(self) -> PlayFamily {
		match self {
			PlayCategory::PassIncomplete | PlayCategory::PassComplete | PlayCategory::PassTouchdown | PlayCategory::PassInterception | PlayCategory::PassPenalty => {
				PlayFamily::Pass
			}
			PlayCategory::Sack | PlayCategory::SackPenalty => PlayFamily::Sack,
			PlayCategory::Run | PlayCategory::RunTouchdown | PlayCategory::RunPenalty => PlayFamily::Run,
			PlayCategory::Kneel | PlayCategory::KneelPenalty => PlayFamily::Kneel,
			PlayCategory::Fumble | PlayCategory::FumblePenalty => PlayFamily::Fumble,
			PlayCategory::Punt | PlayCategory::PuntSingle | PlayCategory::PuntPenalty => PlayFamily::Punt,
			PlayCategory::Kickoff | PlayCategory::KickoffPenalty | PlayCategory::KickoffSingle => PlayFamily::Kickoff,
			PlayCategory::FieldGoalSuccess | PlayCategory::FieldGoalFailed => PlayFamily::FieldGoal,
			PlayCategory::OnePointSuccess | PlayCategory::OnePointFailed | PlayCategory::OnePointPenalty => PlayFamily::OnePoint,
			PlayCategory::TwoPointSuccess | PlayCategory::TwoPointFailed | PlayCategory::TwoPointPenalty => PlayFamily::TwoPoint,
			PlayCategory::Penalty => PlayFamily::Penalty,
		}
	}

	/// Categories whose description must contain a penalty clause.
	pub fn requires_penalty(self) -> bool {
		matches!(
			self,
			PlayCategory::PassPenalty
				| PlayCategory::SackPenalty
				| PlayCategory::RunPenalty
				| PlayCategory::KneelPenalty
				| PlayCategory::FumblePenalty
				| PlayCategory::PuntPenalty
				| PlayCategory::KickoffPenalty
				| PlayCategory::OnePointPenalty
				| PlayCategory::TwoPointPenalty
				| PlayCategory::Penalty
		)
	}

	pub fn is_touchdown(self) -> bool {
		matches!(self, PlayCategory::PassTouchdown | PlayCategory::RunTouchdown)
	}

	pub fn is_single(self) -> bool {
		matches!(self, PlayCategory::PuntSingle | PlayCategory::KickoffSingle)
	}

	/// Feed tags this category was built from.
	pub fn tags(self) -> (&'static str, Option<&'static str>) {
		match self {
			PlayCategory::PassIncomplete => ("pass", Some("incompletePass")),
			PlayCategory::PassComplete => ("pass", Some("completePass")),
			PlayCategory::PassTouchdown => ("pass", Some("touchdown")),
			PlayCategory::PassInterception => ("pass", Some("interception")),
			PlayCategory::PassPenalty => ("pass", Some("penalty")),
			PlayCategory::Sack => ("sack", None),
			PlayCategory::SackPenalty => ("sack", Some("penalty")),
			PlayCategory::Run => ("run", None),
			PlayCategory::RunTouchdown => ("run", Some("touchdown")),
			PlayCategory::RunPenalty => ("run", Some("penalty")),
			PlayCategory::Kneel => ("kneel", None),
			PlayCategory::KneelPenalty => ("kneel", Some("penalty")),
			PlayCategory::Fumble => ("fumble", None),
			PlayCategory::FumblePenalty => ("fumble", Some("penalty")),
			PlayCategory::Punt => ("punt", None),
			PlayCategory::PuntSingle => ("punt", Some("single")),
			PlayCategory::PuntPenalty => ("punt", Some("penalty")),
			PlayCategory::Kickoff => ("kickoff", None),
			PlayCategory::KickoffPenalty => ("kickoff", Some("penalty")),
			PlayCategory::KickoffSingle => ("kickoff", Some("single")),
			PlayCategory::FieldGoalSuccess => ("fieldgoal", Some("success")),
			PlayCategory::FieldGoalFailed => ("fieldgoal", Some("failed")),
			PlayCategory::OnePointSuccess => ("onepoint", Some("success")),
			PlayCategory::OnePointFailed => ("onepoint", Some("failed")),
			PlayCategory::OnePointPenalty => ("onepoint", Some("penalty")),
			PlayCategory::TwoPointSuccess => ("twopoints", Some("success")),
			PlayCategory::TwoPointFailed => ("twopoints", Some("failed")),
			PlayCategory::TwoPointPenalty => ("twopoints", Some("penalty")),
			PlayCategory::Penalty => ("penalty", Some("penalty")),
		}
	}
}

impl fmt::Display for PlayCategory {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.tags() {
			(play_type, Some(sub_type)) => write!(f, "({play_type}, {sub_type})"),
			(play_type, None) => write!(f, "({play_type}, None)"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const ALL: [PlayCategory; 29] = [
		PlayCategory::PassIncomplete,
		PlayCategory::PassComplete,
		PlayCategory::PassTouchdown,
		PlayCategory::PassInterception,
		PlayCategory::PassPenalty,
		PlayCategory::Sack,
		PlayCategory::SackPenalty,
		PlayCategory::Run,
		PlayCategory::RunTouchdown,
		PlayCategory::RunPenalty,
		PlayCategory::Kneel,
		PlayCategory::KneelPenalty,
		PlayCategory::Fumble,
		PlayCategory::FumblePenalty,
		PlayCategory::Punt,
		PlayCategory::PuntSingle,
		PlayCategory::PuntPenalty,
		PlayCategory::Kickoff,
		PlayCategory::KickoffPenalty,
		PlayCategory::KickoffSingle,
		PlayCategory::FieldGoalSuccess,
		PlayCategory::FieldGoalFailed,
		PlayCategory::OnePointSuccess,
		PlayCategory::OnePointFailed,
		PlayCategory::OnePointPenalty,
		PlayCategory::TwoPointSuccess,
		PlayCategory::TwoPointFailed,
		PlayCategory::TwoPointPenalty,
		PlayCategory::Penalty,
	];

	#[test]
	fn test_every_category_round_trips_through_its_tags() {
		for category in ALL {
			let (play_type, sub_type) = category.tags();
			assert_eq!(PlayCategory::from_tags(play_type, sub_type), Ok(category), "Failed for {category}");
		}
	}

	#[test]
	fn test_unknown_tags_are_rejected() {
		let error_cases = vec![
			("pass", None),
			("pass", Some("lateral")),
			("timeout", None),
			("run", Some("single")),
			("penalty", None),
			("PASS", Some("completePass")),
		];

		for (play_type, sub_type) in error_cases {
			assert_eq!(
				PlayCategory::from_tags(play_type, sub_type),
				Err(PlayTypeError::unknown_play_type(play_type, sub_type)),
				"Expected error for ({play_type}, {sub_type:?})"
			);
		}
	}

	#[test]
	fn test_penalty_categories() {
		let penalties: Vec<_> = ALL.iter().filter(|c| c.requires_penalty()).collect();
		assert_eq!(penalties.len(), 10);
		assert!(!PlayCategory::PuntSingle.requires_penalty());
	}

	#[test]
	fn test_family_labels() {
		assert_eq!(PlayCategory::Sack.family().label(), "pass");
		assert_eq!(PlayCategory::KickoffSingle.family().label(), "kickoff");
		assert_eq!(PlayCategory::Penalty.family().label(), "no_play");
		assert!(!PlayFamily::Kickoff.has_down());
		assert!(PlayFamily::FieldGoal.has_down());
	}

	#[test]
	fn test_display() {
		assert_eq!(PlayCategory::Sack.to_string(), "(sack, None)");
		assert_eq!(PlayCategory::PassComplete.to_string(), "(pass, completePass)");
	}
}
