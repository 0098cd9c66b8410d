use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamSide {
	Home,
	Away,
}

impl TeamSide {
	pub fn opposite(self) -> Self {
		match self {
			TeamSide::Home => TeamSide::Away,
			TeamSide::Away => TeamSide::Home,
		}
	}
}

impl fmt::Display for TeamSide {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			TeamSide::Home => f.write_str("home"),
			TeamSide::Away => f.write_str("away"),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
	pub id: i64,
	pub abbreviation: String,
}

impl Team {
	pub fn new(id: i64, abbreviation: impl Into<String>) -> Self {
		Team {
			id,
			abbreviation: abbreviation.into(),
		}
	}
}

/// The two competitors of a game, keyed by feed competitor id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matchup {
	pub home: Team,
	pub away: Team,
}

impl Matchup {
	pub fn new(home: Team, away: Team) -> Self {
		Matchup { home, away }
	}

	pub fn team(&self, side: TeamSide) -> &Team {
		match side {
			TeamSide::Home => &self.home,
			TeamSide::Away => &self.away,
		}
	}

	pub fn abbreviation(&self, side: TeamSide) -> &str {
		&self.team(side).abbreviation
	}

	pub fn side_of_id(&self, team_id: i64) -> Option<TeamSide> {
		if team_id == self.home.id {
			Some(TeamSide::Home)
		} else if team_id == self.away.id {
			Some(TeamSide::Away)
		} else {
			None
		}
	}

	pub fn side_of_abbreviation(&self, abbreviation: &str) -> Option<TeamSide> {
		if abbreviation.eq_ignore_ascii_case(&self.home.abbreviation) {
			Some(TeamSide::Home)
		} else if abbreviation.eq_ignore_ascii_case(&self.away.abbreviation) {
			Some(TeamSide::Away)
		} else {
			None
		}
	}
}
