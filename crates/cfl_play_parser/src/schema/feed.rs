use crate::error::FeedError;
use crate::schema::{Matchup, Phase, RawPlay, Team};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;

/// Every game-tracker response wraps its payload in `data`.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedEnvelope<T> {
	pub data: T,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompetitorDetails {
	#[serde(default)]
	pub abbreviation: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competitor {
	pub competitor_id: i64,
	pub details: CompetitorDetails,
}

/// Played phases show up either as bare labels or as small objects.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PlayedPhase {
	Label(String),
	Detailed {
		#[serde(alias = "phase", alias = "phaseName")]
		name: String,
	},
}

impl PlayedPhase {
	pub fn label(&self) -> &str {
		match self {
			PlayedPhase::Label(label) => label,
			PlayedPhase::Detailed { name } => name,
		}
	}

	pub fn is_overtime(&self) -> bool {
		let label = self.label().trim();
		label.starts_with("OT") || label.eq_ignore_ascii_case("overtime") || label.starts_with("Overtime")
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchInfo {
	pub home_team: Competitor,
	pub away_team: Competitor,
	#[serde(default)]
	pub played_phases: Vec<PlayedPhase>,
}

impl MatchInfo {
	pub fn matchup(&self) -> Matchup {
		Matchup::new(
			Team::new(self.home_team.competitor_id, self.home_team.details.abbreviation.clone()),
			Team::new(self.away_team.competitor_id, self.away_team.details.abbreviation.clone()),
		)
	}

	pub fn overtime_count(&self) -> usize {
		self.played_phases.iter().filter(|phase| phase.is_overtime()).count()
	}
}

/// Play-by-play payload for one requested phase.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayByPlayResponse {
	#[serde(default)]
	pub match_info: Option<MatchInfo>,
	#[serde(default)]
	pub play_by_play_info: HashMap<String, Vec<RawPlay>>,
}

impl PlayByPlayResponse {
	pub fn require_match_info(&self, fixture_id: i64) -> Result<&MatchInfo, FeedError> {
		self.match_info.as_ref().ok_or(FeedError::MissingMatchInfo { fixture_id })
	}

	/// Plays of a phase, newest first; a phase the feed omits has no plays.
	pub fn plays(&self, phase: Phase) -> &[RawPlay] {
		let found = self.play_by_play_info.get(phase.feed_label()).or_else(|| match phase {
			Phase::Overtime => self.play_by_play_info.get("Overtime"),
			_ => None,
		});
		found.map(Vec::as_slice).unwrap_or(&[])
	}
}

/// One entry of the season scoreboard.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ScheduledGame {
	#[serde(rename = "eventId")]
	pub event_id: i64,
	#[serde(rename = "fixtureId", default)]
	pub fixture_id: Option<i64>,
	#[serde(rename = "eventTypeName", default)]
	pub event_type_name: String,
	#[serde(default)]
	pub team_1_score: Option<u32>,
	#[serde(default)]
	pub team_2_score: Option<u32>,
	#[serde(default, deserialize_with = "lenient_week")]
	pub week: Option<u32>,
}

impl ScheduledGame {
	/// Title games are folded into the playoffs.
	pub fn season_type(&self) -> String {
		if self.event_type_name.to_lowercase().contains("grey cup") {
			"Playoffs".to_string()
		} else {
			self.event_type_name.clone()
		}
	}

	pub fn has_been_played(&self) -> bool {
		self.team_1_score.unwrap_or_default() > 0 || self.team_2_score.unwrap_or_default() > 0
	}

	/// Final score as an unordered pair.
	pub fn final_scores(&self) -> Option<(u32, u32)> {
		let (a, b) = (self.team_1_score?, self.team_2_score?);
		Some((a.min(b), a.max(b)))
	}
}

fn lenient_week<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
	D: Deserializer<'de>,
{
	let value = Option::<serde_json::Value>::deserialize(deserializer)?;
	Ok(match value {
		Some(serde_json::Value::Number(number)) => number.as_u64().and_then(|week| u32::try_from(week).ok()),
		Some(serde_json::Value::String(text)) => text.trim().parse().ok(),
		_ => None,
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	const RESPONSE: &str = r##"{
		"data": {
			"matchInfo": {
				"homeTeam": {"competitorId": 41, "details": {"abbreviation": "OTT"}},
				"awayTeam": {"competitorId": 42, "details": {"abbreviation": "HAM"}},
				"playedPhases": ["Q1", "Q2", "Q3", "Q4", "OT"]
			},
			"playByPlayInfo": {
				"Q1": [
					{"type": "kickoff", "subType": null, "teamId": 41, "id": "0-1", "phase": "Q1", "clock": "15:00",
					 "description": "#3 L.Haggerty kicks off 65 yards to the HAM 10"}
				]
			}
		}
	}"##;

	#[test]
	fn test_response_parses_match_info() {
		let envelope: FeedEnvelope<PlayByPlayResponse> = serde_json::from_str(RESPONSE).unwrap();
		let response = envelope.data;
		let info = response.require_match_info(9).unwrap();
		let matchup = info.matchup();
		assert_eq!(matchup.home.abbreviation, "OTT");
		assert_eq!(matchup.away.id, 42);
		assert_eq!(info.overtime_count(), 1);
		assert_eq!(response.plays(Phase::Q1).len(), 1);
		assert!(response.plays(Phase::Q2).is_empty());
	}

	#[test]
	fn test_missing_match_info() {
		let response = PlayByPlayResponse::default();
		assert!(matches!(response.require_match_info(9), Err(FeedError::MissingMatchInfo { fixture_id: 9 })));
	}

	#[test]
	fn test_played_phase_objects() {
		let info: MatchInfo = serde_json::from_str(
			r#"{"homeTeam": {"competitorId": 1, "details": {}}, "awayTeam": {"competitorId": 2, "details": {}},
			    "playedPhases": [{"name": "Q4"}, {"phase": "OT1"}, {"phase": "OT2"}]}"#,
		)
		.unwrap();
		assert_eq!(info.overtime_count(), 2);
	}

	#[test]
	fn test_schedule_entries() {
		let games: Vec<ScheduledGame> = serde_json::from_str(
			r#"[
				{"eventId": 6201, "fixtureId": 11223, "eventTypeName": "Grey Cup", "team_1_score": 24, "team_2_score": 23, "week": "22"},
				{"eventId": 6202, "fixtureId": null, "eventTypeName": "Regular Season", "team_1_score": 0, "team_2_score": 0, "week": "TBD"}
			]"#,
		)
		.unwrap();

		assert_eq!(games[0].season_type(), "Playoffs");
		assert_eq!(games[0].week, Some(22));
		assert_eq!(games[0].final_scores(), Some((23, 24)));
		assert_eq!(games[1].season_type(), "Regular Season");
		assert_eq!(games[1].week, None);
		assert!(!games[1].has_been_played());
	}
}
