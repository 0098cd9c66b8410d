use crate::schema::DecodedEvent;
use serde::Deserialize;
use std::collections::HashMap;
use strsim::jaro_winkler;

const SURNAME_SIMILARITY: f64 = 0.92;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RosterEntry {
	pub player_id: i64,
	pub first_name: String,
	pub last_name: String,
	pub team: String,
}

/// A player reference as typed by the statistician, split into initials and surname.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameKey {
	pub initials: String,
	pub surname: String,
}

impl NameKey {
	/// `#9 J.Smith`, `J. Smith` and `Joh.Smith` all normalise to initials + lower-cased surname.
	pub fn parse(name: &str) -> Option<Self> {
		let name = name.trim();
		let name = match name.strip_prefix('#') {
			Some(rest) => rest.trim_start_matches(|c: char| c.is_ascii_digit()).trim_start(),
			None => name,
		};
		let (initials, surname) = name.split_once('.')?;
		let initials = initials.trim().to_lowercase();
		let surname = surname.trim().to_lowercase();
		if initials.is_empty() || surname.is_empty() {
			return None;
		}
		Some(NameKey { initials, surname })
	}
}

/// Name to player id lookup, scoped by team abbreviation.
#[derive(Debug, Clone, Default)]
pub struct Roster {
	by_team: HashMap<String, Vec<RosterEntry>>,
}

impl Roster {
	pub fn new(entries: impl IntoIterator<Item = RosterEntry>) -> Self {
		let mut by_team: HashMap<String, Vec<RosterEntry>> = HashMap::new();
		for entry in entries {
			by_team.entry(entry.team.to_uppercase()).or_default().push(entry);
		}
		Roster { by_team }
	}

	pub fn len(&self) -> usize {
		self.by_team.values().map(Vec::len).sum()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn resolve(&self, team: &str, name: &str) -> Option<i64> {
		let key = NameKey::parse(name)?;
		let players = self.by_team.get(&team.to_uppercase())?;

		let exact: Vec<&RosterEntry> = players
			.iter()
			.filter(|player| player.last_name.to_lowercase() == key.surname && player.first_name.to_lowercase().starts_with(&key.initials))
			.collect();
		if let [only] = exact.as_slice() {
			return Some(only.player_id);
		}

		let initial = key.initials.chars().next()?;
		let close: Vec<&RosterEntry> = players
			.iter()
			.filter(|player| player.first_name.to_lowercase().starts_with(initial))
			.filter(|player| jaro_winkler(&player.last_name.to_lowercase(), &key.surname) >= SURNAME_SIMILARITY)
			.collect();
		match close.as_slice() {
			[only] => Some(only.player_id),
			_ => None,
		}
	}

	/// Fills the offensive `*_player_id` columns from the names already on the event.
	pub fn annotate(&self, event: &mut DecodedEvent) {
		let team = event.posteam.clone();
		let lookup = |name: &Option<String>| name.as_deref().and_then(|name| self.resolve(&team, name));
		event.passer_player_id = lookup(&event.passer_player_name);
		event.receiver_player_id = lookup(&event.receiver_player_name);
		event.rusher_player_id = lookup(&event.rusher_player_name);
		event.kicker_player_id = lookup(&event.kicker_player_name);
		event.punter_player_id = lookup(&event.punter_player_name);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn roster() -> Roster {
		let entry = |player_id, first_name: &str, last_name: &str, team: &str| RosterEntry {
			player_id,
			first_name: first_name.to_string(),
			last_name: last_name.to_string(),
			team: team.to_string(),
		};
		Roster::new(vec![
			entry(1, "John", "Smith", "OTT"),
			entry(2, "Jordan", "Smith", "OTT"),
			entry(3, "Tyler", "Jones", "OTT"),
			entry(4, "Brandon", "St-Pierre", "HAM"),
			entry(5, "Tim", "Smith", "HAM"),
		])
	}

	#[test]
	fn test_name_variants() {
		let roster = roster();
		let test_cases = vec![
			(("OTT", "#9 Joh.Smith"), Some(1)),
			(("OTT", "Jor.Smith"), Some(2)),
			(("OTT", "T. Jones"), Some(3)),
			(("OTT", "#88 T.Jones"), Some(3)),
			(("HAM", "B.St-Pierre"), Some(4)),
			(("HAM", "T.Smith"), Some(5)),
			(("OTT", "J.Smith"), None),
			(("BC", "T.Jones"), None),
			(("OTT", "Jones"), None),
		];

		for ((team, name), expected) in test_cases {
			assert_eq!(roster.resolve(team, name), expected, "Failed for input: {team} {name}");
		}
	}

	#[test]
	fn test_surname_typo_falls_back_to_similarity() {
		let roster = roster();
		assert_eq!(roster.resolve("OTT", "T.Jonse"), Some(3));
		assert_eq!(roster.resolve("HAM", "B.StPierre"), Some(4));
	}

	#[test]
	fn test_annotate_uses_possession_team() {
		let roster = roster();
		let mut event = DecodedEvent {
			posteam: "OTT".to_string(),
			passer_player_name: Some("Joh.Smith".to_string()),
			receiver_player_name: Some("T.Jones".to_string()),
			..DecodedEvent::default()
		};
		roster.annotate(&mut event);
		assert_eq!(event.passer_player_id, Some(1));
		assert_eq!(event.receiver_player_id, Some(3));
		assert_eq!(event.rusher_player_id, None);
	}
}
