//! Regex building blocks shared by the rule tables.
//!
//! Every fragment takes the capture group name it should use, since the regex
//! crate rejects a pattern that repeats a group name.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Initial(s), a dot, then the surname: `J.Smith`, `J. Smith`, `Jo.Smith`, `J.St-Pierre`.
pub const NAME: &str = r"[A-Z][A-Za-z]{0,2}\.\s?[A-Z][A-Za-z'\-]+";

pub const DEPTH: &str = r"(?:\s(?P<depth>short|deep))?";
pub const DIRECTION: &str = r"(?:\s(?P<direction>left|middle|right))?";
pub const RUN_LOCATION: &str = r"(?:\s(?P<run_location>left|middle|right|up\sthe\smiddle))?";
pub const RUN_GAP: &str = r"(?:\s(?P<run_gap>end|tackle|guard))?";
pub const RUSH_VERB: &str = r"(?:rushes|rush|runs|run)";
pub const MISS_REASON: &str = r"(?:,\s(?P<miss_reason>wide\sleft|wide\sright|short|hit\sthe\supright|hit\sthe\scrossbar))?";

static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(NAME).unwrap());

/// Matches any description; used by rules that only rely on their guard.
pub static ANYTHING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s).*").unwrap());

/// Optional jersey number followed by a captured name.
pub fn player(group: &str) -> String {
	format!(r"(?:#\d{{1,2}}\s?)?(?P<{group}>{NAME})")
}

/// A spot on the field: `the OTT 35`, `HAM end zone`, `end zone`, `midfield`.
pub fn spot(group: &str) -> String {
	format!(r"(?:the\s)?(?P<{group}>[A-Z]{{2,3}}\s\d{{1,2}}|[A-Z]{{2,3}}\send\szone|end\szone|midfield)")
}

/// `for 12 yards`, `for -3 yards`, `for no gain`, `for a loss of 3 yards`.
pub fn gain(prefix: &str) -> String {
	format!(r"for\s(?:(?P<{prefix}_yds>-?\d+)\syards?|(?P<{prefix}_none>no\sgain)|a\sloss\sof\s(?P<{prefix}_loss>\d+)\syards?)")
}

/// `returns 12 yards`, `returned for no gain`.
pub fn return_yards(prefix: &str) -> String {
	format!(r"(?:returns|returned)\s(?:for\s)?(?:(?P<{prefix}_yds>-?\d+)\syards?|(?P<{prefix}_none>no\sgain))")
}

/// Optional trailing parenthesised tackler list.
pub fn tackles(group: &str) -> String {
	format!(r"(?:\s\((?P<{group}>[^)]*)\))?")
}

pub fn text(caps: &Captures<'_>, group: &str) -> Option<String> {
	caps.name(group).map(|m| m.as_str().trim().to_string())
}

pub fn number(caps: &Captures<'_>, group: &str) -> Option<i32> {
	caps.name(group).and_then(|m| m.as_str().parse().ok())
}

/// Signed yardage of a [`gain`] fragment.
pub fn gained(caps: &Captures<'_>, prefix: &str) -> Option<i32> {
	if let Some(yards) = number(caps, &format!("{prefix}_yds")) {
		return Some(yards);
	}
	if caps.name(&format!("{prefix}_none")).is_some() {
		return Some(0);
	}
	number(caps, &format!("{prefix}_loss")).map(|loss| -loss)
}

/// Yardage of a [`return_yards`] fragment.
pub fn returned(caps: &Captures<'_>, prefix: &str) -> Option<i32> {
	number(caps, &format!("{prefix}_yds")).or_else(|| caps.name(&format!("{prefix}_none")).map(|_| 0))
}

/// Every player name inside a free-text list, in order of appearance.
pub fn players_in(list: &str) -> Vec<String> {
	NAME_RE.find_iter(list).map(|m| m.as_str().to_string()).collect()
}

pub fn is_end_zone(spot: &str) -> bool {
	spot.to_lowercase().contains("end zone")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_player_fragment() {
		let re = Regex::new(&player("name")).unwrap();
		let test_cases = vec![
			("#9 J.Smith", "J.Smith"),
			("#88 T. Jones", "T. Jones"),
			("Jo.Smith", "Jo.Smith"),
			("#23 J.St-Pierre", "J.St-Pierre"),
			("#5 D.O'Neil", "D.O'Neil"),
		];

		for (input, expected) in test_cases {
			let caps = re.captures(input).unwrap();
			assert_eq!(text(&caps, "name").as_deref(), Some(expected), "Failed for input: {input}");
		}
	}

	#[test]
	fn test_spot_fragment() {
		let re = Regex::new(&format!("^{}$", spot("spot"))).unwrap();
		let test_cases = vec![("the OTT 45", "OTT 45"), ("BC 5", "BC 5"), ("the HAM end zone", "HAM end zone"), ("end zone", "end zone"), ("midfield", "midfield")];

		for (input, expected) in test_cases {
			let caps = re.captures(input).unwrap();
			assert_eq!(text(&caps, "spot").as_deref(), Some(expected), "Failed for input: {input}");
		}
	}

	#[test]
	fn test_gain_fragment() {
		let re = Regex::new(&gain("g")).unwrap();
		let test_cases = vec![("for 12 yards", Some(12)), ("for 1 yard", Some(1)), ("for -4 yards", Some(-4)), ("for no gain", Some(0)), ("for a loss of 3 yards", Some(-3))];

		for (input, expected) in test_cases {
			let caps = re.captures(input).unwrap();
			assert_eq!(gained(&caps, "g"), expected, "Failed for input: {input}");
		}
	}

	#[test]
	fn test_players_in_tackle_lists() {
		assert_eq!(players_in("#55 B.Lee"), vec!["B.Lee"]);
		assert_eq!(players_in("#55 B.Lee, #44 C.Doe"), vec!["B.Lee", "C.Doe"]);
		assert_eq!(players_in("B.Lee; C.Doe"), vec!["B.Lee", "C.Doe"]);
		assert_eq!(players_in("B.Lee and C. Doe"), vec!["B.Lee", "C. Doe"]);
		assert!(players_in("").is_empty());
	}
}
