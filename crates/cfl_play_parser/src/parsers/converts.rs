use crate::parsers::builder::PlayBuilder;
use crate::parsers::patterns::{player, text, MISS_REASON, RUN_LOCATION, RUSH_VERB};
use crate::parsers::rules::{Action, Guard, Rule};
use crate::schema::{PlayCategory, ScoringEvent, ScoringEventType, ScoringSide};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

const KICK: &str = r"(?i:(?:one-point\s)?convert|extra\spoint)(?:\sattempt)?";
const TWO_POINT: &str = r"for\s(?:the\s)?two-point\sconver(?:t|sion)(?:\sattempt)?";
const RESULT: &str = r"(?:,?\s(?:is\s)?(?P<result>(?i:no\sgood|good|successful|failed)))?";

static CONVERT_GOOD: Lazy<Regex> = Lazy::new(|| Regex::new(&format!(r"{}\s{KICK}\s(?i:is\sgood)", player("kicker"))).unwrap());

static CONVERT_BLOCKED: Lazy<Regex> = Lazy::new(|| Regex::new(&format!(r"{}\s{KICK}\s(?i:is\sblocked)(?:\sby\s{})?", player("kicker"), player("blocker"))).unwrap());

static CONVERT_NO_GOOD: Lazy<Regex> = Lazy::new(|| Regex::new(&format!(r"{}\s{KICK}\s(?i:is\sno\sgood){MISS_REASON}", player("kicker"))).unwrap());

static TWO_POINT_PASS: Lazy<Regex> = Lazy::new(|| Regex::new(&format!(r"{}\spass(?:\scomplete)?\sto\s{}\s{TWO_POINT}{RESULT}", player("passer"), player("receiver"))).unwrap());

static TWO_POINT_PASS_INCOMPLETE: Lazy<Regex> = Lazy::new(|| {
	Regex::new(&format!(
		r"{}\spass\sincomplete(?:\sintended\sfor\s{})?\s{TWO_POINT}{RESULT}",
		player("passer"),
		player("receiver")
	))
	.unwrap()
});

static TWO_POINT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(&format!(r"{}\s{RUSH_VERB}{RUN_LOCATION}\s{TWO_POINT}{RESULT}", player("rusher"))).unwrap());

static DEFENSIVE_CONVERSION: Lazy<Regex> = Lazy::new(|| Regex::new(&format!(r"(?:returned|returns)\sby\s{}\sfor\s(?:a\s)?defensive\sconver(?:t|sion)", player("returner"))).unwrap());

static CONVERT_GOOD_RULE: Rule = Rule {
	name: "convert_good",
	guard: Guard::all(&["is good"]),
	pattern: &CONVERT_GOOD,
	action: Action::Extract(extract_convert_good),
};

static CONVERT_BLOCKED_RULE: Rule = Rule {
	name: "convert_blocked",
	guard: Guard::all(&["is blocked"]),
	pattern: &CONVERT_BLOCKED,
	action: Action::Extract(extract_convert_blocked),
};

static CONVERT_NO_GOOD_RULE: Rule = Rule {
	name: "convert_no_good",
	guard: Guard::all(&["is no good"]),
	pattern: &CONVERT_NO_GOOD,
	action: Action::Extract(extract_convert_no_good),
};

static TWO_POINT_PASS_RULE: Rule = Rule {
	name: "two_point_pass",
	guard: Guard::all(&["two-point"]).without(&["pass incomplete"]),
	pattern: &TWO_POINT_PASS,
	action: Action::Extract(extract_two_point_pass),
};

static TWO_POINT_PASS_INCOMPLETE_RULE: Rule = Rule {
	name: "two_point_pass_incomplete",
	guard: Guard::all(&["two-point", "pass incomplete"]),
	pattern: &TWO_POINT_PASS_INCOMPLETE,
	action: Action::Extract(extract_two_point_pass_incomplete),
};

static TWO_POINT_RUN_RULE: Rule = Rule {
	name: "two_point_run",
	guard: Guard::all(&["two-point"]),
	pattern: &TWO_POINT_RUN,
	action: Action::Extract(extract_two_point_run),
};

pub static ONE_POINT_SUCCESS_RULES: &[&Rule] = &[&CONVERT_GOOD_RULE];

pub static ONE_POINT_FAILED_RULES: &[&Rule] = &[&CONVERT_BLOCKED_RULE, &CONVERT_NO_GOOD_RULE];

pub static ONE_POINT_PENALTY_RULES: &[&Rule] = &[&CONVERT_GOOD_RULE, &CONVERT_BLOCKED_RULE, &CONVERT_NO_GOOD_RULE];

pub static TWO_POINT_RULES: &[&Rule] = &[&TWO_POINT_PASS_INCOMPLETE_RULE, &TWO_POINT_PASS_RULE, &TWO_POINT_RUN_RULE];

pub fn extract_convert_good(caps: &Captures<'_>, builder: &mut PlayBuilder<'_>) {
	builder.event.kicker_player_name = text(caps, "kicker");
	builder.event.extra_point_result = Some("good".to_string());
}

pub fn extract_convert_blocked(caps: &Captures<'_>, builder: &mut PlayBuilder<'_>) {
	builder.event.kicker_player_name = text(caps, "kicker");
	builder.event.extra_point_result = Some("blocked".to_string());
	builder.event.extra_point_blocked = true;
	builder.event.blocked_player_name = text(caps, "blocker");
}

pub fn extract_convert_no_good(caps: &Captures<'_>, builder: &mut PlayBuilder<'_>) {
	builder.event.kicker_player_name = text(caps, "kicker");
	builder.event.extra_point_result = Some("failed".to_string());
}

/// The sub-type decides success unless the attempt sits under a penalty.
fn two_point_result(caps: &Captures<'_>, builder: &PlayBuilder<'_>, fallback: bool) -> String {
	let succeeded = match builder.category {
		PlayCategory::TwoPointSuccess => true,
		PlayCategory::TwoPointFailed => false,
		_ => text(caps, "result").map_or(fallback, |result| {
			let result = result.to_lowercase();
			result == "good" || result == "successful"
		}),
	};
	if succeeded { "success" } else { "failure" }.to_string()
}

/// `#9 J.Smith pass complete to #88 T.Jones for two-point convert, good`
pub fn extract_two_point_pass(caps: &Captures<'_>, builder: &mut PlayBuilder<'_>) {
	builder.event.passer_player_name = text(caps, "passer");
	builder.event.receiver_player_name = text(caps, "receiver");
	builder.event.two_point_conv_result = Some(two_point_result(caps, builder, false));
	let receiver = builder.event.receiver_player_name.clone();
	builder.carry_for_offense(receiver);
}

pub fn extract_two_point_pass_incomplete(caps: &Captures<'_>, builder: &mut PlayBuilder<'_>) {
	builder.event.passer_player_name = text(caps, "passer");
	builder.event.receiver_player_name = text(caps, "receiver");
	builder.event.is_incomplete_pass = true;
	builder.event.two_point_conv_result = Some(two_point_result(caps, builder, false));
}

pub fn extract_two_point_run(caps: &Captures<'_>, builder: &mut PlayBuilder<'_>) {
	builder.event.rusher_player_name = text(caps, "rusher");
	builder.event.run_location = text(caps, "run_location");
	builder.event.two_point_conv_result = Some(two_point_result(caps, builder, false));
	let rusher = builder.event.rusher_player_name.clone();
	builder.carry_for_offense(rusher);
}

/// Convert attempts returned the length of the field score two for the defence.
pub fn apply_defensive_conversion(description: &str, lower: &str, builder: &mut PlayBuilder<'_>) {
	if !lower.contains("defensive conver") {
		return;
	}
	builder.event.defensive_conversion = true;
	if let Some(caps) = DEFENSIVE_CONVERSION.captures(description) {
		builder.event.defensive_conversion_player_name = text(&caps, "returner");
	}
	let returner = builder.event.defensive_conversion_player_name.clone();
	builder.carry_for_defense(returner);
	builder.scoring.push(ScoringEvent::new(ScoringEventType::DefensiveConversion, ScoringSide::Defteam));
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::parsers::rules::first_match;

	fn winner(rules: &[&'static Rule], description: &str) -> Option<&'static str> {
		first_match(rules, description, &description.to_lowercase()).map(|(rule, _)| rule.name)
	}

	#[test]
	fn test_one_point_phrasing() {
		let test_cases = vec![
			("#3 L.Kicker convert is good", Some("convert_good")),
			("#3 L.Kicker extra point attempt is good", Some("convert_good")),
			("#3 L.Kicker convert attempt is blocked by #90 A.Rush", Some("convert_blocked")),
			("#3 L.Kicker one-point convert is no good, wide right", Some("convert_no_good")),
			("#3 L.Kicker convert, PENALTY HAM Offside", None),
		];

		for (input, expected) in test_cases {
			assert_eq!(winner(ONE_POINT_PENALTY_RULES, input), expected, "Failed for input: {input}");
		}

		let caps = CONVERT_BLOCKED.captures("#3 L.Kicker convert attempt is blocked by #90 A.Rush").unwrap();
		assert_eq!(text(&caps, "blocker").as_deref(), Some("A.Rush"));
	}

	#[test]
	fn test_two_point_phrasing() {
		let test_cases = vec![
			("#9 J.Smith pass incomplete intended for #88 T.Jones for two-point convert, no good", ("two_point_pass_incomplete", Some("no good"))),
			("#9 J.Smith pass complete to #88 T.Jones for two-point conversion, good", ("two_point_pass", Some("good"))),
			("#20 A.Back rush right for two-point convert attempt, successful", ("two_point_run", Some("successful"))),
			("#20 A.Back runs for the two-point conversion", ("two_point_run", None)),
		];

		for (input, (name, result)) in test_cases {
			let (rule, caps) = first_match(TWO_POINT_RULES, input, &input.to_lowercase()).unwrap();
			assert_eq!(rule.name, name, "Failed for input: {input}");
			assert_eq!(text(&caps, "result").as_deref(), result, "Failed for input: {input}");
		}
	}

	#[test]
	fn test_defensive_conversion_returner() {
		let caps = DEFENSIVE_CONVERSION.captures("#3 L.Kicker convert is blocked, returned by #24 D.Back for a defensive conversion").unwrap();
		assert_eq!(text(&caps, "returner").as_deref(), Some("D.Back"));
	}
}
