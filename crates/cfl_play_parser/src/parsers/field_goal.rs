use crate::parsers::builder::PlayBuilder;
use crate::parsers::patterns::{number, player, return_yards, returned, spot, tackles, text, MISS_REASON};
use crate::parsers::rules::{Action, Guard, Rule};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// `N yard field goal [attempt]` or `field goal [attempt] from N yards`.
fn attempt() -> String {
	format!(
		r"{}\s(?:(?P<fg_yds>\d+)\syard\sfield\sgoal|field\sgoal(?:\sattempt)?\sfrom\s(?P<fg_yds_from>\d+)\syards?)(?:\sattempt)?",
		player("kicker")
	)
}

static GOOD: Lazy<Regex> = Lazy::new(|| Regex::new(&format!(r"{}\s(?i:is\sgood)", attempt())).unwrap());

static BLOCKED: Lazy<Regex> = Lazy::new(|| Regex::new(&format!(r"{}\s(?i:is\sblocked)(?:\sby\s{})?", attempt(), player("blocker"))).unwrap());

static MISSED_RETURNED: Lazy<Regex> = Lazy::new(|| {
	Regex::new(&format!(
		r"{}\s(?i:is\sno\sgood){MISS_REASON},\s{}\s{}(?:\sto\s{})?(?:,\sout\sof\sbounds)?{}",
		attempt(),
		player("returner"),
		return_yards("ret"),
		spot("end_spot"),
		tackles("tacklers")
	))
	.unwrap()
});

static MISSED: Lazy<Regex> = Lazy::new(|| Regex::new(&format!(r"{}\s(?i:is\sno\sgood){MISS_REASON}", attempt())).unwrap());

static GOOD_RULE: Rule = Rule {
	name: "field_goal_good",
	guard: Guard::all(&["yard field goal", "is good"]),
	pattern: &GOOD,
	action: Action::Extract(extract_good),
};

static GOOD_FROM_RULE: Rule = Rule {
	name: "field_goal_good_from",
	guard: Guard::all(&["field goal", "from", "is good"]),
	pattern: &GOOD,
	action: Action::Extract(extract_good),
};

static BLOCKED_RULE: Rule = Rule {
	name: "field_goal_blocked",
	guard: Guard::all(&["is blocked"]),
	pattern: &BLOCKED,
	action: Action::Extract(extract_blocked),
};

static MISSED_RETURNED_RULE: Rule = Rule {
	name: "field_goal_missed_returned",
	guard: Guard::all(&["is no good"]).without(&["single", "rouge"]),
	pattern: &MISSED_RETURNED,
	action: Action::Extract(extract_missed_returned),
};

static MISSED_SINGLE_RULE: Rule = Rule {
	name: "field_goal_missed_single",
	guard: Guard::any(&["single", "rouge"]),
	pattern: &MISSED,
	action: Action::Extract(extract_missed_single),
};

static MISSED_RULE: Rule = Rule {
	name: "field_goal_missed",
	guard: Guard::all(&["is no good"]),
	pattern: &MISSED,
	action: Action::Extract(extract_missed),
};

pub static SUCCESS_RULES: &[&Rule] = &[&GOOD_RULE, &GOOD_FROM_RULE];

pub static FAILED_RULES: &[&Rule] = &[&BLOCKED_RULE, &MISSED_RETURNED_RULE, &MISSED_SINGLE_RULE, &MISSED_RULE];

fn credit_attempt(caps: &Captures<'_>, builder: &mut PlayBuilder<'_>, result: &str) {
	builder.event.kicker_player_name = text(caps, "kicker");
	builder.event.kick_distance = number(caps, "fg_yds").or_else(|| number(caps, "fg_yds_from"));
	builder.event.field_goal_result = Some(result.to_string());
}

/// `#3 L.Kicker 37 yard field goal is good`
pub fn extract_good(caps: &Captures<'_>, builder: &mut PlayBuilder<'_>) {
	credit_attempt(caps, builder, "made");
}

pub fn extract_blocked(caps: &Captures<'_>, builder: &mut PlayBuilder<'_>) {
	credit_attempt(caps, builder, "blocked");
	builder.event.field_goal_blocked = true;
	builder.event.blocked_player_name = text(caps, "blocker");
}

pub fn extract_missed(caps: &Captures<'_>, builder: &mut PlayBuilder<'_>) {
	credit_attempt(caps, builder, "missed");
	builder.event.field_goal_miss_reason = text(caps, "miss_reason");
}

/// A missed kick not brought out of the end zone concedes a single.
pub fn extract_missed_single(caps: &Captures<'_>, builder: &mut PlayBuilder<'_>) {
	extract_missed(caps, builder);
	builder.event.is_rouge = true;
}

/// `#3 L.Kicker 48 yard field goal is no good, wide left, #20 K.Return returns 25 yards to the HAM 35 (#55 B.Lee)`
pub fn extract_missed_returned(caps: &Captures<'_>, builder: &mut PlayBuilder<'_>) {
	extract_missed(caps, builder);
	let returner = text(caps, "returner");
	builder.event.field_goal_returner_player_name = returner.clone();
	builder.event.return_yards = returned(caps, "ret");
	builder.event.return_team = Some(builder.defteam().to_string());
	if let Some(end_spot) = text(caps, "end_spot") {
		builder.event.end_yardline_100 = builder.resolve(&end_spot);
	}
	builder.carry_for_defense(returner);
	builder.primary_tacklers(text(caps, "tacklers"));
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::parsers::rules::first_match;

	#[test]
	fn test_attempt_cascades() {
		let test_cases = vec![
			(SUCCESS_RULES, "#3 L.Kicker 37 yard field goal is good", "field_goal_good"),
			(SUCCESS_RULES, "#3 L.Kicker field goal attempt from 42 yards is good", "field_goal_good_from"),
			(FAILED_RULES, "#3 L.Kicker 45 yard field goal is blocked by #90 A.Rush", "field_goal_blocked"),
			(
				FAILED_RULES,
				"#3 L.Kicker 48 yard field goal is no good, wide left, #20 K.Return returns 25 yards to the HAM 35 (#55 B.Lee)",
				"field_goal_missed_returned",
			),
			(FAILED_RULES, "#3 L.Kicker 52 yard field goal is no good, short, single", "field_goal_missed_single"),
			(FAILED_RULES, "#3 L.Kicker 50 yard field goal is no good, hit the upright", "field_goal_missed"),
		];

		for (rules, input, expected) in test_cases {
			let winner = first_match(rules, input, &input.to_lowercase()).map(|(rule, _)| rule.name);
			assert_eq!(winner, Some(expected), "Failed for input: {input}");
		}
	}

	#[test]
	fn test_attempt_distance_forms() {
		let caps = GOOD.captures("#3 L.Kicker 37 yard field goal is good").unwrap();
		assert_eq!(number(&caps, "fg_yds"), Some(37));

		let caps = GOOD.captures("#3 L.Kicker field goal attempt from 42 yards is good").unwrap();
		assert_eq!(number(&caps, "fg_yds"), None);
		assert_eq!(number(&caps, "fg_yds_from"), Some(42));
	}

	#[test]
	fn test_miss_reasons() {
		let test_cases = vec![
			("#3 L.Kicker 48 yard field goal is no good, wide left", Some("wide left")),
			("#3 L.Kicker 50 yard field goal is no good, hit the upright", Some("hit the upright")),
			("#3 L.Kicker 55 yard field goal is no good", None),
		];

		for (input, expected) in test_cases {
			let caps = MISSED.captures(input).unwrap();
			assert_eq!(text(&caps, "miss_reason").as_deref(), expected, "Failed for input: {input}");
		}

		let caps = MISSED_RETURNED.captures("#3 L.Kicker 48 yard field goal is no good, wide left, #20 K.Return returns 25 yards to the HAM 35 (#55 B.Lee)").unwrap();
		assert_eq!(text(&caps, "returner").as_deref(), Some("K.Return"));
		assert_eq!(returned(&caps, "ret"), Some(25));
		assert_eq!(text(&caps, "end_spot").as_deref(), Some("HAM 35"));
	}
}
