use crate::parsers::builder::PlayBuilder;
use crate::parsers::patterns::{gain, gained, player, spot, tackles, text, ANYTHING, DIRECTION, RUN_GAP, RUN_LOCATION, RUSH_VERB};
use crate::parsers::rules::{Action, Guard, Rule};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static SCRAMBLE: Lazy<Regex> = Lazy::new(|| {
	Regex::new(&format!(
		r"{}\sscrambles{DIRECTION}{RUN_GAP}\s{}(?:\sto\s{})?(?:,\sout\sof\sbounds)?{}",
		player("rusher"),
		gain("gain"),
		spot("end_spot"),
		tackles("tacklers")
	))
	.unwrap()
});

static SNEAK: Lazy<Regex> = Lazy::new(|| {
	Regex::new(&format!(
		r"{}\squarterback\ssneak\s{}(?:\sto\s{})?{}",
		player("rusher"),
		gain("gain"),
		spot("end_spot"),
		tackles("tacklers")
	))
	.unwrap()
});

static RUN: Lazy<Regex> = Lazy::new(|| {
	Regex::new(&format!(
		r"{}\s{RUSH_VERB}{RUN_LOCATION}{RUN_GAP}\s{}(?:\sto\s{})?(?:,\sout\sof\sbounds)?{}",
		player("rusher"),
		gain("gain"),
		spot("end_spot"),
		tackles("tacklers")
	))
	.unwrap()
});

static RUN_NULLIFIED: Lazy<Regex> = Lazy::new(|| Regex::new(&format!(r"{}\s(?:rush|run)", player("rusher"))).unwrap());

static KNEEL: Lazy<Regex> = Lazy::new(|| {
	Regex::new(&format!(
		r"{}\s(?:kneels|kneel\sdown|takes\sa\sknee)(?:\s{})?(?:\sto\s{})?{}",
		player("rusher"),
		gain("gain"),
		spot("end_spot"),
		tackles("tacklers")
	))
	.unwrap()
});

static RUN_LATERAL: Rule = Rule {
	name: "run_lateral",
	guard: Guard::all(&["lateral to"]).without(&["recovered by"]),
	pattern: &ANYTHING,
	action: Action::Unsupported("lateral on a run"),
};

static SCRAMBLE_RULE: Rule = Rule {
	name: "scramble",
	guard: Guard::all(&["scrambles"]),
	pattern: &SCRAMBLE,
	action: Action::Extract(extract_scramble),
};

static SNEAK_RULE: Rule = Rule {
	name: "quarterback_sneak",
	guard: Guard::all(&["quarterback sneak"]),
	pattern: &SNEAK,
	action: Action::Extract(extract_run),
};

static RUN_RULE: Rule = Rule {
	name: "run",
	guard: Guard::any(&["rush", "run"]),
	pattern: &RUN,
	action: Action::Extract(extract_run),
};

static RUN_NULLIFIED_RULE: Rule = Rule {
	name: "run_nullified",
	guard: Guard::any(&["rush", "run"]),
	pattern: &RUN_NULLIFIED,
	action: Action::Extract(extract_run_nullified),
};

static KNEEL_RULE: Rule = Rule {
	name: "kneel",
	guard: Guard::any(&["kneel", "takes a knee"]),
	pattern: &KNEEL,
	action: Action::Extract(extract_kneel),
};

pub static RUN_RULES: &[&Rule] = &[&RUN_LATERAL, &SCRAMBLE_RULE, &SNEAK_RULE, &RUN_RULE];

pub static RUN_PENALTY_RULES: &[&Rule] = &[&RUN_LATERAL, &SCRAMBLE_RULE, &SNEAK_RULE, &RUN_RULE, &RUN_NULLIFIED_RULE];

pub static KNEEL_RULES: &[&Rule] = &[&KNEEL_RULE];

fn credit_run(caps: &Captures<'_>, builder: &mut PlayBuilder<'_>) {
	builder.event.rusher_player_name = text(caps, "rusher");
	let yards = gained(caps, "gain");
	builder.set_gain(yards);
	builder.event.rushing_yards = yards;
	if let Some(end_spot) = text(caps, "end_spot") {
		builder.event.end_yardline_100 = builder.resolve(&end_spot);
	}
	let rusher = builder.event.rusher_player_name.clone();
	builder.carry_for_offense(rusher);
	builder.primary_tacklers(text(caps, "tacklers"));
}

/// `#20 A.Back rush up the middle guard for 4 yards to the OTT 39 (#55 B.Lee, #44 C.Doe)`
pub fn extract_run(caps: &Captures<'_>, builder: &mut PlayBuilder<'_>) {
	credit_run(caps, builder);
	builder.event.run_location = text(caps, "run_location").map(|location| if location == "up the middle" { "middle".to_string() } else { location });
	builder.event.run_gap = text(caps, "run_gap");
}

pub fn extract_scramble(caps: &Captures<'_>, builder: &mut PlayBuilder<'_>) {
	credit_run(caps, builder);
	builder.event.qb_scramble = true;
	builder.event.run_location = text(caps, "direction");
	builder.event.run_gap = text(caps, "run_gap");
}

pub fn extract_run_nullified(caps: &Captures<'_>, builder: &mut PlayBuilder<'_>) {
	builder.event.rusher_player_name = text(caps, "rusher");
}

/// A kneel with no yardage phrase loses nothing.
pub fn extract_kneel(caps: &Captures<'_>, builder: &mut PlayBuilder<'_>) {
	builder.event.rusher_player_name = text(caps, "rusher");
	let yards = gained(caps, "gain").or(Some(0));
	builder.set_gain(yards);
	builder.event.rushing_yards = yards;
	if let Some(end_spot) = text(caps, "end_spot") {
		builder.event.end_yardline_100 = builder.resolve(&end_spot);
	}
	let rusher = builder.event.rusher_player_name.clone();
	builder.carry_for_offense(rusher);
	builder.primary_tacklers(text(caps, "tacklers"));
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::parsers::rules::first_match;

	fn winner(rules: &[&'static Rule], description: &str) -> Option<&'static str> {
		first_match(rules, description, &description.to_lowercase()).map(|(rule, _)| rule.name)
	}

	#[test]
	fn test_run_cascade() {
		let test_cases = vec![
			("#20 A.Back rush left for 6 yards, lateral to #88 T.Jones for 4 yards", Some("run_lateral")),
			("#9 J.Smith scrambles right for 8 yards to the HAM 40, out of bounds", Some("scramble")),
			("#9 J.Smith quarterback sneak for 1 yard to the OTT 46", Some("quarterback_sneak")),
			("#20 A.Back rush up the middle guard for 4 yards to the OTT 39 (#55 B.Lee, #44 C.Doe)", Some("run")),
			("#20 A.Back rush, PENALTY HAM Offside", None),
		];

		for (input, expected) in test_cases {
			assert_eq!(winner(RUN_RULES, input), expected, "Failed for input: {input}");
		}
		assert_eq!(winner(RUN_PENALTY_RULES, "#20 A.Back rush, PENALTY HAM Offside"), Some("run_nullified"));
	}

	#[test]
	fn test_run_captures() {
		let test_cases = vec![
			("#20 A.Back rush up the middle guard for 4 yards to the OTT 39 (#55 B.Lee)", (Some("up the middle"), Some("guard"), Some(4))),
			("#20 A.Back runs left end for a loss of 2 yards to the OTT 33", (Some("left"), Some("end"), Some(-2))),
			("#20 A.Back rush for no gain (#55 B.Lee)", (None, None, Some(0))),
		];

		for (input, (location, run_gap, yards)) in test_cases {
			let caps = RUN.captures(input).unwrap();
			assert_eq!(text(&caps, "rusher").as_deref(), Some("A.Back"), "Failed for input: {input}");
			assert_eq!(text(&caps, "run_location").as_deref(), location, "Failed for input: {input}");
			assert_eq!(text(&caps, "run_gap").as_deref(), run_gap, "Failed for input: {input}");
			assert_eq!(gained(&caps, "gain"), yards, "Failed for input: {input}");
		}
	}

	#[test]
	fn test_kneel_without_yardage() {
		let caps = KNEEL.captures("#9 J.Smith kneels for -1 yards to the OTT 44").unwrap();
		assert_eq!(gained(&caps, "gain"), Some(-1));
		assert_eq!(text(&caps, "end_spot").as_deref(), Some("OTT 44"));

		let caps = KNEEL.captures("#9 J.Smith takes a knee").unwrap();
		assert_eq!(text(&caps, "rusher").as_deref(), Some("J.Smith"));
		assert_eq!(gained(&caps, "gain"), None);
		assert_eq!(winner(KNEEL_RULES, "#9 J.Smith takes a knee"), Some("kneel"));
	}
}
