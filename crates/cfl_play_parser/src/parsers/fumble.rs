use crate::parsers::builder::PlayBuilder;
use crate::parsers::patterns::{gain, gained, player, return_yards, returned, spot, tackles, text, DEPTH, DIRECTION, RUN_GAP, RUN_LOCATION, RUSH_VERB};
use crate::parsers::rules::{Action, Guard, Rule};
use crate::schema::PlayFamily;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

const MAX_FUMBLES: usize = 2;

static FUMBLED_SNAP: Lazy<Regex> = Lazy::new(|| {
	Regex::new(&format!(
		r"(?:{}\s(?:fumbled|fumbles)\sthe\ssnap|(?i:fumbled\ssnap)(?:\sby\s{})?)",
		player("snap_holder"),
		player("snap_fumbler")
	))
	.unwrap()
});

static RUN_THEN_FUMBLE: Lazy<Regex> = Lazy::new(|| Regex::new(&format!(r"{}\s{RUSH_VERB}{RUN_LOCATION}{RUN_GAP}\s{}", player("rusher"), gain("gain"))).unwrap());

static CATCH_THEN_FUMBLE: Lazy<Regex> = Lazy::new(|| {
	Regex::new(&format!(
		r"{}\spass\scomplete{DEPTH}{DIRECTION}\sto\s{}\s{}",
		player("passer"),
		player("receiver"),
		gain("gain")
	))
	.unwrap()
});

/// A fumble with a named player: `fumbled by {P}`, `muffed by {P}` or `{P} fumbles`.
static FUMBLE: Lazy<Regex> = Lazy::new(|| {
	Regex::new(&format!(
		r"(?:fumbled\sby\s{}|muffed\sby\s{}|{}\s(?:fumbles|fumbled))",
		player("fumbler"),
		player("muffer"),
		player("fumbler_named")
	))
	.unwrap()
});

/// One fumble and whatever happened to the loose ball.
static FUMBLE_CLAUSE: Lazy<Regex> = Lazy::new(|| {
	Regex::new(&format!(
		concat!(
			r"(?:fumbled\sby\s{fumbler}|muffed\sby\s{muffer}|{named}\s(?:fumbles|fumbled)(?:\sthe\ssnap)?|(?P<bare>fumbled\ssnap|fumbles|fumble))",
			r"(?:\sat\s{fumble_spot})?",
			r"(?:,\sforced\sby\s{forced_by})?",
			r"(?:(?P<fumble_oob>,\sout\sof\sbounds)(?:\sat\s{oob_spot})?",
			r"|,\srecovered\sby\s(?P<recovery_team>[A-Z]{{2,3}})\b(?:\s{recoverer})?(?:\sat\s{recovery_spot})?(?:,?\s{recovery_return})?(?:\sto\s{recovery_end})?{recovery_tacklers})?",
		),
		fumbler = player("fumbler"),
		muffer = player("muffer"),
		named = player("fumbler_named"),
		fumble_spot = spot("fumble_spot"),
		forced_by = player("forced_by"),
		oob_spot = spot("oob_spot"),
		recoverer = player("recoverer"),
		recovery_spot = spot("recovery_spot"),
		recovery_return = return_yards("recovery"),
		recovery_end = spot("recovery_end"),
		recovery_tacklers = tackles("recovery_tacklers"),
	))
	.unwrap()
});

static FUMBLED_SNAP_RULE: Rule = Rule {
	name: "fumbled_snap",
	guard: Guard::any(&["fumbled snap", "fumbles the snap", "fumbled the snap"]),
	pattern: &FUMBLED_SNAP,
	action: Action::Extract(extract_fumbled_snap),
};

static RUN_THEN_FUMBLE_RULE: Rule = Rule {
	name: "run_then_fumble",
	guard: Guard::any(&["rush", "run"]),
	pattern: &RUN_THEN_FUMBLE,
	action: Action::Extract(extract_run_then_fumble),
};

static CATCH_THEN_FUMBLE_RULE: Rule = Rule {
	name: "catch_then_fumble",
	guard: Guard::all(&["pass complete"]),
	pattern: &CATCH_THEN_FUMBLE,
	action: Action::Extract(extract_catch_then_fumble),
};

static FUMBLE_RULE: Rule = Rule {
	name: "fumble",
	guard: Guard::any(&["fumble", "muffed"]),
	pattern: &FUMBLE,
	action: Action::Extract(extract_fumble),
};

pub static FUMBLE_RULES: &[&Rule] = &[&FUMBLED_SNAP_RULE, &RUN_THEN_FUMBLE_RULE, &CATCH_THEN_FUMBLE_RULE, &FUMBLE_RULE];

pub fn extract_fumbled_snap(caps: &Captures<'_>, builder: &mut PlayBuilder<'_>) {
	let holder = text(caps, "snap_holder").or_else(|| text(caps, "snap_fumbler"));
	builder.carry_for_offense(holder);
}

/// `#20 A.Back rush left for 4 yards, fumbled by #20 A.Back, recovered by HAM #44 C.Doe`
pub fn extract_run_then_fumble(caps: &Captures<'_>, builder: &mut PlayBuilder<'_>) {
	builder.event.rusher_player_name = text(caps, "rusher");
	builder.event.run_location = text(caps, "run_location");
	builder.event.run_gap = text(caps, "run_gap");
	let yards = gained(caps, "gain");
	builder.set_gain(yards);
	builder.event.rushing_yards = yards;
	let rusher = builder.event.rusher_player_name.clone();
	builder.carry_for_offense(rusher);
}

pub fn extract_catch_then_fumble(caps: &Captures<'_>, builder: &mut PlayBuilder<'_>) {
	builder.event.passer_player_name = text(caps, "passer");
	builder.event.receiver_player_name = text(caps, "receiver");
	builder.event.pass_length = text(caps, "depth");
	builder.event.pass_location = text(caps, "direction");
	builder.event.is_complete_pass = true;
	let yards = gained(caps, "gain");
	builder.set_gain(yards);
	builder.event.passing_yards = yards;
	builder.event.receiving_yards = yards;
	let receiver = builder.event.receiver_player_name.clone();
	builder.carry_for_offense(receiver);
}

/// `#88 T.Jones fumbles, recovered by HAM #44 C.Doe`. A muff belongs to the receiving side.
pub fn extract_fumble(caps: &Captures<'_>, builder: &mut PlayBuilder<'_>) {
	if let Some(muffer) = text(caps, "muffer") {
		builder.carry_for_defense(Some(muffer));
		return;
	}
	let fumbler = text(caps, "fumbler").or_else(|| text(caps, "fumbler_named"));
	builder.carry_for_offense(fumbler);
}

/// Team that lost the ball: the current carrier's, unless a kick was muffed
/// or someone other than the carrier put it on the ground on a kick play.
fn fumbling_team(builder: &PlayBuilder<'_>, fumbler: Option<&str>, muffed: bool) -> String {
	if muffed {
		return builder.defteam().to_string();
	}
	match fumbler {
		Some(name) if builder.carrier_is(name) => builder.carrier_team().to_string(),
		Some(_) if builder.family().is_kick() && builder.family() != PlayFamily::FieldGoal => builder.defteam().to_string(),
		None => builder.carrier_team().to_string(),
		Some(_) => builder.posteam().to_string(),
	}
}

/// Applies up to two fumble clauses in order, handing the ball to each recoverer.
pub fn apply_fumbles(description: &str, lower: &str, builder: &mut PlayBuilder<'_>) {
	if !(lower.contains("fumble") || lower.contains("muffed")) {
		return;
	}

	for (index, caps) in FUMBLE_CLAUSE.captures_iter(description).take(MAX_FUMBLES).enumerate() {
		builder.event.is_fumble = true;
		let muffed = caps.name("muffer").is_some();
		let named = text(&caps, "fumbler").or_else(|| text(&caps, "fumbler_named")).or_else(|| text(&caps, "muffer"));
		let team = fumbling_team(builder, named.as_deref(), muffed);
		let fumbler = if caps.name("bare").is_some() {
			builder.carrier.as_ref().and_then(|carrier| carrier.name.clone())
		} else {
			named
		};

		let forced_by = text(&caps, "forced_by");
		if forced_by.is_some() {
			builder.event.fumble_forced = true;
		} else {
			builder.event.fumble_not_forced = true;
		}
		if caps.name("fumble_oob").is_some() {
			builder.event.fumble_out_of_bounds = true;
			if let Some(oob_spot) = text(&caps, "oob_spot") {
				builder.event.end_yardline_100 = builder.resolve(&oob_spot);
			}
		}

		let recovery_team = text(&caps, "recovery_team");
		let recoverer = text(&caps, "recoverer");
		let recovery_yards = returned(&caps, "recovery");
		if recovery_team.as_deref().is_some_and(|recovered| !recovered.eq_ignore_ascii_case(&team)) {
			builder.event.fumble_lost = true;
		}

		let event = &mut builder.event;
		if index == 0 {
			event.fumbled_1_team = Some(team);
			event.fumbled_1_player_name = fumbler;
			event.forced_fumble_player_1_player_name = forced_by;
			event.fumble_recovery_1_team = recovery_team.clone();
			event.fumble_recovery_1_player_name = recoverer.clone();
			event.fumble_recovery_1_yards = recovery_yards;
		} else {
			event.fumbled_2_team = Some(team);
			event.fumbled_2_player_name = fumbler;
			event.forced_fumble_player_2_player_name = forced_by;
			event.fumble_recovery_2_team = recovery_team.clone();
			event.fumble_recovery_2_player_name = recoverer.clone();
			event.fumble_recovery_2_yards = recovery_yards;
		}

		if let Some(recovery_end) = text(&caps, "recovery_end").or_else(|| text(&caps, "recovery_spot")) {
			builder.event.end_yardline_100 = builder.resolve(&recovery_end);
		}
		builder.secondary_tacklers(text(&caps, "recovery_tacklers"));

		if let Some(recovery_team) = recovery_team {
			let holder = if recovery_team.eq_ignore_ascii_case(builder.posteam()) {
				builder.posteam().to_string()
			} else if recovery_team.eq_ignore_ascii_case(builder.defteam()) {
				builder.defteam().to_string()
			} else {
				recovery_team
			};
			builder.carry(recoverer, &holder);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_fumble_clause_shapes() {
		let test_cases = vec![
			(
				"#20 A.Back rush left for 4 yards, fumbled by #20 A.Back at the HAM 30, forced by #44 C.Doe, recovered by HAM #52 D.Roe at the HAM 28",
				(Some("A.Back"), Some("C.Doe"), Some("HAM"), Some("D.Roe")),
			),
			("#88 T.Jones fumbles, out of bounds at the OTT 40",(None, None, None, None)),
			("punt, muffed by #20 K.Return, recovered by OTT #30 P.Cover", (None, None, Some("OTT"), Some("P.Cover"))),
		];

		for (input, (fumbler, forced_by, team, recoverer)) in test_cases {
			let caps = FUMBLE_CLAUSE.captures(input).unwrap();
			assert_eq!(text(&caps, "fumbler").as_deref(), fumbler, "Failed for input: {input}");
			assert_eq!(text(&caps, "forced_by").as_deref(), forced_by, "Failed for input: {input}");
			assert_eq!(text(&caps, "recovery_team").as_deref(), team, "Failed for input: {input}");
			assert_eq!(text(&caps, "recoverer").as_deref(), recoverer, "Failed for input: {input}");
		}
	}

	#[test]
	fn test_named_fumbler_and_return() {
		let input = "#88 T.Jones fumbles, recovered by HAM #44 C.Doe at the HAM 30, returns 12 yards to the HAM 42 (#9 J.Smith)";
		let caps = FUMBLE_CLAUSE.captures(input).unwrap();
		assert_eq!(text(&caps, "fumbler_named").as_deref(), Some("T.Jones"));
		assert_eq!(returned(&caps, "recovery"), Some(12));
		assert_eq!(text(&caps, "recovery_end").as_deref(), Some("HAM 42"));
		assert_eq!(text(&caps, "recovery_tacklers").as_deref(), Some("#9 J.Smith"));
	}

	#[test]
	fn test_two_fumbles_are_found_in_order() {
		let input = "fumbled by #20 A.Back, recovered by HAM #44 C.Doe, fumbled by #44 C.Doe, recovered by OTT #20 A.Back";
		let teams: Vec<_> = FUMBLE_CLAUSE.captures_iter(input).filter_map(|caps| text(&caps, "recovery_team")).collect();
		assert_eq!(teams, vec!["HAM", "OTT"]);
	}

	#[test]
	fn test_standalone_fumble_needs_a_named_player() {
		let test_cases = vec![
			("#88 T.Jones fumbles, recovered by HAM #44 C.Doe", Some("fumble")),
			("fumbled by #20 A.Back, out of bounds at the OTT 40", Some("fumble")),
			("punt, muffed by #20 K.Return, recovered by OTT #30 P.Cover", Some("fumble")),
			("#9 J.Smith fumbles the snap, recovered by OTT #9 J.Smith", Some("fumbled_snap")),
			("Something strange happened, fumble", None),
		];

		for (input, expected) in test_cases {
			let winner = crate::parsers::rules::first_match(FUMBLE_RULES, input, &input.to_lowercase()).map(|(rule, _)| rule.name);
			assert_eq!(winner, expected, "Failed for input: {input}");
		}
	}
}
