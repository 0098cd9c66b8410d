use crate::parsers::builder::PlayBuilder;
use crate::parsers::patterns::{is_end_zone, number, player, return_yards, returned, spot, tackles, text};
use crate::parsers::rules::{Action, Guard, Rule};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

const INSIDE_TWENTY: i32 = 20;

static PUNT_BLOCKED: Lazy<Regex> = Lazy::new(|| Regex::new(&format!(r"{}\spunt\s(?i:blocked)\sby\s{}", player("kicker"), player("blocker"))).unwrap());

static PUNT_RETURNED: Lazy<Regex> = Lazy::new(|| {
	Regex::new(&format!(
		r"{}\spunts\s(?P<kick_yds>\d+)\syards?\s(?:to|into)\s{},\s{}\s{}(?:\sto\s{})?(?P<return_oob>,\sout\sof\sbounds)?{}",
		player("kicker"),
		spot("land_spot"),
		player("returner"),
		return_yards("ret"),
		spot("end_spot"),
		tackles("tacklers")
	))
	.unwrap()
});

static PUNT_OUT_OF_BOUNDS: Lazy<Regex> = Lazy::new(|| {
	Regex::new(&format!(
		r"{}\spunts\s(?P<kick_yds>\d+)\syards?(?:\s(?:to|into)\s{})?,\sout\sof\sbounds(?:\sat\s{})?",
		player("kicker"),
		spot("land_spot"),
		spot("end_spot")
	))
	.unwrap()
});

static PUNT: Lazy<Regex> = Lazy::new(|| Regex::new(&format!(r"{}\spunts\s(?P<kick_yds>\d+)\syards?\s(?:to|into)\s{}", player("kicker"), spot("land_spot"))).unwrap());

static ONSIDE: Lazy<Regex> = Lazy::new(|| {
	Regex::new(&format!(
		r"{}\sonside\skick\s(?P<kick_yds>\d+)\syards?(?:\s(?:to|into)\s{})?(?:,\srecovered\sby\s(?P<onside_team>[A-Z]{{2,3}})\b(?:\s{})?)?",
		player("kicker"),
		spot("land_spot"),
		player("onside_recoverer")
	))
	.unwrap()
});

static KICKOFF_OUT_OF_BOUNDS: Lazy<Regex> = Lazy::new(|| {
	Regex::new(&format!(
		r"{}\skicks\soff\s(?P<kick_yds>\d+)\syards?(?:\s(?:to|into)\s{})?,\sout\sof\sbounds(?:\sat\s{})?",
		player("kicker"),
		spot("land_spot"),
		spot("end_spot")
	))
	.unwrap()
});

static KICKOFF_RETURNED: Lazy<Regex> = Lazy::new(|| {
	Regex::new(&format!(
		r"{}\skicks\soff\s(?P<kick_yds>\d+)\syards?\s(?:to|into)\s{},\s{}\s{}(?:\sto\s{})?(?P<return_oob>,\sout\sof\sbounds)?{}",
		player("kicker"),
		spot("land_spot"),
		player("returner"),
		return_yards("ret"),
		spot("end_spot"),
		tackles("tacklers")
	))
	.unwrap()
});

static KICKOFF: Lazy<Regex> = Lazy::new(|| Regex::new(&format!(r"{}\skicks\soff\s(?P<kick_yds>\d+)\syards?\s(?:to|into)\s{}", player("kicker"), spot("land_spot"))).unwrap());

static PUNT_BLOCKED_RULE: Rule = Rule {
	name: "punt_blocked",
	guard: Guard::all(&["blocked"]),
	pattern: &PUNT_BLOCKED,
	action: Action::Extract(extract_punt_blocked),
};

static PUNT_RETURNED_RULE: Rule = Rule {
	name: "punt_returned",
	guard: Guard::any(&["returns", "returned"]),
	pattern: &PUNT_RETURNED,
	action: Action::Extract(extract_punt),
};

static PUNT_OUT_OF_BOUNDS_RULE: Rule = Rule {
	name: "punt_out_of_bounds",
	guard: Guard::all(&["out of bounds"]),
	pattern: &PUNT_OUT_OF_BOUNDS,
	action: Action::Extract(extract_punt_out_of_bounds),
};

static PUNT_SINGLE_RULE: Rule = Rule {
	name: "punt_single",
	guard: Guard::any(&["single", "rouge"]),
	pattern: &PUNT,
	action: Action::Extract(extract_punt_single),
};

static PUNT_RULE: Rule = Rule {
	name: "punt",
	guard: Guard::all(&["punts"]),
	pattern: &PUNT,
	action: Action::Extract(extract_punt),
};

static ONSIDE_RULE: Rule = Rule {
	name: "onside_kick",
	guard: Guard::all(&["onside kick"]),
	pattern: &ONSIDE,
	action: Action::Extract(extract_onside),
};

static KICKOFF_OUT_OF_BOUNDS_RULE: Rule = Rule {
	name: "kickoff_out_of_bounds",
	guard: Guard::all(&["kicks off", "out of bounds"]),
	pattern: &KICKOFF_OUT_OF_BOUNDS,
	action: Action::Extract(extract_kickoff_out_of_bounds),
};

static KICKOFF_SINGLE_RULE: Rule = Rule {
	name: "kickoff_single",
	guard: Guard::any(&["single", "rouge"]),
	pattern: &KICKOFF,
	action: Action::Extract(extract_kickoff_single),
};

static KICKOFF_RETURNED_RULE: Rule = Rule {
	name: "kickoff_returned",
	guard: Guard::any(&["returns", "returned"]),
	pattern: &KICKOFF_RETURNED,
	action: Action::Extract(extract_kickoff),
};

static KICKOFF_RULE: Rule = Rule {
	name: "kickoff",
	guard: Guard::all(&["kicks off"]),
	pattern: &KICKOFF,
	action: Action::Extract(extract_kickoff),
};

pub static PUNT_RULES: &[&Rule] = &[&PUNT_BLOCKED_RULE, &PUNT_RETURNED_RULE, &PUNT_OUT_OF_BOUNDS_RULE, &PUNT_SINGLE_RULE, &PUNT_RULE];

pub static KICKOFF_RULES: &[&Rule] = &[&ONSIDE_RULE, &KICKOFF_OUT_OF_BOUNDS_RULE, &KICKOFF_SINGLE_RULE, &KICKOFF_RETURNED_RULE, &KICKOFF_RULE];

#[derive(Clone, Copy, PartialEq, Eq)]
enum Kick {
	Punt,
	Kickoff,
}

/// Kicker, distance, landing spot, returner and tacklers shared by punts and kickoffs.
fn credit_kick(caps: &Captures<'_>, builder: &mut PlayBuilder<'_>, kick: Kick) {
	let kicker = text(caps, "kicker");
	match kick {
		Kick::Punt => builder.event.punter_player_name = kicker,
		Kick::Kickoff => builder.event.kicker_player_name = kicker,
	}
	builder.event.kick_distance = number(caps, "kick_yds");

	let land_spot = text(caps, "land_spot");
	if land_spot.as_deref().is_some_and(is_end_zone) {
		match kick {
			Kick::Punt => builder.event.punt_in_endzone = true,
			Kick::Kickoff => builder.event.kickoff_in_endzone = true,
		}
	}

	if let Some(returner) = text(caps, "returner") {
		match kick {
			Kick::Punt => builder.event.punt_returner_player_name = Some(returner.clone()),
			Kick::Kickoff => builder.event.kickoff_returner_player_name = Some(returner.clone()),
		}
		builder.event.return_yards = returned(caps, "ret");
		builder.event.return_team = Some(builder.defteam().to_string());
		builder.carry_for_defense(Some(returner));
	}

	let end_spot = text(caps, "end_spot").or(land_spot);
	let end_yardline = end_spot.as_deref().and_then(|spot| builder.resolve(spot));
	builder.event.end_yardline_100 = end_yardline;
	if end_yardline.is_some_and(|yards| yards < INSIDE_TWENTY) {
		match kick {
			Kick::Punt => builder.event.punt_inside_twenty = true,
			Kick::Kickoff => builder.event.kickoff_inside_twenty = true,
		}
	}

	builder.primary_tacklers(text(caps, "tacklers"));
}

/// `#19 J.Punter punts 45 yards to the HAM 30, #20 K.Return returns 12 yards to the HAM 42 (#55 B.Lee)`
pub fn extract_punt(caps: &Captures<'_>, builder: &mut PlayBuilder<'_>) {
	credit_kick(caps, builder, Kick::Punt);
}

pub fn extract_punt_single(caps: &Captures<'_>, builder: &mut PlayBuilder<'_>) {
	credit_kick(caps, builder, Kick::Punt);
	builder.event.is_rouge = true;
}

pub fn extract_punt_out_of_bounds(caps: &Captures<'_>, builder: &mut PlayBuilder<'_>) {
	credit_kick(caps, builder, Kick::Punt);
	builder.event.punt_out_of_bounds = true;
}

pub fn extract_punt_blocked(caps: &Captures<'_>, builder: &mut PlayBuilder<'_>) {
	builder.event.punter_player_name = text(caps, "kicker");
	builder.event.punt_blocked = true;
	builder.event.blocked_player_name = text(caps, "blocker");
}

pub fn extract_kickoff(caps: &Captures<'_>, builder: &mut PlayBuilder<'_>) {
	credit_kick(caps, builder, Kick::Kickoff);
}

pub fn extract_kickoff_single(caps: &Captures<'_>, builder: &mut PlayBuilder<'_>) {
	credit_kick(caps, builder, Kick::Kickoff);
	builder.event.is_rouge = true;
}

pub fn extract_kickoff_out_of_bounds(caps: &Captures<'_>, builder: &mut PlayBuilder<'_>) {
	credit_kick(caps, builder, Kick::Kickoff);
	builder.event.kickoff_out_of_bounds = true;
}

/// `#3 L.Kicker onside kick 12 yards to the OTT 47, recovered by OTT #21 R.Cover`
pub fn extract_onside(caps: &Captures<'_>, builder: &mut PlayBuilder<'_>) {
	credit_kick(caps, builder, Kick::Kickoff);
	builder.event.onside_kick = true;

	let Some(team) = text(caps, "onside_team") else {
		return;
	};
	let recoverer = text(caps, "onside_recoverer");
	if team.eq_ignore_ascii_case(builder.posteam()) {
		builder.event.own_kickoff_recovery = true;
		builder.event.own_kickoff_recovery_player_name = recoverer.clone();
		builder.carry_for_offense(recoverer);
	} else {
		builder.event.kickoff_returner_player_name = recoverer.clone();
		builder.carry_for_defense(recoverer);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::parsers::rules::first_match;

	fn winner(rules: &[&'static Rule], description: &str) -> Option<&'static str> {
		first_match(rules, description, &description.to_lowercase()).map(|(rule, _)| rule.name)
	}

	#[test]
	fn test_punt_cascade() {
		let test_cases = vec![
			("#19 J.Punter punt blocked by #90 A.Rush", "punt_blocked"),
			("#19 J.Punter punts 45 yards to the HAM 30, #20 K.Return returns 12 yards to the HAM 42 (#55 B.Lee)", "punt_returned"),
			("#19 J.Punter punts 40 yards, out of bounds at the HAM 35", "punt_out_of_bounds"),
			("#19 J.Punter punts 62 yards into the HAM end zone, single", "punt_single"),
			("#19 J.Punter punts 44 yards to the HAM 18", "punt"),
		];

		for (input, expected) in test_cases {
			assert_eq!(winner(PUNT_RULES, input), Some(expected), "Failed for input: {input}");
		}
	}

	#[test]
	fn test_kickoff_cascade() {
		let test_cases = vec![
			("#3 L.Kicker onside kick 12 yards to the OTT 47, recovered by HAM #21 R.Cover", "onside_kick"),
			("#3 L.Kicker kicks off 55 yards, out of bounds", "kickoff_out_of_bounds"),
			("#3 L.Kicker kicks off 75 yards into the OTT end zone, single", "kickoff_single"),
			("#3 L.Kicker kicks off 60 yards to the OTT 15, #20 K.Return returns 20 yards to the OTT 35 (#55 B.Lee)", "kickoff_returned"),
			("#3 L.Kicker kicks off 65 yards to the OTT 10", "kickoff"),
		];

		for (input, expected) in test_cases {
			assert_eq!(winner(KICKOFF_RULES, input), Some(expected), "Failed for input: {input}");
		}
	}

	#[test]
	fn test_punt_return_captures() {
		let caps = PUNT_RETURNED.captures("#19 J.Punter punts 45 yards to the HAM 30, #20 K.Return returned for no gain, out of bounds").unwrap();
		assert_eq!(text(&caps, "kicker").as_deref(), Some("J.Punter"));
		assert_eq!(number(&caps, "kick_yds"), Some(45));
		assert_eq!(text(&caps, "land_spot").as_deref(), Some("HAM 30"));
		assert_eq!(text(&caps, "returner").as_deref(), Some("K.Return"));
		assert_eq!(returned(&caps, "ret"), Some(0));
		assert!(caps.name("return_oob").is_some());
	}

	#[test]
	fn test_onside_recovery_captures() {
		let caps = ONSIDE.captures("#3 L.Kicker onside kick 12 yards to the OTT 47, recovered by HAM #21 R.Cover").unwrap();
		assert_eq!(text(&caps, "onside_team").as_deref(), Some("HAM"));
		assert_eq!(text(&caps, "onside_recoverer").as_deref(), Some("R.Cover"));

		let caps = ONSIDE.captures("#3 L.Kicker onside kick 9 yards").unwrap();
		assert_eq!(number(&caps, "kick_yds"), Some(9));
		assert!(caps.name("onside_team").is_none());
	}
}
