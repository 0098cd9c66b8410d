use crate::parsers::builder::PlayBuilder;
use crate::parsers::patterns::{number, player, spot, text, ANYTHING};
use crate::parsers::rules::{Action, Guard, Rule};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Infractions that award a first down regardless of yardage.
const AUTOMATIC_FIRST_DOWNS: [&str; 4] = ["roughing the passer", "pass interference", "unnecessary roughness", "illegal contact"];

const STATUS_SUFFIXES: [&str; 3] = [" - declined", " declined", " offsetting"];

/// `PENALTY [on ]TEAM[ {P}], TYPE[, N yards][, enforced at {SPOT}]`
static PENALTY: Lazy<Regex> = Lazy::new(|| {
	Regex::new(&format!(
		r"(?i:penalty)(?:\s(?i:on))?\s(?P<pteam>[A-Z]{{2,3}})\b(?:\s{})?(?:,\s|\s)(?P<ptype>[A-Za-z][^,()]*[A-Za-z])(?:,\s(?P<pyds>\d+)\syards?)?(?:,\s(?:enforced\sat\s){})?",
		player("penalty_player"),
		spot("enforced_spot")
	))
	.unwrap()
});

static OFFSETTING_RULE: Rule = Rule {
	name: "offsetting_penalties",
	guard: Guard::any(&["offsetting penalties", "penalties offset"]),
	pattern: &ANYTHING,
	action: Action::Extract(extract_offsetting),
};

static PENALTY_RULE: Rule = Rule {
	name: "penalty",
	guard: Guard::all(&["penalty"]),
	pattern: &PENALTY,
	action: Action::Extract(extract_penalty),
};

pub static PENALTY_RULES: &[&Rule] = &[&OFFSETTING_RULE, &PENALTY_RULE];

pub fn extract_offsetting(_: &Captures<'_>, builder: &mut PlayBuilder<'_>) {
	builder.event.is_penalty = true;
	builder.event.penalty_offsetting = true;
	builder.set_gain(Some(0));
}

/// `PENALTY HAM #55 B.Lee, Roughing the passer, 15 yards, enforced at the HAM 35`
pub fn extract_penalty(caps: &Captures<'_>, builder: &mut PlayBuilder<'_>) {
	credit_penalty(caps, builder);
	builder.set_gain(Some(0));
}

fn strip_status(penalty_type: &str) -> String {
	let mut penalty_type = penalty_type.trim();
	for suffix in STATUS_SUFFIXES {
		if penalty_type.len() > suffix.len() && penalty_type.to_lowercase().ends_with(suffix) {
			penalty_type = penalty_type[..penalty_type.len() - suffix.len()].trim_end();
		}
	}
	penalty_type.to_string()
}

fn credit_penalty(caps: &Captures<'_>, builder: &mut PlayBuilder<'_>) {
	builder.event.is_penalty = true;
	builder.event.penalty_team = text(caps, "pteam");
	builder.event.penalty_player_name = text(caps, "penalty_player");
	builder.event.penalty_type = text(caps, "ptype").map(|penalty_type| strip_status(&penalty_type));
	builder.event.penalty_yards = number(caps, "pyds");
}

fn is_automatic_first_down(penalty_type: &str) -> bool {
	let penalty_type = penalty_type.to_lowercase();
	AUTOMATIC_FIRST_DOWNS.iter().any(|infraction| penalty_type.contains(infraction))
}

/// Parses the penalty clause when present. Returns whether one was found.
pub fn apply_penalty(description: &str, lower: &str, builder: &mut PlayBuilder<'_>) -> bool {
	if !lower.contains("penalty") && !lower.contains("penalties") {
		return false;
	}

	let found = match PENALTY.captures(description) {
		Some(caps) => {
			credit_penalty(&caps, builder);
			true
		}
		None => builder.event.penalty_offsetting,
	};
	if !found {
		return false;
	}

	builder.event.is_penalty = true;
	if lower.contains("declined") {
		builder.event.penalty_declined = true;
	}
	if lower.contains("offsetting") || lower.contains("penalties offset") {
		builder.event.penalty_offsetting = true;
	}

	let accepted = !builder.event.penalty_declined && !builder.event.penalty_offsetting;
	let against_defense = builder.event.penalty_team.as_deref().is_some_and(|team| team.eq_ignore_ascii_case(builder.defteam()));
	let distance = builder.state.down_and_distance;
	if accepted && against_defense && distance.down.is_some() {
		let enough_yards = builder.event.penalty_yards.is_some_and(|yards| yards >= distance.ydstogo);
		let automatic = builder.event.penalty_type.as_deref().is_some_and(is_automatic_first_down);
		builder.event.first_down_penalty = enough_yards || automatic;
	}
	true
}

pub fn is_no_play(lower: &str) -> bool {
	lower.contains("no play") || lower.contains("nullified")
}

/// `no play` or `nullified` wipe out the action that preceded the flag.
pub fn apply_no_play(lower: &str, builder: &mut PlayBuilder<'_>) {
	if is_no_play(lower) {
		builder.event.is_no_play = true;
	}
}
