use crate::parsers::builder::PlayBuilder;
use crate::parsers::patterns::{gain, gained, number, player, players_in, returned, return_yards, spot, tackles, text, ANYTHING, DEPTH, DIRECTION};
use crate::parsers::rules::{Action, Guard, Rule};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static TOUCHDOWN_LONG_FORM: Lazy<Regex> = Lazy::new(|| {
	Regex::new(&format!(
		r"{}\spass\scomplete{DEPTH}{DIRECTION}\sto\s{}\sfor\sa\s(?P<td_yds>\d+)\syard\s(?i:touchdown)",
		player("passer"),
		player("receiver")
	))
	.unwrap()
});

static COMPLETE: Lazy<Regex> = Lazy::new(|| {
	Regex::new(&format!(
		r"{}\spass\scomplete{DEPTH}{DIRECTION}\sto\s{}(?:,\scaught\sat\s{})?\s{}(?:\sto\s{})?(?:,\sout\sof\sbounds)?{}",
		player("passer"),
		player("receiver"),
		spot("catch_spot"),
		gain("gain"),
		spot("end_spot"),
		tackles("tacklers")
	))
	.unwrap()
});

static SPIKE: Lazy<Regex> = Lazy::new(|| Regex::new(&format!(r"{}\sspikes\sthe\sball", player("passer"))).unwrap());

static THROWN_AWAY: Lazy<Regex> = Lazy::new(|| Regex::new(&format!(r"{}\spass\sincomplete[^,]*,\sthrown\saway", player("passer"))).unwrap());

static DEFENDED: Lazy<Regex> = Lazy::new(|| {
	Regex::new(&format!(
		r"{}\spass\sincomplete{DEPTH}{DIRECTION}(?:\sintended\sfor\s{})?,?\s(?:broken\sup|knocked\sdown|defended)\sby\s{}",
		player("passer"),
		player("receiver"),
		player("defender")
	))
	.unwrap()
});

static DROPPED: Lazy<Regex> = Lazy::new(|| {
	Regex::new(&format!(
		r"{}\spass\sincomplete{DEPTH}{DIRECTION}\sintended\sfor\s{},?\sdropped",
		player("passer"),
		player("receiver")
	))
	.unwrap()
});

static INCOMPLETE: Lazy<Regex> = Lazy::new(|| {
	Regex::new(&format!(
		r"{}\spass\sincomplete{DEPTH}{DIRECTION}(?:\sintended\sfor\s{})?",
		player("passer"),
		player("receiver")
	))
	.unwrap()
});

static INTERCEPTION: Lazy<Regex> = Lazy::new(|| {
	Regex::new(&format!(
		r"{}\spass{DEPTH}{DIRECTION}(?:\sintended\sfor\s{})?,?\sintercepted\sby\s{}(?:\sat\s{})?(?:,?\s{}|,?\s(?P<no_return>no\sreturn))?(?:\sto\s{})?{}",
		player("passer"),
		player("receiver"),
		player("interceptor"),
		spot("interception_spot"),
		return_yards("ret"),
		spot("end_spot"),
		tackles("tacklers")
	))
	.unwrap()
});

static NULLIFIED: Lazy<Regex> = Lazy::new(|| Regex::new(&format!(r"{}\spass", player("passer"))).unwrap());

static SACKED_BY: Lazy<Regex> = Lazy::new(|| {
	Regex::new(&format!(
		r"{}\ssacked\sby\s{}(?:\sand\s{})?\s{}(?:\s(?:to|at)\s{})?",
		player("passer"),
		player("sacker_1"),
		player("sacker_2"),
		gain("gain"),
		spot("end_spot")
	))
	.unwrap()
});

static SACKED: Lazy<Regex> = Lazy::new(|| {
	Regex::new(&format!(
		r"{}\ssacked(?:\sat\s{})?\s{}(?:\sto\s{})?{}",
		player("passer"),
		spot("sack_spot"),
		gain("gain"),
		spot("end_spot"),
		tackles("sackers")
	))
	.unwrap()
});

static SACK_NULLIFIED: Lazy<Regex> = Lazy::new(|| Regex::new(&format!(r"{}\ssacked", player("passer"))).unwrap());

static LATERAL_AFTER_CATCH: Rule = Rule {
	name: "pass_complete_lateral",
	guard: Guard::all(&["pass complete", "lateral to"]).without(&["recovered by"]),
	pattern: &ANYTHING,
	action: Action::Unsupported("lateral after completed pass"),
};

static TOUCHDOWN_LONG_FORM_RULE: Rule = Rule {
	name: "pass_complete_touchdown_long_form",
	guard: Guard::all(&["pass complete", "yard touchdown"]),
	pattern: &TOUCHDOWN_LONG_FORM,
	action: Action::Extract(extract_touchdown_long_form),
};

static COMPLETE_RULE: Rule = Rule {
	name: "pass_complete",
	guard: Guard::all(&["pass complete"]),
	pattern: &COMPLETE,
	action: Action::Extract(extract_complete),
};

static SPIKE_RULE: Rule = Rule {
	name: "spike",
	guard: Guard::all(&["spikes the ball"]),
	pattern: &SPIKE,
	action: Action::Extract(extract_spike),
};

static THROWN_AWAY_RULE: Rule = Rule {
	name: "pass_incomplete_thrown_away",
	guard: Guard::all(&["pass incomplete", "thrown away"]),
	pattern: &THROWN_AWAY,
	action: Action::Extract(extract_incomplete),
};

static DEFENDED_RULE: Rule = Rule {
	name: "pass_incomplete_defended",
	guard: Guard::any(&["broken up by", "knocked down by", "defended by"]),
	pattern: &DEFENDED,
	action: Action::Extract(extract_defended),
};

static DROPPED_RULE: Rule = Rule {
	name: "pass_incomplete_dropped",
	guard: Guard::all(&["pass incomplete", "dropped"]),
	pattern: &DROPPED,
	action: Action::Extract(extract_incomplete),
};

static INCOMPLETE_RULE: Rule = Rule {
	name: "pass_incomplete",
	guard: Guard::all(&["pass incomplete"]),
	pattern: &INCOMPLETE,
	action: Action::Extract(extract_incomplete),
};

static INTERCEPTION_LATERAL: Rule = Rule {
	name: "interception_lateral",
	guard: Guard::all(&["intercepted by", "lateral to"]).without(&["recovered by"]),
	pattern: &ANYTHING,
	action: Action::Unsupported("lateral after interception"),
};

static INTERCEPTION_RULE: Rule = Rule {
	name: "interception",
	guard: Guard::all(&["intercepted by"]),
	pattern: &INTERCEPTION,
	action: Action::Extract(extract_interception),
};

static NULLIFIED_RULE: Rule = Rule {
	name: "pass_nullified",
	guard: Guard::ALWAYS,
	pattern: &NULLIFIED,
	action: Action::Extract(extract_nullified),
};

pub static COMPLETE_RULES: &[&Rule] = &[&LATERAL_AFTER_CATCH, &TOUCHDOWN_LONG_FORM_RULE, &COMPLETE_RULE];

pub static INCOMPLETE_RULES: &[&Rule] = &[&SPIKE_RULE, &THROWN_AWAY_RULE, &DEFENDED_RULE, &DROPPED_RULE, &INCOMPLETE_RULE];

pub static INTERCEPTION_RULES: &[&Rule] = &[&INTERCEPTION_LATERAL, &INTERCEPTION_RULE];

pub static PENALTY_RULES: &[&Rule] = &[
	&LATERAL_AFTER_CATCH,
	&TOUCHDOWN_LONG_FORM_RULE,
	&COMPLETE_RULE,
	&INTERCEPTION_LATERAL,
	&INTERCEPTION_RULE,
	&SPIKE_RULE,
	&THROWN_AWAY_RULE,
	&DEFENDED_RULE,
	&DROPPED_RULE,
	&INCOMPLETE_RULE,
	&NULLIFIED_RULE,
];

static SACKED_BY_RULE: Rule = Rule {
	name: "sack_by",
	guard: Guard::all(&["sacked by"]),
	pattern: &SACKED_BY,
	action: Action::Extract(extract_sacked_by),
};

static SACKED_RULE: Rule = Rule {
	name: "sack",
	guard: Guard::all(&["sacked"]),
	pattern: &SACKED,
	action: Action::Extract(extract_sacked),
};

static SACK_NULLIFIED_RULE: Rule = Rule {
	name: "sack_nullified",
	guard: Guard::all(&["sacked"]),
	pattern: &SACK_NULLIFIED,
	action: Action::Extract(extract_sack_nullified),
};

pub static SACK_RULES: &[&Rule] = &[&SACKED_BY_RULE, &SACKED_RULE];

pub static SACK_PENALTY_RULES: &[&Rule] = &[&SACKED_BY_RULE, &SACKED_RULE, &SACK_NULLIFIED_RULE];

fn pass_shape(caps: &Captures<'_>, builder: &mut PlayBuilder<'_>) {
	builder.event.passer_player_name = text(caps, "passer");
	builder.event.pass_length = text(caps, "depth");
	builder.event.pass_location = text(caps, "direction");
}

fn credit_completion(builder: &mut PlayBuilder<'_>, yards: Option<i32>) {
	builder.event.is_complete_pass = true;
	builder.set_gain(yards);
	builder.event.passing_yards = yards;
	builder.event.receiving_yards = yards;
	let receiver = builder.event.receiver_player_name.clone();
	builder.carry_for_offense(receiver);
}

/// `#9 J.Smith pass complete deep left to #88 T.Jones for a 45 yard touchdown`
pub fn extract_touchdown_long_form(caps: &Captures<'_>, builder: &mut PlayBuilder<'_>) {
	pass_shape(caps, builder);
	builder.event.receiver_player_name = text(caps, "receiver");
	credit_completion(builder, number(caps, "td_yds"));
}

/// `#9 J.Smith pass complete short middle to #88 T.Jones for 12 yards to the OTT 45 (#55 B.Lee)`
pub fn extract_complete(caps: &Captures<'_>, builder: &mut PlayBuilder<'_>) {
	pass_shape(caps, builder);
	builder.event.receiver_player_name = text(caps, "receiver");
	let yards = gained(caps, "gain");
	credit_completion(builder, yards);

	if let Some(catch_spot) = text(caps, "catch_spot") {
		let air_yards = builder.state.yardline_100.absolute().zip(builder.resolve(&catch_spot)).map(|(start, catch)| start - catch);
		builder.event.air_yards = air_yards;
		builder.event.yards_after_catch = air_yards.zip(yards).map(|(air, total)| total - air);
	}
	if let Some(end_spot) = text(caps, "end_spot") {
		builder.event.end_yardline_100 = builder.resolve(&end_spot);
	}
	builder.primary_tacklers(text(caps, "tacklers"));
}

pub fn extract_spike(caps: &Captures<'_>, builder: &mut PlayBuilder<'_>) {
	builder.event.passer_player_name = text(caps, "passer");
	builder.event.qb_spike = true;
	builder.event.is_incomplete_pass = true;
	builder.set_gain(Some(0));
}

pub fn extract_incomplete(caps: &Captures<'_>, builder: &mut PlayBuilder<'_>) {
	pass_shape(caps, builder);
	builder.event.receiver_player_name = text(caps, "receiver");
	builder.event.is_incomplete_pass = true;
	builder.set_gain(Some(0));
}

pub fn extract_defended(caps: &Captures<'_>, builder: &mut PlayBuilder<'_>) {
	extract_incomplete(caps, builder);
	builder.event.pass_defense_1_player_name = text(caps, "defender");
}

/// The defence owns the ball after the pick; a touchdown here is theirs.
pub fn extract_interception(caps: &Captures<'_>, builder: &mut PlayBuilder<'_>) {
	pass_shape(caps, builder);
	builder.event.receiver_player_name = text(caps, "receiver");
	builder.event.is_interception = true;
	builder.event.interception_player_name = text(caps, "interceptor");
	builder.event.return_team = Some(builder.defteam().to_string());
	builder.event.return_yards = if caps.name("no_return").is_some() { Some(0) } else { returned(caps, "ret") };
	builder.set_gain(Some(0));

	let interceptor = builder.event.interception_player_name.clone();
	builder.carry_for_defense(interceptor);
	builder.primary_tacklers(text(caps, "tacklers"));
}

pub fn extract_nullified(caps: &Captures<'_>, builder: &mut PlayBuilder<'_>) {
	builder.event.passer_player_name = text(caps, "passer");
}

fn credit_sack(caps: &Captures<'_>, builder: &mut PlayBuilder<'_>, sackers: &[String]) {
	builder.event.is_sack = true;
	builder.event.passer_player_name = text(caps, "passer");
	builder.set_gain(gained(caps, "gain"));
	match sackers {
		[] => {}
		[single] => builder.event.sack_player_name = Some(single.clone()),
		[first, second, ..] => {
			builder.event.half_sack_1_player_name = Some(first.clone());
			builder.event.half_sack_2_player_name = Some(second.clone());
		}
	}
	if let Some(end_spot) = text(caps, "end_spot") {
		builder.event.end_yardline_100 = builder.resolve(&end_spot);
	}
	let passer = builder.event.passer_player_name.clone();
	builder.carry_for_offense(passer);
}

/// `#9 J.Smith sacked by #90 A.Rush and #91 B.Rush for a loss of 8 yards to the OTT 27`
pub fn extract_sacked_by(caps: &Captures<'_>, builder: &mut PlayBuilder<'_>) {
	let sackers: Vec<String> = ["sacker_1", "sacker_2"].iter().filter_map(|group| text(caps, group)).collect();
	credit_sack(caps, builder, &sackers);
}

/// `#9 J.Smith sacked at OTT 27 for -8 yards (#90 A.Rush)`
pub fn extract_sacked(caps: &Captures<'_>, builder: &mut PlayBuilder<'_>) {
	let sackers = text(caps, "sackers").as_deref().map(players_in).unwrap_or_default();
	credit_sack(caps, builder, &sackers);
}

pub fn extract_sack_nullified(caps: &Captures<'_>, builder: &mut PlayBuilder<'_>) {
	builder.event.is_sack = true;
	builder.event.passer_player_name = text(caps, "passer");
}
