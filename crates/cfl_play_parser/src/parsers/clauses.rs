//! Clauses that can trail any primary phrase: laterals, timeouts, replay reviews, touchdowns and safeties.

use crate::error::DecodeError;
use crate::parsers::builder::PlayBuilder;
use crate::parsers::patterns::{player, spot, tackles, text};
use crate::schema::{PlayFamily, ScoringEvent, ScoringEventType, ScoringSide, TeamSide};
use once_cell::sync::Lazy;
use regex::Regex;

static LATERAL: Lazy<Regex> = Lazy::new(|| {
	Regex::new(&format!(
		r"lateral\sto\s{}(?:,?\s(?:returns|returned|for)\s(?:for\s)?(?:(?P<lateral_yds>-?\d+)\syards?|(?P<lateral_none>no\sgain)))?(?:\sto\s{})?{}",
		player("lateral_player"),
		spot("lateral_end"),
		tackles("lateral_tacklers")
	))
	.unwrap()
});

static TIMEOUT: Lazy<Regex> = Lazy::new(|| {
	Regex::new(r"(?:(?i:timeout)(?:\s#\d)?(?:\s(?i:by))?\s(?P<timeout_team>[A-Z]{2,3})\b|(?P<timeout_team_b>[A-Z]{2,3})\s(?i:timeout))").unwrap()
});

/// Hands the ball to the lateral receiver on returns and fumble recoveries.
pub fn apply_lateral(description: &str, lower: &str, builder: &mut PlayBuilder<'_>) -> Result<(), DecodeError> {
	if !lower.contains("lateral to") {
		return Ok(());
	}
	let Some(caps) = LATERAL.captures(description) else {
		return Err(DecodeError::not_yet_supported("lateral", builder.play));
	};

	let receiver = text(&caps, "lateral_player");
	if builder.event.fumble_recovery_1_team.is_some() {
		builder.event.lateral_fumble_recovery_player_name = receiver.clone();
	} else {
		match builder.family() {
			PlayFamily::Punt => builder.event.lateral_punt_returner_player_name = receiver.clone(),
			PlayFamily::Kickoff => builder.event.lateral_kickoff_returner_player_name = receiver.clone(),
			_ => return Err(DecodeError::not_yet_supported("lateral", builder.play)),
		}
	}

	builder.event.lateral_return_yards = text(&caps, "lateral_yds").and_then(|yards| yards.parse().ok()).or_else(|| caps.name("lateral_none").map(|_| 0));
	if let Some(lateral_end) = text(&caps, "lateral_end") {
		builder.event.end_yardline_100 = builder.resolve(&lateral_end);
	}
	builder.secondary_tacklers(text(&caps, "lateral_tacklers"));

	let team = builder.carrier_team().to_string();
	builder.carry(receiver, &team);
	Ok(())
}

/// Charges a timeout to the named team. A timeout that cannot be charged is an error.
pub fn apply_timeout(description: &str, lower: &str, builder: &mut PlayBuilder<'_>) -> Result<(), DecodeError> {
	if !lower.contains("timeout") {
		return Ok(());
	}
	let team = TIMEOUT.captures(description).and_then(|caps| text(&caps, "timeout_team").or_else(|| text(&caps, "timeout_team_b")));
	let Some(team) = team else {
		return Err(DecodeError::not_yet_supported("timeout without a named team", builder.play));
	};
	let Some(side) = builder.state.side_of(&team) else {
		return Err(DecodeError::not_yet_supported("timeout without a named team", builder.play));
	};

	let event = &mut builder.event;
	let remaining = match side {
		TeamSide::Home => &mut event.home_timeouts_remaining,
		TeamSide::Away => &mut event.away_timeouts_remaining,
	};
	if *remaining == 0 {
		return Err(DecodeError::timeouts_exhausted(&team, builder.play));
	}
	*remaining -= 1;

	if side == builder.state.posteam_side {
		event.posteam_timeouts_remaining -= 1;
	} else {
		event.defteam_timeouts_remaining -= 1;
	}
	event.timeout = true;
	event.timeout_team = Some(team.to_uppercase());
	Ok(())
}

const REPLAY_REVERSALS: [&str; 3] = ["reversed", "overturned", "call changed"];

/// A ruling changed on review is refused. A confirmed ruling decodes as written.
pub fn apply_replay(lower: &str, builder: &PlayBuilder<'_>) -> Result<(), DecodeError> {
	if REPLAY_REVERSALS.iter().any(|phrase| lower.contains(phrase)) {
		return Err(DecodeError::not_yet_supported("replay reversal", builder.play));
	}
	Ok(())
}

/// Credits six points to whoever carried the ball last.
pub fn apply_touchdown(lower: &str, builder: &mut PlayBuilder<'_>) {
	if !lower.contains("touchdown") && !builder.category.is_touchdown() {
		return;
	}
	builder.event.is_touchdown = true;

	let scorer = builder.carrier.as_ref().and_then(|carrier| carrier.name.clone());
	let team = builder.carrier_team().to_string();
	let by_offense = team.eq_ignore_ascii_case(builder.posteam());
	builder.event.td_player_name = scorer.clone();
	builder.event.td_team = Some(team);

	let family = builder.family();
	let carried_by = |name: &Option<String>| scorer.is_some() && scorer == *name;
	if by_offense && matches!(family, PlayFamily::Pass) && carried_by(&builder.event.receiver_player_name) {
		builder.event.pass_touchdown = true;
	} else if by_offense && matches!(family, PlayFamily::Run | PlayFamily::Kneel) && carried_by(&builder.event.rusher_player_name) {
		builder.event.rush_touchdown = true;
	} else {
		builder.event.return_touchdown = true;
	}

	let side = if by_offense { ScoringSide::Posteam } else { ScoringSide::Defteam };
	builder.scoring.push(ScoringEvent::new(ScoringEventType::Touchdown, side));
}

/// Two points to the team defending against the last ball carrier.
pub fn apply_safety(lower: &str, builder: &mut PlayBuilder<'_>) -> Result<(), DecodeError> {
	if !lower.contains("safety") {
		return Ok(());
	}
	if builder.event.is_fumble {
		return Err(DecodeError::not_yet_supported("safety after fumble", builder.play));
	}
	builder.event.is_safety = true;
	builder.event.safety_player_name = builder.first_tackler();

	let side = if builder.carrier_team().eq_ignore_ascii_case(builder.posteam()) {
		ScoringSide::Defteam
	} else {
		ScoringSide::Posteam
	};
	builder.scoring.push(ScoringEvent::new(ScoringEventType::Safety, side));
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_timeout_phrasing() {
		let test_cases = vec![
			("Timeout #1 by OTT", "OTT"),
			("TIMEOUT HAM", "HAM"),
			("Timeout BC", "BC"),
			("WPG timeout with 1:45 left", "WPG"),
		];

		for (input, expected) in test_cases {
			let caps = TIMEOUT.captures(input).unwrap();
			let team = text(&caps, "timeout_team").or_else(|| text(&caps, "timeout_team_b"));
			assert_eq!(team.as_deref(), Some(expected), "Failed for input: {input}");
		}
	}

	#[test]
	fn test_lateral_clause() {
		let input = "#20 K.Return returns 12 yards to the OTT 40, lateral to #21 R.Cover for 8 yards to the OTT 48 (#55 B.Lee)";
		let caps = LATERAL.captures(input).unwrap();
		assert_eq!(text(&caps, "lateral_player").as_deref(), Some("R.Cover"));
		assert_eq!(text(&caps, "lateral_yds").as_deref(), Some("8"));
		assert_eq!(text(&caps, "lateral_end").as_deref(), Some("OTT 48"));
		assert_eq!(text(&caps, "lateral_tacklers").as_deref(), Some("#55 B.Lee"));
	}
}
