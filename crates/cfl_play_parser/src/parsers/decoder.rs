use crate::error::DecodeError;
use crate::game_state::PlayState;
use crate::parsers::builder::PlayBuilder;
use crate::parsers::rules::{first_match, Action, Rule};
use crate::parsers::{clauses, converts, field_goal, fumble, kicks, pass, penalty, rush};
use crate::schema::{DecodedEvent, PlayCategory, PlayFamily, RawPlay, ScoreDelta, ScoringEvent, ScoringEventType, ScoringSide, TeamSide};
use tracing::debug;

/// Rule table consulted for the primary phrase of a category.
pub fn rules_for(category: PlayCategory) -> &'static [&'static Rule] {
	match category {
		PlayCategory::PassComplete | PlayCategory::PassTouchdown => pass::COMPLETE_RULES,
		PlayCategory::PassIncomplete => pass::INCOMPLETE_RULES,
		PlayCategory::PassInterception => pass::INTERCEPTION_RULES,
		PlayCategory::PassPenalty => pass::PENALTY_RULES,
		PlayCategory::Sack => pass::SACK_RULES,
		PlayCategory::SackPenalty => pass::SACK_PENALTY_RULES,
		PlayCategory::Run | PlayCategory::RunTouchdown => rush::RUN_RULES,
		PlayCategory::RunPenalty => rush::RUN_PENALTY_RULES,
		PlayCategory::Kneel | PlayCategory::KneelPenalty => rush::KNEEL_RULES,
		PlayCategory::Fumble | PlayCategory::FumblePenalty => fumble::FUMBLE_RULES,
		PlayCategory::Punt | PlayCategory::PuntSingle | PlayCategory::PuntPenalty => kicks::PUNT_RULES,
		PlayCategory::Kickoff | PlayCategory::KickoffSingle | PlayCategory::KickoffPenalty => kicks::KICKOFF_RULES,
		PlayCategory::FieldGoalSuccess => field_goal::SUCCESS_RULES,
		PlayCategory::FieldGoalFailed => field_goal::FAILED_RULES,
		PlayCategory::OnePointSuccess => converts::ONE_POINT_SUCCESS_RULES,
		PlayCategory::OnePointFailed => converts::ONE_POINT_FAILED_RULES,
		PlayCategory::OnePointPenalty => converts::ONE_POINT_PENALTY_RULES,
		PlayCategory::TwoPointSuccess | PlayCategory::TwoPointFailed | PlayCategory::TwoPointPenalty => converts::TWO_POINT_RULES,
		PlayCategory::Penalty => penalty::PENALTY_RULES,
	}
}

/// Decodes one play against the situation before the snap.
pub fn decode_play(play: &RawPlay, state: &PlayState) -> Result<DecodedEvent, DecodeError> {
	let category = PlayCategory::from_tags(&play.play_type, play.sub_type.as_deref()).map_err(|err| DecodeError::unrecognized(err, play))?;
	let play_id = play.play_id().map_err(|err| DecodeError::invalid_play_id(err, play))?;

	let description = play.description.trim();
	let lower = description.to_lowercase();
	let mut builder = PlayBuilder::new(play, state, category);
	builder.event.play_id = play_id.composite().map_err(|err| DecodeError::invalid_play_id(err, play))?;

	let rule_name = match first_match(rules_for(category), description, &lower) {
		Some((rule, caps)) => match rule.action {
			Action::Extract(extract) => {
				extract(&caps, &mut builder);
				rule.name
			}
			Action::Unsupported(feature) => return Err(DecodeError::not_yet_supported(feature, play)),
		},
		// A flag that wipes the snap can stand on its own under a penalty sub-type.
		None if category.requires_penalty() && penalty::is_no_play(&lower) && penalty::apply_penalty(description, &lower, &mut builder) => "penalty_clause",
		None => return Err(DecodeError::unmatched(category, play)),
	};

	fumble::apply_fumbles(description, &lower, &mut builder);
	clauses::apply_lateral(description, &lower, &mut builder)?;
	let has_penalty = penalty::apply_penalty(description, &lower, &mut builder);
	if category.requires_penalty() && !has_penalty {
		return Err(DecodeError::unmatched(category, play));
	}
	penalty::apply_no_play(&lower, &mut builder);
	clauses::apply_timeout(description, &lower, &mut builder)?;
	clauses::apply_replay(&lower, &builder)?;

	if !builder.event.is_no_play {
		if matches!(builder.family(), PlayFamily::OnePoint | PlayFamily::TwoPoint) {
			converts::apply_defensive_conversion(description, &lower, &mut builder);
		}
		clauses::apply_touchdown(&lower, &mut builder);
		clauses::apply_safety(&lower, &mut builder)?;
	}
	if category.is_single() {
		builder.event.is_rouge = true;
	}

	derive_downs(&mut builder);
	derive_success(&mut builder);
	derive_scores(&mut builder);

	debug!(play_id = %play_id, category = %category, rule = rule_name, "Decoded play");
	Ok(builder.finish())
}

fn by_offense(builder: &PlayBuilder<'_>, team: Option<&str>) -> bool {
	team.is_some_and(|team| team.eq_ignore_ascii_case(builder.posteam()))
}

fn derive_downs(builder: &mut PlayBuilder<'_>) {
	let family = builder.family();
	let distance = builder.state.down_and_distance;
	let event = &builder.event;
	let wiped = event.is_no_play || family == PlayFamily::Penalty;
	let turnover = event.is_interception || event.fumble_lost;

	if !wiped && !turnover && matches!(family, PlayFamily::Pass | PlayFamily::Run | PlayFamily::Kneel | PlayFamily::Fumble) {
		if event.yards_gained.is_some_and(|gained| distance.is_converted(gained)) {
			if builder.event.is_complete_pass {
				builder.event.first_down_pass = true;
			} else if builder.event.rusher_player_name.is_some() {
				builder.event.first_down_rush = true;
			}
		}
	}

	let event = &builder.event;
	if matches!(family, PlayFamily::Pass | PlayFamily::Run | PlayFamily::Kneel) && event.yards_gained.is_some_and(|gained| gained < 0) && builder.has_tackler() {
		builder.event.tackled_for_loss = true;
	}

	if !family.has_down() {
		return;
	}
	let converted = if wiped {
		builder.event.first_down_penalty.then_some(true)
	} else {
		let offense_scored = builder.event.is_touchdown && by_offense(builder, builder.event.td_team.as_deref());
		Some(builder.event.is_first_down() || offense_scored)
	};
	let Some(converted) = converted else {
		return;
	};
	let event = &mut builder.event;
	match distance.down_number() {
		3 => {
			event.third_down_converted = converted;
			event.third_down_failed = !converted;
		}
		4 => {
			event.fourth_down_converted = converted;
			event.fourth_down_failed = !converted;
		}
		_ => {}
	}
}

fn derive_success(builder: &mut PlayBuilder<'_>) {
	let family = builder.family();
	if builder.event.is_no_play || !matches!(family, PlayFamily::Pass | PlayFamily::Sack | PlayFamily::Run | PlayFamily::Kneel | PlayFamily::Fumble) {
		return;
	}
	let success = if builder.event.is_interception || builder.event.fumble_lost {
		Some(false)
	} else if builder.event.is_touchdown && by_offense(builder, builder.event.td_team.as_deref()) {
		Some(true)
	} else {
		builder.event.yards_gained.and_then(|gained| builder.state.down_and_distance.is_successful(gained))
	};
	builder.event.success = success;
}

fn derive_scores(builder: &mut PlayBuilder<'_>) {
	let event = &builder.event;
	let mut scoring = builder.scoring.clone();
	if event.field_goal_result.as_deref() == Some("made") {
		scoring.push(ScoringEvent::new(ScoringEventType::FieldGoal, ScoringSide::Posteam));
	}
	if event.extra_point_result.as_deref() == Some("good") {
		scoring.push(ScoringEvent::new(ScoringEventType::Convert, ScoringSide::Posteam));
	}
	if event.two_point_conv_result.as_deref() == Some("success") {
		scoring.push(ScoringEvent::new(ScoringEventType::TwoPointConversion, ScoringSide::Posteam));
	}
	if event.is_rouge {
		scoring.push(ScoringEvent::new(ScoringEventType::Rouge, ScoringSide::Posteam));
	}

	let delta = if event.is_no_play { ScoreDelta::default() } else { ScoreDelta::from_events(&scoring) };
	let event = &mut builder.event;
	event.posteam_score_post = event.posteam_score + delta.posteam;
	event.defteam_score_post = event.defteam_score + delta.defteam;
	event.score_differential_post = event.posteam_score_post as i32 - event.defteam_score_post as i32;
	let (home, away) = match builder.state.posteam_side {
		TeamSide::Home => (event.posteam_score_post, event.defteam_score_post),
		TeamSide::Away => (event.defteam_score_post, event.posteam_score_post),
	};
	event.total_home_score = home;
	event.total_away_score = away;
	builder.scoring = scoring;
}
