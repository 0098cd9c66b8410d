use cfl_play_parser::schema::{Matchup, Phase, RawPlay, ScheduledGame, Team};
use cfl_play_parser::{GameContext, GameTracker};

fn raw(id: &str, team_id: i64, play_type: &str, sub_type: Option<&str>, start: &str, clock: &str, description: &str) -> RawPlay {
	RawPlay {
		play_type: play_type.to_string(),
		sub_type: sub_type.map(str::to_string),
		description: description.to_string(),
		team_id,
		id: id.to_string(),
		timestamp: 0,
		clock: clock.to_string(),
		phase: "Q1".to_string(),
		phase_qualifier: 0,
		play_start_position: start.to_string(),
		is_scoring: false,
	}
}

fn main() {
	let game = ScheduledGame {
		event_id: 6001,
		fixture_id: Some(9001),
		event_type_name: "Regular Season".to_string(),
		team_1_score: None,
		team_2_score: None,
		week: Some(1),
	};
	let matchup = Matchup::new(Team::new(10, "HAM"), Team::new(20, "OTT"));
	let mut tracker = GameTracker::new(GameContext::new(2024, &game, 9001, matchup));

	// The feed delivers each quarter newest first.
	let plays = vec![
		raw("1-3", 20, "pass", Some("completePass"), "OTT 40", "13:41", "#9 J.Smith pass complete short right to #88 T.Jones for 12 yards to the OTT 52 (#55 B.Lee)"),
		raw("1-2", 20, "run", None, "OTT 35", "14:20", "#20 A.Back rush left for 5 yards to the OTT 40 (#44 C.Doe)"),
		raw("0-1", 10, "kickoff", None, "HAM 35", "15:00", "#3 L.Kicker kicks off 60 yards to the OTT 15, #20 K.Return returns 20 yards to the OTT 35 (#55 B.Lee)"),
	];

	match tracker.process_quarter(Phase::Q1, &plays) {
		Ok(events) => {
			for event in events {
				println!(
					"{:>5} {:<4} {:<9} down={:?} togo={:?} gained={:?} {}",
					event.play_id, event.posteam, event.play_type, event.down, event.ydstogo, event.yards_gained, event.desc
				);
			}
		}
		Err(e) => {
			eprintln!("Failed to decode quarter: {}", e);
		}
	}
}
