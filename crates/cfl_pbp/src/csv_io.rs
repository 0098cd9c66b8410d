use crate::error::PbpError;
use cfl_play_parser::{DecodedEvent, Roster, RosterEntry};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};

pub fn output_path(output_dir: &Path, season: i32) -> PathBuf {
	output_dir.join(format!("{season}_cfl_pbp.csv"))
}

pub fn read_roster(path: &Path) -> Result<Roster, PbpError> {
	let mut reader = csv::Reader::from_path(path).map_err(|e| PbpError::roster(path, e))?;
	let entries = reader.deserialize::<RosterEntry>().collect::<Result<Vec<_>, _>>().map_err(|e| PbpError::roster(path, e))?;
	Ok(Roster::new(entries))
}

pub fn stamp_last_updated(events: &mut [DecodedEvent], now: DateTime<Utc>) {
	let stamp = now.to_rfc3339();
	for event in events {
		event.last_updated = Some(stamp.clone());
	}
}

/// Writes one header row and one row per event, replacing any earlier file for the season.
pub fn write_events(output_dir: &Path, season: i32, events: &[DecodedEvent]) -> Result<PathBuf, PbpError> {
	fs::create_dir_all(output_dir).map_err(|e| PbpError::output_dir(output_dir, e))?;
	let path = output_path(output_dir, season);

	let mut writer = csv::Writer::from_path(&path)?;
	for event in events {
		writer.serialize(event)?;
	}
	writer.flush()?;
	Ok(path)
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::TimeZone;

	#[test]
	fn test_write_events_with_timestamp() {
		let dir = tempfile::tempdir().unwrap();
		let mut events = vec![
			DecodedEvent {
				season: 2024,
				game_id: 6001,
				play_id: 1002,
				posteam: "OTT".to_string(),
				..DecodedEvent::default()
			},
			DecodedEvent {
				season: 2024,
				game_id: 6001,
				play_id: 1003,
				posteam: "OTT".to_string(),
				..DecodedEvent::default()
			},
		];
		stamp_last_updated(&mut events, Utc.with_ymd_and_hms(2024, 6, 8, 23, 30, 0).unwrap());

		let path = write_events(&dir.path().join("pbp"), 2024, &events).unwrap();
		assert_eq!(path, dir.path().join("pbp").join("2024_cfl_pbp.csv"));

		let mut reader = csv::Reader::from_path(&path).unwrap();
		let headers = reader.headers().unwrap().clone();
		assert_eq!(headers.get(0), Some("season"));
		assert_eq!(headers.iter().last(), Some("last_updated"));

		let rows: Vec<csv::StringRecord> = reader.records().collect::<Result<_, _>>().unwrap();
		assert_eq!(rows.len(), 2);
		let play_id = headers.iter().position(|h| h == "play_id").unwrap();
		assert_eq!(&rows[1][play_id], "1003");
		assert_eq!(rows[0].iter().last(), Some("2024-06-08T23:30:00+00:00"));
	}

	#[test]
	fn test_read_roster() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("roster.csv");
		fs::write(&path, "player_id,first_name,last_name,team\n101,Dru,Brown,OTT\n202,Bo,Levi Mitchell,HAM\n").unwrap();

		let roster = read_roster(&path).unwrap();
		assert_eq!(roster.len(), 2);
		assert_eq!(roster.resolve("OTT", "#4 D.Brown"), Some(101));
		assert_eq!(roster.resolve("HAM", "B.Levi Mitchell"), Some(202));
	}

	#[test]
	fn test_missing_roster_names_path() {
		let err = read_roster(Path::new("/nonexistent/roster.csv")).unwrap_err();
		assert!(matches!(err, PbpError::Roster { .. }));
	}
}
