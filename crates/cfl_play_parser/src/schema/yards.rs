use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

/// Goal line to goal line, in yards.
pub const FIELD_LENGTH: i32 = 110;
pub const MIDFIELD: i32 = 55;

static YARD_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

/// Distance from the possessing team to the opponent's goal line.
///
/// Free-text spots that carry no yard marker cannot be converted; they are kept
/// as text so callers have to decide what an unknown spot means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldPosition {
	Absolute(u8),
	Unresolved(String),
}

impl FieldPosition {
	pub fn absolute(&self) -> Option<i32> {
		match self {
			FieldPosition::Absolute(value) => Some(i32::from(*value)),
			FieldPosition::Unresolved(_) => None,
		}
	}
}

/// Converts a yard-line description ("OTT 35", "HAM end zone", "midfield") into
/// a 0-110 distance to go, seen from `posteam`.
pub fn resolve_yardline(text: &str, posteam: &str) -> FieldPosition {
	let lower = text.to_lowercase();
	let own_side = !posteam.is_empty() && text.split_whitespace().any(|token| token == posteam);

	if lower.contains("midfield") {
		return FieldPosition::Absolute(MIDFIELD as u8);
	}

	if lower.contains("end zone") {
		return if own_side { FieldPosition::Absolute(FIELD_LENGTH as u8) } else { FieldPosition::Absolute(0) };
	}

	let Some(marker) = YARD_MARKER.find(text).and_then(|m| m.as_str().parse::<i32>().ok()) else {
		if text.trim().is_empty() {
			debug!(posteam, "empty yard line");
		} else {
			warn!(text, posteam, "no yard marker in yard line, leaving it unresolved");
		}
		return FieldPosition::Unresolved(text.to_string());
	};

	// Opponent-side formula kept in its unreduced form.
	let absolute = if own_side { FIELD_LENGTH - marker } else { FIELD_LENGTH - MIDFIELD - (MIDFIELD - marker) };

	FieldPosition::Absolute(absolute.clamp(0, FIELD_LENGTH) as u8)
}

/// Team abbreviation on whose half a spot lies, `MID` at midfield.
pub fn side_of_field(text: &str) -> Option<String> {
	let trimmed = text.trim();
	if trimmed.to_lowercase().contains("midfield") {
		return Some("MID".to_string());
	}
	trimmed
		.split_whitespace()
		.find(|token| token.len() >= 2 && token.chars().all(|c| c.is_ascii_uppercase()))
		.map(str::to_string)
}
