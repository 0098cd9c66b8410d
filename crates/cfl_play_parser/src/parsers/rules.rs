use crate::parsers::builder::PlayBuilder;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Cheap substring test on the lower-cased description, run before the regex.
#[derive(Debug, Clone, Copy)]
pub struct Guard {
	all: &'static [&'static str],
	any: &'static [&'static str],
	none: &'static [&'static str],
}

impl Guard {
	pub const ALWAYS: Guard = Guard { all: &[], any: &[], none: &[] };

	pub const fn all(words: &'static [&'static str]) -> Self {
		Guard { all: words, any: &[], none: &[] }
	}

	pub const fn any(words: &'static [&'static str]) -> Self {
		Guard { all: &[], any: words, none: &[] }
	}

	pub const fn without(self, words: &'static [&'static str]) -> Self {
		Guard {
			all: self.all,
			any: self.any,
			none: words,
		}
	}

	pub fn passes(&self, lower: &str) -> bool {
		self.all.iter().all(|word| lower.contains(word)) && (self.any.is_empty() || self.any.iter().any(|word| lower.contains(word))) && !self.none.iter().any(|word| lower.contains(word))
	}
}

pub type Extractor = fn(&Captures<'_>, &mut PlayBuilder<'_>);

#[derive(Clone, Copy)]
pub enum Action {
	Extract(Extractor),
	/// Phrasing that is recognised but deliberately not decoded yet.
	Unsupported(&'static str),
}

/// One entry of an ordered phrase cascade.
pub struct Rule {
	pub name: &'static str,
	pub guard: Guard,
	pub pattern: &'static Lazy<Regex>,
	pub action: Action,
}

/// First rule whose guard passes and whose pattern matches wins.
pub fn first_match<'t>(rules: &[&'static Rule], description: &'t str, lower: &str) -> Option<(&'static Rule, Captures<'t>)> {
	rules.iter().copied().filter(|rule| rule.guard.passes(lower)).find_map(|rule| rule.pattern.captures(description).map(|caps| (rule, caps)))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::parsers::patterns::ANYTHING;

	static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

	fn noop(_: &Captures<'_>, _: &mut PlayBuilder<'_>) {}

	static LATERAL: Rule = Rule {
		name: "lateral",
		guard: Guard::all(&["lateral"]).without(&["recovered"]),
		pattern: &ANYTHING,
		action: Action::Unsupported("lateral"),
	};

	static YARDAGE: Rule = Rule {
		name: "digits",
		guard: Guard::any(&["yards", "yard"]),
		pattern: &DIGITS,
		action: Action::Extract(noop),
	};

	static FALLBACK: Rule = Rule {
		name: "fallback",
		guard: Guard::ALWAYS,
		pattern: &ANYTHING,
		action: Action::Extract(noop),
	};

	static RULES: &[&Rule] = &[&LATERAL, &YARDAGE, &FALLBACK];

	fn winner(description: &str) -> &'static str {
		first_match(RULES, description, &description.to_lowercase()).map(|(rule, _)| rule.name).unwrap()
	}

	#[test]
	fn test_cascade_order() {
		let test_cases = vec![
			("pitch, lateral to J.Smith", "lateral"),
			("lateral to J.Smith, recovered for 3 yards", "digits"),
			("for 3 yards", "digits"),
			("for no yards", "fallback"),
			("kneels", "fallback"),
		];

		for (input, expected) in test_cases {
			assert_eq!(winner(input), expected, "Failed for input: {input}");
		}
	}

	#[test]
	fn test_guard_combinations() {
		let guard = Guard::all(&["pass complete", "lateral to"]).without(&["recovered by"]);
		assert!(guard.passes("pass complete to x, lateral to y"));
		assert!(!guard.passes("pass complete to x"));
		assert!(!guard.passes("pass complete to x, fumbled, recovered by ham, lateral to y"));
		assert!(Guard::ALWAYS.passes(""));
	}
}
