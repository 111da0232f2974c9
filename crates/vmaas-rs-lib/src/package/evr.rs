use std::cmp::Ordering;
use serde::{Serialize, Deserialize};

/// Epoch, version and release of a package build.
///
/// Equality and hashing are structural so the triple can be interned,
/// ordering goes through [`Evr::compare`] where `1.01` and `1.1` are equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Evr {
	pub epoch: i32,
	pub version: String,
	pub release: String,
}

impl Evr {
	pub fn new(epoch: i32, version: impl Into<String>, release: impl Into<String>) -> Self {
		Self {
			epoch,
			version: version.into(),
			release: release.into(),
		}
	}

	/// Epoch is compared numerically, then version and release with [`rpmvercmp`].
	pub fn compare(&self, other: &Self) -> Ordering {
		compare_evr((self.epoch, self.version.as_str(), self.release.as_str()), (other.epoch, other.version.as_str(), other.release.as_str()))
	}
}

/// Orders two `(epoch, version, release)` triples.
pub(crate) fn compare_evr(a: (i32, &str, &str), b: (i32, &str, &str)) -> Ordering {
	a.0.cmp(&b.0)
		.then_with(|| rpmvercmp(a.1, b.1))
		.then_with(|| rpmvercmp(a.2, b.2))
}

impl std::fmt::Display for Evr {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}:{}-{}", self.epoch, self.version, self.release)
	}
}

fn is_segment_byte(c: u8) -> bool {
	c.is_ascii_alphanumeric() || c == b'~' || c == b'^'
}

fn split_while(s: &[u8], pred: impl Fn(&u8) -> bool) -> (&[u8], &[u8]) {
	let end = s.iter().position(|c| !pred(c)).unwrap_or(s.len());
	s.split_at(end)
}

/// Compares two version (or release) strings the way `rpm` does.
///
/// The strings are split into runs of digits and runs of letters, anything else is a separator.
/// - digit runs compare numerically, letter runs compare bytewise.
/// - a digit run is newer than a letter run at the same position.
/// - `~` sorts before everything, even the end of the string.
/// - `^` sorts after the end of the string but before any other segment.
/// - otherwise the string with segments left over is newer.
pub fn rpmvercmp(a: &str, b: &str) -> Ordering {
	if a == b {
		return Ordering::Equal
	}

	let mut one = a.as_bytes();
	let mut two = b.as_bytes();

	loop {
		while let Some((c, rest)) = one.split_first() {
			if is_segment_byte(*c) { break }
			one = rest;
		}
		while let Some((c, rest)) = two.split_first() {
			if is_segment_byte(*c) { break }
			two = rest;
		}

		/* Tilde */
		match (one.first(), two.first()) {
			(Some(b'~'), Some(b'~')) => { one = &one[1..]; two = &two[1..]; continue },
			(Some(b'~'), _) => return Ordering::Less,
			(_, Some(b'~')) => return Ordering::Greater,
			_ => {},
		}

		/* Caret */
		match (one.first(), two.first()) {
			(Some(b'^'), Some(b'^')) => { one = &one[1..]; two = &two[1..]; continue },
			(Some(b'^'), None) => return Ordering::Greater,
			(None, Some(b'^')) => return Ordering::Less,
			(Some(b'^'), Some(_)) => return Ordering::Less,
			(Some(_), Some(b'^')) => return Ordering::Greater,
			_ => {},
		}

		let (Some(first), false) = (one.first(), two.is_empty()) else { break };

		let numeric = first.is_ascii_digit();
		let (seg_one, rest_one, seg_two, rest_two) = if numeric {
			let (s1, r1) = split_while(one, u8::is_ascii_digit);
			let (s2, r2) = split_while(two, u8::is_ascii_digit);
			(s1, r1, s2, r2)
		} else {
			let (s1, r1) = split_while(one, u8::is_ascii_alphabetic);
			let (s2, r2) = split_while(two, u8::is_ascii_alphabetic);
			(s1, r1, s2, r2)
		};

		/* Segments of different kinds, numeric wins */
		if seg_two.is_empty() {
			return if numeric { Ordering::Greater } else { Ordering::Less }
		}

		let ord = if numeric {
			let (_, s1) = split_while(seg_one, |c| *c == b'0');
			let (_, s2) = split_while(seg_two, |c| *c == b'0');
			s1.len().cmp(&s2.len()).then_with(|| s1.cmp(s2))
		} else {
			seg_one.cmp(seg_two)
		};
		if ord != Ordering::Equal {
			return ord
		}

		one = rest_one;
		two = rest_two;
	}

	match (one.is_empty(), two.is_empty()) {
		(true, true) => Ordering::Equal,
		(true, false) => Ordering::Less,
		_ => Ordering::Greater,
	}
}
