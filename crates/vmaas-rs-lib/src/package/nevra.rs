use std::cmp::Ordering;
use std::sync::LazyLock;
use regex::Regex;
use serde::{Serialize, Deserialize};

use super::Evr;

/* The epoch may lead the name (`1:bash-...`) or the version (`bash-1:...`), never both. */
static NEVRA_RE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^(?:(?P<e1>[0-9]+):)?(?P<name>[^:]+)-(?:(?P<e2>[0-9]+):)?(?P<version>[^-:]+)-(?P<release>[^-:]+)\.(?P<arch>[a-z0-9_]+)$")
		.expect("NEVRA regex is valid")
});

/// A package build identity: name, epoch, version, release and architecture.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Nevra {
	pub name: String,
	pub epoch: i32,
	pub version: String,
	pub release: String,
	pub arch: String,
}

impl Nevra {
	/// Parses `name-[epoch:]version-release.arch` or `[epoch:]name-version-release.arch`.
	///
	/// A trailing `.rpm` is ignored and a missing epoch is `0`.
	pub fn parse(s: &str) -> crate::Result<Self> {
		let stripped = s.strip_suffix(".rpm").unwrap_or(s);
		let caps = NEVRA_RE.captures(stripped)
			.ok_or_else(|| crate::Error::Parse(format!("\"{}\" is not a valid NEVRA", s)))?;

		let epoch = match (caps.name("e1"), caps.name("e2")) {
			(Some(_), Some(_)) => return Err(crate::Error::Parse(format!("\"{}\" specifies the epoch twice", s))),
			(Some(e), None) | (None, Some(e)) => e.as_str().parse::<i32>()
				.map_err(|_| crate::Error::Parse(format!("epoch \"{}\" of \"{}\" is out of range", e.as_str(), s)))?,
			(None, None) => 0,
		};

		Ok(Self {
			name: caps["name"].to_string(),
			epoch,
			version: caps["version"].to_string(),
			release: caps["release"].to_string(),
			arch: caps["arch"].to_string(),
		})
	}

	pub fn evr(&self) -> Evr {
		Evr::new(self.epoch, self.version.clone(), self.release.clone())
	}

	/// Orders by epoch, version and release only.
	pub fn cmp_evr(&self, other: &Self) -> Ordering {
		super::evr::compare_evr((self.epoch, self.version.as_str(), self.release.as_str()), (other.epoch, other.version.as_str(), other.release.as_str()))
	}

	/// Like [`cmp_evr`](Self::cmp_evr) with the architecture as the final tie breaker.
	pub fn cmp_evra(&self, other: &Self) -> Ordering {
		self.cmp_evr(other).then_with(|| self.arch.cmp(&other.arch))
	}
}

impl std::str::FromStr for Nevra {
	type Err = crate::Error;
	fn from_str(s: &str) -> Result<Self, Self::Err> { Self::parse(s) }
}

impl std::fmt::Display for Nevra {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}-{}:{}-{}.{}", self.name, self.epoch, self.version, self.release, self.arch)
	}
}
