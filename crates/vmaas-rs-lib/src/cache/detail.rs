//! Records stored in the snapshot tables.

use serde::{Serialize, Deserialize};

use super::{NameId, EvrId, ArchId};

pub const SECURITY_ERRATA_TYPE: &str = "security";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageDetail {
	pub name_id: NameId,
	pub evr_id: EvrId,
	pub arch_id: ArchId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoDetail {
	pub label: String,
	pub url: String,
	/// When absent, requests match `basearch` against the url instead.
	pub basearch: Option<String>,
	/// When absent, requests match `releasever` against the url instead.
	pub releasever: Option<String>,
	#[serde(default)]
	pub third_party: bool,
}

/// An advisory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErratumDetail {
	pub name: String,
	#[serde(rename = "type")]
	pub kind: String,
	#[serde(default)]
	pub severity: Option<String>,
	#[serde(default)]
	pub third_party: bool,
	#[serde(default)]
	pub issued: Option<String>,
	#[serde(default)]
	pub updated: Option<String>,
	#[serde(default)]
	pub cves: Vec<String>,
}

impl ErratumDetail {
	/// Typed as security, or fixing at least one CVE.
	pub fn is_security(&self) -> bool {
		self.kind == SECURITY_ERRATA_TYPE || !self.cves.is_empty()
	}
}

/// A module name and stream, e.g. `nodejs:10`.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ModuleStream {
	pub module_name: String,
	pub module_stream: String,
}

impl ModuleStream {
	pub fn new(module_name: impl Into<String>, module_stream: impl Into<String>) -> Self {
		Self {
			module_name: module_name.into(),
			module_stream: module_stream.into(),
		}
	}
}

impl std::str::FromStr for ModuleStream {
	type Err = crate::Error;
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.split_once(':') {
			Some((name, stream)) if !name.is_empty() && !stream.is_empty() => Ok(Self::new(name, stream)),
			_ => Err(crate::Error::Parse(format!("module \"{}\" is not in name:stream form", s))),
		}
	}
}

impl std::fmt::Display for ModuleStream {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}:{}", self.module_name, self.module_stream)
	}
}
