use std::collections::BTreeMap;
use serde::{Serialize, Deserialize};

use crate::cache::ModuleStream;

/// A request for the updates available to a set of installed packages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Request {
	/// Installed packages as NEVRA strings.
	pub package_list: Vec<String>,
	/// Repository labels to consider, every repository when empty.
	#[serde(default)]
	pub repository_list: Vec<String>,
	/// Enabled module streams.
	#[serde(default)]
	pub modules_list: Vec<ModuleStream>,
	#[serde(default)]
	pub releasever: Option<String>,
	#[serde(default)]
	pub basearch: Option<String>,
	#[serde(default)]
	pub security_only: bool,
	/// Allow errata and repositories from outside the vendor.
	#[serde(default)]
	pub third_party: bool,
	/// Only resolve the highest installed version of each name and arch.
	#[serde(default)]
	pub latest_only: bool,
	/// Resolve packages whose exact version is not indexed by comparing versions.
	#[serde(default)]
	pub optimistic_updates: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Updates {
	/// One entry per input package, including ones that could not be parsed or are unknown.
	pub update_list: BTreeMap<String, UpdateDetail>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub repository_list: Vec<String>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub modules_list: Vec<ModuleStream>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub releasever: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub basearch: Option<String>,
	#[serde(with = "time::serde::rfc3339")]
	pub last_change: time::OffsetDateTime,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateDetail {
	pub available_updates: Vec<Update>,
}

/// A package build that updates an input package, the erratum shipping it and a repository carrying both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Update {
	pub package: String,
	pub erratum: String,
	pub repository: String,
	pub basearch: Option<String>,
	pub releasever: Option<String>,
}

impl Update {
	/// Erratum, then repository label, then the remaining fields so the order is total.
	pub(super) fn sort_key(&self) -> (&str, &str, &str, Option<&str>, Option<&str>) {
		(&self.erratum, &self.repository, &self.package, self.basearch.as_deref(), self.releasever.as_deref())
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn request_uses_service_field_names() {
		let request: Request = serde_json::from_str(r#"{
			"package_list": ["bash-4.4-1.el8.x86_64"],
			"repository_list": ["rhel-8-baseos"],
			"modules_list": [{"module_name": "nodejs", "module_stream": "10"}],
			"releasever": "8",
			"security_only": true,
			"optimistic_updates": true
		}"#).unwrap();

		assert_eq!(request.modules_list, vec![ModuleStream::new("nodejs", "10")]);
		assert_eq!(request.releasever.as_deref(), Some("8"));
		assert!(request.basearch.is_none());
		assert!(request.security_only && request.optimistic_updates);
		assert!(!request.third_party && !request.latest_only);
	}

	#[test]
	fn missing_package_list_is_a_json_error() {
		assert!(serde_json::from_str::<Request>(r#"{"repository_list": []}"#).is_err());
	}
}
