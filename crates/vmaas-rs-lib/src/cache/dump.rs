//! The JSON document exported by the data loader.
//!
//! Repositories and modules carry loader-local numeric ids so packages and errata
//! can reference them unambiguously, labels are not unique across releases and architectures.

use std::collections::{BTreeMap, HashMap};
use serde::{Serialize, Deserialize};

use super::*;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dump {
	pub last_change: String,
	#[serde(default)]
	pub repos: Vec<DumpRepo>,
	#[serde(default)]
	pub packages: Vec<DumpPackage>,
	#[serde(default)]
	pub modules: Vec<DumpModule>,
	#[serde(default)]
	pub errata: Vec<DumpErratum>,
	/// Architecture to the architectures that may update it.
	#[serde(default)]
	pub arch_compat: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DumpRepo {
	pub id: u32,
	#[serde(flatten)]
	pub detail: RepoDetail,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DumpPackage {
	pub nevra: String,
	#[serde(default)]
	pub repos: Vec<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DumpModule {
	pub id: u32,
	#[serde(flatten)]
	pub stream: ModuleStream,
	#[serde(default)]
	pub requires: Vec<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DumpErratum {
	#[serde(flatten)]
	pub detail: ErratumDetail,
	#[serde(default)]
	pub repos: Vec<u32>,
	#[serde(default)]
	pub packages: Vec<DumpErratumPackage>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DumpErratumPackage {
	pub nevra: String,
	#[serde(default)]
	pub modules: Vec<u32>,
}

fn resolve_refs<T: Copy>(ids: &HashMap<u32, T>, refs: &[u32], kind: &str, owner: &str) -> crate::Result<Vec<T>> {
	refs.iter()
		.map(|r| ids.get(r).copied().ok_or_else(|| crate::Error::Parse(format!("{} references unknown {} {}", owner, kind, r))))
		.collect()
}

impl Dump {
	/// Builds the snapshot described by this dump.
	///
	/// # Errors
	/// - [`Parse`](crate::Error::Parse) for an invalid NEVRA, a repository or module id declared twice,
	///   or a reference to an undeclared repository or module.
	pub fn into_snapshot(self) -> crate::Result<Snapshot> {
		let mut builder = SnapshotBuilder::new(self.last_change);

		let mut repo_ids = HashMap::<u32, RepoId>::with_capacity(self.repos.len());
		for repo in self.repos {
			if repo_ids.contains_key(&repo.id) {
				return Err(crate::Error::Parse(format!("repository id {} is declared twice", repo.id)))
			}
			repo_ids.insert(repo.id, builder.add_repo(repo.detail));
		}

		let mut module_ids = HashMap::<u32, ModuleId>::with_capacity(self.modules.len());
		for module in &self.modules {
			if module_ids.contains_key(&module.id) {
				return Err(crate::Error::Parse(format!("module id {} is declared twice", module.id)))
			}
			module_ids.insert(module.id, builder.add_module(module.stream.clone()));
		}
		for module in &self.modules {
			let requires = resolve_refs(&module_ids, &module.requires, "module", &module.stream.to_string())?;
			builder.add_module_requires(module_ids[&module.id], &requires);
		}

		for package in &self.packages {
			let nevra = Nevra::parse(&package.nevra)?;
			let repos = resolve_refs(&repo_ids, &package.repos, "repository", &package.nevra)?;
			builder.add_package(&nevra, &repos);
		}

		for erratum in self.errata {
			let repos = resolve_refs(&repo_ids, &erratum.repos, "repository", &erratum.detail.name)?;
			let name = erratum.detail.name.clone();
			let erratum_id = builder.add_erratum(erratum.detail, &repos);
			for package in &erratum.packages {
				let nevra = Nevra::parse(&package.nevra)?;
				let modules = resolve_refs(&module_ids, &package.modules, "module", &name)?;
				/* errata may list builds that no repository carries */
				let pkg_id = builder.add_package(&nevra, &[]);
				builder.link_erratum_package(erratum_id, pkg_id, &modules);
			}
		}

		for (arch, compatible) in &self.arch_compat {
			for c in compatible {
				builder.add_arch_compat(arch, c);
			}
		}

		Ok(builder.build())
	}
}
