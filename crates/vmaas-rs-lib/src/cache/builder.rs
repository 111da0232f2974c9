//! Assembles a [`Snapshot`] table by table.
//!
//! Identifiers are handed out from `1`, `0` is never issued.

use std::collections::HashMap;

use super::*;

pub struct SnapshotBuilder {
	snapshot: Snapshot,
	next_id: HashMap<&'static str, u32>,
}

impl SnapshotBuilder {
	pub fn new(last_change: impl Into<String>) -> Self {
		Self {
			snapshot: Snapshot {
				last_change: last_change.into(),
				..Default::default()
			},
			next_id: HashMap::new(),
		}
	}

	fn issue(&mut self, table: &'static str) -> u32 {
		let id = self.next_id.entry(table).or_insert(0);
		*id += 1;
		*id
	}

	fn intern_name(&mut self, name: &str) -> NameId {
		if let Some(id) = self.snapshot.name_ids.get(name) {
			return *id
		}
		let id = NameId(self.issue("name"));
		self.snapshot.name_ids.insert(name.to_string(), id);
		self.snapshot.names.insert(id, name.to_string());
		id
	}

	fn intern_evr(&mut self, evr: Evr) -> EvrId {
		if let Some(id) = self.snapshot.evr_ids.get(&evr) {
			return *id
		}
		let id = EvrId(self.issue("evr"));
		self.snapshot.evr_ids.insert(evr.clone(), id);
		self.snapshot.evrs.insert(id, evr);
		id
	}

	fn intern_arch(&mut self, arch: &str) -> ArchId {
		if let Some(id) = self.snapshot.arch_ids.get(arch) {
			return *id
		}
		let id = ArchId(self.issue("arch"));
		self.snapshot.arch_ids.insert(arch.to_string(), id);
		self.snapshot.arches.insert(id, arch.to_string());
		id
	}

	pub fn add_repo(&mut self, detail: RepoDetail) -> RepoId {
		let id = RepoId(self.issue("repo"));
		self.snapshot.repo_label_ids.entry(detail.label.clone()).or_default().push(id);
		self.snapshot.repos.insert(id, detail);
		id
	}

	/// Adds a package build carried by `repos`.
	///
	/// Adding the same NEVRA again returns the existing id and records any new repositories.
	pub fn add_package(&mut self, nevra: &Nevra, repos: &[RepoId]) -> PkgId {
		let name_id = self.intern_name(&nevra.name);
		let evr_id = self.intern_evr(nevra.evr());
		let arch_id = self.intern_arch(&nevra.arch);

		let id = match self.snapshot.nevra_pkg_ids.get(&(name_id, evr_id, arch_id)) {
			Some(id) => *id,
			None => {
				let id = PkgId(self.issue("package"));
				self.snapshot.nevra_pkg_ids.insert((name_id, evr_id, arch_id), id);
				self.snapshot.packages.insert(id, PackageDetail { name_id, evr_id, arch_id });
				self.snapshot.updates.entry(name_id).or_default().push(id);
				id
			}
		};

		let pkg_repos = self.snapshot.pkg_repos.entry(id).or_default();
		for repo in repos {
			if !pkg_repos.contains(repo) {
				pkg_repos.push(*repo);
			}
		}
		id
	}

	pub fn add_erratum(&mut self, detail: ErratumDetail, repos: &[RepoId]) -> ErratumId {
		let id = ErratumId(self.issue("erratum"));
		self.snapshot.erratum_ids.insert(detail.name.clone(), id);
		self.snapshot.errata.insert(id, detail);
		self.snapshot.erratum_repos.entry(id).or_default().extend(repos.iter().copied());
		id
	}

	/// Records that `erratum` ships `package`, optionally only within `modules`.
	pub fn link_erratum_package(&mut self, erratum: ErratumId, package: PkgId, modules: &[ModuleId]) {
		let errata = self.snapshot.pkg_errata.entry(package).or_default();
		if !errata.contains(&erratum) {
			errata.push(erratum);
		}
		if !modules.is_empty() {
			self.snapshot.pkg_erratum_modules.entry((package, erratum)).or_default().extend(modules.iter().copied());
		}
	}

	pub fn add_module(&mut self, stream: ModuleStream) -> ModuleId {
		let id = ModuleId(self.issue("module"));
		self.snapshot.module_streams.entry(stream).or_default().push(id);
		id
	}

	/// The requires graph may contain cycles.
	pub fn add_module_requires(&mut self, module: ModuleId, requires: &[ModuleId]) {
		self.snapshot.module_requires.entry(module).or_default().extend(requires.iter().copied());
	}

	/// Packages of `compatible` may update packages of `arch`.
	pub fn add_arch_compat(&mut self, arch: &str, compatible: &str) {
		let arch = self.intern_arch(arch);
		let compatible = self.intern_arch(compatible);
		self.snapshot.arch_compat.entry(arch).or_default().insert(compatible);
	}

	/// Orders every per-name update list and indexes the EVR positions.
	pub fn build(mut self) -> Snapshot {
		let Snapshot { updates, updates_index, packages, evrs, .. } = &mut self.snapshot;

		for pkg_ids in updates.values_mut() {
			/* stable, equal EVRs keep the order they were added in */
			pkg_ids.sort_by(|a, b| {
				let a = &evrs[&packages[a].evr_id];
				let b = &evrs[&packages[b].evr_id];
				a.compare(b)
			});
		}

		updates_index.clear();
		for (name_id, pkg_ids) in updates.iter() {
			let index = updates_index.entry(*name_id).or_default();
			for (position, pkg_id) in pkg_ids.iter().enumerate() {
				index.entry(packages[pkg_id].evr_id).or_default().push(position);
			}
		}

		log::debug!("Built snapshot with {} packages and {} errata", self.snapshot.package_count(), self.snapshot.erratum_count());
		self.snapshot
	}
}
