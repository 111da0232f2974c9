//! # Index snapshot
//!
//! An immutable set of interned lookup tables describing packages, repositories,
//! errata and module streams. A snapshot is built once by [`SnapshotBuilder`],
//! usually from a [`Dump`], and never changes afterwards.
//! Refreshing the data means building a new snapshot and publishing it through a [`SnapshotHandle`].
//!
//! Lookups return `None` for an unknown key, which is distinct from a known key with no entries.

use std::collections::{BTreeMap, HashMap, HashSet};
use serde::{Serialize, Deserialize};

use crate::package::{Evr, Nevra};

mod ids;
pub use ids::*;

mod detail;
pub use detail::*;

pub mod builder;
pub use builder::SnapshotBuilder;

pub mod dump;
pub use dump::Dump;

mod generation;

mod handle;
pub use handle::SnapshotHandle;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
	name_ids: HashMap<String, NameId>,
	names: HashMap<NameId, String>,
	evr_ids: HashMap<Evr, EvrId>,
	evrs: HashMap<EvrId, Evr>,
	arch_ids: HashMap<String, ArchId>,
	arches: HashMap<ArchId, String>,

	packages: HashMap<PkgId, PackageDetail>,
	nevra_pkg_ids: HashMap<(NameId, EvrId, ArchId), PkgId>,
	/// Every build of a name, ascending by EVR.
	updates: HashMap<NameId, Vec<PkgId>>,
	/// Positions in `updates` of each EVR of a name, one per architecture.
	updates_index: HashMap<NameId, HashMap<EvrId, Vec<usize>>>,

	repos: BTreeMap<RepoId, RepoDetail>,
	repo_label_ids: HashMap<String, Vec<RepoId>>,
	pkg_repos: HashMap<PkgId, Vec<RepoId>>,

	errata: HashMap<ErratumId, ErratumDetail>,
	erratum_ids: HashMap<String, ErratumId>,
	pkg_errata: HashMap<PkgId, Vec<ErratumId>>,
	erratum_repos: HashMap<ErratumId, HashSet<RepoId>>,
	pkg_erratum_modules: HashMap<(PkgId, ErratumId), Vec<ModuleId>>,

	module_streams: HashMap<ModuleStream, Vec<ModuleId>>,
	module_requires: HashMap<ModuleId, Vec<ModuleId>>,

	arch_compat: HashMap<ArchId, HashSet<ArchId>>,

	last_change: String,
}

impl Snapshot {
	/* Interned values */

	pub fn name_id(&self, name: &str) -> Option<NameId> {
		self.name_ids.get(name).copied()
	}

	pub fn name(&self, id: NameId) -> Option<&str> {
		self.names.get(&id).map(String::as_str)
	}

	pub fn evr_id(&self, evr: &Evr) -> Option<EvrId> {
		self.evr_ids.get(evr).copied()
	}

	pub fn evr(&self, id: EvrId) -> Option<&Evr> {
		self.evrs.get(&id)
	}

	pub fn arch_id(&self, arch: &str) -> Option<ArchId> {
		self.arch_ids.get(arch).copied()
	}

	pub fn arch(&self, id: ArchId) -> Option<&str> {
		self.arches.get(&id).map(String::as_str)
	}

	/* Packages */

	pub fn package(&self, id: PkgId) -> Option<&PackageDetail> {
		self.packages.get(&id)
	}

	pub fn package_evr(&self, id: PkgId) -> Option<&Evr> {
		self.package(id).and_then(|p| self.evr(p.evr_id))
	}

	pub fn package_id(&self, nevra: &Nevra) -> Option<PkgId> {
		let key = (self.name_id(&nevra.name)?, self.evr_id(&nevra.evr())?, self.arch_id(&nevra.arch)?);
		self.nevra_pkg_ids.get(&key).copied()
	}

	/// Rebuilds the NEVRA of an indexed package.
	pub fn package_nevra(&self, id: PkgId) -> Option<Nevra> {
		let detail = self.package(id)?;
		let evr = self.evr(detail.evr_id)?;
		Some(Nevra {
			name: self.name(detail.name_id)?.to_string(),
			epoch: evr.epoch,
			version: evr.version.clone(),
			release: evr.release.clone(),
			arch: self.arch(detail.arch_id)?.to_string(),
		})
	}

	/// All builds of `name`, ascending by EVR.
	pub fn updates(&self, name: NameId) -> Option<&[PkgId]> {
		self.updates.get(&name).map(Vec::as_slice)
	}

	/// Positions of `evr` within [`updates`](Self::updates) of `name`, ascending.
	pub fn evr_positions(&self, name: NameId, evr: EvrId) -> Option<&[usize]> {
		self.updates_index.get(&name)?.get(&evr).map(Vec::as_slice)
	}

	pub fn package_repos(&self, id: PkgId) -> Option<&[RepoId]> {
		self.pkg_repos.get(&id).map(Vec::as_slice)
	}

	pub fn package_errata(&self, id: PkgId) -> Option<&[ErratumId]> {
		self.pkg_errata.get(&id).map(Vec::as_slice)
	}

	/* Repositories */

	pub fn repo(&self, id: RepoId) -> Option<&RepoDetail> {
		self.repos.get(&id)
	}

	/// Every repository, in id order.
	pub fn repo_ids(&self) -> impl Iterator<Item = RepoId> + '_ {
		self.repos.keys().copied()
	}

	pub fn repos_by_label(&self, label: &str) -> Option<&[RepoId]> {
		self.repo_label_ids.get(label).map(Vec::as_slice)
	}

	/* Errata */

	pub fn erratum(&self, id: ErratumId) -> Option<&ErratumDetail> {
		self.errata.get(&id)
	}

	pub fn erratum_id(&self, name: &str) -> Option<ErratumId> {
		self.erratum_ids.get(name).copied()
	}

	pub fn erratum_repos(&self, id: ErratumId) -> Option<&HashSet<RepoId>> {
		self.erratum_repos.get(&id)
	}

	/// Module streams the package is shipped in by this erratum.
	pub fn package_erratum_modules(&self, package: PkgId, erratum: ErratumId) -> Option<&[ModuleId]> {
		self.pkg_erratum_modules.get(&(package, erratum)).map(Vec::as_slice)
	}

	/* Modules */

	pub fn modules_for_stream(&self, stream: &ModuleStream) -> Option<&[ModuleId]> {
		self.module_streams.get(stream).map(Vec::as_slice)
	}

	pub fn module_requires(&self, id: ModuleId) -> Option<&[ModuleId]> {
		self.module_requires.get(&id).map(Vec::as_slice)
	}

	/* Architectures */

	/// Architectures whose packages can update a package of `arch`.
	pub fn compatible_arches(&self, arch: ArchId) -> Option<&HashSet<ArchId>> {
		self.arch_compat.get(&arch)
	}

	/* Metadata */

	/// `last_change` exactly as the loader recorded it.
	pub fn raw_last_change(&self) -> &str {
		&self.last_change
	}

	/// Parses `last_change` as RFC 3339.
	///
	/// # Errors
	/// - [`LastChange`](crate::Error::LastChange) when the stored value is malformed.
	pub fn last_change(&self) -> crate::Result<time::OffsetDateTime> {
		time::OffsetDateTime::parse(&self.last_change, &time::format_description::well_known::Rfc3339)
			.map_err(crate::Error::LastChange)
	}

	pub fn package_count(&self) -> usize {
		self.packages.len()
	}

	pub fn erratum_count(&self) -> usize {
		self.errata.len()
	}
}
