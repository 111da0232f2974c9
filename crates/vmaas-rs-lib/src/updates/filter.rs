//! Deciding which errata and repositories may deliver a candidate build.

use std::collections::HashSet;

use crate::cache::{ArchId, ErratumDetail, ErratumId, ModuleId, PkgId, RepoDetail, RepoId, Snapshot};
use super::Update;

/// The request-wide constraints applied to every candidate.
pub(super) struct UpdateFilter<'s, 'r> {
	pub snapshot: &'s Snapshot,
	pub repo_ids: &'r [RepoId],
	pub module_ids: &'r HashSet<ModuleId>,
	pub security_only: bool,
	pub third_party: bool,
}

/// Whether `security_only` excludes the erratum.
pub(super) fn filter_non_security(erratum: &ErratumDetail, security_only: bool) -> bool {
	security_only && !erratum.is_security()
}

fn is_arch_compatible(snapshot: &Snapshot, installed: ArchId, candidate: ArchId) -> bool {
	installed == candidate || snapshot.compatible_arches(installed).is_some_and(|c| c.contains(&candidate))
}

/// An empty set places no restriction on the repository.
fn is_repo_valid(repo: &RepoDetail, releasevers: Option<&HashSet<&str>>) -> bool {
	match releasevers {
		Some(releasevers) if !releasevers.is_empty() => repo.releasever.as_deref().is_some_and(|r| releasevers.contains(r)),
		_ => true,
	}
}

impl UpdateFilter<'_, '_> {
	/// Updates delivering `pkg_id` to an installed package of `arch_id`.
	pub fn package_updates(&self, pkg_id: PkgId, arch_id: Option<ArchId>, releasevers: Option<&HashSet<&str>>) -> Vec<Update> {
		let Some(arch_id) = arch_id else { return Vec::new() };

		let Some(errata) = self.snapshot.package_errata(pkg_id).filter(|e| !e.is_empty()) else {
			log::trace!("package_updates - {} has no errata", pkg_id);
			return Vec::new()
		};

		let Some(detail) = self.snapshot.package(pkg_id) else { return Vec::new() };
		if !is_arch_compatible(self.snapshot, arch_id, detail.arch_id) {
			log::trace!("package_updates - {} has no compatible arch", pkg_id);
			return Vec::new()
		}

		let Some(nevra) = self.snapshot.package_nevra(pkg_id) else { return Vec::new() };
		let nevra = nevra.to_string();

		errata.iter()
			.flat_map(|erratum_id| self.erratum_updates(pkg_id, *erratum_id, &nevra, releasevers))
			.collect()
	}

	fn erratum_updates(&self, pkg_id: PkgId, erratum_id: ErratumId, nevra: &str, releasevers: Option<&HashSet<&str>>) -> Vec<Update> {
		let Some(erratum) = self.snapshot.erratum(erratum_id) else { return Vec::new() };

		if filter_non_security(erratum, self.security_only) {
			log::trace!("erratum_updates - {} is not a security erratum", erratum.name);
			return Vec::new()
		}

		if !self.third_party && erratum.third_party {
			log::trace!("erratum_updates - {} is third party", erratum.name);
			return Vec::new()
		}

		/* Errata without module streams apply everywhere */
		let modules = self.snapshot.package_erratum_modules(pkg_id, erratum_id).unwrap_or_default();
		if !modules.is_empty() && !modules.iter().any(|m| self.module_ids.contains(m)) {
			log::trace!("erratum_updates - {} modules {:?} not enabled", erratum.name, modules);
			return Vec::new()
		}

		self.filter_repositories(pkg_id, erratum_id, releasevers)
			.into_iter()
			.map(|repo| Update {
				package: nevra.to_string(),
				erratum: erratum.name.clone(),
				repository: repo.label.clone(),
				basearch: repo.basearch.clone(),
				releasever: repo.releasever.clone(),
			})
			.collect()
	}

	/// Eligible repositories carrying both the package and the erratum.
	fn filter_repositories(&self, pkg_id: PkgId, erratum_id: ErratumId, releasevers: Option<&HashSet<&str>>) -> Vec<&'_ RepoDetail> {
		let pkg_repos = self.snapshot.package_repos(pkg_id).unwrap_or_default();
		let Some(erratum_repos) = self.snapshot.erratum_repos(erratum_id) else { return Vec::new() };
		log::trace!("filter_repositories - eligible {:?} package {:?} erratum {:?}", self.repo_ids, pkg_repos, erratum_repos);

		self.repo_ids.iter()
			.filter(|id| pkg_repos.contains(*id) && erratum_repos.contains(*id))
			.filter_map(|id| self.snapshot.repo(*id))
			.filter(|repo| self.third_party || !repo.third_party)
			.filter(|repo| is_repo_valid(repo, releasevers))
			.collect()
	}
}
