//! Finding the indexed builds newer than an installed package.

use std::collections::HashSet;

use crate::cache::{ArchId, NameId, PkgId, Snapshot};
use crate::package::Nevra;
use super::input::InputPackage;

/// Builds that may update an input package and how they were found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Candidates<'s> {
	/// The installed EVR is indexed.
	/// Updates must come from a repository of one of `releasevers` when the set is not empty.
	Exact { packages: &'s [PkgId], releasevers: HashSet<&'s str> },
	/// The installed EVR is not indexed, candidates were found by comparing versions.
	Optimistic { packages: &'s [PkgId] },
	NoMatch,
}

impl<'s> Candidates<'s> {
	pub fn packages(&self) -> &'s [PkgId] {
		match self {
			Candidates::Exact { packages, .. } | Candidates::Optimistic { packages } => *packages,
			Candidates::NoMatch => &[],
		}
	}

	pub fn releasevers(&self) -> Option<&HashSet<&'s str>> {
		match self {
			Candidates::Exact { releasevers, .. } => Some(releasevers),
			_ => None,
		}
	}
}

pub(super) fn resolve<'s>(snapshot: &'s Snapshot, input: &InputPackage, optimistic: bool) -> Candidates<'s> {
	let positions = input.evr_id.and_then(|evr| snapshot.evr_positions(input.name_id, evr));
	match positions {
		Some(positions) if !positions.is_empty() => exact_updates(snapshot, input.name_id, positions, input.arch_id),
		_ if optimistic => optimistic_updates(snapshot, input.name_id, &input.nevra),
		_ => Candidates::NoMatch,
	}
}

/// Every build after the last position of the installed EVR.
///
/// The installed build must be indexed for the input's own architecture,
/// an EVR only known for another architecture has no anchor and no updates.
fn exact_updates<'s>(snapshot: &'s Snapshot, name_id: NameId, positions: &[usize], arch_id: Option<ArchId>) -> Candidates<'s> {
	let Some(updates) = snapshot.updates(name_id) else { return Candidates::NoMatch };

	let anchor = positions.iter()
		.filter_map(|position| updates.get(*position))
		.copied()
		.find(|pkg_id| snapshot.package(*pkg_id).is_some_and(|p| Some(p.arch_id) == arch_id));
	let Some(anchor) = anchor else {
		log::trace!("exact_updates - installed EVR not indexed for this arch");
		return Candidates::NoMatch
	};

	if updates.last() == Some(&anchor) {
		return Candidates::NoMatch
	}

	let Some(&last_position) = positions.iter().max() else { return Candidates::NoMatch };
	Candidates::Exact {
		packages: updates.get(last_position + 1..).unwrap_or_default(),
		releasevers: package_releasevers(snapshot, anchor),
	}
}

/// Release versions of the repositories carrying `pkg_id`.
fn package_releasevers(snapshot: &Snapshot, pkg_id: PkgId) -> HashSet<&str> {
	snapshot.package_repos(pkg_id)
		.unwrap_or_default()
		.iter()
		.filter_map(|repo_id| snapshot.repo(*repo_id))
		.filter_map(|repo| repo.releasever.as_deref())
		.collect()
}

/// Every build newer than `nevra`.
///
/// Scans from the newest build backwards since most systems are up to date
/// and only a few builds at the end need comparing.
fn optimistic_updates<'s>(snapshot: &'s Snapshot, name_id: NameId, nevra: &Nevra) -> Candidates<'s> {
	let Some(updates) = snapshot.updates(name_id) else { return Candidates::NoMatch };
	let installed = nevra.evr();

	let start = updates.iter()
		.rposition(|pkg_id| snapshot.package_evr(*pkg_id).is_some_and(|evr| evr.compare(&installed).is_le()))
		.map_or(0, |i| i + 1);

	Candidates::Optimistic { packages: &updates[start..] }
}
