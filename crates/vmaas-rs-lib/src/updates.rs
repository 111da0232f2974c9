//! Resolving the updates available to installed packages.
//!
//! # Process
//! 1. Input packages are parsed, optionally reduced to the latest of each name and arch, and resolved to ids.
//! 1. Request filters become the eligible repositories and module streams.
//! 1. For each package the newer builds are found, by exact EVR lookup or optimistically by comparing versions.
//! 1. Each newer build is kept once per erratum and repository visible to the request.
//!
//! Packages that do not parse or are unknown to the snapshot are still listed with no updates.

use std::collections::HashSet;

use crate::cache::{ModuleId, RepoId, Snapshot};

mod request;
pub use request::{Request, Update, UpdateDetail, Updates};

mod input;
pub use input::filter_latest;
use input::InputPackage;

mod eligibility;
mod candidates;
mod filter;

impl Request {
	/// Resolves this request against `snapshot`.
	///
	/// # Errors
	/// - [`ProcessingInput`](crate::Error::ProcessingInput) when `package_list` is empty.
	/// - [`LastChange`](crate::Error::LastChange) when the snapshot timestamp is malformed.
	pub fn updates(&self, snapshot: &Snapshot) -> crate::Result<Updates> {
		if self.package_list.is_empty() {
			return Err(crate::Error::ProcessingInput("'package_list' is a required property".to_string()))
		}

		let last_change = snapshot.last_change()?;

		let (packages, mut update_list) = input::process_input_packages(snapshot, &self.package_list, self.latest_only);

		if !packages.is_empty() {
			let repo_ids = eligibility::repo_ids(snapshot, &self.repository_list, self.releasever.as_deref(), self.basearch.as_deref());
			let module_ids = eligibility::module_ids(snapshot, &self.modules_list);
			log::trace!("updates - repo_ids {:?} module_ids {:?}", repo_ids, module_ids);

			for package in &packages {
				let detail = self.package_updates(snapshot, package, &repo_ids, &module_ids);
				update_list.insert(package.input.clone(), detail);
			}
		}

		Ok(Updates {
			update_list,
			repository_list: self.repository_list.clone(),
			modules_list: self.modules_list.clone(),
			releasever: self.releasever.clone(),
			basearch: self.basearch.clone(),
			last_change,
		})
	}

	fn package_updates(&self, snapshot: &Snapshot, package: &InputPackage, repo_ids: &[RepoId], module_ids: &HashSet<ModuleId>) -> UpdateDetail {
		let candidates = candidates::resolve(snapshot, package, self.optimistic_updates);
		log::trace!("package_updates - {} candidates {:?}", package.input, candidates);

		let filter = filter::UpdateFilter {
			snapshot,
			repo_ids,
			module_ids,
			security_only: self.security_only,
			third_party: self.third_party,
		};

		let mut available_updates: Vec<Update> = candidates.packages()
			.iter()
			.flat_map(|pkg_id| filter.package_updates(*pkg_id, package.arch_id, candidates.releasevers()))
			.collect();
		available_updates.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
		available_updates.dedup();

		UpdateDetail { available_updates }
	}
}
