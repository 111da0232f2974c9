//! Turns request filters into the repositories and module streams a request may see.

use std::collections::HashSet;

use crate::cache::{ModuleId, ModuleStream, RepoDetail, RepoId, Snapshot};

/// A structured field must match exactly, repositories without one fall back to a url substring match.
fn field_matches(field: Option<&str>, url: &str, wanted: &str) -> bool {
	match field {
		Some(value) => value == wanted,
		None => url.contains(wanted),
	}
}

fn repo_matches(repo: &RepoDetail, releasever: Option<&str>, basearch: Option<&str>) -> bool {
	releasever.map_or(true, |wanted| field_matches(repo.releasever.as_deref(), &repo.url, wanted))
		&& basearch.map_or(true, |wanted| field_matches(repo.basearch.as_deref(), &repo.url, wanted))
}

/// Repositories named by `labels`, or all of them when none are named, filtered by release and base arch.
pub(super) fn repo_ids(snapshot: &Snapshot, labels: &[String], releasever: Option<&str>, basearch: Option<&str>) -> Vec<RepoId> {
	let candidates: Vec<RepoId> = if labels.is_empty() {
		snapshot.repo_ids().collect()
	} else {
		let mut seen = HashSet::<RepoId>::new();
		labels.iter()
			.filter_map(|label| snapshot.repos_by_label(label))
			.flatten()
			.copied()
			.filter(|id| seen.insert(*id))
			.collect()
	};
	log::trace!("repo_ids - unfiltered {:?}", candidates);

	candidates.into_iter()
		.filter(|id| snapshot.repo(*id).is_some_and(|repo| repo_matches(repo, releasever, basearch)))
		.collect()
}

/// Module ids of the requested streams whose requires are all among the requested streams.
///
/// A single pass against the initial union, removals do not cascade.
pub(super) fn module_ids(snapshot: &Snapshot, modules: &[ModuleStream]) -> HashSet<ModuleId> {
	let requested: HashSet<ModuleId> = modules.iter()
		.filter_map(|m| snapshot.modules_for_stream(m))
		.flatten()
		.copied()
		.collect();

	requested.iter()
		.copied()
		.filter(|id| {
			snapshot.module_requires(*id)
				.unwrap_or_default()
				.iter()
				.all(|r| requested.contains(r))
		})
		.collect()
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::cache::SnapshotBuilder;

	fn repo(label: &str, url: &str, releasever: Option<&str>, basearch: Option<&str>) -> RepoDetail {
		RepoDetail {
			label: label.to_string(),
			url: url.to_string(),
			releasever: releasever.map(str::to_string),
			basearch: basearch.map(str::to_string),
			third_party: false,
		}
	}

	fn repo_snapshot() -> (Snapshot, [RepoId; 4]) {
		let mut builder = SnapshotBuilder::new("2024-01-01T00:00:00Z");
		let ids = [
			builder.add_repo(repo("rhel-8-baseos", "https://cdn/rhel8/8/x86_64/baseos", Some("8"), Some("x86_64"))),
			builder.add_repo(repo("rhel-8-baseos", "https://cdn/rhel8/8.2/x86_64/baseos", Some("8.2"), Some("x86_64"))),
			builder.add_repo(repo("rhel-7-server", "https://cdn/rhel/server/7/7Server/ppc64le/os", None, None)),
			builder.add_repo(repo("rhel-8-baseos-aarch64", "https://cdn/rhel8/8/aarch64/baseos", Some("8"), Some("aarch64"))),
		];
		(builder.build(), ids)
	}

	#[test]
	fn no_labels_means_every_repository() {
		let (snapshot, ids) = repo_snapshot();
		assert_eq!(repo_ids(&snapshot, &[], None, None), ids.to_vec());
	}

	#[test]
	fn label_matches_every_repository_sharing_it() {
		let (snapshot, ids) = repo_snapshot();
		let labels = vec!["rhel-8-baseos".to_string(), "rhel-8-baseos".to_string(), "missing".to_string()];
		assert_eq!(repo_ids(&snapshot, &labels, None, None), vec![ids[0], ids[1]]);
	}

	#[test]
	fn releasever_matches_field_exactly() {
		let (snapshot, ids) = repo_snapshot();
		assert_eq!(repo_ids(&snapshot, &[], Some("8"), None), vec![ids[0], ids[3]]);
	}

	#[test]
	fn releasever_falls_back_to_url_without_field() {
		let (snapshot, ids) = repo_snapshot();
		assert_eq!(repo_ids(&snapshot, &[], Some("7Server"), None), vec![ids[2]]);
	}

	#[test]
	fn basearch_and_releasever_combine() {
		let (snapshot, ids) = repo_snapshot();
		assert_eq!(repo_ids(&snapshot, &[], Some("8"), Some("x86_64")), vec![ids[0]]);
		assert_eq!(repo_ids(&snapshot, &[], None, Some("x86_64")), vec![ids[0], ids[1]]);
		assert_eq!(repo_ids(&snapshot, &[], None, Some("ppc64le")), vec![ids[2]]);
	}

	#[test]
	fn modules_with_unsatisfied_requires_are_dropped() {
		let mut builder = SnapshotBuilder::new("2024-01-01T00:00:00Z");
		let platform = builder.add_module(ModuleStream::new("platform", "el8"));
		let nodejs = builder.add_module(ModuleStream::new("nodejs", "10"));
		builder.add_module_requires(nodejs, &[platform]);
		let snapshot = builder.build();

		let only_nodejs = module_ids(&snapshot, &[ModuleStream::new("nodejs", "10")]);
		assert!(only_nodejs.is_empty());

		let both = module_ids(&snapshot, &[ModuleStream::new("nodejs", "10"), ModuleStream::new("platform", "el8")]);
		assert_eq!(both, HashSet::from([nodejs, platform]));
	}

	#[test]
	fn cyclic_requires_terminate() {
		let mut builder = SnapshotBuilder::new("2024-01-01T00:00:00Z");
		let a = builder.add_module(ModuleStream::new("a", "1"));
		let b = builder.add_module(ModuleStream::new("b", "1"));
		builder.add_module_requires(a, &[b]);
		builder.add_module_requires(b, &[a]);
		let snapshot = builder.build();

		let both = module_ids(&snapshot, &[ModuleStream::new("a", "1"), ModuleStream::new("b", "1")]);
		assert_eq!(both, HashSet::from([a, b]));
		assert!(module_ids(&snapshot, &[ModuleStream::new("a", "1")]).is_empty());
	}

	#[test]
	fn removal_does_not_cascade() {
		let mut builder = SnapshotBuilder::new("2024-01-01T00:00:00Z");
		let missing = builder.add_module(ModuleStream::new("missing", "1"));
		let middle = builder.add_module(ModuleStream::new("middle", "1"));
		let top = builder.add_module(ModuleStream::new("top", "1"));
		builder.add_module_requires(middle, &[missing]);
		builder.add_module_requires(top, &[middle]);
		let snapshot = builder.build();

		let eligible = module_ids(&snapshot, &[ModuleStream::new("middle", "1"), ModuleStream::new("top", "1")]);
		assert_eq!(eligible, HashSet::from([top]));
	}
}
