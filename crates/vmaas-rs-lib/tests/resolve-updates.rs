use vmaas_rs::cache::ModuleStream;
use vmaas_rs::updates::Update;
use vmaas_rs_test_utils::{get_snapshot, request};

fn init_logging() {
	let _ = env_logger::builder().is_test(true).try_init();
}

fn updates_for(response: &vmaas_rs::Updates, package: &str) -> Vec<(String, String, String)> {
	response.update_list[package].available_updates
		.iter()
		.map(|Update { package, erratum, repository, .. }| (package.clone(), erratum.clone(), repository.clone()))
		.collect()
}

fn owned(v: &[(&str, &str, &str)]) -> Vec<(String, String, String)> {
	v.iter().map(|(p, e, r)| (p.to_string(), e.to_string(), r.to_string())).collect()
}

#[test]
fn security_update_for_bash() {
	init_logging();
	let snapshot = get_snapshot();
	let req = vmaas_rs::Request { security_only: true, ..request(&["bash-4.4-1.el8.x86_64"]) };
	let response = req.updates(&snapshot).unwrap();

	/* 5.1-1 is only shipped for release 9 */
	assert_eq!(
		updates_for(&response, "bash-4.4-1.el8.x86_64"),
		owned(&[("bash-0:4.4-2.el8.x86_64", "RHSA-2020:0001", "rhel-8-baseos")]),
	);
	let update = &response.update_list["bash-4.4-1.el8.x86_64"].available_updates[0];
	assert_eq!(update.basearch.as_deref(), Some("x86_64"));
	assert_eq!(update.releasever.as_deref(), Some("8"));
}

#[test]
fn repository_without_update_gives_empty_list() {
	let snapshot = get_snapshot();
	let req = vmaas_rs::Request {
		repository_list: vec!["rhel-8-appstream".to_string()],
		..request(&["bash-4.4-1.el8.x86_64"])
	};
	let response = req.updates(&snapshot).unwrap();
	assert!(response.update_list["bash-4.4-1.el8.x86_64"].available_updates.is_empty());
	assert_eq!(response.repository_list, ["rhel-8-appstream"]);
}

#[test]
fn invalid_nevra_is_listed_without_updates() {
	let snapshot = get_snapshot();
	let response = request(&["not-a-valid-nevra", "bash-4.4-1.el8.x86_64"]).updates(&snapshot).unwrap();
	assert_eq!(response.update_list.len(), 2);
	assert!(response.update_list["not-a-valid-nevra"].available_updates.is_empty());
	assert!(!response.update_list["bash-4.4-1.el8.x86_64"].available_updates.is_empty());
}

#[test]
fn unknown_package_is_listed_without_updates() {
	let snapshot = get_snapshot();
	let response = request(&["zsh-5.5-1.el8.x86_64"]).updates(&snapshot).unwrap();
	assert!(response.update_list["zsh-5.5-1.el8.x86_64"].available_updates.is_empty());
}

#[test]
fn exact_match_lists_every_newer_build_in_order() {
	let snapshot = get_snapshot();
	let response = request(&["vim-enhanced-8.0-1.el8.x86_64"]).updates(&snapshot).unwrap();
	assert_eq!(
		updates_for(&response, "vim-enhanced-8.0-1.el8.x86_64"),
		owned(&[
			("vim-enhanced-0:8.0-2.el8.x86_64", "RHBA-2020:0050", "rhel-8-appstream"),
			("vim-enhanced-0:8.1-1.el8.x86_64", "RHBA-2020:0050", "rhel-8-appstream"),
		]),
	);
}

#[test]
fn unindexed_version_needs_optimistic_updates() {
	let snapshot = get_snapshot();
	let installed = "vim-enhanced-8.0-1.5.el8.x86_64";

	let response = request(&[installed]).updates(&snapshot).unwrap();
	assert!(response.update_list[installed].available_updates.is_empty());

	let req = vmaas_rs::Request { optimistic_updates: true, ..request(&[installed]) };
	let response = req.updates(&snapshot).unwrap();
	assert_eq!(
		updates_for(&response, installed),
		owned(&[
			("vim-enhanced-0:8.0-2.el8.x86_64", "RHBA-2020:0050", "rhel-8-appstream"),
			("vim-enhanced-0:8.1-1.el8.x86_64", "RHBA-2020:0050", "rhel-8-appstream"),
		]),
	);
}

#[test]
fn optimistic_ignores_release_restriction() {
	let snapshot = get_snapshot();
	let req = vmaas_rs::Request { optimistic_updates: true, ..request(&["bash-4.4-1.5.el8.x86_64"]) };
	let response = req.updates(&snapshot).unwrap();
	assert_eq!(
		updates_for(&response, "bash-4.4-1.5.el8.x86_64"),
		owned(&[
			("bash-0:4.4-2.el8.x86_64", "RHSA-2020:0001", "rhel-8-baseos"),
			("bash-0:5.1-1.el9.x86_64", "RHSA-2022:0002", "rhel-9-baseos"),
		]),
	);
}

#[test]
fn security_only_drops_bugfix_errata() {
	let snapshot = get_snapshot();
	let req = vmaas_rs::Request { security_only: true, ..request(&["vim-enhanced-8.0-1.el8.x86_64"]) };
	let response = req.updates(&snapshot).unwrap();
	assert!(response.update_list["vim-enhanced-8.0-1.el8.x86_64"].available_updates.is_empty());
}

#[test]
fn third_party_content_needs_opt_in() {
	let snapshot = get_snapshot();
	let installed = "htop-2.2-1.el8.x86_64";

	let response = request(&[installed]).updates(&snapshot).unwrap();
	assert!(response.update_list[installed].available_updates.is_empty());

	let req = vmaas_rs::Request { third_party: true, ..request(&[installed]) };
	let response = req.updates(&snapshot).unwrap();
	assert_eq!(
		updates_for(&response, installed),
		owned(&[("htop-0:3.0-1.el8.x86_64", "FEDORA-EPEL-2021-1", "epel-8")]),
	);
}

#[test]
fn module_erratum_needs_stream_and_its_requires() {
	let snapshot = get_snapshot();
	let installed = "nodejs-10.1-1.module+el8.x86_64";
	let nodejs = ModuleStream::new("nodejs", "10");
	let platform = ModuleStream::new("platform", "el8");

	let response = request(&[installed]).updates(&snapshot).unwrap();
	assert!(response.update_list[installed].available_updates.is_empty());

	let req = vmaas_rs::Request { modules_list: vec![nodejs.clone()], ..request(&[installed]) };
	assert!(req.updates(&snapshot).unwrap().update_list[installed].available_updates.is_empty());

	let req = vmaas_rs::Request { modules_list: vec![nodejs, platform], ..request(&[installed]) };
	let response = req.updates(&snapshot).unwrap();
	assert_eq!(
		updates_for(&response, installed),
		owned(&[("nodejs-0:10.2-1.module+el8.x86_64", "RHEA-2020:0100", "rhel-8-appstream")]),
	);
	assert_eq!(response.modules_list.len(), 2);
}

#[test]
fn releasever_filter_restricts_repositories() {
	let snapshot = get_snapshot();
	let req = vmaas_rs::Request {
		releasever: Some("9".to_string()),
		..request(&["bash-4.4-1.el8.x86_64"])
	};
	let response = req.updates(&snapshot).unwrap();
	/* only rhel-9-baseos is eligible but the installed build comes from release 8 */
	assert!(response.update_list["bash-4.4-1.el8.x86_64"].available_updates.is_empty());
	assert_eq!(response.releasever.as_deref(), Some("9"));
}

#[test]
fn latest_only_resolves_highest_installed() {
	let snapshot = get_snapshot();
	let req = vmaas_rs::Request {
		latest_only: true,
		..request(&["vim-enhanced-8.0-1.el8.x86_64", "vim-enhanced-8.0-2.el8.x86_64"])
	};
	let response = req.updates(&snapshot).unwrap();
	assert_eq!(response.update_list.len(), 1);
	assert_eq!(
		updates_for(&response, "vim-enhanced-8.0-2.el8.x86_64"),
		owned(&[("vim-enhanced-0:8.1-1.el8.x86_64", "RHBA-2020:0050", "rhel-8-appstream")]),
	);
}

#[test]
fn latest_only_is_idempotent() {
	let packages: Vec<String> = [
		"bash-4.4-2.el8.x86_64",
		"bash-4.4-1.el8.x86_64",
		"bash-4.4-1.el8.i686",
		"not-a-valid-nevra",
		"vim-enhanced-8.0-1.el8.x86_64",
	].iter().map(|s| s.to_string()).collect();
	let once = vmaas_rs::updates::filter_latest(&packages);
	assert_eq!(vmaas_rs::updates::filter_latest(&once), once);
	assert_eq!(once.len(), 4);
}

#[test]
fn empty_package_list_is_rejected() {
	let snapshot = get_snapshot();
	let result = request(&[]).updates(&snapshot);
	assert!(matches!(result, Err(vmaas_rs::Error::ProcessingInput(_))));
}

#[test]
fn malformed_last_change_is_an_error() {
	let mut builder = vmaas_rs::cache::SnapshotBuilder::new("yesterday");
	builder.add_package(&vmaas_rs::Nevra::parse("bash-4.4-1.el8.x86_64").unwrap(), &[]);
	let snapshot = builder.build();
	let result = request(&["bash-4.4-1.el8.x86_64"]).updates(&snapshot);
	assert!(matches!(result, Err(vmaas_rs::Error::LastChange(_))));
}

#[test]
fn response_serializes_with_service_field_names() {
	let snapshot = get_snapshot();
	let req = vmaas_rs::Request { security_only: true, ..request(&["bash-4.4-1.el8.x86_64"]) };
	let json = serde_json::to_value(req.updates(&snapshot).unwrap()).unwrap();

	assert_eq!(json["last_change"], "2024-03-01T12:00:00Z");
	assert_eq!(json["update_list"]["bash-4.4-1.el8.x86_64"]["available_updates"][0]["erratum"], "RHSA-2020:0001");
	assert!(json.get("repository_list").is_none());
}
