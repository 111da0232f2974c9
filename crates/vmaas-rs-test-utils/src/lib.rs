//! Various helper functions for testing
//!
//! The fixture dump in `test-data/dump.json` describes a small RHEL 8 system:
//! - `bash` 4.4-1 with security update 4.4-2 (`RHSA-2020:0001`) in `rhel-8-baseos`,
//!   and 5.1-1 (`RHSA-2022:0002`) only in `rhel-9-baseos`.
//! - `vim-enhanced` 8.0-1 with bugfix updates 8.0-2 and 8.1-1 (`RHBA-2020:0050`) in `rhel-8-appstream`.
//! - `htop` 2.2-1 with a third party update 3.0-1 (`FEDORA-EPEL-2021-1`) in `epel-8`.
//! - `nodejs` 10.1-1 with update 10.2-1 (`RHEA-2020:0100`) only for the `nodejs:10` stream, which requires `platform:el8`.

use std::path::PathBuf;

pub fn dump_path() -> PathBuf {
	PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test-data").join("dump.json")
}

/// Gets the fixture snapshot.
pub fn get_snapshot() -> vmaas_rs::Snapshot {
	vmaas_rs::Snapshot::read_from_dump_file(dump_path()).expect("failed to read fixture dump")
}

/// Gets a config whose data directory is removed when the returned guard drops.
pub fn temp_config() -> (tempfile::TempDir, vmaas_rs::Config) {
	let dir = tempfile::tempdir().expect("failed to create temp dir");
	let config = vmaas_rs::Config::with_data_dir(dir.path());
	(dir, config)
}

/// A request for `packages` with every filter left at its default.
pub fn request(packages: &[&str]) -> vmaas_rs::Request {
	vmaas_rs::Request {
		package_list: packages.iter().map(|p| p.to_string()).collect(),
		..Default::default()
	}
}
