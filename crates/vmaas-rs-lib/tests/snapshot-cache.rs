use vmaas_rs::Snapshot;
use vmaas_rs_test_utils::{dump_path, get_snapshot, request, temp_config};

#[test]
fn snapshot_cache_round_trip() {
	let _ = env_logger::builder().is_test(true).try_init();
	let (_dir, config) = temp_config();
	let snapshot = get_snapshot();

	assert!(matches!(Snapshot::load_from_disk(&config), Err(vmaas_rs::Error::IO(_))));
	snapshot.save_to_disk(&config).unwrap();
	assert!(config.snapshot_cache_path().is_file());

	let loaded = Snapshot::load_from_disk(&config).unwrap();
	assert_eq!(loaded.package_count(), snapshot.package_count());
	assert_eq!(loaded.erratum_count(), snapshot.erratum_count());
	assert_eq!(loaded.raw_last_change(), snapshot.raw_last_change());

	let req = request(&["bash-4.4-1.el8.x86_64", "vim-enhanced-8.0-1.el8.x86_64"]);
	assert_eq!(req.updates(&loaded).unwrap(), req.updates(&snapshot).unwrap());
}

#[test]
fn gzipped_dump_reads_like_plain() {
	use std::io::Write;

	let (dir, _config) = temp_config();
	let gz_path = dir.path().join("dump.json.gz");
	let plain = std::fs::read(dump_path()).unwrap();
	let mut encoder = flate2::write::GzEncoder::new(std::fs::File::create(&gz_path).unwrap(), flate2::Compression::default());
	encoder.write_all(&plain).unwrap();
	encoder.finish().unwrap();

	let snapshot = Snapshot::read_from_dump_file(&gz_path).unwrap();
	assert_eq!(snapshot.package_count(), get_snapshot().package_count());
}

#[test]
fn handle_serves_replaced_snapshot() {
	let handle = vmaas_rs::SnapshotHandle::new(Snapshot::default());
	let req = request(&["bash-4.4-1.el8.x86_64"]);
	let before = handle.current();

	handle.replace(get_snapshot());
	assert_eq!(before.package_count(), 0);
	assert!(!req.updates(&handle.current()).unwrap().update_list["bash-4.4-1.el8.x86_64"].available_updates.is_empty());
}
