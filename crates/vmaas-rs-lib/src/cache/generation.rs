use std::io::{BufReader, BufWriter, Read};
use std::path::Path;

use super::*;

impl Snapshot {
	/// Builds a snapshot from an uncompressed JSON [`Dump`].
	pub fn read_from_json<R: Read>(reader: R) -> crate::Result<Self> {
		let dump: Dump = serde_json::from_reader(reader)?;
		dump.into_snapshot()
	}

	/// Builds a snapshot from a dump file, `.gz` files are decompressed on the fly.
	pub fn read_from_dump_file(path: impl AsRef<Path>) -> crate::Result<Self> {
		let path = path.as_ref();
		log::debug!("Reading dump from {}", path.display());
		let file = BufReader::new(std::fs::File::open(path)?);
		if path.extension().is_some_and(|e| e == "gz") {
			Self::read_from_json(BufReader::new(flate2::bufread::GzDecoder::new(file)))
		} else {
			Self::read_from_json(file)
		}
	}

	/// Loads the binary snapshot cache from the data directory.
	///
	/// # Errors
	/// - [`IO`](crate::Error::IO) when no cache exists yet.
	/// - [`Bincode`](crate::Error::Bincode) when the cache was written by an incompatible version.
	pub fn load_from_disk(config: &crate::Config) -> crate::Result<Self> {
		let path = config.snapshot_cache_path();
		log::debug!("Loading snapshot cache from {}", path.display());
		let file = BufReader::new(std::fs::File::open(path)?);
		Ok(bincode::deserialize_from(file)?)
	}

	pub fn save_to_disk(&self, config: &crate::Config) -> crate::Result<()> {
		std::fs::create_dir_all(config.data_dir())?;
		let path = config.snapshot_cache_path();
		let file = BufWriter::new(std::fs::File::create(&path)?);
		bincode::serialize_into(file, self)?;
		log::debug!("Saved snapshot cache to {}", path.display());
		Ok(())
	}
}
