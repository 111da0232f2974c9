//! Runtime configuration.
//!
//! Stored as JSON at `$XDG_CONFIG_HOME/vmaas-rs/config.json`.

use std::path::{Path, PathBuf};
use serde::{Serialize, Deserialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
	data_dir: PathBuf,
	dump_path: Option<PathBuf>,
	#[serde(default)]
	optimistic_updates_default: bool,
}

/// Resolves an XDG base directory, `fallback` is relative to `$HOME`.
fn xdg_dir(var: &str, fallback: &str) -> PathBuf {
	if let Ok(e) = std::env::var(var) {
		PathBuf::from(e)
	} else if let Ok(home) = std::env::var("HOME") {
		PathBuf::from(home).join(fallback)
	} else {
		std::env::temp_dir()
	}
}

impl Default for Config {
	fn default() -> Self {
		Self {
			data_dir: xdg_dir("XDG_DATA_HOME", ".local/share").join("vmaas-rs"),
			dump_path: None,
			optimistic_updates_default: false,
		}
	}
}

impl Config {
	/// Creates a config rooted at `data_dir` without touching the disk.
	pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
		Self {
			data_dir: data_dir.into(),
			..Default::default()
		}
	}

	fn config_file_path() -> PathBuf {
		xdg_dir("XDG_CONFIG_HOME", ".config").join("vmaas-rs").join("config.json")
	}

	/// Reads the config file.
	///
	/// A missing file is returned as [`IO`](crate::Error::IO) so callers can fall back to [`Config::default()`].
	pub fn load_from_disk() -> crate::Result<Self> {
		let path = Self::config_file_path();
		log::debug!("Loading config from {}", path.display());
		let file = std::fs::File::open(path)?;
		Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
	}

	pub fn save_to_disk(&self) -> crate::Result<()> {
		let path = Self::config_file_path();
		if let Some(parent) = path.parent() {
			std::fs::create_dir_all(parent)?;
		}
		let file = std::fs::File::create(&path)?;
		serde_json::to_writer_pretty(file, self)?;
		log::debug!("Saved config to {}", path.display());
		Ok(())
	}

	pub fn data_dir(&self) -> &Path {
		&self.data_dir
	}
	/// returns if the directory is valid or not.
	pub fn set_data_dir(&mut self, data_dir: PathBuf) -> bool {
		if data_dir.is_dir() {
			self.data_dir = data_dir;
			true
		} else {
			false
		}
	}

	pub fn dump_path(&self) -> Option<&Path> {
		self.dump_path.as_deref()
	}
	/// returns if the file exists or not.
	pub fn set_dump_path(&mut self, dump_path: PathBuf) -> bool {
		if dump_path.is_file() {
			self.dump_path = Some(dump_path);
			true
		} else {
			false
		}
	}

	pub fn optimistic_updates_default(&self) -> bool {
		self.optimistic_updates_default
	}
	pub fn set_optimistic_updates_default(&mut self, value: bool) {
		self.optimistic_updates_default = value;
	}

	/// Where the binary snapshot cache is kept.
	pub fn snapshot_cache_path(&self) -> PathBuf {
		self.data_dir.join("snapshot.bin")
	}
}
