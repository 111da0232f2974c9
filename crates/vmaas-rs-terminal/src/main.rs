use std::path::{Path, PathBuf};

use vmaas_rs::cache::ModuleStream;

fn main() {
	let mut opts;

	/* Parse console input */
	let parsed_options = {
		let args: Vec<String> = std::env::args().collect();

		opts = getopts::Options::new();
		opts.optflag( "h", "help",          "Show help");
		opts.optflag( "v", "verbose",       "Increased vebosity");
		opts.optopt(  "d", "dump",          "Build the snapshot from this JSON dump instead of the configured one", "PATH");
		opts.optmulti("r", "repo",          "Only consider repositories with this label", "LABEL");
		opts.optmulti("m", "module",        "Enable a module stream", "NAME:STREAM");
		opts.optopt(  "",  "releasever",    "Only consider repositories of this release", "RELEASEVER");
		opts.optopt(  "",  "basearch",      "Only consider repositories of this base architecture", "BASEARCH");
		opts.optflag( "",  "security-only", "Only list security errata");
		opts.optflag( "",  "third-party",   "Include third party errata and repositories");
		opts.optflag( "",  "latest-only",   "Only resolve the highest installed version of each package");
		opts.optflag( "",  "optimistic",    "Resolve versions missing from the snapshot by comparing versions");
		opts.optflag( "",  "refresh",       "Rebuild the snapshot cache from the dump");
		opts.parsing_style(getopts::ParsingStyle::FloatingFrees);

		let parsed_options = match opts.parse(&args[1..]) {
			Ok(m)  => { m }
			Err(e) => { println!("Unable to parse options: {}", e); return }
		};

		if parsed_options.opt_present("h") {
			eprintln!("{}", opts.usage("Usage: vmaas-rs-terminal [options] <NEVRA>..."));
			return;
		}

		parsed_options
	};

	let mut logger = env_logger::Builder::from_default_env();
	if parsed_options.opt_present("v") {
		logger.filter_level(log::LevelFilter::Debug);
	}
	logger.init();

	if parsed_options.free.is_empty() {
		log::error!("No packages provided.");
		eprintln!("{}", opts.usage("Usage: vmaas-rs-terminal [options] <NEVRA>..."));
		return;
	}

	let config = vmaas_rs::Config::load_from_disk().unwrap_or_else(|e| {
		log::warn!("Failed to read config file: {}", e);
		log::warn!("Using default config.");
		vmaas_rs::Config::default()
	});

	let dump_override = parsed_options.opt_str("d").map(PathBuf::from);
	let refresh = parsed_options.opt_present("refresh") || dump_override.is_some();

	let snapshot = match get_snapshot(&config, dump_override.as_deref(), refresh) {
		Ok(snapshot) => snapshot,
		Err(e) => { log::error!("Failed to get snapshot: {}", e); return },
	};
	log::info!("Snapshot has {} packages and {} errata", snapshot.package_count(), snapshot.erratum_count());

	let request = match build_request(&config, &parsed_options) {
		Ok(r) => r,
		Err(e) => { log::error!("Invalid request: {}", e); return },
	};

	match resolve(&snapshot, &request) {
		Ok(output) => println!("{}", output),
		Err(e) => log::error!("Failed to resolve updates due to error: {}", e),
	}
}

fn generate_and_save_new_snapshot(config: &vmaas_rs::Config, dump_override: Option<&Path>) -> Result<vmaas_rs::Snapshot, Error> {
	let path = dump_override.or(config.dump_path()).ok_or(Error::MissingArgument)?;
	let snapshot = vmaas_rs::Snapshot::read_from_dump_file(path)?;
	snapshot.save_to_disk(config)?;
	Ok(snapshot)
}

/// Reads the snapshot cache, rebuilding it from the dump when missing or outdated.
fn get_snapshot(config: &vmaas_rs::Config, dump_override: Option<&Path>, refresh: bool) -> Result<vmaas_rs::Snapshot, Error> {
	if refresh {
		return generate_and_save_new_snapshot(config, dump_override)
	}

	match vmaas_rs::Snapshot::load_from_disk(config) {
		Ok(snapshot) => Ok(snapshot),
		Err(vmaas_rs::Error::IO(e)) if e.kind() == std::io::ErrorKind::NotFound => {
			log::info!("No snapshot cache found. generating...");
			generate_and_save_new_snapshot(config, dump_override)
		},
		Err(vmaas_rs::Error::Bincode(_)) => {
			log::warn!("Failed to open snapshot cache due to parsing error, format likely changed. regenerating...");
			generate_and_save_new_snapshot(config, dump_override)
		},
		Err(e) => Err(e.into()),
	}
}

fn build_request(config: &vmaas_rs::Config, parsed_options: &getopts::Matches) -> Result<vmaas_rs::Request, Error> {
	let modules_list = parsed_options.opt_strs("m")
		.iter()
		.map(|m| m.parse::<ModuleStream>())
		.collect::<vmaas_rs::Result<Vec<_>>>()?;

	Ok(vmaas_rs::Request {
		package_list: parsed_options.free.clone(),
		repository_list: parsed_options.opt_strs("r"),
		modules_list,
		releasever: parsed_options.opt_str("releasever"),
		basearch: parsed_options.opt_str("basearch"),
		security_only: parsed_options.opt_present("security-only"),
		third_party: parsed_options.opt_present("third-party"),
		latest_only: parsed_options.opt_present("latest-only"),
		optimistic_updates: parsed_options.opt_present("optimistic") || config.optimistic_updates_default(),
	})
}

fn resolve(snapshot: &vmaas_rs::Snapshot, request: &vmaas_rs::Request) -> Result<String, Error> {
	log::trace!("Resolving updates for {} packages", request.package_list.len());
	let updates = request.updates(snapshot)?;
	Ok(serde_json::to_string_pretty(&updates)?)
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("vmaas-rs error: {0}")]
	VmaasRsError(#[from] vmaas_rs::Error),
	#[error("JSON error: {0}")]
	SerdeJSON(#[from] serde_json::Error),
	#[error("No dump path provided or configured")]
	MissingArgument,
}
