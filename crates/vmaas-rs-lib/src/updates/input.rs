//! Input package normalisation.

use std::collections::{BTreeMap, HashMap};

use crate::cache::{ArchId, EvrId, NameId, Snapshot};
use crate::package::Nevra;
use super::UpdateDetail;

/// An input package known to the snapshot, resolved to interned ids where possible.
#[derive(Debug, Clone)]
pub(super) struct InputPackage {
	pub input: String,
	pub nevra: Nevra,
	pub name_id: NameId,
	pub evr_id: Option<EvrId>,
	pub arch_id: Option<ArchId>,
}

/// Keeps only the highest version of every name and arch.
///
/// A later string replaces the kept one only when its EVR is strictly greater.
/// Strings that do not parse are passed through untouched so they still show up in the response.
pub fn filter_latest(packages: &[String]) -> Vec<String> {
	let mut kept = Vec::<(String, Option<Nevra>)>::with_capacity(packages.len());
	let mut slots = HashMap::<(String, String), usize>::new();

	for pkg in packages {
		let nevra = match Nevra::parse(pkg) {
			Ok(n) => n,
			Err(e) => {
				log::warn!("Cannot parse package {}: {}", pkg, e);
				kept.push((pkg.clone(), None));
				continue;
			}
		};

		let key = (nevra.name.clone(), nevra.arch.clone());
		match slots.get(&key).copied() {
			Some(slot) => {
				let Some(latest) = &kept[slot].1 else { continue };
				if nevra.cmp_evr(latest).is_gt() {
					kept[slot] = (pkg.clone(), Some(nevra));
				}
			},
			None => {
				slots.insert(key, kept.len());
				kept.push((pkg.clone(), Some(nevra)));
			},
		}
	}

	kept.into_iter().map(|(pkg, _)| pkg).collect()
}

/// Splits the request packages into those worth resolving and the response skeleton.
///
/// Every surviving input string gets an empty entry in the update list, whether it parses or not.
pub(super) fn process_input_packages(snapshot: &Snapshot, packages: &[String], latest_only: bool) -> (Vec<InputPackage>, BTreeMap<String, UpdateDetail>) {
	let packages = if latest_only { filter_latest(packages) } else { packages.to_vec() };

	let mut to_process = Vec::<InputPackage>::with_capacity(packages.len());
	let mut update_list = BTreeMap::<String, UpdateDetail>::new();

	for pkg in packages {
		if update_list.contains_key(&pkg) {
			continue;
		}
		update_list.insert(pkg.clone(), UpdateDetail::default());

		let nevra = match Nevra::parse(&pkg) {
			Ok(n) => n,
			Err(e) => {
				log::warn!("Cannot parse package {}: {}", pkg, e);
				continue;
			}
		};

		let Some(name_id) = snapshot.name_id(&nevra.name).filter(|id| snapshot.updates(*id).is_some()) else {
			log::trace!("process_input_packages - unknown name {}", nevra.name);
			continue;
		};

		to_process.push(InputPackage {
			evr_id: snapshot.evr_id(&nevra.evr()),
			arch_id: snapshot.arch_id(&nevra.arch),
			name_id,
			nevra,
			input: pkg,
		});
	}

	log::trace!("process_input_packages - {} of {} packages to process", to_process.len(), update_list.len());
	(to_process, update_list)
}
