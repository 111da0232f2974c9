use serde::{Serialize, Deserialize};

macro_rules! interned_id {
	($($(#[$meta:meta])* $name:ident),* $(,)?) => {$(
		$(#[$meta])*
		#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		pub struct $name(pub u32);

		impl std::fmt::Display for $name {
			fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
				write!(f, "{}", self.0)
			}
		}
	)*};
}

interned_id!(
	/// An interned package name.
	NameId,
	/// An interned epoch-version-release triple, not ordered by version.
	EvrId,
	/// An interned architecture.
	ArchId,
	/// A single package build, unique per name, EVR and arch.
	PkgId,
	RepoId,
	ErratumId,
	/// A module stream build.
	ModuleId,
);
