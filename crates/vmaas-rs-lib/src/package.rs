//! Package identity types.
//!
//! A package build is named by its NEVRA, `name-epoch:version-release.arch`.
//! Versions are ordered by [`Evr::compare`] using RPM's segmented comparison.

mod evr;
pub use evr::Evr;
pub use evr::rpmvercmp;

mod nevra;
pub use nevra::Nevra;
