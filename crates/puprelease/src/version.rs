//! Looking up puprelease's own version.
//!
//! A version can come from more than one place. [`PackageVersion`] reads
//! the version recorded in the package metadata at build time, and
//! [`GitVersion`] derives one from the tags of a source checkout. A
//! [`VersionChain`] tries providers in order and uses the first that has an
//! answer:
//!
//! ```rust
//! use puprelease::version::{PackageVersion, VersionChain};
//!
//! let chain = VersionChain::new()
//!     .try_provider(PackageVersion::new(None))
//!     .try_provider(|| Some("0.0.0-dev".to_string()));
//!
//! let resolved = chain.resolve().unwrap();
//! assert_eq!(resolved.version, "0.0.0-dev");
//! assert_eq!(resolved.source, "custom");
//! ```

use std::io::Write;
use std::path::PathBuf;

use puprelease_render::Console;
use puprelease_shell::run_command_in;

use crate::error::{CliError, CliResult};

/// A source of a version string.
pub trait VersionProvider {
    /// Short name of the source, used in logs and `puprelease info`.
    fn name(&self) -> &'static str;

    /// The version, or `None` when this source cannot tell.
    fn version(&self) -> Option<String>;
}

impl<F> VersionProvider for F
where
    F: Fn() -> Option<String>,
{
    fn name(&self) -> &'static str {
        "custom"
    }

    fn version(&self) -> Option<String> {
        self()
    }
}

/// The version baked into the package metadata at build time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackageVersion {
    version: Option<&'static str>,
}

impl PackageVersion {
    pub fn new(version: Option<&'static str>) -> Self {
        Self { version }
    }

    /// The version of this build of puprelease.
    ///
    /// Cargo always sets `CARGO_PKG_VERSION`, so this only comes up empty
    /// for builds made outside cargo.
    pub fn current() -> Self {
        Self::new(option_env!("CARGO_PKG_VERSION"))
    }
}

impl VersionProvider for PackageVersion {
    fn name(&self) -> &'static str {
        "package"
    }

    fn version(&self) -> Option<String> {
        self.version
            .filter(|v| !v.trim().is_empty())
            .map(str::to_string)
    }
}

/// A version derived from `git describe` in a source checkout.
///
/// Tags such as `v1.4.0` yield `1.4.0`. Untagged commits yield the
/// abbreviated commit hash, and a `-dirty` suffix marks local changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitVersion {
    root: PathBuf,
}

impl GitVersion {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl VersionProvider for GitVersion {
    fn name(&self) -> &'static str {
        "git"
    }

    fn version(&self) -> Option<String> {
        let argv = ["git", "describe", "--tags", "--always", "--dirty"];
        match run_command_in(&self.root, &argv) {
            Ok(described) => normalize_tag(&described),
            Err(err) => {
                tracing::debug!(root = %self.root.display(), error = %err, "git describe failed");
                None
            }
        }
    }
}

fn normalize_tag(described: &str) -> Option<String> {
    let trimmed = described.trim();
    let version = trimmed.strip_prefix('v').unwrap_or(trimmed);
    (!version.is_empty()).then(|| version.to_string())
}

/// A version together with the provider that supplied it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVersion {
    pub version: String,
    pub source: &'static str,
}

/// Providers tried in order until one returns a version.
#[derive(Default)]
pub struct VersionChain {
    providers: Vec<Box<dyn VersionProvider>>,
}

impl VersionChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Package metadata first, then `git describe` in `repo`.
    ///
    /// The git fallback is only reached when [`PackageVersion::current`] is
    /// empty, which means a build made outside cargo.
    pub fn standard(repo: impl Into<PathBuf>) -> Self {
        Self::new()
            .try_provider(PackageVersion::current())
            .try_provider(GitVersion::new(repo))
    }

    pub fn try_provider<P: VersionProvider + 'static>(mut self, provider: P) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    pub fn resolve(&self) -> Option<ResolvedVersion> {
        self.providers.iter().find_map(|provider| {
            let version = provider.version();
            tracing::debug!(
                provider = provider.name(),
                found = version.is_some(),
                "version lookup"
            );
            version.map(|version| ResolvedVersion {
                version,
                source: provider.name(),
            })
        })
    }
}

impl VersionProvider for VersionChain {
    fn name(&self) -> &'static str {
        "chain"
    }

    fn version(&self) -> Option<String> {
        self.resolve().map(|resolved| resolved.version)
    }
}

/// Writes the one-line `This is puprelease version ...` banner.
pub fn print_own_version<W: Write>(
    console: &mut Console<W>,
    provider: &dyn VersionProvider,
) -> CliResult {
    let version = provider.version().ok_or(CliError::VersionUnavailable)?;
    console.echo(&format!("This is puprelease version {}", version))?;
    Ok(())
}
