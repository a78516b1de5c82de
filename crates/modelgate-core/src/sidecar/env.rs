//! Deployment-environment descriptor for sidecar resolution
//!
//! Collects every OS/packaging global the resolver branches on into one value
//! object, so the branching logic stays a pure function of its inputs.

use std::path::PathBuf;

/// Environment variable forcing bundled-sidecar resolution in development
pub const FORCE_BUNDLED_ENV: &str = "MODELGATE_FORCE_BUNDLED";

/// Operating-system family, as far as sidecar launching cares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFamily {
    Windows,
    Unix,
}

/// Deployment state the resolver branches on
#[derive(Debug, Clone)]
pub struct DeploymentEnvironment {
    /// Whether this is a packaged (installed) build rather than a dev checkout
    pub packaged: bool,
    pub os: OsFamily,
    /// Directory carrying bundled resources, including the runtime binary
    pub resources_dir: PathBuf,
    /// Override forcing the bundled code path in development
    pub force_bundled: bool,
}

impl DeploymentEnvironment {
    /// Describe the current process environment
    ///
    /// `packaged` comes from the caller (the application shell knows whether
    /// it runs installed); the force flag is read from
    /// [`FORCE_BUNDLED_ENV`].
    pub fn detect(packaged: bool, resources_dir: impl Into<PathBuf>) -> Self {
        let force_bundled = std::env::var(FORCE_BUNDLED_ENV)
            .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        Self {
            packaged,
            os: if cfg!(windows) {
                OsFamily::Windows
            } else {
                OsFamily::Unix
            },
            resources_dir: resources_dir.into(),
            force_bundled,
        }
    }

    /// Whether sidecars should prefer precompiled artifacts
    pub fn bundled_sidecars(&self) -> bool {
        self.packaged || self.force_bundled
    }

    /// Name of the interpreter binary on this OS
    pub(crate) fn interpreter_binary(&self) -> &'static str {
        match self.os {
            OsFamily::Windows => "bun.cmd",
            OsFamily::Unix => "bun",
        }
    }

    /// Path of the bundled runtime binary used for precompiled artifacts
    pub fn bundled_runtime(&self) -> PathBuf {
        let binary = match self.os {
            OsFamily::Windows => "bun.exe",
            OsFamily::Unix => "bun",
        };
        self.resources_dir.join(binary)
    }

    #[cfg(test)]
    pub(crate) fn for_tests(packaged: bool, resources_dir: &std::path::Path) -> Self {
        Self {
            packaged,
            os: OsFamily::Unix,
            resources_dir: resources_dir.to_path_buf(),
            force_bundled: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_sidecars_flag() {
        let dir = PathBuf::from("/tmp/resources");
        let mut env = DeploymentEnvironment {
            packaged: false,
            os: OsFamily::Unix,
            resources_dir: dir,
            force_bundled: false,
        };
        assert!(!env.bundled_sidecars());

        env.packaged = true;
        assert!(env.bundled_sidecars());

        env.packaged = false;
        env.force_bundled = true;
        assert!(env.bundled_sidecars());
    }

    #[test]
    fn test_interpreter_binary_per_os() {
        let dir = PathBuf::from("/tmp/resources");
        let unix = DeploymentEnvironment {
            packaged: false,
            os: OsFamily::Unix,
            resources_dir: dir.clone(),
            force_bundled: false,
        };
        assert_eq!(unix.interpreter_binary(), "bun");
        assert_eq!(unix.bundled_runtime(), dir.join("bun"));

        let windows = DeploymentEnvironment {
            os: OsFamily::Windows,
            ..unix
        };
        assert_eq!(windows.interpreter_binary(), "bun.cmd");
        assert!(windows.bundled_runtime().ends_with("bun.exe"));
    }
}
