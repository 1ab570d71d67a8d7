/// Semantic version of the ThinkLink client.
pub const APP_VERSION: &str = "1.0.0";

/// Monotonic build number paired with [`APP_VERSION`].
pub const BUILD_NUMBER: &str = "1";

/// Version labels shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionInfo {
    version: &'static str,
    build_number: &'static str,
}

impl VersionInfo {
    /// Returns the version of the running build.
    #[must_use]
    pub const fn current() -> Self {
        Self {
            version: APP_VERSION,
            build_number: BUILD_NUMBER,
        }
    }

    /// Returns the semantic version string.
    #[must_use]
    pub fn version(&self) -> &'static str {
        self.version
    }

    /// Returns the build number.
    #[must_use]
    pub fn build_number(&self) -> &'static str {
        self.build_number
    }

    /// Short label such as `v1.0.0 (1)`.
    #[must_use]
    pub fn display_version(&self) -> String {
        format!("v{} ({})", self.version, self.build_number)
    }

    /// Long label such as `ThinkLink v1.0.0 Build 1`.
    #[must_use]
    pub fn full_version(&self) -> String {
        format!("ThinkLink v{} Build {}", self.version, self.build_number)
    }
}

impl Default for VersionInfo {
    fn default() -> Self {
        Self::current()
    }
}

#[cfg(test)]
mod tests {
    use super::VersionInfo;

    #[test]
    fn labels_include_version_and_build() {
        let info = VersionInfo::current();
        assert_eq!(info.display_version(), "v1.0.0 (1)");
        assert_eq!(info.full_version(), "ThinkLink v1.0.0 Build 1");
    }
}
