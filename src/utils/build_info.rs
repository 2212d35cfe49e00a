/// Compile-time build metadata produced by `build.rs`.
#[derive(Debug, Clone, Copy)]
pub struct BuildMetadata {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub git_status: &'static str,
    pub timestamp: &'static str,
    pub target: &'static str,
    pub profile: &'static str,
    pub rustc: &'static str,
}

impl BuildMetadata {
    /// One-line summary, e.g. `0.0.1 (abc1234, clean) built 2025-01-01T00:00:00Z`.
    pub fn summary(&self) -> String {
        format!(
            "{} ({}, {}) built {}",
            self.version, self.git_hash, self.git_status, self.timestamp
        )
    }
}

/// Returns the statically-embedded build metadata.
pub fn current() -> BuildMetadata {
    BuildMetadata {
        version: env!("CARGO_PKG_VERSION"),
        git_hash: option_env!("BIRTH_PREP_BUILD_HASH").unwrap_or("unknown"),
        git_status: option_env!("BIRTH_PREP_BUILD_STATUS").unwrap_or("unknown"),
        timestamp: option_env!("BIRTH_PREP_BUILD_TIMESTAMP").unwrap_or("unknown"),
        target: option_env!("BIRTH_PREP_BUILD_TARGET").unwrap_or("unknown"),
        profile: option_env!("BIRTH_PREP_BUILD_PROFILE").unwrap_or("unknown"),
        rustc: option_env!("BIRTH_PREP_BUILD_RUSTC").unwrap_or("unknown"),
    }
}
