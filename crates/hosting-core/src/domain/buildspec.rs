//! Build specification for the hosted frontend.
//!
//! The document is versioned and rendered to YAML before it is embedded in
//! the application resource, the form the build runner reads.

use serde::{Deserialize, Serialize};

use super::error::Result;

/// Build specification schema version understood by the build runner.
pub const BUILD_SPEC_VERSION: u32 = 1;

/// Output directory of a `next build`.
pub const NEXT_OUTPUT_DIR: &str = ".next";

/// Builtin build steps.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BuiltinStep {
    /// npm ci
    InstallDependencies,

    /// npm run build
    BuildApplication,
}

impl BuiltinStep {
    /// Get the shell command the build runner executes.
    pub fn command(&self) -> &'static str {
        match self {
            BuiltinStep::InstallDependencies => "npm ci",
            BuiltinStep::BuildApplication => "npm run build",
        }
    }

    /// Phase the step runs in.
    pub fn phase(&self) -> PhaseKind {
        match self {
            BuiltinStep::InstallDependencies => PhaseKind::PreBuild,
            BuiltinStep::BuildApplication => PhaseKind::Build,
        }
    }
}

/// Build phases, in execution order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum PhaseKind {
    PreBuild,
    Build,
}

/// Ordered commands of one phase.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct BuildPhase {
    pub commands: Vec<String>,
}

impl BuildPhase {
    fn commands_for(phase: PhaseKind, steps: &[BuiltinStep]) -> Self {
        Self {
            commands: steps
                .iter()
                .filter(|s| s.phase() == phase)
                .map(|s| s.command().to_string())
                .collect(),
        }
    }
}

/// Pre-build runs before build; field order is serialization order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct BuildPhases {
    pub pre_build: BuildPhase,
    pub build: BuildPhase,
}

impl BuildPhases {
    /// Place each step in its phase, keeping the given order within a phase.
    pub fn from_steps(steps: &[BuiltinStep]) -> Self {
        Self {
            pre_build: BuildPhase::commands_for(PhaseKind::PreBuild, steps),
            build: BuildPhase::commands_for(PhaseKind::Build, steps),
        }
    }
}

/// Files published after the build. Globs are relative to `base_directory`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactRule {
    pub base_directory: String,
    pub files: Vec<String>,
}

/// Paths kept between builds, relative to the build root.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CacheRule {
    pub paths: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FrontendBuild {
    pub phases: BuildPhases,
    pub artifacts: ArtifactRule,
    pub cache: CacheRule,
}

/// Versioned build specification document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BuildSpecDocument {
    pub version: u32,
    pub frontend: FrontendBuild,
}

impl BuildSpecDocument {
    pub fn new(phases: BuildPhases, artifacts: ArtifactRule, cache: CacheRule) -> Self {
        Self {
            version: BUILD_SPEC_VERSION,
            frontend: FrontendBuild {
                phases,
                artifacts,
                cache,
            },
        }
    }

    /// Install with `npm ci`, build with `npm run build`, publish everything
    /// under `.next` and cache `node_modules`.
    pub fn nextjs() -> Self {
        Self::new(
            BuildPhases::from_steps(&[
                BuiltinStep::InstallDependencies,
                BuiltinStep::BuildApplication,
            ]),
            ArtifactRule {
                base_directory: NEXT_OUTPUT_DIR.to_string(),
                files: vec!["**/*".to_string()],
            },
            CacheRule {
                paths: vec!["node_modules/**/*".to_string()],
            },
        )
    }

    /// Phases in execution order.
    pub fn phases(&self) -> [(PhaseKind, &BuildPhase); 2] {
        [
            (PhaseKind::PreBuild, &self.frontend.phases.pre_build),
            (PhaseKind::Build, &self.frontend.phases.build),
        ]
    }

    pub fn artifacts(&self) -> &ArtifactRule {
        &self.frontend.artifacts
    }

    pub fn cache(&self) -> &CacheRule {
        &self.frontend.cache
    }

    /// Render the document as the YAML the build runner consumes.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }
}
