//! Deployment configuration for synthesis.

use serde::{Deserialize, Serialize};

/// Deployment-specific constants threaded into every synthesized definition.
///
/// Every field has a fixed default describing the OmicBench suite, so a
/// caller that supplies nothing still gets a complete definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthConfig {
    /// Container image reference, `repo/image[:tag]`
    pub docker_image: String,
    /// Citation DOI
    pub citation_doi: String,
    /// Source repository, `owner/name`
    pub repo_name: String,
    /// Invocation command name; also the tool-id prefix
    pub cli_command: String,
    /// Human-readable package name used in help text
    pub pkg_name: String,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            docker_image: "ghcr.io/omicbench/omicbench:latest".to_string(),
            citation_doi: "10.5281/zenodo.10994415".to_string(),
            repo_name: "omicbench/omicbench-galaxy".to_string(),
            cli_command: "omicbench".to_string(),
            pkg_name: "OmicBench".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SynthConfig::default();
        assert_eq!(config.docker_image, "ghcr.io/omicbench/omicbench:latest");
        assert_eq!(config.citation_doi, "10.5281/zenodo.10994415");
        assert_eq!(config.repo_name, "omicbench/omicbench-galaxy");
        assert_eq!(config.cli_command, "omicbench");
        assert_eq!(config.pkg_name, "OmicBench");
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: SynthConfig =
            serde_json::from_str(r#"{"cli_command": "customcli"}"#).unwrap();
        assert_eq!(config.cli_command, "customcli");
        assert_eq!(config.pkg_name, "OmicBench");
    }
}
