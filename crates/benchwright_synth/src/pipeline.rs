//! File and batch drivers around the synthesizer.
//!
//! The batch driver isolates failures per blueprint: a bad item is logged
//! and skipped, the rest still synthesize, and the summary records the
//! aggregate outcome.

use std::fs;
use std::path::{Path, PathBuf};

use benchwright_core::Blueprint;
use tracing::{error, info};

use crate::config::SynthConfig;
use crate::synthesizer::Synthesizer;

/// Synthesis pipeline error
#[derive(Debug, thiserror::Error)]
pub enum SynthError {
    /// Blueprint file could not be read
    #[error("failed to read blueprint {}: {source}", path.display())]
    Read {
        /// Blueprint path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },
    /// Blueprint text is not valid JSON
    #[error("failed to parse blueprint {}: {source}", path.display())]
    Parse {
        /// Blueprint path
        path: PathBuf,
        /// Underlying parse error
        #[source]
        source: benchwright_core::CoreError,
    },
    /// Tool definition could not be written
    #[error("failed to write tool definition {}: {source}", path.display())]
    Write {
        /// Destination path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },
    /// Blueprint directory could not be scanned
    #[error("failed to scan blueprint directory {}: {source}", path.display())]
    Scan {
        /// Directory path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },
}

/// Aggregate outcome of a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Blueprints synthesized successfully
    pub succeeded: usize,
    /// Blueprints that failed and were skipped
    pub failed: usize,
}

impl BatchSummary {
    /// Whether every item succeeded.
    #[must_use]
    pub fn ok(&self) -> bool {
        self.failed == 0
    }
}

/// Synthesize one blueprint file into `out_dir`, returning the path of the
/// written definition. The file is named after the blueprint's `r_function`,
/// falling back to the tool id when that is empty.
///
/// # Errors
///
/// Returns [`SynthError`] when the blueprint cannot be read or parsed, or
/// the definition cannot be written. Synthesis itself never fails.
pub fn process_blueprint(
    path: &Path,
    out_dir: &Path,
    config: &SynthConfig,
) -> Result<PathBuf, SynthError> {
    let text = fs::read_to_string(path).map_err(|source| SynthError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let blueprint = Blueprint::from_json_str(&text).map_err(|source| SynthError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let synthesizer = Synthesizer::new(&blueprint, config);
    let xml = synthesizer.synthesize();
    let stem = if blueprint.r_function.is_empty() {
        synthesizer.tool_id()
    } else {
        blueprint.r_function.clone()
    };

    fs::create_dir_all(out_dir).map_err(|source| SynthError::Write {
        path: out_dir.to_path_buf(),
        source,
    })?;
    let dest = out_dir.join(format!("{}.xml", stem));
    fs::write(&dest, xml).map_err(|source| SynthError::Write {
        path: dest.clone(),
        source,
    })?;

    info!(blueprint = %path.display(), tool = %dest.display(), "synthesized tool definition");
    Ok(dest)
}

/// Synthesize every `*.json` blueprint in a directory, in lexicographic
/// order. Individual failures are logged and skipped; siblings are never
/// aborted.
///
/// # Errors
///
/// Returns [`SynthError::Scan`] only when the directory itself cannot be
/// listed; per-item failures land in the summary instead.
pub fn batch_process(
    blueprint_dir: &Path,
    out_dir: &Path,
    config: &SynthConfig,
) -> Result<BatchSummary, SynthError> {
    let entries = fs::read_dir(blueprint_dir).map_err(|source| SynthError::Scan {
        path: blueprint_dir.to_path_buf(),
        source,
    })?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();

    let mut summary = BatchSummary::default();
    for path in paths {
        match process_blueprint(&path, out_dir, config) {
            Ok(_) => summary.succeeded += 1,
            Err(err) => {
                error!(blueprint = %path.display(), %err, "skipping blueprint");
                summary.failed += 1;
            }
        }
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const MINIMAL: &str = r#"{
        "title": "Test Tool",
        "description": "A test tool",
        "r_function": "test_function",
        "outputs": {}
    }"#;

    #[test]
    fn test_process_blueprint_writes_xml() {
        let dir = TempDir::new().unwrap();
        let blueprint_path = dir.path().join("test.json");
        fs::write(&blueprint_path, MINIMAL).unwrap();
        let out_dir = dir.path().join("out");

        let dest =
            process_blueprint(&blueprint_path, &out_dir, &SynthConfig::default()).unwrap();
        assert_eq!(dest.file_name().unwrap(), "test_function.xml");
        let content = fs::read_to_string(&dest).unwrap();
        assert!(content.contains("<tool id=\"omicbench_test_function\""));
    }

    #[test]
    fn test_process_blueprint_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = process_blueprint(
            &dir.path().join("absent.json"),
            dir.path(),
            &SynthConfig::default(),
        );
        assert!(matches!(result, Err(SynthError::Read { .. })));
    }

    #[test]
    fn test_process_blueprint_invalid_json() {
        let dir = TempDir::new().unwrap();
        let blueprint_path = dir.path().join("bad.json");
        fs::write(&blueprint_path, "{ not json }").unwrap();
        let result = process_blueprint(&blueprint_path, dir.path(), &SynthConfig::default());
        assert!(matches!(result, Err(SynthError::Parse { .. })));
    }

    #[test]
    fn test_batch_process_multiple_files() {
        let dir = TempDir::new().unwrap();
        let blueprints = dir.path().join("blueprints");
        fs::create_dir(&blueprints).unwrap();
        for i in 0..3 {
            let text = MINIMAL.replace("test_function", &format!("test_function_{}", i));
            fs::write(blueprints.join(format!("blueprint_{}.json", i)), text).unwrap();
        }
        // Non-blueprint files are ignored.
        fs::write(blueprints.join("notes.txt"), "ignore me").unwrap();
        let out_dir = dir.path().join("out");

        let summary = batch_process(&blueprints, &out_dir, &SynthConfig::default()).unwrap();
        assert_eq!(summary, BatchSummary { succeeded: 3, failed: 0 });
        assert!(summary.ok());
        for i in 0..3 {
            assert!(out_dir.join(format!("test_function_{}.xml", i)).exists());
        }
    }

    #[test]
    fn test_batch_isolates_failures() {
        let dir = TempDir::new().unwrap();
        let blueprints = dir.path().join("blueprints");
        fs::create_dir(&blueprints).unwrap();
        fs::write(blueprints.join("a_good.json"), MINIMAL).unwrap();
        fs::write(blueprints.join("b_broken.json"), "{ nope").unwrap();
        let c_good = MINIMAL.replace("test_function", "other_function");
        fs::write(blueprints.join("c_good.json"), c_good).unwrap();
        let out_dir = dir.path().join("out");

        let summary = batch_process(&blueprints, &out_dir, &SynthConfig::default()).unwrap();
        assert_eq!(summary, BatchSummary { succeeded: 2, failed: 1 });
        assert!(!summary.ok());
        assert!(out_dir.join("test_function.xml").exists());
        assert!(out_dir.join("other_function.xml").exists());
    }

    #[test]
    fn test_batch_missing_directory() {
        let dir = TempDir::new().unwrap();
        let result = batch_process(
            &dir.path().join("absent"),
            dir.path(),
            &SynthConfig::default(),
        );
        assert!(matches!(result, Err(SynthError::Scan { .. })));
    }
}
