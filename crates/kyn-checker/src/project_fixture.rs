//! Reader for multi-module test project descriptions.
//!
//! Checker integration fixtures describe a small multi-module project in a
//! JSON file, listing the modules with their dependencies and the file whose
//! declarations the test resolves and checks.

use serde::Deserialize;
use std::fmt;
use std::path::Path;

/// Default name of the structure file inside a fixture directory.
pub const DEFAULT_STRUCTURE_FILE: &str = "structure.json";

/// A module in the fixture project.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TestProjectModule {
    pub name: String,
    #[serde(default, rename = "dependsOn")]
    pub depends_on: Vec<String>,
}

/// The file a test resolves, addressed by module plus module-relative path.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileToResolve {
    #[serde(rename = "module")]
    pub module_name: String,
    #[serde(rename = "file")]
    pub relative_file_path: String,
}

impl FileToResolve {
    /// Fixture-relative path of the file, `<module>/<relative path>`.
    pub fn file_path(&self) -> String {
        format!("{}/{}", self.module_name, self.relative_file_path)
    }
}

/// A parsed fixture structure file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TestProjectStructure {
    pub modules: Vec<TestProjectModule>,
    #[serde(rename = "fileToResolve")]
    pub file_to_resolve: FileToResolve,
}

impl TestProjectStructure {
    pub fn parse(json: &str) -> Result<Self, FixtureError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read `structure.json` from a fixture directory.
    pub fn read(dir: &Path) -> Result<Self, FixtureError> {
        Self::read_named(dir, DEFAULT_STRUCTURE_FILE)
    }

    pub fn read_named(dir: &Path, file_name: &str) -> Result<Self, FixtureError> {
        let contents = std::fs::read_to_string(dir.join(file_name))?;
        Self::parse(&contents)
    }
}

#[derive(Debug)]
pub enum FixtureError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for FixtureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read fixture structure: {e}"),
            Self::Json(e) => write!(f, "malformed fixture structure: {e}"),
        }
    }
}

impl std::error::Error for FixtureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for FixtureError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for FixtureError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}
