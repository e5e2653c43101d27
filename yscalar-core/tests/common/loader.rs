//! Fixture loading from YAML files

use serde::Deserialize;
use std::path::Path;

/// A single scalar typing case from a fixture file
#[derive(Debug, Clone, Deserialize)]
pub struct ScalarCase {
    pub id: String,
    pub desc: String,
    pub value: String,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
    /// Typed parse to apply; implicit resolution when absent
    #[serde(default)]
    pub parse: Option<String>,
    /// `[kind]` or `[kind, text]`
    pub expect: Vec<String>,
}

/// Load all cases from a YAML fixture file
pub fn load_fixtures(path: &Path) -> Vec<ScalarCase> {
    let content = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read fixture file {:?}: {}", path, e));
    serde_yaml::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture file {:?}: {}", path, e))
}

/// Load fixtures from the standard fixtures directory
pub fn load_fixtures_by_name(name: &str) -> Vec<ScalarCase> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(format!("{}.yaml", name));
    load_fixtures(&path)
}
