//! Casino registry
//!
//! The ordered list of casinos a report covers. It is an explicit value that
//! callers own and pass by reference; every mutation goes through a method
//! that validates first and leaves the list untouched on error.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::ReportError;

/// Casinos a fresh registry starts with
pub const DEFAULT_CASINOS: [&str; 4] = ["AZUR", "BANZAI", "CASINO CHAMPAGNE", "CASINO NIGHT"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CasinoRegistry {
    casinos: Vec<String>,
}

impl Default for CasinoRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_CASINOS.iter().map(|s| s.to_string()))
    }
}

impl CasinoRegistry {
    /// Build from a list, dropping blanks and duplicates while keeping order
    pub fn new(casinos: impl IntoIterator<Item = String>) -> Self {
        let mut registry = Self {
            casinos: Vec::new(),
        };
        for name in casinos {
            let name = name.trim().to_string();
            if !name.is_empty() && !registry.contains(&name) {
                registry.casinos.push(name);
            }
        }
        registry
    }

    pub fn contains(&self, name: &str) -> bool {
        self.casinos.iter().any(|c| c == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.casinos.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.casinos
    }

    pub fn len(&self) -> usize {
        self.casinos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.casinos.is_empty()
    }

    /// Append a casino if it is not already listed
    ///
    /// Returns `true` when the list changed. The name is stored as given;
    /// see [`normalize_name`](Self::normalize_name) for editor input.
    pub fn add(&mut self, name: &str) -> bool {
        if name.trim().is_empty() || self.contains(name) {
            return false;
        }
        debug!("Registry: adding casino '{}'", name);
        self.casinos.push(name.to_string());
        true
    }

    /// Add a casino typed by a user: trimmed, upper-cased, must be new
    pub fn add_validated(&mut self, input: &str) -> Result<String, ReportError> {
        let name = Self::normalize_name(input)?;
        if self.contains(&name) {
            return Err(ReportError::validation(format!(
                "Casino '{}' already exists",
                name
            )));
        }
        self.casinos.push(name.clone());
        info!("Casino added: {}", name);
        Ok(name)
    }

    /// Remove a casino; returns `true` when it was present
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.casinos.len();
        self.casinos.retain(|c| c != name);
        let removed = self.casinos.len() != before;
        if removed {
            info!("Casino removed: {}", name);
        }
        removed
    }

    /// Rename in place, keeping the position
    ///
    /// Historical report keys are not touched; callers that want the old
    /// values to follow must migrate them (see `ReportEditor::rename_casino`).
    pub fn rename(&mut self, old: &str, new_input: &str) -> Result<String, ReportError> {
        let new_name = Self::normalize_name(new_input)?;
        let index = self
            .casinos
            .iter()
            .position(|c| c == old)
            .ok_or_else(|| ReportError::not_found(format!("Casino '{}' not found", old)))?;
        if new_name == old {
            return Ok(new_name);
        }
        if self.contains(&new_name) {
            return Err(ReportError::validation(format!(
                "A casino named '{}' already exists",
                new_name
            )));
        }
        self.casinos[index] = new_name.clone();
        info!("Casino renamed: {} -> {}", old, new_name);
        Ok(new_name)
    }

    /// Trim and upper-case; empty names are rejected
    pub fn normalize_name(input: &str) -> Result<String, ReportError> {
        let name = input.trim().to_uppercase();
        if name.is_empty() {
            return Err(ReportError::validation("Casino name cannot be empty"));
        }
        Ok(name)
    }

    /// Load from a JSON array file; a missing file yields `fallback`
    pub fn load_or<P: AsRef<Path>>(path: P, fallback: CasinoRegistry) -> Result<Self, ReportError> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(
                "Registry file {} not found, using configured casinos",
                path.display()
            );
            return Ok(fallback);
        }
        let content = std::fs::read_to_string(path).map_err(|e| {
            ReportError::file_operation(format!(
                "Failed to read registry file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let names: Vec<String> = serde_json::from_str(&content)?;
        Ok(Self::new(names))
    }

    /// Write as a pretty JSON array
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ReportError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.casinos)?;
        std::fs::write(path, content).map_err(|e| {
            ReportError::file_operation(format!(
                "Failed to write registry file '{}': {}",
                path.display(),
                e
            ))
        })
    }
}
