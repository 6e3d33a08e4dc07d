//! Tunables shared by the page context and the tab authority.
//!
//! Loaded from JSON (`mlo.json` by convention). Every field has a default, so
//! an empty object or a missing file yields the stock behavior.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

pub const DEFAULT_MAX_TABS: usize = 50;
pub const DEFAULT_CONFIRM_THRESHOLD: usize = 20;
pub const DEFAULT_OPEN_SPACING_MS: u64 = 100;
pub const DEFAULT_EXPORT_PREFIX: &str = "links";
/// Longest accepted delay between two tab creations.
pub const MAX_OPEN_SPACING_MS: u64 = 60_000;

/// Modifier key that must be held to start a lasso drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LassoModifier {
	#[default]
	Shift,
	Alt,
	Ctrl,
	Meta,
}

impl LassoModifier {
	/// Key name as shown to the user.
	pub fn key_name(self) -> &'static str {
		match self {
			LassoModifier::Shift => "Shift",
			LassoModifier::Alt => "Alt",
			LassoModifier::Ctrl => "Ctrl",
			LassoModifier::Meta => "Meta",
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OpenerConfig {
	/// Hard ceiling on tabs created per request.
	pub max_tabs: usize,
	/// Requests larger than this need explicit user confirmation.
	pub confirm_threshold: usize,
	/// Delay between consecutive tab creations.
	pub open_spacing_ms: u64,
	pub lasso_modifier: LassoModifier,
	/// Leading part of the export filename (`<prefix>-YYYYMMDD-HHMMSS.csv`).
	pub export_prefix: String,
}

impl Default for OpenerConfig {
	fn default() -> Self {
		Self {
			max_tabs: DEFAULT_MAX_TABS,
			confirm_threshold: DEFAULT_CONFIRM_THRESHOLD,
			open_spacing_ms: DEFAULT_OPEN_SPACING_MS,
			lasso_modifier: LassoModifier::default(),
			export_prefix: DEFAULT_EXPORT_PREFIX.to_string(),
		}
	}
}

impl OpenerConfig {
	/// Parses a config from JSON text and clamps out-of-range values.
	pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
		serde_json::from_str::<Self>(json).map(Self::normalized)
	}

	/// Loads a config file. A missing file yields the defaults.
	pub fn load(path: &Path) -> Result<Self> {
		let content = match fs::read_to_string(path) {
			Ok(content) => content,
			Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
				debug!(target = "mlo::config", path = %path.display(), "config not found, using defaults");
				return Ok(Self::default());
			}
			Err(err) => return Err(err.into()),
		};

		Self::from_json_str(&content).map_err(|source| Error::Config {
			path: path.to_path_buf(),
			source,
		})
	}

	/// Delay between tab creations, capped at [`MAX_OPEN_SPACING_MS`].
	pub fn open_spacing(&self) -> Duration {
		Duration::from_millis(self.open_spacing_ms.min(MAX_OPEN_SPACING_MS))
	}

	/// Returns true when opening `count` tabs must be confirmed first.
	pub fn needs_confirmation(&self, count: usize) -> bool {
		count > self.confirm_threshold
	}

	fn normalized(mut self) -> Self {
		self.max_tabs = self.max_tabs.max(1);
		self.open_spacing_ms = self.open_spacing_ms.min(MAX_OPEN_SPACING_MS);
		if self.export_prefix.trim().is_empty() {
			self.export_prefix = DEFAULT_EXPORT_PREFIX.to_string();
		}
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_object_yields_defaults() {
		assert_eq!(OpenerConfig::from_json_str("{}").unwrap(), OpenerConfig::default());
	}

	#[test]
	fn partial_override_keeps_other_defaults() {
		let config = OpenerConfig::from_json_str(r#"{"confirmThreshold": 5, "lassoModifier": "alt"}"#).unwrap();
		assert_eq!(config.confirm_threshold, 5);
		assert_eq!(config.lasso_modifier, LassoModifier::Alt);
		assert_eq!(config.max_tabs, DEFAULT_MAX_TABS);
		assert_eq!(config.open_spacing(), Duration::from_millis(100));
	}

	#[test]
	fn zero_cap_and_blank_prefix_are_clamped() {
		let config = OpenerConfig::from_json_str(r#"{"maxTabs": 0, "exportPrefix": "  "}"#).unwrap();
		assert_eq!(config.max_tabs, 1);
		assert_eq!(config.export_prefix, "links");
	}

	#[test]
	fn huge_spacing_is_clamped() {
		let config = OpenerConfig::from_json_str(&format!(r#"{{"openSpacingMs": {}}}"#, u64::MAX)).unwrap();
		assert_eq!(config.open_spacing_ms, MAX_OPEN_SPACING_MS);

		let unnormalized = OpenerConfig {
			open_spacing_ms: u64::MAX,
			..OpenerConfig::default()
		};
		assert_eq!(unnormalized.open_spacing(), Duration::from_millis(MAX_OPEN_SPACING_MS));
	}

	#[test]
	fn confirmation_is_strictly_above_threshold() {
		let config = OpenerConfig::default();
		assert!(!config.needs_confirmation(20));
		assert!(config.needs_confirmation(21));
	}

	#[test]
	fn missing_file_yields_defaults() {
		let dir = tempfile::tempdir().unwrap();
		let config = OpenerConfig::load(&dir.path().join("absent.json")).unwrap();
		assert_eq!(config, OpenerConfig::default());
	}

	#[test]
	fn malformed_file_reports_path() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("mlo.json");
		std::fs::write(&path, "{ not json").unwrap();
		let err = OpenerConfig::load(&path).unwrap_err();
		assert!(matches!(err, Error::Config { .. }));
		assert!(err.to_string().contains("mlo.json"));
	}
}
