use serde::{Deserialize, Serialize};

use crate::prelude::*;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EditMode {
	#[default]
	Emacs,
	Vi
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(default, deny_unknown_fields)]
pub struct ShOpts {
	pub core: ShOptsCore,
	pub prompt: ShOptsPrompt,
	pub exec: ShOptsExec,
}

impl ShOpts {
	pub fn new() -> Self {
		Self::default()
	}

	/// Missing keys keep their defaults, unknown keys are rejected
	pub fn from_json(json: &str) -> ShResult<Self> {
		serde_json::from_str(json)
			.map_err(|e| Low(ShErrLow::InternalErr(format!("invalid shell options: {}", e))))
	}

	pub fn load(path: &Path) -> ShResult<Self> {
		let json = std::fs::read_to_string(path)?;
		let opts = Self::from_json(&json)?;
		debug!("loaded shell options from {}", path.display());
		Ok(opts)
	}

	/// Uses `path` if given, otherwise `$HOME/.pishrc.json` when it exists, otherwise defaults
	pub fn load_or_default(path: Option<&Path>) -> ShResult<Self> {
		if let Some(path) = path {
			return Self::load(path)
		}
		let Ok(home) = env::var("HOME") else {
			return Ok(Self::default())
		};
		let rc = PathBuf::from(home).join(".pishrc.json");
		if rc.is_file() {
			Self::load(&rc)
		} else {
			Ok(Self::default())
		}
	}
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ShOptsCore {
	pub max_hist: usize,
	pub hist_ignore_dupes: bool,
	pub auto_hist: bool,
}

impl Default for ShOptsCore {
	fn default() -> Self {
		Self {
			max_hist: 1000,
			hist_ignore_dupes: true,
			auto_hist: true,
		}
	}
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ShOptsPrompt {
	pub edit_mode: EditMode,
	pub ps1: String,
}

impl Default for ShOptsPrompt {
	fn default() -> Self {
		Self {
			edit_mode: EditMode::Emacs,
			ps1: "$ ".into(),
		}
	}
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ShOptsExec {
	/// Wait for outstanding background jobs before the shell exits
	pub reap_on_exit: bool,
}

impl Default for ShOptsExec {
	fn default() -> Self {
		Self { reap_on_exit: true }
	}
}
