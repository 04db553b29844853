use rustyline::{error::ReadlineError, history::DefaultHistory, Config, Editor};

use crate::prelude::*;
use crate::shopt::{EditMode, ShOpts};

pub type ShEditor = Editor<(), DefaultHistory>;

/// Shown while a statement is still missing its closing keyword
pub const PS2: &str = "> ";

fn rl_err(err: ReadlineError) -> ShErr {
	match err {
		ReadlineError::Io(e) => Low(ShErrLow::IoError(e)),
		e => Low(ShErrLow::InternalErr(format!("line editor: {}", e)))
	}
}

pub fn hist_path() -> Option<PathBuf> {
	env::var("HOME").ok().map(|home| PathBuf::from(home).join(".pish_history"))
}

pub fn build_editor_config(opts: &ShOpts) -> ShResult<Config> {
	let edit_mode = match opts.prompt.edit_mode {
		EditMode::Emacs => rustyline::EditMode::Emacs,
		EditMode::Vi => rustyline::EditMode::Vi,
	};
	let config = Config::builder()
		.max_history_size(opts.core.max_hist).map_err(rl_err)?
		.history_ignore_dups(opts.core.hist_ignore_dupes).map_err(rl_err)?
		.auto_add_history(opts.core.auto_hist)
		.edit_mode(edit_mode)
		.build();
	Ok(config)
}

pub fn init_prompt(opts: &ShOpts) -> ShResult<ShEditor> {
	let config = build_editor_config(opts)?;
	let mut rl = ShEditor::with_config(config).map_err(rl_err)?;
	if let Some(path) = hist_path() {
		if let Err(e) = rl.load_history(&path) {
			debug!("no history loaded from {}: {}", path.display(), e);
		}
	}
	Ok(rl)
}

pub fn save_history(rl: &mut ShEditor) {
	let Some(path) = hist_path() else { return };
	if let Err(e) = rl.save_history(&path) {
		warn!("failed to save history to {}: {}", path.display(), e);
	}
}

/// `$PS1` if the store has it, otherwise the configured default
pub fn prompt_text(shenv: &ShEnv) -> String {
	match shenv.vars().get("PS1") {
		Some(ps1) => ps1.to_string(),
		None => shenv.opts().prompt.ps1.clone()
	}
}

pub enum Input {
	Line(String),
	/// Ctrl-C; whatever was being typed is dropped
	Interrupted,
	Eof
}

pub fn read_line(rl: &mut ShEditor, prompt: &str) -> ShResult<Input> {
	match rl.readline(prompt) {
		Ok(line) => Ok(Input::Line(line)),
		Err(ReadlineError::Interrupted) => Ok(Input::Interrupted),
		Err(ReadlineError::Eof) => Ok(Input::Eof),
		Err(e) => Err(rl_err(e))
	}
}
