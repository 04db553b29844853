use crate::ast::Script;
use crate::execute::dispatch;
use crate::parser::parse_script;
use crate::prelude::*;
use crate::prompt::{self, Input};

/// Status recorded when the input does not parse
pub const STATUS_PARSE_ERR: i32 = 2;

fn report_parse_err(err: ShErr, shenv: &mut ShEnv) -> i32 {
	eprintln!("pish: {}", err);
	shenv.set_status(STATUS_PARSE_ERR);
	STATUS_PARSE_ERR
}

/// Runs an already parsed script, optionally dumping it as JSON to stderr first
pub fn exec_parsed(script: &Script, shenv: &mut ShEnv, dump_ast: bool) -> ShResult<i32> {
	debug!("executing:\n{}", script);
	if dump_ast {
		let json = serde_json::to_string_pretty(script)
			.map_err(|e| Low(ShErrLow::InternalErr(format!("failed to serialize script: {}", e))))?;
		eprintln!("{}", json);
	}
	dispatch::exec_script(script, shenv)
}

/// Parses and runs a whole unit of input. A parse error skips the unit and is not fatal.
pub fn exec_input(input: &str, shenv: &mut ShEnv, dump_ast: bool) -> ShResult<i32> {
	match parse_script(input) {
		Ok(script) => exec_parsed(&script, shenv, dump_ast),
		Err(e) => Ok(report_parse_err(e, shenv))
	}
}

/// Reads statements from the line editor until end of input.
///
/// Lines are buffered while the parser reports that the input is merely unfinished, so an
/// `if` or `for` can span several lines.
pub fn repl(shenv: &mut ShEnv, dump_ast: bool) -> ShResult<()> {
	let mut rl = prompt::init_prompt(shenv.opts())?;
	let mut buffer = String::new();
	let result = loop {
		let prompt = if buffer.is_empty() {
			prompt::prompt_text(shenv)
		} else {
			prompt::PS2.to_string()
		};
		let line = match prompt::read_line(&mut rl, &prompt) {
			Ok(Input::Line(line)) => line,
			Ok(Input::Interrupted) => {
				buffer.clear();
				continue
			}
			Ok(Input::Eof) => break Ok(()),
			Err(e) => break Err(e)
		};
		buffer.push_str(&line);
		buffer.push('\n');

		let script = match parse_script(&buffer) {
			Ok(script) => script,
			Err(High(e)) if e.is_incomplete(&buffer) => continue,
			Err(e) => {
				buffer.clear();
				report_parse_err(e, shenv);
				continue
			}
		};
		buffer.clear();
		if let Err(e) = exec_parsed(&script, shenv, dump_ast) {
			break Err(e)
		}
	};
	prompt::save_history(&mut rl);
	result
}
