use crate::ast::Program;
use crate::expand::ArgBuf;
use crate::prelude::*;

use super::{builtin, ExecFlags, STATUS_FAILURE, STATUS_SUCCESS};

/// Expands and runs one program, returning its status.
///
/// Builtins run in the current process. Anything else is forked and waited on, unless
/// `NO_FORK` is set, in which case this process is replaced and the call never returns.
pub fn exec_cmd(program: &Program, shenv: &mut ShEnv) -> ShResult<i32> {
	let argv = ArgBuf::expand(program.words(), shenv.vars());
	let Some(command) = argv.first() else {
		// Everything expanded away
		trace!("empty command: {}", program.words());
		return Ok(STATUS_SUCCESS)
	};

	if builtin::is_builtin(command) {
		return builtin::exec_builtin(&argv, shenv)
	}

	let argv = argv.to_cstrings()?;
	if shenv.flags().contains(ExecFlags::NO_FORK) {
		exec_external(&argv)
	}

	match super::fork_flushed() {
		Ok(ForkResult::Child) => exec_external(&argv),
		Ok(ForkResult::Parent { child }) => {
			trace!("forked {} for {:?}", child, argv[0]);
			Ok(super::wait_child(child))
		}
		Err(e) => {
			eprintln!("fork: {}", e);
			Ok(STATUS_FAILURE)
		}
	}
}

/// Replaces the current process with `argv[0]`, searched on PATH with the inherited environment.
/// If that fails the process exits with 127 when the command was not found and 126 otherwise.
pub fn exec_external(argv: &[CString]) -> ! {
	let Some(command) = argv.first() else {
		std::process::exit(STATUS_SUCCESS)
	};
	let e = match execvp(command, argv) {
		Ok(never) => match never {},
		Err(e) => e
	};
	let name = command.to_string_lossy().into_owned();
	let (error, code) = match e {
		Errno::ENOENT => (ShErrLow::CmdNotFound(name), 127),
		Errno::EACCES => (ShErrLow::BadPermission(name), 126),
		e => (ShErrLow::ExecFailed(format!("{}: {}", name, e.desc())), 126)
	};
	eprintln!("pish: {}", error);
	std::process::exit(code)
}
