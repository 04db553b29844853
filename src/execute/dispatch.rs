use crate::ast::{Script, Statement, StatementKind};
use crate::prelude::*;
use crate::script;

use super::{assignment, pipeline, STATUS_SUCCESS};

/// Runs statements in order and returns the status of the last one.
///
/// Failures stay local to the statement that caused them. Only `exit` unwinds past here.
pub fn exec_script(script: &Script, shenv: &mut ShEnv) -> ShResult<i32> {
	let mut status = STATUS_SUCCESS;
	for statement in script.statements() {
		status = exec_statement(statement, shenv)?;
	}
	Ok(status)
}

pub fn exec_statement(statement: &Statement, shenv: &mut ShEnv) -> ShResult<i32> {
	if statement.is_background() {
		exec_bg_statement(statement, shenv);
		return Ok(STATUS_SUCCESS)
	}
	let status = match exec_fg_statement(statement, shenv) {
		Ok(status) => status,
		Err(Low(ShErrLow::CleanExit(code))) => return Err(Low(ShErrLow::CleanExit(code))),
		Err(e) => {
			eprintln!("pish: {}", e);
			e.errno()
		}
	};
	shenv.set_status(status);
	Ok(status)
}

/// Runs a statement to completion in the current process
pub fn exec_fg_statement(statement: &Statement, shenv: &mut ShEnv) -> ShResult<i32> {
	match statement.kind() {
		StatementKind::Pipeline(pipe) => pipeline::exec_pipeline(pipe, shenv),
		StatementKind::Assignment(assign) => assignment::exec_assignment(assign, shenv),
		StatementKind::Conditional(cond) => script::ifthen::exec_if(cond, shenv),
		StatementKind::ForLoop(for_loop) => script::fordo::exec_for(for_loop, shenv),
	}
}

/// Forks a session leader to run the statement and records it in the job table.
/// Nothing the statement does is visible to the shell afterwards.
pub fn exec_bg_statement(statement: &Statement, shenv: &mut ShEnv) {
	match super::fork_flushed() {
		Ok(ForkResult::Child) => {
			if let Err(e) = setsid() {
				super::exit_subproc(Err(e.into()))
			}
			super::exit_subproc(exec_fg_statement(statement, shenv))
		}
		Ok(ForkResult::Parent { child }) => {
			shenv.jobs_mut().insert(child);
			println!("Started background job: PID {}", child);
		}
		Err(e) => {
			eprintln!("fork: {}", e);
		}
	}
}
