use crate::ast::ForLoop;
use crate::execute::{self, dispatch, STATUS_FAILURE, STATUS_SUCCESS};
use crate::expand::ArgBuf;
use crate::prelude::*;

/// Binds the loop variable to each expanded value in turn and runs the body.
///
/// The variable keeps the last value after the loop. With no values the body never runs and
/// the variable is left alone.
pub fn exec_for(for_loop: &ForLoop, shenv: &mut ShEnv) -> ShResult<i32> {
	let values = ArgBuf::expand(for_loop.var_values(), shenv.vars());
	let var_name = for_loop.var_name().text();

	if for_loop.is_parallel() {
		return exec_for_parallel(for_loop, &values, shenv)
	}

	let mut status = STATUS_SUCCESS;
	for value in values.iter() {
		shenv.vars_mut().set(var_name, Some(value));
		status = dispatch::exec_script(for_loop.body(), shenv)?;
	}
	Ok(status)
}

/// Every iteration gets its own child, all started before any is waited on.
/// Returns the status of the last iteration.
fn exec_for_parallel(for_loop: &ForLoop, values: &ArgBuf, shenv: &mut ShEnv) -> ShResult<i32> {
	let var_name = for_loop.var_name().text();
	let mut pids = vec![];
	let mut complete = true;

	for value in values.iter() {
		shenv.vars_mut().set(var_name, Some(value));
		match execute::fork_flushed() {
			Ok(ForkResult::Child) => {
				execute::exit_subproc(dispatch::exec_script(for_loop.body(), shenv))
			}
			Ok(ForkResult::Parent { child }) => {
				trace!("parallel iteration {}={} forked as {}", var_name, value, child);
				pids.push(child);
			}
			Err(e) => {
				eprintln!("fork: {}", e);
				complete = false;
				break
			}
		}
	}

	let mut status = STATUS_SUCCESS;
	for pid in pids {
		status = execute::wait_child(pid);
	}
	if complete {
		Ok(status)
	} else {
		Ok(STATUS_FAILURE)
	}
}
