use crate::ast::Pipeline;
use crate::prelude::*;

use super::{command, ExecFlags, STATUS_FAILURE};

/// Runs every stage concurrently, each stage's stdout feeding the next stage's stdin.
///
/// Every forked stage is reaped before returning. The status is that of the last stage.
pub fn exec_pipeline(pipeline: &Pipeline, shenv: &mut ShEnv) -> ShResult<i32> {
	if pipeline.is_single() {
		let program = pipeline.programs().first()
			.ok_or_else(|| Low(ShErrLow::InternalErr("pipeline has no programs".into())))?;
		return command::exec_cmd(program, shenv)
	}

	let mut inner = pipeline.programs().iter().peekable();
	let mut prev_read_pipe: Option<OwnedFd> = None;
	let mut pids: Vec<Pid> = vec![];

	while let Some(program) = inner.next() {
		let (r_pipe,w_pipe) = if inner.peek().is_some() {
			match pipe() {
				Ok((r_pipe,w_pipe)) => (Some(r_pipe),Some(w_pipe)),
				Err(e) => {
					eprintln!("pipe: {}", e);
					break
				}
			}
		} else {
			(None,None)
		};

		match super::fork_flushed() {
			Ok(ForkResult::Child) => {
				// Only the ends this stage uses survive, everything else is closed
				drop(r_pipe);
				if let Some(r) = prev_read_pipe.take() {
					if let Err(e) = dup2(r.as_raw_fd(), STDIN_FILENO) {
						super::exit_subproc(Err(e.into()))
					}
				}
				if let Some(w) = w_pipe {
					if let Err(e) = dup2(w.as_raw_fd(), STDOUT_FILENO) {
						super::exit_subproc(Err(e.into()))
					}
				}
				*shenv.flags_mut() |= ExecFlags::NO_FORK | ExecFlags::IN_PIPE;
				super::exit_subproc(command::exec_cmd(program, shenv))
			}
			Ok(ForkResult::Parent { child }) => {
				trace!("pipeline stage {} forked as {}", pids.len(), child);
				pids.push(child);
				// The writer has its copy now. Replacing the read end closes the one the
				// previous stage was reading from.
				drop(w_pipe);
				prev_read_pipe = r_pipe;
			}
			Err(e) => {
				eprintln!("fork: {}", e);
				break
			}
		}
	}
	drop(prev_read_pipe);

	let complete = pids.len() == pipeline.len();
	let Some(last) = pids.pop() else {
		return Ok(STATUS_FAILURE)
	};
	// Upstream stages commonly die to SIGPIPE once the reader is done, so only the last
	// stage's outcome is reported
	for pid in pids {
		super::reap_quietly(pid);
	}
	let status = super::wait_child(last);
	if complete {
		Ok(status)
	} else {
		Ok(STATUS_FAILURE)
	}
}
