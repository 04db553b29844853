pub mod assignment;
pub mod builtin;
pub mod command;
pub mod dispatch;
pub mod pipeline;

use crate::prelude::*;

pub const STATUS_SUCCESS: i32 = 0;
/// Reported when a child dies to a signal, or when there is no exit code to report at all
pub const STATUS_FAILURE: i32 = -1;

bitflags! {
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
	pub struct ExecFlags: u32 {
		/// Already inside a forked child; exec in place instead of forking again
		const NO_FORK = 0b0001;
		/// Running as one stage of a multi-stage pipeline
		const IN_PIPE = 0b0010;
	}
}

/// Flushes buffered output and forks, so the child does not inherit a copy of unwritten text.
///
/// A failed flush is logged and the fork goes ahead. The only error returned is the fork's own.
pub fn fork_flushed() -> nix::Result<ForkResult> {
	if let Err(e) = io::stdout().flush() {
		warn!("flushing stdout before fork: {}", e);
	}
	if let Err(e) = io::stderr().flush() {
		warn!("flushing stderr before fork: {}", e);
	}
	let result = unsafe { fork()? };
	if let ForkResult::Child = result {
		restore_child_signals();
	}
	Ok(result)
}

/// The Rust runtime starts us with SIGPIPE ignored, and an ignored disposition survives exec.
/// Children get the default back so a stage writing into a closed pipe is killed by it.
fn restore_child_signals() {
	if let Err(e) = unsafe { signal(Signal::SIGPIPE, SigHandler::SigDfl) } {
		warn!("restoring SIGPIPE: {}", e);
	}
}

/// Turns the outcome of a wait into a status.
/// A child killed by a signal is reported on stdout.
pub fn status_from_wait(status: WaitStatus) -> i32 {
	match status {
		WaitStatus::Exited(_, code) => code,
		WaitStatus::Signaled(pid, sig, _) => {
			println!("Child {} terminated by signal {}", pid, sig as i32);
			STATUS_FAILURE
		}
		status => {
			debug!("unexpected wait status: {:?}", status);
			STATUS_FAILURE
		}
	}
}

/// Blocks until `pid` terminates
pub fn wait_child(pid: Pid) -> i32 {
	loop {
		match waitpid(pid, None) {
			Ok(status) => return status_from_wait(status),
			Err(Errno::EINTR) => continue,
			Err(e) => {
				eprintln!("waitpid: {}", e);
				return STATUS_FAILURE
			}
		}
	}
}

/// Waits for `pid` without reporting how it ended
pub fn reap_quietly(pid: Pid) {
	loop {
		match waitpid(pid, None) {
			Ok(status) => {
				trace!("reaped {}: {:?}", pid, status);
				return
			}
			Err(Errno::EINTR) => continue,
			Err(e) => {
				eprintln!("waitpid: {}", e);
				return
			}
		}
	}
}

/// Maps a status onto a process exit code
pub fn exit_code(status: i32) -> i32 {
	if (0..=255).contains(&status) {
		status
	} else {
		1
	}
}

/// Ends a forked child once it has finished its share of the work. Never returns to the caller.
pub fn exit_subproc(result: ShResult<i32>) -> ! {
	let code = match result {
		Ok(status) => exit_code(status),
		Err(Low(ShErrLow::CleanExit(code))) => code,
		Err(e) => {
			eprintln!("pish: {}", e);
			1
		}
	};
	let _ = io::stdout().flush();
	std::process::exit(code)
}
