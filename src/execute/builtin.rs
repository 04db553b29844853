use crate::expand::ArgBuf;
use crate::prelude::*;

use super::{ExecFlags, STATUS_SUCCESS};

pub const BUILTINS: [&str; 4] = [
	"exit",
	"cd",
	"jobs",
	"help",
];

pub fn is_builtin(name: &str) -> bool {
	BUILTINS.contains(&name)
}

/// Runs a builtin in the current process.
///
/// A failing builtin prints its error and reports the matching errno as its status. `exit`
/// is passed up as `CleanExit` so the caller can end the process.
pub fn exec_builtin(argv: &ArgBuf, shenv: &mut ShEnv) -> ShResult<i32> {
	let name = argv.first().unwrap_or_default();
	let result = match name {
		"exit" => Err(Low(ShErrLow::CleanExit(0))),
		"cd" => cd(argv, shenv),
		"jobs" => jobs(shenv),
		"help" => help(),
		_ => Err(Low(ShErrLow::InternalErr(format!("not a builtin: {}", name))))
	};
	match result {
		Ok(()) => Ok(STATUS_SUCCESS),
		Err(Low(ShErrLow::CleanExit(code))) => {
			debug!("exit requested with code {}", code);
			Err(Low(ShErrLow::CleanExit(code)))
		}
		Err(e) => {
			eprintln!("{}: {}", name, e);
			Ok(e.errno())
		}
	}
}

/// `cd [dir]`. With no argument, goes to `$HOME` as the variable store sees it.
fn cd(argv: &ArgBuf, shenv: &mut ShEnv) -> ShResult<()> {
	let target = match argv.arg(1) {
		Some(dir) => dir.to_string(),
		None => shenv.vars().get("HOME").ok_or(Low(ShErrLow::HomeUnset))?.to_string()
	};
	if shenv.flags().contains(ExecFlags::IN_PIPE) {
		warn!("cd in a pipeline stage does not change the shell's directory");
	}
	nix::unistd::chdir(target.as_str())?;
	let pwd = env::current_dir()?;
	shenv.vars_mut().set("PWD", pwd.to_str());
	Ok(())
}

fn jobs(shenv: &ShEnv) -> ShResult<()> {
	let mut stdout = io::stdout().lock();
	if shenv.jobs().is_empty() {
		writeln!(stdout, "No background jobs.")?;
	}
	for pid in shenv.jobs().iter() {
		writeln!(stdout, "Background job: PID {}", pid)?;
	}
	Ok(())
}

fn help() -> ShResult<()> {
	let mut stdout = io::stdout().lock();
	writeln!(stdout, "Built-in commands:")?;
	writeln!(stdout, "  exit: Exit the shell")?;
	writeln!(stdout, "  cd [dir]: Change the current directory to [dir]")?;
	writeln!(stdout, "  jobs: List background jobs")?;
	writeln!(stdout, "  help: Display this help message")?;
	Ok(())
}
