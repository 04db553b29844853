use crate::environment::VarTable;
use crate::execute::ExecFlags;
use crate::jobs::JobTable;
use crate::shopt::ShOpts;

/// Everything a running script can see or change.
///
/// Owned by whoever drives execution and passed down by `&mut`. A forked child works on its own
/// copy, so nothing it changes here is visible to the shell.
#[derive(Debug, Clone, Default)]
pub struct ShEnv {
	vars: VarTable,
	jobs: JobTable,
	opts: ShOpts,
	flags: ExecFlags,
	last_status: i32
}

impl ShEnv {
	/// A fresh context whose variable store is seeded from the inherited OS environment
	pub fn new(opts: ShOpts) -> Self {
		let mut shenv = Self {
			vars: VarTable::from_env(),
			opts,
			..Default::default()
		};
		shenv.set_status(0);
		shenv
	}

	pub fn vars(&self) -> &VarTable {
		&self.vars
	}

	pub fn vars_mut(&mut self) -> &mut VarTable {
		&mut self.vars
	}

	pub fn jobs(&self) -> &JobTable {
		&self.jobs
	}

	pub fn jobs_mut(&mut self) -> &mut JobTable {
		&mut self.jobs
	}

	pub fn opts(&self) -> &ShOpts {
		&self.opts
	}

	pub fn flags(&self) -> ExecFlags {
		self.flags
	}

	pub fn flags_mut(&mut self) -> &mut ExecFlags {
		&mut self.flags
	}

	pub fn status(&self) -> i32 {
		self.last_status
	}

	/// Records the status of the last foreground statement, also visible as `$?`
	pub fn set_status(&mut self, status: i32) {
		self.last_status = status;
		self.vars.set("?", Some(&status.to_string()));
	}

	/// Waits for every background job still in the table
	pub fn teardown(&mut self) {
		if self.opts.exec.reap_on_exit {
			self.jobs.reap_all();
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn status_is_mirrored_into_vars() {
		let mut shenv = ShEnv::default();
		shenv.set_status(2);
		assert_eq!(shenv.status(), 2);
		assert_eq!(shenv.vars().get("?"), Some("2"));
	}

	#[test]
	fn new_imports_os_environment() {
		let shenv = ShEnv::new(ShOpts::default());
		assert_eq!(shenv.vars().get("PATH").map(String::from), std::env::var("PATH").ok());
		assert_eq!(shenv.vars().get("?"), Some("0"));
	}
}
