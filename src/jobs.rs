use crate::prelude::*;

/// Process ids of the background jobs this shell has started and not yet reaped.
///
/// A pid is tracked at most once. Jobs are only ever removed by `drain`, which waits for each.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobTable {
	jobs: BTreeSet<Pid>
}

impl JobTable {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns false if the pid was already tracked
	pub fn insert(&mut self, pid: Pid) -> bool {
		trace!("tracking background job {}", pid);
		self.jobs.insert(pid)
	}

	pub fn len(&self) -> usize {
		self.jobs.len()
	}

	pub fn is_empty(&self) -> bool {
		self.jobs.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = Pid> + '_ {
		self.jobs.iter().copied()
	}

	/// Removes every tracked pid, handing each to `reap` exactly once.
	/// The table is empty when this returns.
	pub fn drain_with<F: FnMut(Pid)>(&mut self, mut reap: F) {
		while let Some(pid) = self.jobs.pop_first() {
			reap(pid)
		}
	}

	/// Blocks on each tracked job in turn and reports how it ended
	pub fn reap_all(&mut self) {
		if !self.is_empty() {
			debug!("reaping {} background job(s)", self.len());
		}
		self.drain_with(|pid| {
			match waitpid(pid, None) {
				Ok(WaitStatus::Exited(pid, code)) => {
					println!("Child {} exited with status {}", pid, code);
				}
				Ok(WaitStatus::Signaled(pid, sig, _)) => {
					println!("Child {} terminated by signal {}", pid, sig as i32);
				}
				Ok(status) => {
					debug!("background job {} ended with unexpected status {:?}", pid, status);
				}
				Err(e) => {
					eprintln!("waitpid: {}", e);
				}
			}
		});
		let _ = io::stdout().flush();
	}
}
