pub use std::{
	collections::{
		BTreeMap,
		BTreeSet,
		VecDeque
	},
	env,
	ffi::CString,
	fmt::{
		self,
		Display
	},
	io::{
		self,
		Write
	},
	os::fd::{
		AsRawFd,
		OwnedFd,
		RawFd
	},
	path::{
		Path,
		PathBuf
	}
};

pub use libc::{
	STDIN_FILENO,
	STDOUT_FILENO,
};
pub use nix::{
	errno::Errno,
	sys::{
		signal::{
			signal,
			SigHandler,
			Signal
		},
		wait::{
			waitpid,
			WaitStatus
		}
	},
	unistd::{
		dup2,
		execvp,
		fork,
		pipe,
		setsid,
		ForkResult,
		Pid
	}
};
pub use pest::{
	iterators::Pair,
	Parser,
};
pub use bitflags::bitflags;
pub use log::{trace, debug, info, warn, error};
pub use crate::{
	pest_ext::{
		OptPairExt,
		PairExt,
		Rule,
		ShParse,
	},
	shellenv::ShEnv,
	error::{
		ShResult,
		ShErr,
		ShErr::*,
		ShErrLow,
		ShErrHigh
	},
};
