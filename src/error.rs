use std::fmt::{Debug, Display};

use nix::errno::Errno;

use crate::pest_ext::Rule;

// These error types represent the two stages of the pish error reporting mechanism
// A low error is thrown at runtime, where there is no source text to blame.
// A high error is created by the parser and carries the rendered pest diagnostic.

pub type ShResult<T> = Result<T, ShErr>;

#[derive(Debug)]
pub enum ShErr {
	Low(ShErrLow),
	High(ShErrHigh)
}

impl Display for ShErr {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			ShErr::Low(low) => write!(f,"{}",low),
			ShErr::High(high) => write!(f,"{}",high),
		}
	}
}

impl std::error::Error for ShErr {}

impl ShErr {
	/// The OS-style status code a statement reports when it fails with this error
	pub fn errno(&self) -> i32 {
		match self {
			ShErr::Low(low) => low.errno(),
			ShErr::High(_) => libc::EINVAL,
		}
	}
}

/// Simple errors
#[derive(Debug)]
pub enum ShErrLow {
	IoError(std::io::Error),
	ErrNo(Errno),
	HomeUnset,
	CmdNotFound(String),
	BadPermission(String),
	ExecFailed(String),
	InternalErr(String),

	// Not an actual error, used to propagate `exit` out of nested execution
	CleanExit(i32),
}

impl ShErrLow {
	pub fn errno(&self) -> i32 {
		match self {
			ShErrLow::IoError(err) => err.raw_os_error().unwrap_or(libc::EIO),
			ShErrLow::ErrNo(no) => *no as i32,
			ShErrLow::HomeUnset => libc::EINVAL,
			ShErrLow::CmdNotFound(_) => libc::ENOENT,
			ShErrLow::BadPermission(_) => libc::EACCES,
			ShErrLow::ExecFailed(_) |
			ShErrLow::InternalErr(_) => libc::EINVAL,
			ShErrLow::CleanExit(code) => *code,
		}
	}
}

impl Display for ShErrLow {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			ShErrLow::IoError(error) => write!(f,"{}",error),
			ShErrLow::ErrNo(no) => write!(f,"{}",no.desc()),
			ShErrLow::HomeUnset => write!(f,"HOME not set"),
			ShErrLow::CmdNotFound(name) => write!(f,"{}: command not found",name),
			ShErrLow::BadPermission(name) => write!(f,"{}: permission denied",name),
			ShErrLow::ExecFailed(msg) => write!(f,"Execution failed: {}",msg),
			ShErrLow::InternalErr(msg) => write!(f,"Internal error: {}",msg),
			ShErrLow::CleanExit(_) => write!(f, ""),
		}
	}
}

pub struct ShErrHigh {
	pest_err: Box<pest::error::Error<Rule>>
}

impl Debug for ShErrHigh {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f,"ShErrHigh({:?})",self.pest_err.line_col)
	}
}

impl Display for ShErrHigh {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f,"Parse error:\n{}",self.pest_err)
	}
}

impl ShErrHigh {
	pub fn parse_err(pest_err: pest::error::Error<Rule>) -> Self {
		Self { pest_err: Box::new(pest_err) }
	}
	/// True when the parser ran out of input rather than hitting a bad token,
	/// e.g. an `if` still waiting for its `fi`
	pub fn is_incomplete(&self, input: &str) -> bool {
		match self.pest_err.location {
			pest::error::InputLocation::Pos(pos) => pos >= input.trim_end().len(),
			pest::error::InputLocation::Span((_,end)) => end >= input.trim_end().len(),
		}
	}
}

impl From<std::io::Error> for ShErr {
	fn from(err: std::io::Error) -> Self {
		ShErr::Low(ShErrLow::IoError(err))
	}
}

impl From<Errno> for ShErr {
	fn from(no: Errno) -> Self {
		ShErr::Low(ShErrLow::ErrNo(no))
	}
}

impl From<ShErrLow> for ShErr {
	fn from(low: ShErrLow) -> Self {
		ShErr::Low(low)
	}
}

impl From<pest::error::Error<Rule>> for ShErr {
	fn from(err: pest::error::Error<Rule>) -> Self {
		ShErr::High(ShErrHigh::parse_err(err))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use ShErr::*;

	#[test]
	fn errno_mapping() {
		assert_eq!(ShErr::Low(ShErrLow::HomeUnset).errno(), libc::EINVAL);
		assert_eq!(ShErr::from(Errno::ENOENT).errno(), libc::ENOENT);
		let io = std::io::Error::from_raw_os_error(libc::ENOTDIR);
		assert_eq!(ShErr::from(io).errno(), libc::ENOTDIR);
	}

	#[test]
	fn incomplete_input() {
		let input = "if true; then echo a;\n";
		let Err(High(err)) = crate::parser::parse_script(input) else { panic!() };
		assert!(err.is_incomplete(input));
		let input = "echo a | | b";
		let Err(High(err)) = crate::parser::parse_script(input) else { panic!() };
		assert!(!err.is_incomplete(input));
	}

	#[test]
	fn display_messages() {
		assert_eq!(ShErrLow::HomeUnset.to_string(), "HOME not set");
		assert_eq!(ShErrLow::CmdNotFound("frob".into()).to_string(), "frob: command not found");
	}
}
