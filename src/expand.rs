use std::collections::TryReserveError;
use std::ffi::CString;
use std::ops::Range;

use log::{error, trace};

use crate::ast::Words;
use crate::environment::VarTable;
use crate::error::{ShErrLow, ShResult};

/// An expanded argument vector.
///
/// Expansion writes every word's contribution into `buf`, each followed by a NUL byte, then
/// splits the buffer on whitespace. Tokens are stored as byte ranges into `buf` rather than
/// references, so growing either allocation never invalidates the other. `buf` is not grown
/// after tokenizing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArgBuf {
	buf: Vec<u8>,
	tokens: Vec<Range<usize>>
}

fn is_space(byte: u8) -> bool {
	matches!(byte, b' ' | b'\t' | b'\n' | b'\x0b' | b'\x0c' | b'\r')
}

/// Running out of memory halfway through an argument vector is not recoverable
fn alloc_failed(err: TryReserveError) -> ! {
	error!("allocation failed while expanding arguments: {}", err);
	eprintln!("pish: out of memory while building argument vector");
	std::process::exit(1)
}

impl ArgBuf {
	/// Substitutes variables from `vars` and splits the result into arguments.
	/// Undefined variables contribute nothing.
	pub fn expand(words: &Words, vars: &VarTable) -> Self {
		let mut argbuf = Self::default();
		for word in words {
			if word.is_var() {
				if let Some(value) = vars.get(word.text()) {
					argbuf.puts(value);
				}
			} else {
				argbuf.puts(word.text());
			}
		}
		argbuf.tokenize();
		trace!("expanded {} into {:?}", words, argbuf.argv());
		argbuf
	}

	fn puts(&mut self, s: &str) {
		if let Err(e) = self.buf.try_reserve(s.len() + 1) {
			alloc_failed(e)
		}
		self.buf.extend_from_slice(s.as_bytes());
		self.buf.push(0);
	}

	fn tokenize(&mut self) {
		let mut start = None;
		for i in 0..self.buf.len() {
			let byte = self.buf[i];
			let boundary = byte == 0 || is_space(byte);
			match (start, boundary) {
				(None, false) => start = Some(i),
				(Some(from), true) => {
					self.buf[i] = 0;
					self.push_token(from..i);
					start = None;
				}
				(None, true) => self.buf[i] = 0,
				(Some(_), false) => {}
			}
		}
		// Every contribution ends in NUL, so no token is left open
		if let Some(from) = start {
			let end = self.buf.len();
			self.push_token(from..end);
		}
	}

	fn push_token(&mut self, range: Range<usize>) {
		if let Err(e) = self.tokens.try_reserve(1) {
			alloc_failed(e)
		}
		self.tokens.push(range);
	}

	pub fn argc(&self) -> usize {
		self.tokens.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tokens.is_empty()
	}

	pub fn arg(&self, idx: usize) -> Option<&str> {
		self.tokens.get(idx).map(|range| std::str::from_utf8(&self.buf[range.clone()]).unwrap_or_default())
	}

	/// argv[0], if expansion produced anything
	pub fn first(&self) -> Option<&str> {
		self.arg(0)
	}

	pub fn iter(&self) -> impl Iterator<Item = &str> {
		(0..self.argc()).filter_map(|idx| self.arg(idx))
	}

	pub fn argv(&self) -> Vec<&str> {
		self.iter().collect()
	}

	/// The NUL-terminated argument vector handed to exec
	pub fn to_cstrings(&self) -> ShResult<Vec<CString>> {
		let mut argv = vec![];
		for range in &self.tokens {
			let arg = CString::new(&self.buf[range.clone()])
				.map_err(|e| ShErrLow::InternalErr(format!("argument contains NUL: {}", e)))?;
			argv.push(arg);
		}
		Ok(argv)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::ast::Word;

	fn words(parts: &[(&str,bool)]) -> Words {
		parts.iter().map(|(text,is_var)| {
			if *is_var { Word::var(*text) } else { Word::literal(*text) }
		}).collect()
	}

	#[test]
	fn literals_become_arguments() {
		let vars = VarTable::new();
		let argv = ArgBuf::expand(&words(&[("echo",false),("hi",false)]), &vars);
		assert_eq!(argv.argv(), vec!["echo","hi"]);
		assert_eq!(argv.argc(), 2);
	}

	#[test]
	fn variables_are_substituted() {
		let mut vars = VarTable::new();
		vars.set("x", Some("3"));
		let argv = ArgBuf::expand(&words(&[("echo",false),("x",true)]), &vars);
		assert_eq!(argv.argv(), vec!["echo","3"]);
	}

	#[test]
	fn values_split_on_whitespace() {
		let mut vars = VarTable::new();
		vars.set("list", Some("  a\tb\n c  "));
		let argv = ArgBuf::expand(&words(&[("list",true)]), &vars);
		assert_eq!(argv.argv(), vec!["a","b","c"]);
	}

	#[test]
	fn adjacent_words_stay_separate() {
		let mut vars = VarTable::new();
		vars.set("b", Some("two"));
		let argv = ArgBuf::expand(&words(&[("one",false),("b",true)]), &vars);
		assert_eq!(argv.argv(), vec!["one","two"]);
	}

	#[test]
	fn undefined_variable_yields_no_tokens() {
		let vars = VarTable::new();
		let argv = ArgBuf::expand(&words(&[("nope",true)]), &vars);
		assert!(argv.is_empty());
		assert_eq!(argv.first(), None);
		assert!(argv.to_cstrings().unwrap().is_empty());
	}

	#[test]
	fn empty_input_is_fine() {
		let argv = ArgBuf::expand(&Words::new(), &VarTable::new());
		assert_eq!(argv.argc(), 0);
	}

	#[test]
	fn cstrings_match_tokens() {
		let argv = ArgBuf::expand(&words(&[("ls -l",false)]), &VarTable::new());
		let cstrings = argv.to_cstrings().unwrap();
		assert_eq!(cstrings, vec![CString::new("ls").unwrap(), CString::new("-l").unwrap()]);
	}

	#[test]
	fn grows_past_initial_capacity() {
		let long = "x".repeat(5000);
		let argv = ArgBuf::expand(&words(&[(long.as_str(),false),("tail",false)]), &VarTable::new());
		assert_eq!(argv.arg(0).map(str::len), Some(5000));
		assert_eq!(argv.arg(1), Some("tail"));
	}
}
