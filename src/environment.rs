use std::collections::BTreeMap;

use log::trace;

/// Returns the portion of a `key=value` record that names the variable
///
/// A key that reaches end-of-string and one that reaches `=` compare the same,
/// so `HOME` and `HOME=/root` both name `HOME`.
pub fn record_key(record: &str) -> &str {
	match record.find('=') {
		Some(idx) => &record[..idx],
		None => record
	}
}

/// The shell's variable store.
///
/// Backs both the imported OS environment and shell-local assignments. Entries are kept
/// ordered by key, and every key maps to exactly one live value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VarTable {
	vars: BTreeMap<String,String>
}

impl VarTable {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a store from the environment this process inherited
	pub fn from_env() -> Self {
		let mut table = Self::new();
		table.import(std::env::vars_os().map(|(key,val)| {
			format!("{}={}", key.to_string_lossy(), val.to_string_lossy())
		}));
		table
	}

	/// Inserts `KEY=VALUE` records verbatim. When a name repeats, the last record wins.
	pub fn import<I,S>(&mut self, records: I)
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>
	{
		for record in records {
			let record = record.as_ref();
			let key = record_key(record);
			let value = record.get(key.len() + 1..);
			self.set(key, value);
		}
	}

	pub fn get(&self, key: &str) -> Option<&str> {
		self.vars.get(record_key(key)).map(|val| val.as_str())
	}

	/// Sets `key` to `value`, replacing any prior value. An absent value is stored as the empty string.
	pub fn set(&mut self, key: &str, value: Option<&str>) {
		let key = record_key(key);
		let value = value.unwrap_or_default();
		trace!("setting var: {}={}", key, value);
		self.vars.insert(key.to_string(), value.to_string());
	}

	pub fn len(&self) -> usize {
		self.vars.len()
	}

	pub fn is_empty(&self) -> bool {
		self.vars.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str,&str)> {
		self.vars.iter().map(|(key,val)| (key.as_str(), val.as_str()))
	}
}
