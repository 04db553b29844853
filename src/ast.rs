use std::fmt::{self, Display};

use serde::Serialize;

/// An ordered, append-only sequence of AST nodes.
///
/// Every list-like node (words, pipeline stages, statements, conditional parts) is one of these,
/// so "first" and "last" always agree with insertion order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Seq<T> {
	items: Vec<T>
}

impl<T> Default for Seq<T> {
	fn default() -> Self {
		Self { items: vec![] }
	}
}

impl<T> Seq<T> {
	pub fn new() -> Self {
		Self::default()
	}
	pub fn push(&mut self, item: T) {
		self.items.push(item)
	}
	pub fn first(&self) -> Option<&T> {
		self.items.first()
	}
	pub fn last(&self) -> Option<&T> {
		self.items.last()
	}
	pub fn len(&self) -> usize {
		self.items.len()
	}
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}
	pub fn iter(&self) -> std::slice::Iter<'_, T> {
		self.items.iter()
	}
}

impl<T> FromIterator<T> for Seq<T> {
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
		Self { items: iter.into_iter().collect() }
	}
}

impl<'a,T> IntoIterator for &'a Seq<T> {
	type Item = &'a T;
	type IntoIter = std::slice::Iter<'a, T>;
	fn into_iter(self) -> Self::IntoIter {
		self.items.iter()
	}
}

/// A literal token, or a reference to a variable by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Word {
	text: String,
	is_var: bool
}

impl Word {
	pub fn literal(text: impl Into<String>) -> Self {
		Self { text: text.into(), is_var: false }
	}
	pub fn var(name: impl Into<String>) -> Self {
		Self { text: name.into(), is_var: true }
	}
	pub fn text(&self) -> &str {
		&self.text
	}
	pub fn is_var(&self) -> bool {
		self.is_var
	}
}

pub type Words = Seq<Word>;

impl Words {
	pub fn from_literals<'a>(literals: impl IntoIterator<Item = &'a str>) -> Self {
		literals.into_iter().map(Word::literal).collect()
	}
}

/// One pipeline stage: a command and its arguments, before expansion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Program {
	words: Words
}

impl Program {
	pub fn new(words: Words) -> Self {
		Self { words }
	}
	pub fn words(&self) -> &Words {
		&self.words
	}
}

/// One or more programs joined left to right by pipes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pipeline {
	programs: Seq<Program>
}

impl Pipeline {
	pub fn new(first: Program) -> Self {
		let mut programs = Seq::new();
		programs.push(first);
		Self { programs }
	}
	pub fn push(&mut self, program: Program) {
		self.programs.push(program)
	}
	pub fn programs(&self) -> &Seq<Program> {
		&self.programs
	}
	pub fn len(&self) -> usize {
		self.programs.len()
	}
	pub fn is_empty(&self) -> bool {
		self.programs.is_empty()
	}
	pub fn is_single(&self) -> bool {
		self.programs.len() == 1
	}
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionalPart {
	predicate: Pipeline,
	body: Script
}

impl ConditionalPart {
	pub fn new(predicate: Pipeline, body: Script) -> Self {
		Self { predicate, body }
	}
	pub fn predicate(&self) -> &Pipeline {
		&self.predicate
	}
	pub fn body(&self) -> &Script {
		&self.body
	}
}

/// if/elif clauses in declaration order, plus an optional else body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conditional {
	parts: Seq<ConditionalPart>,
	else_body: Option<Script>
}

impl Conditional {
	pub fn new(first: ConditionalPart) -> Self {
		let mut parts = Seq::new();
		parts.push(first);
		Self { parts, else_body: None }
	}
	pub fn push_part(&mut self, part: ConditionalPart) {
		self.parts.push(part)
	}
	pub fn set_else(&mut self, body: Script) {
		self.else_body = Some(body)
	}
	pub fn parts(&self) -> &Seq<ConditionalPart> {
		&self.parts
	}
	pub fn else_body(&self) -> Option<&Script> {
		self.else_body.as_ref()
	}
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForLoop {
	parallel: bool,
	var_name: Word,
	var_values: Words,
	body: Script
}

impl ForLoop {
	pub fn new(var_name: Word, var_values: Words, body: Script) -> Self {
		Self { parallel: false, var_name, var_values, body }
	}
	pub fn with_parallel(mut self, parallel: bool) -> Self {
		self.parallel = parallel;
		self
	}
	pub fn is_parallel(&self) -> bool {
		self.parallel
	}
	pub fn var_name(&self) -> &Word {
		&self.var_name
	}
	pub fn var_values(&self) -> &Words {
		&self.var_values
	}
	pub fn body(&self) -> &Script {
		&self.body
	}
}

/// `name=value`. Only the first token of the expanded value is stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assignment {
	name: String,
	value: Words
}

impl Assignment {
	pub fn new(name: impl Into<String>, value: Words) -> Self {
		Self { name: name.into(), value }
	}
	pub fn name(&self) -> &str {
		&self.name
	}
	pub fn value(&self) -> &Words {
		&self.value
	}
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum StatementKind {
	ForLoop(ForLoop),
	Conditional(Conditional),
	Pipeline(Pipeline),
	Assignment(Assignment)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statement {
	kind: StatementKind,
	background: bool
}

impl Statement {
	pub fn new(kind: StatementKind) -> Self {
		Self { kind, background: false }
	}
	pub fn with_background(mut self, background: bool) -> Self {
		self.background = background;
		self
	}
	pub fn kind(&self) -> &StatementKind {
		&self.kind
	}
	pub fn is_background(&self) -> bool {
		self.background
	}
}

impl From<Pipeline> for Statement {
	fn from(pipeline: Pipeline) -> Self {
		Self::new(StatementKind::Pipeline(pipeline))
	}
}

impl From<Conditional> for Statement {
	fn from(cond: Conditional) -> Self {
		Self::new(StatementKind::Conditional(cond))
	}
}

impl From<ForLoop> for Statement {
	fn from(for_loop: ForLoop) -> Self {
		Self::new(StatementKind::ForLoop(for_loop))
	}
}

impl From<Assignment> for Statement {
	fn from(assign: Assignment) -> Self {
		Self::new(StatementKind::Assignment(assign))
	}
}

/// Statements run one after another. An empty script does nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Script {
	statements: Seq<Statement>
}

impl Script {
	pub fn new() -> Self {
		Self::default()
	}
	pub fn push(&mut self, statement: Statement) {
		self.statements.push(statement)
	}
	pub fn statements(&self) -> &Seq<Statement> {
		&self.statements
	}
	pub fn len(&self) -> usize {
		self.statements.len()
	}
	pub fn is_empty(&self) -> bool {
		self.statements.is_empty()
	}
}

impl FromIterator<Statement> for Script {
	fn from_iter<I: IntoIterator<Item = Statement>>(iter: I) -> Self {
		Self { statements: iter.into_iter().collect() }
	}
}

// Tree printer. Two spaces per level.

fn space(f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
	write!(f, "{:width$}", "", width = depth * 2)
}

impl Display for Words {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (i,word) in self.iter().enumerate() {
			if i > 0 {
				write!(f, " ")?;
			}
			write!(f, "{}", word.text())?;
		}
		Ok(())
	}
}

impl Program {
	fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
		space(f, depth)?;
		writeln!(f, "program: {}", self.words)
	}
}

impl Pipeline {
	fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
		if self.is_single() {
			if let Some(program) = self.programs.first() {
				return program.fmt_tree(f, depth)
			}
		}
		space(f, depth)?;
		writeln!(f, "pipe_stream:")?;
		for program in &self.programs {
			program.fmt_tree(f, depth + 1)?;
		}
		Ok(())
	}
}

impl Conditional {
	fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
		for (i,part) in self.parts.iter().enumerate() {
			space(f, depth)?;
			writeln!(f, "{}if:", if i > 0 { "el" } else { "" })?;
			part.predicate.fmt_tree(f, depth + 1)?;
			space(f, depth)?;
			writeln!(f, "then:")?;
			part.body.fmt_tree(f, depth + 1)?;
		}
		if let Some(else_body) = &self.else_body {
			space(f, depth)?;
			writeln!(f, "else:")?;
			else_body.fmt_tree(f, depth + 1)?;
		}
		Ok(())
	}
}

impl ForLoop {
	fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
		space(f, depth)?;
		writeln!(
			f,
			"for {} in {}; {}do",
			self.var_name.text(),
			self.var_values,
			if self.parallel { "parallel " } else { "" }
		)?;
		self.body.fmt_tree(f, depth + 1)
	}
}

impl Assignment {
	fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
		space(f, depth)?;
		writeln!(f, "var_assign: {} = {}", self.name, self.value)
	}
}

impl Statement {
	fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
		match &self.kind {
			StatementKind::ForLoop(for_loop) => for_loop.fmt_tree(f, depth),
			StatementKind::Conditional(cond) => cond.fmt_tree(f, depth),
			StatementKind::Pipeline(pipeline) => pipeline.fmt_tree(f, depth),
			StatementKind::Assignment(assign) => assign.fmt_tree(f, depth),
		}
	}
}

impl Script {
	fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
		space(f, depth)?;
		writeln!(f, "script:")?;
		for statement in &self.statements {
			statement.fmt_tree(f, depth + 1)?;
		}
		Ok(())
	}
}

impl Display for Script {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.fmt_tree(f, 0)
	}
}
