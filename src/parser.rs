use crate::ast::{Assignment, Conditional, ConditionalPart, ForLoop, Pipeline, Program, Script, Statement, Word, Words};
use crate::prelude::*;

/// Parses shell source into a `Script`.
///
/// Keywords are matched as tokens by the grammar and dropped here, so the tree only carries
/// the words, pipelines and bodies the interpreter walks.
pub fn parse_script(input: &str) -> ShResult<Script> {
	let main = ShParse::parse(Rule::main, input)?.next().unpack()?;
	let script = build_statements(main)?;
	debug!("parsed {} statement(s)", script.len());
	Ok(script)
}

fn build_statements(pair: Pair<Rule>) -> ShResult<Script> {
	let mut script = Script::new();
	for stmt in pair.filter(Rule::statement) {
		script.push(build_statement(stmt)?);
	}
	Ok(script)
}

fn build_statement(pair: Pair<Rule>) -> ShResult<Statement> {
	let background = pair.filter(Rule::background).front().is_some();
	let node = pair.into_inner().next().unpack()?;
	let statement: Statement = match node.as_rule() {
		Rule::conditional => build_conditional(node)?.into(),
		Rule::for_loop => build_for_loop(node)?.into(),
		Rule::assignment => build_assignment(node)?.into(),
		Rule::pipeline => build_pipeline(node)?.into(),
		rule => {
			return Err(Low(ShErrLow::InternalErr(format!("unexpected statement rule: {:?}", rule))))
		}
	};
	Ok(statement.with_background(background))
}

/// Flattens one word into the parts it is made of.
/// `a$b'c'` becomes the literal `a`, the reference `b`, and the literal `c`.
fn build_word(pair: Pair<Rule>, words: &mut Words) -> ShResult<()> {
	for part in pair.into_inner() {
		let word = match part.as_rule() {
			Rule::literal | Rule::dollar => Word::literal(part.as_str()),
			Rule::squoted | Rule::dquoted => {
				let body = part.into_inner().next().unpack()?;
				Word::literal(body.as_str())
			}
			Rule::var_ref => {
				let name = part.into_inner().next().unpack()?;
				Word::var(name.as_str())
			}
			rule => {
				return Err(Low(ShErrLow::InternalErr(format!("unexpected word part: {:?}", rule))))
			}
		};
		words.push(word);
	}
	Ok(())
}

fn build_words<'a>(pairs: impl IntoIterator<Item = Pair<'a,Rule>>) -> ShResult<Words> {
	let mut words = Words::new();
	for word in pairs {
		build_word(word, &mut words)?;
	}
	Ok(words)
}

fn build_program(pair: Pair<Rule>) -> ShResult<Program> {
	Ok(Program::new(build_words(pair.filter(Rule::word))?))
}

fn build_pipeline(pair: Pair<Rule>) -> ShResult<Pipeline> {
	let mut programs = pair.filter(Rule::program);
	let mut pipeline = Pipeline::new(build_program(programs.pop_front().unpack()?)?);
	for program in programs {
		pipeline.push(build_program(program)?);
	}
	Ok(pipeline)
}

fn build_cond_part(pair: Pair<Rule>) -> ShResult<ConditionalPart> {
	let predicate = build_pipeline(pair.filter(Rule::pipeline).pop_front().unpack()?)?;
	let body = build_statements(pair.filter(Rule::body).pop_front().unpack()?)?;
	Ok(ConditionalPart::new(predicate, body))
}

fn build_conditional(pair: Pair<Rule>) -> ShResult<Conditional> {
	let mut parts = pair.filter(Rule::cond_part);
	let mut cond = Conditional::new(build_cond_part(parts.pop_front().unpack()?)?);
	for part in parts {
		cond.push_part(build_cond_part(part)?);
	}
	// The only direct body child is the else branch
	if let Some(else_body) = pair.filter(Rule::body).pop_front() {
		cond.set_else(build_statements(else_body)?);
	}
	Ok(cond)
}

fn build_for_loop(pair: Pair<Rule>) -> ShResult<ForLoop> {
	let var_name = pair.filter(Rule::var_name).pop_front().unpack()?;
	let var_values = build_words(pair.filter(Rule::word))?;
	let parallel = pair.filter(Rule::parallel).front().is_some();
	let body = build_statements(pair.filter(Rule::body).pop_front().unpack()?)?;
	Ok(ForLoop::new(Word::literal(var_name.as_str()), var_values, body).with_parallel(parallel))
}

fn build_assignment(pair: Pair<Rule>) -> ShResult<Assignment> {
	let name = pair.filter(Rule::var_name).pop_front().unpack()?;
	let value = build_words(pair.filter(Rule::word))?;
	Ok(Assignment::new(name.as_str(), value))
}
