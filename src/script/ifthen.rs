use crate::ast::Conditional;
use crate::execute::{dispatch, pipeline, STATUS_SUCCESS};
use crate::prelude::*;

/// Tries each predicate in order and runs the body of the first one that succeeds.
/// Falls through to the else body, if there is one. Later predicates are never run.
pub fn exec_if(cond: &Conditional, shenv: &mut ShEnv) -> ShResult<i32> {
	for part in cond.parts() {
		let status = pipeline::exec_pipeline(part.predicate(), shenv)?;
		trace!("if predicate returned {}", status);
		if status == 0 {
			return dispatch::exec_script(part.body(), shenv)
		}
	}

	if let Some(else_body) = cond.else_body() {
		return dispatch::exec_script(else_body, shenv)
	}

	Ok(STATUS_SUCCESS)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::ast::StatementKind;
	use crate::parser::parse_script;

	fn run_if(input: &str, shenv: &mut ShEnv) -> i32 {
		let script = parse_script(input).unwrap();
		let StatementKind::Conditional(cond) = script.statements().first().unwrap().kind() else {
			panic!("not a conditional: {}", input)
		};
		exec_if(cond, shenv).unwrap()
	}

	#[test]
	fn first_true_branch_wins() {
		let mut shenv = ShEnv::default();
		run_if("if false; then r=A; elif true; then r=B; else r=C; fi", &mut shenv);
		assert_eq!(shenv.vars().get("r"), Some("B"));
	}

	#[test]
	fn else_branch() {
		let mut shenv = ShEnv::default();
		run_if("if false; then r=A; elif false; then r=B; else r=C; fi", &mut shenv);
		assert_eq!(shenv.vars().get("r"), Some("C"));
	}

	#[test]
	fn later_predicates_do_not_run() {
		let mut shenv = ShEnv::default();
		run_if("if true; then r=A; elif false; then r=B; fi", &mut shenv);
		assert_eq!(shenv.vars().get("r"), Some("A"));
	}

	#[test]
	fn nothing_matches_without_else() {
		let mut shenv = ShEnv::default();
		let status = run_if("if false; then r=A; fi", &mut shenv);
		assert_eq!(status, STATUS_SUCCESS);
		assert_eq!(shenv.vars().get("r"), None);
	}

	#[test]
	fn status_comes_from_the_body() {
		let mut shenv = ShEnv::default();
		assert_ne!(run_if("if true; then false; fi", &mut shenv), 0);
	}
}
