use crate::ast::Assignment;
use crate::expand::ArgBuf;
use crate::prelude::*;

use super::STATUS_SUCCESS;

/// Stores the first token of the expanded value, or the empty string if there is none
pub fn exec_assignment(assign: &Assignment, shenv: &mut ShEnv) -> ShResult<i32> {
	let value = ArgBuf::expand(assign.value(), shenv.vars());
	shenv.vars_mut().set(assign.name(), value.first());
	Ok(STATUS_SUCCESS)
}
