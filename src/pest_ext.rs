use std::collections::VecDeque;

use pest::iterators::Pair;

use crate::error::{ShErr::*, ShErrLow, ShResult};

pub trait OptPairExt<'a> {
	fn unpack(self) -> ShResult<Pair<'a,Rule>>;
}

impl<'a> OptPairExt<'a> for Option<Pair<'a,Rule>> {
	/// The grammar guarantees most of the pairs we ask for, but a bad guess should surface
	/// as an error rather than a panic.
	#[track_caller]
	fn unpack(self) -> ShResult<Pair<'a,Rule>> {
		match self {
			Some(pair) => Ok(pair),
			None => {
				let caller = std::panic::Location::caller();
				Err(Low(ShErrLow::InternalErr(format!("Called unpack() on a None value at {}", caller))))
			}
		}
	}
}

pub trait PairExt<'a> {
	fn filter(&self, rule: Rule) -> VecDeque<Pair<'a,Rule>>;
}

impl<'a> PairExt<'a> for Pair<'a,Rule> {
	/// Filter direct children by rule type
	fn filter(&self, rule: Rule) -> VecDeque<Pair<'a,Rule>> {
		self.clone().into_inner().filter(|pr| pr.as_rule() == rule).collect::<VecDeque<_>>()
	}
}

#[derive(pest_derive::Parser)]
#[grammar_inline = r##"
// Helper rules
WHITESPACE = _{ " " | "\t" | ("\\" ~ NEWLINE) }
COMMENT    = _{ "#" ~ (!NEWLINE ~ ANY)* }
sep        = _{ (";" | NEWLINE)+ }
ident_char = _{ ASCII_ALPHANUMERIC | "_" }
boundary   = _{ &(" " | "\t" | NEWLINE | ";" | "|" | "&" | "#" | EOI) }

// Keywords. These are loud so they can be atomic; the AST builder skips them.
kw_if    = @{ "if" ~ boundary }
kw_then  = @{ "then" ~ boundary }
kw_elif  = @{ "elif" ~ boundary }
kw_else  = @{ "else" ~ boundary }
kw_fi    = @{ "fi" ~ boundary }
kw_for   = @{ "for" ~ boundary }
kw_in    = @{ "in" ~ boundary }
kw_do    = @{ "do" ~ boundary }
kw_done  = @{ "done" ~ boundary }
parallel = @{ "parallel" ~ boundary }
reserved = _{ kw_if | kw_then | kw_elif | kw_else | kw_fi | kw_for | kw_do | kw_done }

// Words
var_name    = @{ (ASCII_ALPHA | "_") ~ ident_char* }
special_var = @{ "?" }
var_ref     = ${ "$" ~ (("{" ~ (var_name | special_var) ~ "}") | var_name | special_var) }
dollar      = @{ "$" }
squote_body = @{ (!"'" ~ ANY)* }
dquote_body = @{ (!"\"" ~ ANY)* }
squoted     = ${ "'" ~ squote_body ~ "'" }
dquoted     = ${ "\"" ~ dquote_body ~ "\"" }
literal     = @{ (!(" " | "\t" | NEWLINE | ";" | "|" | "&" | "$" | "'" | "\"") ~ ANY)+ }
word        = ${ (squoted | dquoted | var_ref | literal | dollar)+ }

// Statements
program     = { !reserved ~ word+ }
pipeline    = { program ~ ("|" ~ NEWLINE* ~ program)* }
assignment  = ${ var_name ~ "=" ~ word? }
background  = { "&" }
stmt_end    = _{ sep | &EOI }
statement   = { (conditional | for_loop | assignment | pipeline) ~ ((background ~ sep?) | stmt_end) }
body        = { sep? ~ statement* }
cond_part   = { pipeline ~ sep ~ kw_then ~ body }
conditional = { kw_if ~ cond_part ~ (kw_elif ~ cond_part)* ~ (kw_else ~ body)? ~ kw_fi }
for_loop    = { kw_for ~ var_name ~ kw_in ~ word* ~ sep ~ parallel? ~ kw_do ~ body ~ kw_done }
main        = { SOI ~ sep? ~ statement* ~ EOI }
"##]
pub struct ShParse;
