pub mod ast;
pub mod environment;
pub mod error;
pub mod execute;
pub mod expand;
pub mod interpret;
pub mod jobs;
pub mod parser;
pub mod pest_ext;
pub mod prelude;
pub mod prompt;
pub mod script;
pub mod shellenv;
pub mod shopt;
