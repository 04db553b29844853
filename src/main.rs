use std::io::{self, IsTerminal, Read, Write};
use std::path::PathBuf;

use clap::Parser;
use log::debug;

use pish::error::{ShErr, ShErrLow, ShResult};
use pish::execute::exit_code;
use pish::interpret;
use pish::shellenv::ShEnv;
use pish::shopt::ShOpts;

/// A small process-orchestrating shell
#[derive(Parser, Debug)]
#[command(name = "pish", version, about)]
struct Args {
	/// Script to run. Without one, commands come from stdin.
	script: Option<PathBuf>,

	/// Run COMMANDS and exit
	#[arg(short = 'c', value_name = "COMMANDS", conflicts_with = "script")]
	command: Option<String>,

	/// Print each parsed script as JSON on stderr before running it
	#[arg(long)]
	dump_ast: bool,

	/// Shell options file (JSON). Defaults to ~/.pishrc.json if it exists
	#[arg(long, value_name = "FILE")]
	rc: Option<PathBuf>,
}

fn run(args: &Args, shenv: &mut ShEnv) -> ShResult<()> {
	if let Some(command) = &args.command {
		interpret::exec_input(command, shenv, args.dump_ast)?;
	} else if let Some(path) = &args.script {
		let input = std::fs::read_to_string(path)?;
		interpret::exec_input(&input, shenv, args.dump_ast)?;
	} else if io::stdin().is_terminal() {
		interpret::repl(shenv, args.dump_ast)?;
	} else {
		let mut input = String::new();
		io::stdin().read_to_string(&mut input)?;
		interpret::exec_input(&input, shenv, args.dump_ast)?;
	}
	Ok(())
}

fn main() {
	env_logger::init();
	let args = Args::parse();
	debug!("{:?}", args);

	let opts = match ShOpts::load_or_default(args.rc.as_deref()) {
		Ok(opts) => opts,
		Err(e) => {
			eprintln!("pish: {}", e);
			ShOpts::default()
		}
	};
	let mut shenv = ShEnv::new(opts);

	let code = match run(&args, &mut shenv) {
		Ok(()) => {
			shenv.teardown();
			exit_code(shenv.status())
		}
		// `exit` ends the shell on the spot
		Err(ShErr::Low(ShErrLow::CleanExit(code))) => code,
		Err(e) => {
			eprintln!("pish: {}", e);
			shenv.teardown();
			1
		}
	};
	let _ = io::stdout().flush();
	std::process::exit(code)
}
