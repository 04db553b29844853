use std::io::Write;
use std::process::{Command, Output, Stdio};

struct Run {
	stdout: String,
	stderr: String,
	code: Option<i32>
}

fn pish() -> Command {
	Command::new(env!("CARGO_BIN_EXE_pish"))
}

fn finish(output: Output) -> Run {
	Run {
		stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
		stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
		code: output.status.code()
	}
}

/// Feeds `script` to the shell on stdin
fn run_with(mut cmd: Command, script: &str) -> Run {
	let mut child = cmd
		.stdin(Stdio::piped())
		.stdout(Stdio::piped())
		.stderr(Stdio::piped())
		.spawn()
		.unwrap();
	child.stdin.take().unwrap().write_all(script.as_bytes()).unwrap();
	finish(child.wait_with_output().unwrap())
}

fn run(script: &str) -> Run {
	run_with(pish(), script)
}

fn lines(text: &str) -> Vec<&str> {
	text.lines().collect()
}

#[test]
fn simple_command() {
	let out = run("echo hi\n");
	assert_eq!(out.stdout, "hi\n");
	assert_eq!(out.code, Some(0));
}

#[test]
fn three_stage_pipeline() {
	let out = run("printf 'b\\na\\n' | sort | head -n 1\n");
	assert_eq!(out.stdout, "a\n");
}

#[test]
fn closed_reader_stops_writer() {
	let out = run("yes | head -n 1\n");
	assert_eq!(out.stdout, "y\n");
	assert_eq!(out.stderr, "");
	assert_eq!(out.code, Some(0));
}

#[test]
fn writer_ignoring_write_errors_is_killed() {
	let path = std::env::temp_dir().join(format!("pish-scenario-{}-loop", std::process::id()));
	std::fs::write(&path, "while :; do echo y; done\n").unwrap();
	let out = run(&format!("sh {} | head -n 1\n", path.display()));
	assert_eq!(out.stdout, "y\n");
	assert_eq!(out.stderr, "");
}

#[test]
fn pipeline_status_is_last_stage() {
	assert_eq!(run("false | true\n").code, Some(0));
	assert_eq!(run("true | false\n").code, Some(1));
}

#[test]
fn conditional_picks_first_true_branch() {
	let out = run("if false; then echo A; elif true; then echo B; else echo C; fi\n");
	assert_eq!(out.stdout, "B\n");
	let out = run("if true; then echo A; elif true; then echo B; else echo C; fi\n");
	assert_eq!(out.stdout, "A\n");
	let out = run("if false; then echo A; elif false; then echo B; else echo C; fi\n");
	assert_eq!(out.stdout, "C\n");
	let out = run("if false; then echo A; fi\necho after\n");
	assert_eq!(out.stdout, "after\n");
}

#[test]
fn multiline_conditional() {
	let script = "\
if false
then
	echo no
else
	echo yes
fi
";
	assert_eq!(run(script).stdout, "yes\n");
}

#[test]
fn for_loop_binds_each_value() {
	let out = run("for x in 1 2 3; do echo $x; done\necho $x\n");
	assert_eq!(lines(&out.stdout), vec!["1", "2", "3", "3"]);
}

#[test]
fn parallel_for_loop() {
	let out = run("for x in 1 2 3; parallel do echo $x; done\necho last $x\n");
	let mut got = lines(&out.stdout);
	assert_eq!(got.pop(), Some("last 3"));
	got.sort();
	assert_eq!(got, vec!["1", "2", "3"]);
}

#[test]
fn assignment_keeps_first_token() {
	let out = run("words='a b c'\necho $words\nempty=\necho [$empty]\n");
	assert_eq!(lines(&out.stdout), vec!["a", "[ ]"]);
}

#[test]
fn undefined_variable_expands_to_nothing() {
	let out = run("echo one $pish_never_set two\n");
	assert_eq!(out.stdout, "one two\n");
}

#[test]
fn quotes_suppress_substitution() {
	let out = run("x=val\necho '$x' \"$x\" $x\n");
	assert_eq!(out.stdout, "$x $x val\n");
}

#[test]
fn exit_status_variable() {
	let out = run("false\necho $?\ntrue\necho $?\n");
	assert_eq!(lines(&out.stdout), vec!["1", "0"]);
}

#[test]
fn background_job_started_and_reaped_once() {
	let out = run("sleep 0.2 &\necho foreground\n");
	let started = lines(&out.stdout)
		.into_iter()
		.filter_map(|line| line.strip_prefix("Started background job: PID "))
		.collect::<Vec<_>>();
	assert_eq!(started.len(), 1);
	let pid = started[0];
	let reaped = format!("Child {} exited with status 0", pid);
	assert_eq!(out.stdout.matches(&reaped).count(), 1);
	let foreground = out.stdout.find("foreground\n").unwrap();
	assert!(foreground < out.stdout.find(&reaped).unwrap());
	// The drain runs after everything else
	assert!(out.stdout.trim_end().ends_with(&reaped));
}

#[test]
fn background_job_does_not_block() {
	let dir = std::env::temp_dir();
	let marker = dir.join(format!("pish-scenario-{}-marker", std::process::id()));
	let job = dir.join(format!("pish-scenario-{}-slow", std::process::id()));
	let _ = std::fs::remove_file(&marker);
	std::fs::write(&job, format!("sleep 1\ntouch {}\n", marker.display())).unwrap();
	let out = run(&format!("sh {} &\ntest -e {}\necho $?\n", job.display(), marker.display()));
	let out_lines = lines(&out.stdout);
	assert!(out_lines[0].starts_with("Started background job: PID "));
	// The job was still sleeping when the next statement ran
	assert_eq!(out_lines[1], "1");
	// and the drain waited for it to finish
	assert!(marker.exists());
	let _ = std::fs::remove_file(&marker);
}

#[test]
fn background_state_stays_in_the_child() {
	let out = run("x=before\nx=after &\necho $x\n");
	assert!(lines(&out.stdout).contains(&"before"));
}

#[test]
fn jobs_lists_background_pids() {
	let out = run("jobs\nsleep 0.2 &\njobs\n");
	let out_lines = lines(&out.stdout);
	assert_eq!(out_lines[0], "No background jobs.");
	let pid = out_lines[1].strip_prefix("Started background job: PID ").unwrap();
	assert_eq!(out_lines[2], format!("Background job: PID {}", pid));
}

#[test]
fn help_text() {
	let out = run("help\n");
	assert_eq!(out.stdout, "\
Built-in commands:
  exit: Exit the shell
  cd [dir]: Change the current directory to [dir]
  jobs: List background jobs
  help: Display this help message
");
}

#[test]
fn builtin_as_pipeline_stage() {
	let out = run("help | head -n 1\n");
	assert_eq!(out.stdout, "Built-in commands:\n");
}

#[test]
fn cd_changes_directory() {
	let out = run("cd /\npwd\n");
	assert_eq!(out.stdout, "/\n");
}

#[test]
fn cd_without_home_fails() {
	let mut cmd = pish();
	cmd.env_remove("HOME").current_dir("/");
	let out = run_with(cmd, "cd\necho $?\npwd\n");
	// EINVAL
	assert_eq!(lines(&out.stdout), vec!["22", "/"]);
	assert!(out.stderr.contains("HOME not set"));
}

#[test]
fn cd_uses_home_from_store() {
	let mut cmd = pish();
	cmd.env("HOME", "/");
	let out = run_with(cmd, "cd\npwd\n");
	assert_eq!(out.stdout, "/\n");
}

#[test]
fn exit_stops_the_shell() {
	let out = run("echo a\nexit\necho b\n");
	assert_eq!(out.stdout, "a\n");
	assert_eq!(out.code, Some(0));
}

#[test]
fn script_exit_code_is_last_status() {
	assert_eq!(run("true\nfalse\n").code, Some(1));
	assert_eq!(run("false\ntrue\n").code, Some(0));
}

#[test]
fn missing_command() {
	let out = run("pish-no-such-command\necho $?\n");
	assert!(out.stderr.contains("pish-no-such-command: command not found"));
	assert_eq!(out.stdout, "127\n");
}

#[test]
fn signaled_child_is_reported() {
	let path = std::env::temp_dir().join(format!("pish-scenario-{}-kill", std::process::id()));
	std::fs::write(&path, "kill -9 $$\n").unwrap();
	let out = run(&format!("sh {}\necho $?\n", path.display()));
	let out_lines = lines(&out.stdout);
	assert!(out_lines[0].starts_with("Child "));
	assert!(out_lines[0].ends_with(" terminated by signal 9"));
	assert_eq!(out_lines[1], "-1");
}

#[test]
fn parse_error_is_reported() {
	let out = run_with({
		let mut cmd = pish();
		cmd.args(["-c", "if true; then echo a"]);
		cmd
	}, "");
	assert!(out.stderr.contains("Parse error"));
	assert_eq!(out.stdout, "");
	assert_eq!(out.code, Some(2));
}

#[test]
fn command_string_mode() {
	let out = run_with({
		let mut cmd = pish();
		cmd.args(["-c", "x=5; echo $x"]);
		cmd
	}, "");
	assert_eq!(out.stdout, "5\n");
}

#[test]
fn script_file_mode() {
	let path = std::env::temp_dir().join(format!("pish-scenario-{}-script", std::process::id()));
	std::fs::write(&path, "# comment\nfor w in x y; do echo $w; done\n").unwrap();
	let mut cmd = pish();
	cmd.arg(&path);
	let out = run_with(cmd, "");
	assert_eq!(out.stdout, "x\ny\n");
}

#[test]
fn dump_ast_goes_to_stderr() {
	let mut cmd = pish();
	cmd.arg("--dump-ast");
	let out = run_with(cmd, "echo hi\n");
	assert_eq!(out.stdout, "hi\n");
	assert!(out.stderr.contains("\"echo\""));
}
