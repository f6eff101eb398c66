//! Retrieves program versions by running `<program> --version`

use std::{
    io::{self, Read},
    process::{Command, Stdio},
    sync::OnceLock,
    thread::{self, JoinHandle},
    time::Duration,
};

use anyhow::{anyhow, bail, Context as _, Result};
use regex::Regex;

use crate::context::Context;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Isolates [std::process::Command] for testing
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner {
    /// Runs the program to completion and returns its output
    fn run(&self, ctx: &Context, program: &str, args: &[String]) -> Result<String>;
}

pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&self, ctx: &Context, program: &str, args: &[String]) -> Result<String> {
        if let Some(error) = ctx.err() {
            bail!(error)
        }
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("running {program}"))?;
        let stdout = spawn_reader(child.stdout.take());
        let stderr = spawn_reader(child.stderr.take());
        let status = loop {
            if let Some(status) = child.try_wait()? {
                break status;
            }
            if let Some(error) = ctx.err() {
                /* The child may have exited in the meantime. Readers are left detached, a grandchild could keep
                 * the pipes open. */
                child.kill().unwrap_or_default();
                child.wait()?;
                bail!(error)
            }
            thread::sleep(POLL_INTERVAL);
        };
        let stdout = join_reader(stdout, program)?;
        let stderr = join_reader(stderr, program)?;
        if !status.success() {
            let message = if stderr.trim().is_empty() {
                stdout.trim()
            } else {
                stderr.trim()
            };
            bail!("{program} exited with {status}: {message}")
        }
        Ok(if stdout.trim().is_empty() {
            stderr
        } else {
            stdout
        })
    }
}

/// Drains the pipe while the child runs, so it never blocks on a full pipe
fn spawn_reader<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<io::Result<String>> {
    thread::spawn(move || {
        let mut output = String::new();
        if let Some(mut pipe) = pipe {
            pipe.read_to_string(&mut output)?;
        }
        Ok(output)
    })
}

fn join_reader(reader: JoinHandle<io::Result<String>>, program: &str) -> Result<String> {
    reader
        .join()
        .map_err(|_| anyhow!("reading output of {program} panicked"))?
        .with_context(|| format!("reading output of {program}"))
}

/// Runs the program and extracts the version from the first non-empty line of its output
pub fn version(
    ctx: &Context,
    runner: &impl CommandRunner,
    program: &str,
    args: &[String],
) -> Result<String> {
    let output = runner.run(ctx, program, args)?;
    let line = output
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .ok_or_else(|| anyhow!("no version output from {program}"))?;
    Ok(extract_version(line).unwrap_or(line).to_string())
}

/// Adapts [version] to the closure accepted by [crate::env::Env::print_version]
pub fn version_fn<'a, R: CommandRunner>(
    runner: &'a R,
    program: &'a str,
    args: &'a [String],
) -> impl FnOnce(&Context) -> Result<String> + 'a {
    move |ctx| version(ctx, runner, program, args)
}

fn extract_version(line: &str) -> Option<&str> {
    static VERSION: OnceLock<Regex> = OnceLock::new();
    VERSION
        .get_or_init(|| {
            Regex::new(r"\d+(\.\d+)+([-+~][0-9A-Za-z.\-+~]*)?").expect("pattern should be valid")
        })
        .find(line)
        .map(|m| m.as_str())
}
