use anyhow::{anyhow, Result};

use cli::Cli;
use command::CommandRunner;
use context::Context;
use env::Env;

pub mod cli;
pub mod command;
pub mod context;
pub mod env;
pub mod logging;

/// Prints the version of every program from the command line. Stops early once `ctx` is done, which happens on
/// termination signal, or on the first failure when `--fail-fast` is set.
pub fn run(cli: &Cli, env: &Env, ctx: &Context, runner: &impl CommandRunner) {
    for program in &cli.programs {
        if ctx.is_done() {
            break;
        }
        let program_ctx = ctx.with_timeout(cli.timeout());
        let version_fn = command::version_fn(runner, program, &cli.version_args);
        if cli.fail_fast {
            let mut failure = None;
            env.print_version(&program_ctx, program, |ctx| {
                let result = version_fn(ctx);
                if let Err(error) = &result {
                    failure = Some(anyhow!("{error:#}"));
                }
                result
            });
            if let Some(error) = failure {
                env.fatal_on_error(Err(
                    error.context(format!("could not retrieve version of {program}"))
                ));
            }
        } else {
            env.print_version(&program_ctx, program, version_fn);
        }
    }
}

/// Fails when the run was cancelled
pub fn ensure_not_cancelled(ctx: &Context) -> Result<()> {
    match ctx.err() {
        Some(error) => Err(error.into()),
        None => Ok(()),
    }
}
