use std::{process, sync::Arc};

use anyhow::Result;

use envkit::{
    cli::{Cli, Parser},
    command::ProcessRunner,
    context::Context,
    env::Env,
    logging::{self, LogLogger},
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_level.into())?;

    let ctx = Context::background();
    let env = {
        let ctx = ctx.clone();
        Env::new(Arc::new(LogLogger::new()), move || ctx.cancel())
    };
    let signal_ctx = ctx.clone();
    env.fatal_on_error(ctrlc::set_handler(move || {
        log::info!("Termination requested");
        signal_ctx.cancel()
    }));

    envkit::run(&cli, &env, &ctx, &ProcessRunner);

    if envkit::ensure_not_cancelled(&ctx).is_err() {
        process::exit(1);
    }
    Ok(())
}
