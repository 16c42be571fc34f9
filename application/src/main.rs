use std::{io, process::ExitCode, sync::OnceLock};

use application::{cli, AsError, Args, Config, Context};
use tracing as log;
use tracing_subscriber::{
    filter::filter_fn,
    layer::{Layer as _, SubscriberExt as _},
    util::SubscriberInitExt as _,
};

static LOG_LEVEL: OnceLock<log::Level> = OnceLock::new();

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Standard output is reserved for the command output.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_writer(io::stderr)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || LOG_LEVEL.get().copied().unwrap_or(log::Level::WARN)
                            >= *meta.level()
                })),
        )
        .init();

    let args = match Args::parse() {
        Ok(args) => args,
        Err(e) => e.exit(),
    };

    match start(args).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(e.kind.exit_code())
        }
    }
}

async fn start(args: Args) -> Result<String, application::Error> {
    let Args { config, command } = args;

    let conf = Config::new(config).map_err(|e| {
        log::error!("failed to load config: {e}");
        application::Error::internal(&e)
    })?;
    _ = LOG_LEVEL.set(conf.log.level.into());

    let mut ctx =
        Context::load(&conf.session.path).map_err(AsError::into_error)?;

    cli::execute(command, &mut ctx, &conf).await
}
