#[macro_use]
extern crate tracing;

#[macro_use]
extern crate eyre;

mod commands;
mod core;
mod custom_client;
mod server;
mod util;

use std::{env, sync::Arc};

use eyre::{Result, WrapErr};
use tokio::{runtime::Builder as RuntimeBuilder, signal, sync::oneshot};

use crate::{
    core::{event_loop, logging, BotConfig, BotMode, Context},
    server::run_server,
};

fn main() {
    let runtime = RuntimeBuilder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Could not build runtime");

    let dotenv_res = dotenv::dotenv();

    let _log_worker_guard = logging::init();

    if let Err(err) = dotenv_res {
        warn!("No .env file loaded: {err}");
    }

    if let Err(source) = runtime.block_on(async_main()) {
        error!(?source, "Critical error in main");
    }
}

async fn async_main() -> Result<()> {
    BotConfig::init().wrap_err("failed to initialize config")?;

    let ctx = Context::init()
        .await
        .wrap_err("failed to create context")?;

    let ctx = Arc::new(ctx);

    if env::args().skip(1).any(|arg| arg == "--update") {
        let cmds = ctx.set_commands().await?;
        info!("Registered {} slash commands", cmds.len());

        return Ok(());
    }

    match BotConfig::get().mode {
        BotMode::Gateway => run_gateway(ctx).await,
        BotMode::Server => serve(ctx).await,
    }
}

async fn run_gateway(ctx: Arc<Context>) -> Result<()> {
    let mut shard = ctx.shard();

    tokio::select! {
        _ = event_loop(Arc::clone(&ctx), &mut shard) => error!("Event loop ended"),
        res = signal::ctrl_c() => match res {
            Ok(_) => info!("Received Ctrl+C"),
            Err(err) => error!(?err, "Failed to await Ctrl+C"),
        }
    }

    Context::shutdown(&mut shard).await;

    Ok(())
}

async fn serve(ctx: Arc<Context>) -> Result<()> {
    let set_commands_ctx = Arc::clone(&ctx);

    tokio::spawn(async move {
        match set_commands_ctx.set_commands().await {
            Ok(cmds) => info!("Registered {} slash commands", cmds.len()),
            Err(err) => error!("{:?}", err.wrap_err("failed to register slash commands")),
        }
    });

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let mut server = tokio::spawn(run_server(ctx, shutdown_rx));

    tokio::select! {
        res = &mut server => {
            return match res {
                Ok(res) => res.wrap_err("server stopped"),
                Err(err) => Err(eyre::Report::new(err).wrap_err("server task panicked")),
            };
        }
        res = signal::ctrl_c() => match res {
            Ok(_) => info!("Received Ctrl+C"),
            Err(err) => error!(?err, "Failed to await Ctrl+C"),
        }
    }

    if shutdown_tx.send(()).is_err() {
        error!("Failed to send shutdown message to server");
    }

    match server.await {
        Ok(res) => res,
        Err(err) => Err(eyre::Report::new(err).wrap_err("server task panicked")),
    }
}
