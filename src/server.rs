use std::sync::Arc;

use anyhow::Result;
use tokio::net::TcpListener;

use crate::cli::ServeArgs;

mod listener;

pub(crate) async fn serve(args: ServeArgs) -> Result<()> {
    let config = args.hook.try_into_config()?;
    tracing::info!(
        "Converting hooks from {} (commands: {:?} {:?}, merge ref grace: {:?})",
        config.base_url,
        config.commands.commands(),
        config.commands.case(),
        config.merge_ref_grace,
    );

    let service = listener::listen(Arc::new(config));
    let tcp_listener = TcpListener::bind(&args.addr).await?;
    tracing::info!("Listening on {}", args.addr);
    axum::serve(tcp_listener, service).await?;
    Ok(())
}
