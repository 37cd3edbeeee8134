use eyre::Report;
use twilight_gateway::{CloseFrame, Shard};

use super::Context;

impl Context {
    #[cold]
    pub async fn shutdown(shard: &mut Shard) {
        match shard.close(CloseFrame::NORMAL).await {
            Ok(_) => info!("Closed gateway connection"),
            Err(err) => {
                let report = Report::new(err).wrap_err("failed to close gateway connection");
                warn!("{report:?}");
            }
        }
    }
}
