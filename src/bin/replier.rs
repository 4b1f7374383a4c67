use clap::Parser;
use multienv::replier::{self, ReplierIdentity};
use multienv::utils::logger;

#[derive(Parser)]
#[command(name = "replier")]
#[command(about = "Answer every request with this container's service and branch")]
struct Args {
    /// Port to listen on; nothing is served when empty
    #[arg(long, env = "REPLIER_PORT", default_value = "")]
    port: String,

    /// Service name reported in the reply
    #[arg(long, env = "REPLIER_NAME", default_value = "")]
    name: String,

    /// Branch reported in the reply
    #[arg(long, env = "REPLIER_BRANCH", default_value = "")]
    branch: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logger::init_service_logger();

    let identity = ReplierIdentity::new(&args.name, &args.branch, &args.port);
    if let Err(e) = replier::serve(identity).await {
        tracing::error!("❌ Replier stopped: {}", e);
        return Err(e.into());
    }

    Ok(())
}
