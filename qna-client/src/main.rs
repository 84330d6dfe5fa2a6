use clap::Parser;
use qna_client::cli::Cli;
use qna_client::logging::init_logging;
use qna_client::ClientError;
use tracing::{debug, error};

#[tokio::main]
async fn main() -> Result<(), ClientError> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;
    debug!("CLI arguments: {:?}", cli);

    if let Err(e) = cli.run().await {
        error!("qna: {}", e);
        std::process::exit(e.exit_code());
    }
    Ok(())
}
