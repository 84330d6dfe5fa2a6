use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::api_client::ApiClient;
use crate::commands;
use crate::config::ClientConfig;
use crate::error::ClientError;

#[derive(Debug, Parser)]
#[command(name = "qna")]
#[command(about = "Read and answer the questions you received")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Api base url, overrides the config file
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Bearer token, overrides the config file
    #[arg(long, global = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show who is signed in
    Whoami,

    /// List questions you received, newest first
    Received {
        /// Keep loading pages until there are none left
        #[arg(long)]
        all: bool,
    },

    /// Show one question
    Show {
        question_id: String,
    },

    /// Answer a question
    Answer {
        question_id: String,
        body: String,
    },

    /// Ask another user a question
    Ask {
        receiver_uid: String,
        body: String,
    },
}

impl Cli {
    fn client_config(&self) -> Result<ClientConfig, ClientError> {
        let mut config = match &self.config {
            Some(path) => ClientConfig::load_from(path)?,
            None => ClientConfig::load()?,
        };

        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(token) = &self.token {
            config.token = Some(token.clone());
        }
        Ok(config)
    }

    pub fn api_client(&self) -> Result<ApiClient, ClientError> {
        let config = self.client_config()?;
        let mut client = ApiClient::with_timeout(&config.base_url, config.timeout())?;
        client.set_jwt_token(config.token);
        Ok(client)
    }

    pub async fn run(&self) -> Result<(), ClientError> {
        let client = self.api_client()?;
        tracing::debug!(base_url = client.base_url(), "Using api");

        let mut out = std::io::stdout().lock();
        match &self.command {
            Commands::Whoami => commands::whoami(&client, &mut out).await,
            Commands::Received { all } => commands::received(&client, *all, &mut out).await,
            Commands::Show { question_id } => {
                commands::show(&client, question_id, &mut out).await
            }
            Commands::Answer { question_id, body } => {
                commands::answer(&client, question_id, body, &mut out).await
            }
            Commands::Ask { receiver_uid, body } => {
                commands::ask(&client, receiver_uid, body, &mut out).await
            }
        }
    }
}
