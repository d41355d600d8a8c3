//! A command fetching web pages through a shared web client.

use clap::Parser;
use colored::Colorize;
use core::error::Error;
use futures::future::join_all;
use log::LevelFilter;
use std::{path::PathBuf, process::exit};
use tabled::{
    Table,
    settings::{Color, Style, themes::Colorization},
};
use tokio::io::{AsyncWriteExt, stdout};
use webclient::{Settings, WebClient, read_settings};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Arguments {
    /// URLs to fetch.
    #[arg(required(true))]
    urls: Vec<String>,
    /// Reads settings from a TOML file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Adds information about an agent on whose behalf URLs are fetched.
    #[arg(long)]
    agent_info: Vec<String>,
    /// Logs requests and responses in full.
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("{}", error.to_string().red());
        exit(1)
    }
}

async fn run() -> Result<(), Box<dyn Error>> {
    let Arguments {
        urls,
        config,
        agent_info,
        verbose,
    } = Arguments::parse();

    let mut settings = if let Some(path) = &config {
        read_settings(path).await?
    } else {
        Settings::default()
    };

    if verbose {
        settings = settings
            .set_logger_level(LevelFilter::Debug)
            .set_debug(true);
    }

    env_logger::Builder::new()
        .filter_level(settings.logger_level())
        .parse_default_env()
        .init();

    let client = WebClient::new(settings);
    let agent_info = agent_info.iter().map(String::as_str).collect::<Vec<_>>();
    let results = join_all(
        urls.iter()
            .map(|url| client.fetch(url, Some(agent_info.as_slice()))),
    )
    .await;

    let mut output = stdout();
    let mut rows = vec![vec![
        "url".to_owned(),
        "status".to_owned(),
        "effective url".to_owned(),
    ]];
    let mut failed = false;

    for (url, result) in urls.iter().zip(&results) {
        let (status, effective_url) = match result {
            Ok(response) => {
                match WebClient::successful_text(response) {
                    Ok(text) => {
                        output.write_all(text.as_bytes()).await?;
                        output.write_all(b"\n").await?;
                    }
                    Err(error) => {
                        failed = true;
                        eprintln!("{}\t{error}", url.red());
                    }
                }

                (
                    response.status().to_string(),
                    WebClient::effective_url(url, response).to_owned(),
                )
            }
            Err(error) => {
                failed = true;
                eprintln!("{}\t{error}", url.red());

                ("ERROR".to_owned(), "-".to_owned())
            }
        };

        rows.push(vec![url.clone(), status, effective_url]);
    }

    output.flush().await?;

    eprintln!();
    eprintln!(
        "{}",
        Table::from_iter(rows)
            .with(Style::markdown())
            .with(Colorization::columns([
                Color::FG_WHITE,
                Color::FG_YELLOW,
                Color::FG_WHITE,
            ])),
    );

    if failed {
        Err("some requests failed".into())
    } else {
        Ok(())
    }
}
