use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tidemark_config::SiteConfig;
use tidemark_markdown::parse_document;
use tidemark_render::render_blocks;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tidemark", about = "Markdown static site generator", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the site into the output directory
    Build,
    /// Serve the site with on-the-fly rendering
    Serve {
        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },
    /// Render one markdown file to stdout
    Render { file: PathBuf },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = SiteConfig::load()
        .context("failed to load tidemark.toml")?
        .unwrap_or_default();

    match cli.command {
        Command::Build => {
            tidemark_site::build(&config).context("build failed")?;
        }
        Command::Serve { port } => {
            let mut config = config;
            if let Some(port) = port {
                config.port = port;
            }
            tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .context("failed to start async runtime")?
                .block_on(tidemark_server::serve(config))?;
        }
        Command::Render { file } => {
            let source = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let (_, blocks) = parse_document(&source);
            let html = render_blocks(&blocks).context("render failed")?;
            println!("{html}");
        }
    }

    Ok(())
}
