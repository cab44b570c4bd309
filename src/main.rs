//! CLI entry point for postpage

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use postpage::server::ServeOptions;
use postpage::Site;

#[derive(Parser)]
#[command(name = "postpage")]
#[command(author = "Yukang Chen")]
#[command(version)]
#[command(about = "A static blog generator for markdown posts", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new post
    New {
        /// Title of the new post
        title: String,
    },

    /// Build the static site
    #[command(alias = "b")]
    Build {
        /// Watch for file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Build and serve the site locally
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,

        /// Serve the current output without watching or live reload
        #[arg(long)]
        r#static: bool,
    },

    /// Remove the public folder
    Clean,

    /// List site information
    List {
        /// Type of content to list (post, category)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        "postpage=debug,info"
    } else {
        "postpage=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::New { title } => {
            let site = Site::new(&base_dir)?;
            let path = site.new_post(&title)?;
            println!("Created: {}", path.display());
        }

        Commands::Build { watch } => {
            let site = Site::new(&base_dir)?;
            tracing::info!("Building site...");
            site.build()?;
            println!("Built successfully!");

            if watch {
                postpage::commands::build::watch(&site).await?;
            }
        }

        Commands::Serve {
            port,
            ip,
            open,
            r#static,
        } => {
            let site = Site::new(&base_dir)?;

            tracing::info!("Building site...");
            site.build()?;

            let options = ServeOptions {
                ip,
                port,
                watch: !r#static,
                open,
            };
            postpage::server::start(&site, &options).await?;
        }

        Commands::Clean => {
            let site = Site::new(&base_dir)?;
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List { r#type } => {
            let site = Site::new(&base_dir)?;
            postpage::commands::list::run(&site, &r#type)?;
        }

        Commands::Version => {
            println!("postpage version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
