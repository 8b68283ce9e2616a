//! Letterlock CLI - send, open, and serve encrypted letters.
//!
//! `send` and `open` are the sender and recipient sides: all encryption
//! happens locally and only ciphertext crosses the network. `serve` runs
//! the storage-and-notification API.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;
use url::Url;

use letterlock_client::{open_letter, send_letter, Draft, LetterApi, ShareLink, ViewState};
use letterlock_notify::{LogNotifier, Notifier, ResendConfig, ResendMailer};
use letterlock_server::AppState;
use letterlock_store::{LetterStore, MemoryStore, SqliteStore, SupabaseConfig, SupabaseStore};

#[derive(Parser)]
#[command(name = "letterlock")]
#[command(about = "Letterlock - letters only the link holder can read")]
#[command(version)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the letter API server.
    Serve {
        /// Address to bind.
        #[arg(short, long, default_value = "127.0.0.1:8787")]
        bind: String,

        /// Public origin for recipient-facing letter URLs.
        /// Defaults to http://{bind}.
        #[arg(short, long)]
        origin: Option<Url>,

        /// Store letters in a local SQLite database at this path.
        #[arg(long)]
        sqlite: Option<PathBuf>,

        /// Store letters in memory (lost on exit).
        #[arg(long)]
        memory: bool,
    },

    /// Compose and send a letter; prints the share link.
    Send {
        /// Server origin.
        #[arg(short, long, default_value = "http://127.0.0.1:8787")]
        server: Url,

        /// Recipient email address.
        #[arg(long)]
        to: String,

        /// Recipient name.
        #[arg(long)]
        name: String,

        /// Your name (defaults to Anonymous).
        #[arg(long)]
        from_name: Option<String>,

        /// Your return address, enabling a reply.
        #[arg(long)]
        return_address: Option<String>,

        /// The letter body.
        #[arg(short, long, conflicts_with = "file")]
        message: Option<String>,

        /// Read the letter body from a file.
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Open a letter from a share link.
    Open {
        /// The full share link, including the key fragment.
        #[arg(short, long)]
        link: String,

        /// Server origin (defaults to the link's origin).
        #[arg(short, long)]
        server: Option<Url>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Serve {
            bind,
            origin,
            sqlite,
            memory,
        } => cmd_serve(&bind, origin, sqlite, memory).await,

        Commands::Send {
            server,
            to,
            name,
            from_name,
            return_address,
            message,
            file,
        } => cmd_send(server, to, name, from_name, return_address, message, file).await,

        Commands::Open { link, server } => cmd_open(&link, server).await,
    }
}

/// Pick a letter store from flags and environment.
fn select_store(sqlite: Option<PathBuf>, memory: bool) -> Result<Arc<dyn LetterStore>> {
    if let Some(path) = sqlite {
        let store = SqliteStore::open(&path)
            .with_context(|| format!("Failed to open database at {}", path.display()))?;
        return Ok(Arc::new(store));
    }

    if memory {
        return Ok(Arc::new(MemoryStore::new()));
    }

    match SupabaseConfig::from_env() {
        Ok(config) => Ok(Arc::new(
            SupabaseStore::new(config).context("Failed to create Supabase client")?,
        )),
        Err(_) => {
            warn!("SUPABASE_URL not configured; storing letters in memory");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

/// Pick a notifier from the environment.
fn select_notifier() -> Result<Arc<dyn Notifier>> {
    match ResendConfig::from_env() {
        Ok(config) => Ok(Arc::new(
            ResendMailer::new(config).context("Failed to create mailer")?,
        )),
        Err(_) => {
            warn!("RESEND_API_KEY not configured; logging notifications instead");
            Ok(Arc::new(LogNotifier::new()))
        }
    }
}

/// Run the API server.
async fn cmd_serve(
    bind: &str,
    origin: Option<Url>,
    sqlite: Option<PathBuf>,
    memory: bool,
) -> Result<()> {
    let store = select_store(sqlite, memory)?;
    let notifier = select_notifier()?;

    let origin = match origin {
        Some(origin) => origin,
        None => Url::parse(&format!("http://{}", bind)).context("Invalid bind address")?,
    };

    info!(%origin, store = store.name(), notifier = notifier.name(), "Starting server");

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind {}", bind))?;

    letterlock_server::serve(listener, AppState::new(store, notifier, origin))
        .await
        .context("Server failed")?;

    Ok(())
}

/// Compose, encrypt, and submit a letter.
async fn cmd_send(
    server: Url,
    to: String,
    name: String,
    from_name: Option<String>,
    return_address: Option<String>,
    message: Option<String>,
    file: Option<PathBuf>,
) -> Result<()> {
    let body = match (message, file) {
        (Some(message), _) => message,
        (None, Some(path)) => tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?,
        (None, None) => anyhow::bail!("Provide the letter body with --message or --file"),
    };

    let api = LetterApi::new(server).context("Failed to create API client")?;
    let draft = Draft {
        body,
        recipient_email: to,
        recipient_name: name,
        sender_name: from_name.unwrap_or_default(),
        return_address: return_address.unwrap_or_default(),
    };

    let link = send_letter(&api, draft)
        .await
        .context("Failed to send letter")?;

    println!("Letter sent.");
    println!();
    println!("Share link (the part after # is the only key; keep it intact):");
    println!("  {}", link);

    Ok(())
}

/// Fetch and decrypt a letter from a share link.
async fn cmd_open(link: &str, server: Option<Url>) -> Result<()> {
    let link = ShareLink::parse(link).context("Invalid share link")?;

    let base = match server {
        Some(server) => server,
        None => Url::parse(&link.as_url().origin().ascii_serialization())
            .context("Share link has no usable origin")?,
    };

    let api = LetterApi::new(base).context("Failed to create API client")?;
    let letter = api
        .fetch(link.id())
        .await
        .context("Failed to fetch letter")?;

    match open_letter(&letter, link.key_fragment()) {
        ViewState::Opened(opened) => {
            println!("{}", opened.sent_on.format("%B %-d, %Y"));
            println!();
            println!("dear {},", opened.recipient_name);
            println!();
            println!("{}", opened.body);
            println!();
            println!("keep shining,");
            if let Some(sender) = opened.sender_name {
                println!("{}", sender);
            }
            if let Some(reply) = opened.reply_path {
                println!();
                println!("send back a letter: {}", reply);
            }
        }
        ViewState::Unopenable => {
            println!("This letter cannot be opened.");
            println!("The link may be incomplete or damaged.");
        }
    }

    Ok(())
}
