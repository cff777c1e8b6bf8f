//! ShareFile CLI - run single ShareFile API operations from the shell

use clap::{Parser, Subcommand};
use sharefile_cli::{render, CliConfig};
use sharefile_client::{ShareFileClient, UserCreateRequest};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "sharefile")]
#[command(about = "Command line client for the ShareFile REST API")]
#[command(version)]
struct Args {
    /// Auth endpoint base URL
    #[arg(long, default_value = "https://secure.sharefile.com", env = "SHAREFILE_HOSTNAME")]
    hostname: String,

    /// OAuth client id
    #[arg(long, env = "SHAREFILE_CLIENT_ID")]
    client_id: String,

    /// OAuth client secret
    #[arg(long, env = "SHAREFILE_CLIENT_SECRET", hide_env_values = true)]
    client_secret: String,

    /// Account username
    #[arg(short, long, env = "SHAREFILE_USERNAME")]
    username: String,

    /// Account password
    #[arg(short, long, env = "SHAREFILE_PASSWORD", hide_env_values = true)]
    password: String,

    /// Send API calls to this base URL instead of https://{subdomain}.sf-api.com
    #[arg(long, env = "SHAREFILE_API_BASE")]
    api_base: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value = "30", env = "SHAREFILE_TIMEOUT_SECS")]
    timeout_secs: u64,

    /// Enable debug logging
    #[arg(short, long, env = "SHAREFILE_DEBUG")]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the root item
    Root {
        /// Include children
        #[arg(long)]
        children: bool,
    },
    /// Show a single item
    Item { id: String },
    /// Show a folder with the id, name and creation date of its children
    Browse { id: String },
    /// Create a folder
    Mkdir {
        parent_id: String,
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Rename an item and set its description
    Update {
        id: String,
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Delete an item
    Delete { id: String },
    /// Download an item; folders arrive as zip archives
    Download { id: String, dest: PathBuf },
    /// Upload a local file into a folder
    Upload { path: PathBuf, folder_id: String },
    /// List client users
    Clients,
    /// Create a client user
    CreateClient {
        email: String,
        first_name: String,
        last_name: String,
        company: String,
        client_password: String,
        #[arg(long)]
        can_reset_password: bool,
        #[arg(long)]
        can_view_my_settings: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("sharefile_cli={0},sharefile_client={0}", log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = CliConfig {
        hostname: args.hostname,
        client_id: args.client_id,
        client_secret: args.client_secret,
        username: args.username,
        password: args.password,
        api_base: args.api_base,
        timeout_secs: args.timeout_secs,
    };

    let client = ShareFileClient::new(config.client_config())?;
    let session = client.authenticate(&config.credentials()).await?;
    tracing::debug!("Using API host {}", session.hostname());

    run(&client, args.command).await
}

async fn run(client: &ShareFileClient, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Root { children } => {
            let item = client.get_root(children).await?;
            render::print_lines(&render::item_lines(&item));
        }
        Command::Item { id } => {
            let item = client.get_item(&id).await?;
            render::print_lines(&render::item_lines(&item));
        }
        Command::Browse { id } => {
            let item = client.get_item_with_children(&id).await?;
            render::print_lines(&render::item_lines(&item));
        }
        Command::Mkdir {
            parent_id,
            name,
            description,
        } => {
            let item = client.create_folder(&parent_id, &name, &description).await?;
            println!("Created folder {}", item.id);
        }
        Command::Update {
            id,
            name,
            description,
        } => {
            let item = client.update_item(&id, &name, &description).await?;
            println!("Updated {} {}", item.id, item.name);
        }
        Command::Delete { id } => {
            client.delete_item(&id).await?;
            println!("Deleted {}", id);
        }
        Command::Download { id, dest } => {
            if dest.extension().map_or(true, |ext| ext != "zip") {
                tracing::debug!("Destination has no .zip suffix; folder downloads are zip archives");
            }
            let bytes = client.download_item(&id, &dest).await?;
            println!("Downloaded {} bytes to {}", bytes, dest.display());
        }
        Command::Upload { path, folder_id } => {
            let status = client.upload_file(&path, &folder_id).await?;
            println!("Upload finished with status {}", status);
        }
        Command::Clients => {
            let clients = client.list_clients().await?;
            render::print_lines(&render::client_lines(&clients));
        }
        Command::CreateClient {
            email,
            first_name,
            last_name,
            company,
            client_password,
            can_reset_password,
            can_view_my_settings,
        } => {
            let request = UserCreateRequest {
                email,
                first_name,
                last_name,
                company,
                client_password,
                can_reset_password,
                can_view_my_settings,
            };
            let user = client.create_client(&request).await?;
            println!("Created Client {}", user.id);
        }
    }
    Ok(())
}
