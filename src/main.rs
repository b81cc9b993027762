use anyhow::Result;
use apireq::commands::{self, Options, RequestOptions, TokenAction};
use apireq::config::{DEFAULT_BASE_PATH, DEFAULT_ORIGIN, DEFAULT_TOKEN_KEY};
use apireq::host::ConnectivityMode;
use apireq::http::Method;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// apireq - API request client
///
/// Send requests to a backend under its API base path and apply the
/// application's status handling: 401 redirects to login, 403 clears the
/// stored token and redirects after a short delay, 404 shows a notice.
///
/// Examples:
///   apireq get /user                        # GET <origin>/api/user
///   apireq post /user --data '{"a":1}'      # POST a JSON body
///   apireq token set "Bearer abc"           # Store a token for --attach-token
#[derive(Parser, Debug)]
#[command(author, version = env!("APIREQ_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Backend origin (scheme, host and port)
    #[arg(long, env = "APIREQ_ORIGIN", default_value = DEFAULT_ORIGIN, value_name = "URL", global = true)]
    origin: String,

    /// Path prefix for every request
    #[arg(long, default_value = DEFAULT_BASE_PATH, value_name = "PATH", global = true)]
    base_path: String,

    /// Storage file holding the token (defaults to the config directory)
    #[arg(long, env = "APIREQ_STORAGE", value_name = "FILE", global = true)]
    storage: Option<PathBuf>,

    /// Send the stored token as the Authorization header
    #[arg(long, global = true)]
    attach_token: bool,

    /// Request timeout in milliseconds (no timeout by default)
    #[arg(long, value_name = "MS", global = true)]
    timeout_ms: Option<u64>,

    /// Route the request is issued from, used for login redirects
    #[arg(long, default_value = "/", value_name = "PATH", global = true)]
    current_path: String,

    /// Treat every 2xx status as success instead of only 200
    #[arg(long = "accept-2xx", global = true)]
    accept_2xx: bool,

    /// How to decide whether the network is reachable
    #[arg(long, value_enum, default_value_t = ConnectivityMode::Auto, global = true)]
    connectivity: ConnectivityMode,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Send a GET request
    Get(RequestArgs),
    /// Send a POST request
    Post(RequestArgs),
    /// Send a PUT request
    Put(RequestArgs),
    /// Send a PATCH request
    Patch(RequestArgs),
    /// Send a DELETE request
    Delete(RequestArgs),
    /// Manage the stored token
    #[command(subcommand)]
    Token(TokenCommand),
}

#[derive(clap::Args, Debug)]
struct RequestArgs {
    /// Path relative to the base path, e.g. /user
    #[arg(value_name = "PATH")]
    path: String,

    /// Query parameter, repeatable
    #[arg(long = "query", short = 'q', value_name = "KEY=VALUE", value_parser = parse_key_val)]
    query: Vec<(String, String)>,

    /// JSON request body
    #[arg(long, short = 'd', value_name = "JSON")]
    data: Option<String>,
}

#[derive(clap::Subcommand, Debug)]
enum TokenCommand {
    /// Store a token
    Set {
        #[arg(value_name = "TOKEN")]
        value: String,
    },
    /// Print the stored token
    Show,
    /// Remove the stored token
    Clear,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{}`", s))?;
    if key.is_empty() {
        return Err(format!("empty key in `{}`", s));
    }
    Ok((key.to_string(), value.to_string()))
}

impl Cli {
    fn options(&self) -> Options {
        Options {
            origin: self.origin.clone(),
            base_path: self.base_path.clone(),
            storage: self.storage.clone(),
            attach_token: self.attach_token,
            timeout: self.timeout_ms.map(Duration::from_millis),
            current_path: self.current_path.clone(),
            accept_2xx: self.accept_2xx,
            connectivity: self.connectivity,
        }
    }
}

fn request_options(method: Method, args: RequestArgs) -> RequestOptions {
    RequestOptions {
        method,
        path: args.path,
        query: args.query,
        data: args.data,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let options = cli.options();

    let (method, args) = match cli.command {
        Commands::Get(args) => (Method::Get, args),
        Commands::Post(args) => (Method::Post, args),
        Commands::Put(args) => (Method::Put, args),
        Commands::Patch(args) => (Method::Patch, args),
        Commands::Delete(args) => (Method::Delete, args),
        Commands::Token(command) => {
            let store = commands::build_token_store(&options)?;
            let action = match command {
                TokenCommand::Set { value } => TokenAction::Set(value),
                TokenCommand::Show => TokenAction::Show,
                TokenCommand::Clear => TokenAction::Clear,
            };
            return commands::token(&store, DEFAULT_TOKEN_KEY, action);
        }
    };

    let session = commands::build_session(&options)?;
    commands::request(&session, request_options(method, args)).await
}
