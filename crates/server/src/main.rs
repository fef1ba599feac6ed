//! LearnPath - progress ledger server and learning guide CLI.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use learnpath_core::Identifier;
use learnpath_guide::{ChatCompletionClient, Guide, GuideConfig};
use learnpath_progress::{LedgerConfig, ProgressService, SharedLedger};
use learnpath_server::config::DEFAULT_CALLER;
use learnpath_server::protocol::MCP_VERSION;
use learnpath_server::{LedgerServer, ServerConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "learnpath")]
#[command(about = "LearnPath - course progress ledger with milestone bonuses", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Ledger configuration file (JSON); built-in catalog if omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Caller identifier for connections that do not announce one
    #[arg(long, global = true, default_value = DEFAULT_CALLER)]
    caller: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve tools on stdin/stdout
    Stdio,

    /// Serve tools on a Unix socket
    Socket {
        /// Socket path
        path: PathBuf,
    },

    /// List available tools
    ListTools,

    /// Print the course catalog
    Courses,

    /// Print server info
    Info,

    /// Ask the learning guide (needs GROQ_API_KEY)
    Guide {
        #[command(subcommand)]
        flow: GuideFlow,
    },
}

#[derive(Subcommand)]
enum GuideFlow {
    /// Open-ended career guidance
    Ask {
        /// Message to the guide
        message: String,
    },

    /// Generate a skill-assessment quiz
    Quiz {
        /// Field of interest
        aspiration: String,
    },

    /// Generate a learning path from quiz answers
    Path {
        /// Field of interest
        aspiration: String,

        /// Quiz answers as JSON (plain text is sent as a string)
        #[arg(long)]
        answers: String,
    },

    /// Compare a level against the next milestone
    Compare {
        /// Current level, e.g. Beginner
        level: String,

        /// Field of interest
        aspiration: String,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run_guide(flow: GuideFlow) -> Result<()> {
    let config = GuideConfig::from_env();
    let client = ChatCompletionClient::new(config.clone()).context("Failed to build HTTP client")?;
    let guide = Guide::new(client, config);

    match flow {
        GuideFlow::Ask { message } => {
            let text = guide.aspiration_prompt(&serde_json::json!({ "message": message })).await?;
            println!("{}", text);
        }
        GuideFlow::Quiz { aspiration } => {
            print_json(&guide.generate_quiz(&aspiration).await?)?;
        }
        GuideFlow::Path { aspiration, answers } => {
            let answers = serde_json::from_str(&answers)
                .unwrap_or(serde_json::Value::String(answers));
            print_json(&guide.generate_learning_path(&aspiration, &answers).await?)?;
        }
        GuideFlow::Compare { level, aspiration } => {
            print_json(&guide.compare_progress(&level, &aspiration).await?)?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let command = match cli.command {
        Commands::Guide { flow } => return run_guide(flow).await,
        other => other,
    };

    let ledger_config = LedgerConfig::load_or_default(cli.config.as_deref())
        .context("Failed to load ledger configuration")?;
    let service = ProgressService::new(ledger_config).context("Invalid ledger configuration")?;

    let server = LedgerServer::new(
        ServerConfig {
            default_caller: Identifier::new(cli.caller),
            ..ServerConfig::default()
        },
        SharedLedger::new(service),
    );

    match command {
        Commands::Stdio => {
            info!("Starting LearnPath server (stdio mode)");
            server.start_with_stdio().await?;
        }

        Commands::Socket { path } => {
            info!("Starting LearnPath server (socket mode)");
            server.start_with_socket(&path).await?;
        }

        Commands::ListTools => {
            println!("Available tools ({}):", server.tools().len());
            for tool in server.tools() {
                println!("  - {}: {}", tool.name, tool.description);
            }
        }

        Commands::Courses => {
            let courses = server.ledger().read(|s| s.list_courses().to_vec()).await;
            print_json(&courses)?;
        }

        Commands::Info => {
            println!("LearnPath server v{}", server.config().version);
            println!("Protocol: MCP {}", MCP_VERSION);
            println!("Transport: stdio / Unix socket");
            println!("Default caller: {}", server.config().default_caller);
            println!("Tools: {}", server.tools().len());
        }

        // Handled before the ledger is built
        Commands::Guide { .. } => {}
    }

    Ok(())
}
