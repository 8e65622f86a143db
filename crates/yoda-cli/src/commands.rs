//! CLI command definitions and handlers

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fmt::Write as _;
use std::path::PathBuf;
use yoda_api::{shutdown_signal, MqaServer, ServerConfig};
use yoda_mqa::{MqaConfig, MqaEngine, MqaResponse, RuleRegistry, MAX_SCORE};

/// Main CLI structure
#[derive(Parser)]
#[command(name = "yoda")]
#[command(about = "Metadata Quality Assessment for DCAT-AP documents")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// EDP validation endpoint (overrides YODA_VALIDATOR_URL)
    #[arg(long, global = true)]
    pub validator_url: Option<String>,

    /// Directory holding the format vocabularies (overrides YODA_VOCABULARY_DIR)
    #[arg(long, global = true)]
    pub vocabulary_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Environment configuration with command-line overrides applied
    pub fn mqa_config(&self) -> MqaConfig {
        let mut config = MqaConfig::from_env();
        if let Some(url) = &self.validator_url {
            config = config.with_validator_url(url.clone());
        }
        if let Some(dir) = &self.vocabulary_dir {
            config = config.with_vocabulary_dir(dir);
        }
        config
    }
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Start the API server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "5000")]
        port: u16,
    },

    /// Score a local RDF/XML metadata document
    Evaluate {
        /// RDF/XML document
        #[arg(short, long)]
        file: PathBuf,

        /// Output format
        #[arg(short = 'o', long, default_value = "text")]
        format: OutputFormat,
    },

    /// Show version and effective configuration
    Info,
}

/// Output format options
#[derive(Clone, Debug, PartialEq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    JsonPretty,
}

/// Command execution result
pub struct CommandResult {
    pub success: bool,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Execute CLI commands
pub struct CommandExecutor {
    config: MqaConfig,
}

impl CommandExecutor {
    pub fn new(config: MqaConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MqaConfig {
        &self.config
    }

    /// Execute a CLI command
    pub async fn execute(&self, command: Commands) -> Result<CommandResult> {
        match command {
            Commands::Serve { host, port } => self.execute_serve(host, port).await,
            Commands::Evaluate { file, format } => self.execute_evaluate(file, format).await,
            Commands::Info => self.execute_info(),
        }
    }

    async fn execute_serve(&self, host: String, port: u16) -> Result<CommandResult> {
        let engine = MqaEngine::from_config(&self.config).context("failed to initialise MQA engine")?;
        let config = ServerConfig::default().with_host(host.clone()).with_port(port);

        println!("Starting server on {}:{}", host, port);
        println!("Press Ctrl+C to stop");

        MqaServer::with_config(config, engine)
            .run_with_shutdown(shutdown_signal())
            .await?;

        Ok(CommandResult {
            success: true,
            message: "Server stopped".to_string(),
            data: None,
        })
    }

    async fn execute_evaluate(&self, file: PathBuf, format: OutputFormat) -> Result<CommandResult> {
        let document = std::fs::read_to_string(&file)
            .with_context(|| format!("failed to read {}", file.display()))?;
        let engine = MqaEngine::from_config(&self.config).context("failed to initialise MQA engine")?;

        let response = engine.evaluate(&document).await?;

        let output = match format {
            OutputFormat::Text => render_text(&response),
            OutputFormat::Json => serde_json::to_string(&response)?,
            OutputFormat::JsonPretty => serde_json::to_string_pretty(&response)?,
        };
        println!("{}", output);

        Ok(CommandResult {
            success: true,
            message: format!("{} scored {}", file.display(), response.summary.score),
            data: Some(serde_json::to_value(&response)?),
        })
    }

    fn execute_info(&self) -> Result<CommandResult> {
        let info = serde_json::json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "description": env!("CARGO_PKG_DESCRIPTION"),
            "validator_url": self.config.validator_url,
            "machine_readable_vocabulary": self.config.machine_readable_vocabulary,
            "non_proprietary_vocabulary": self.config.non_proprietary_vocabulary,
            "rules": RuleRegistry::dcat_ap().rule_count(),
            "max_score": MAX_SCORE,
        });

        println!("{}", serde_json::to_string_pretty(&info)?);

        Ok(CommandResult {
            success: true,
            message: "System information".to_string(),
            data: Some(info),
        })
    }
}

/// One line per metric, then the others bucket and the summary
pub fn render_text(response: &MqaResponse) -> String {
    let mut out = String::new();

    for (metric, report) in response.values.reports() {
        let _ = writeln!(out, "{:<17} {:>3}  {}", metric.as_str(), report.weight, report.report);
    }

    let others = response.values.others();
    if !others.is_empty() {
        let _ = writeln!(out, "{:<17} {:>3}  {}", "others", others.weight, others.values.join(", "));
    }

    let _ = write!(
        out,
        "Score: {}/{} ({:?})",
        response.summary.score, MAX_SCORE, response.summary.rate
    );
    out
}
