use crate::config::toml_config::ServiceConfig;
use crate::domain::model::AccountKind;
use crate::utils::error::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "compte-soap")]
#[command(about = "Command-line client for the compte SOAP service")]
pub struct CliConfig {
    /// TOML configuration file; overrides the endpoint flags
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Read COMPTE_SOAP_* environment variables instead of the endpoint flags
    #[arg(long, conflicts_with = "config")]
    pub from_env: bool,

    #[arg(long, default_value = "http://10.0.2.2:8082/services/ws")]
    pub endpoint: String,

    #[arg(long, default_value = "http://ws.demo.example.com")]
    pub namespace: String,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List all accounts
    List {
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Create an account
    Create {
        #[arg(long)]
        balance: f64,
        #[arg(long, value_enum, default_value_t = KindArg::Checking)]
        kind: KindArg,
    },
    /// Delete an account by id
    Delete {
        #[arg(long)]
        id: i64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Checking,
    Savings,
}

impl From<KindArg> for AccountKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Checking => AccountKind::Checking,
            KindArg::Savings => AccountKind::Savings,
        }
    }
}

impl CliConfig {
    /// 依優先順序決定服務配置：--config 檔案、--from-env、命令列參數
    pub fn resolve_service_config(&self) -> Result<ServiceConfig> {
        let mut config = if let Some(path) = &self.config {
            ServiceConfig::from_file(path)?
        } else if self.from_env {
            ServiceConfig::from_env()?
        } else {
            ServiceConfig::new(self.endpoint.clone(), self.namespace.clone())
        };

        if self.timeout_seconds.is_some() {
            config.service.timeout_seconds = self.timeout_seconds;
        }

        Ok(config)
    }
}
