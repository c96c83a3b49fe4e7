use clap::Parser;
use compte_soap_client::config::cli::{Command, OutputFormat};
use compte_soap_client::utils::{logger, validation::Validate};
use compte_soap_client::{Account, CliConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match cli.resolve_service_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(2);
        }
    };

    // 初始化日誌
    logger::init_logger(cli.verbose || config.verbose(), cli.json_logs || config.json_logs());

    tracing::info!("Starting compte-soap CLI");
    tracing::debug!("Service config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(2);
    }

    let service = config.build_service();

    match cli.command {
        Command::List { format } => {
            let accounts = service.list_accounts().await;
            tracing::info!("📋 {} accounts", accounts.len());
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&accounts)?),
                OutputFormat::Table => print_table(&accounts),
            }
        }
        Command::Create { balance, kind } => {
            match service.create_account(balance, kind.into()).await {
                Ok(_) => {
                    tracing::info!("✅ Account created");
                    println!("✅ Account created");
                }
                Err(e) => {
                    tracing::error!(
                        "❌ createCompte failed: {} (Category: {:?})",
                        e,
                        e.category()
                    );
                    eprintln!("❌ {}", e);
                    eprintln!("💡 {}", e.recovery_suggestion());
                    std::process::exit(2);
                }
            }
        }
        Command::Delete { id } => {
            if service.delete_account(id).await {
                println!("✅ Account {} deleted", id);
            } else {
                eprintln!("❌ Account {} could not be deleted", id);
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn print_table(accounts: &[Account]) {
    println!("{:<8} {:>14} {:<20} {:<9}", "ID", "SOLDE", "DATE CREATION", "TYPE");
    for account in accounts {
        let id = account
            .id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<8} {:>14.2} {:<20} {:<9}",
            id,
            account.balance,
            account.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            account.kind.wire_name()
        );
    }
}
