use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use service_table_storage::app::logging::{self, LogFormat};
use service_table_storage::app::AppContext;
use service_table_storage::domain::{
    ConnectionString, TableServiceClient, TableStorage, TableStorageError,
};
use service_table_storage::no_sql::SampleEntity;
use service_table_storage::services::{run_sample, HeartbeatService};
use service_table_storage::settings_model::SettingsModel;
use service_table_storage::storage::MemoryTableServiceClient;

#[derive(Parser)]
#[command(name = "service-table-storage", about = "Table storage console host")]
struct Cli {
    /// Path to the YAML settings file.
    #[arg(long, default_value = "settings.yaml", env = "SETTINGS_PATH")]
    settings: PathBuf,

    #[arg(long, value_enum, default_value_t = LogFormat::Text, env = "LOG_FORMAT")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Clone)]
enum Command {
    /// Insert a sample entity and read it back.
    Sample {
        #[arg(long)]
        table: Option<String>,
    },
    /// Insert one entity.
    Add {
        #[arg(long)]
        table: String,
        #[arg(long)]
        partition_key: String,
        #[arg(long)]
        row_key: String,
        #[arg(long)]
        data: String,
    },
    /// Fetch one entity by key.
    Get {
        #[arg(long)]
        table: String,
        #[arg(long)]
        partition_key: String,
        #[arg(long)]
        row_key: String,
    },
    /// Run the heartbeat background service until Ctrl+C.
    Heartbeat {
        #[arg(long)]
        interval_secs: Option<u64>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.log_format);

    tracing::info!(settings = %cli.settings.display(), "Loading settings");
    let settings = match SettingsModel::load(&cli.settings) {
        Ok(settings) => settings,
        Err(err) => {
            tracing::error!(error = %err, "Failed to load settings");
            std::process::exit(1);
        }
    };

    let connection_string = match settings.connection_string() {
        Ok(connection_string) => connection_string,
        Err(err) => {
            tracing::error!(error = %err, "Storage is not configured");
            std::process::exit(1);
        }
    };

    let command = cli.command.unwrap_or(Command::Sample { table: None });

    let result = if connection_string.is_development_storage() {
        tracing::info!("Using in-memory development storage");
        let context = AppContext::new(settings, Arc::new(MemoryTableServiceClient::new()));
        run(context, command).await
    } else {
        run_with_account(settings, &connection_string, command).await
    };

    if let Err(err) = result {
        tracing::error!(error = %err, "Command failed");
        std::process::exit(1);
    }
}

#[cfg(feature = "azure")]
async fn run_with_account(
    settings: SettingsModel,
    connection_string: &ConnectionString,
    command: Command,
) -> Result<(), TableStorageError> {
    use service_table_storage::storage::AzureTableServiceClient;

    let table_service = AzureTableServiceClient::from_connection_string(connection_string)?;
    tracing::info!(
        account = connection_string.account_name.as_deref().unwrap_or_default(),
        endpoint = table_service.endpoint(),
        "Using Azure table storage"
    );
    run(AppContext::new(settings, Arc::new(table_service)), command).await
}

#[cfg(not(feature = "azure"))]
async fn run_with_account(
    _settings: SettingsModel,
    _connection_string: &ConnectionString,
    _command: Command,
) -> Result<(), TableStorageError> {
    Err(TableStorageError::Transport(
        "account connection strings require the `azure` feature".to_string(),
    ))
}

async fn run<C: TableServiceClient>(
    context: AppContext<C>,
    command: Command,
) -> Result<(), TableStorageError> {
    match command {
        Command::Sample { table } => {
            let table = table.unwrap_or_else(|| context.settings.sample_table_name.clone());
            run_sample(&context.table_storage, &table).await?;
        }
        Command::Add {
            table,
            partition_key,
            row_key,
            data,
        } => {
            let entity = SampleEntity {
                partition_key,
                row_key,
                data,
                timestamp: None,
                etag: None,
            };
            context.table_storage.add_entity(&table, &entity).await?;
            tracing::info!(
                table = %table,
                partition_key = %entity.partition_key,
                row_key = %entity.row_key,
                "Added entity"
            );
        }
        Command::Get {
            table,
            partition_key,
            row_key,
        } => {
            let entity: Option<SampleEntity> = context
                .table_storage
                .get_entity(&table, &partition_key, &row_key)
                .await?;
            match entity {
                Some(entity) => println!("{}", serde_json::to_string_pretty(&entity)?),
                None => tracing::warn!(table = %table, partition_key = %partition_key, row_key = %row_key, "Entity not found."),
            }
        }
        Command::Heartbeat { interval_secs } => {
            let interval = interval_secs
                .map(|secs| Duration::from_secs(secs.max(1)))
                .unwrap_or_else(|| context.settings.heartbeat.interval());
            let heartbeat = HeartbeatService::new(interval);
            let handle = heartbeat.start();

            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %err, "Failed to listen for Ctrl+C");
            }

            heartbeat.stop();
            if let Err(err) = handle.await {
                tracing::error!(error = %err, "Heartbeat task failed");
            }
        }
    }

    Ok(())
}
