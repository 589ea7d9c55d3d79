use anyhow::Context;
use clap::Parser;
use expedientes_config::Settings;
use expedientes_models::FilterCriteria;
use expedientes_services::audit::parse_description;
use expedientes_services::export::{export_audits_pdf, export_audits_xlsx};
use expedientes_services::view::{AuditListView, AuditRow, FetchOutcome};
use expedientes_services::{ApiClient, filter_records};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;

use cli::{Cli, Commands, ExportFormat};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file (silently ignore if missing)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut settings = Settings::load().context("loading settings")?;
    if let Some(base_url) = cli.base_url {
        settings.api.base_url = base_url;
    }

    match cli.command {
        Commands::Describe { description } => {
            for entry in parse_description(Some(&description)) {
                println!("{entry}");
            }
            Ok(())
        }
        Commands::List {
            page,
            size,
            filters,
        } => {
            let size = size.unwrap_or(settings.pagination.default_page_size);
            list(&settings, page, size, filters.into()).await
        }
        Commands::Export {
            format,
            output,
            filters,
        } => {
            let criteria: FilterCriteria = filters.into();
            let client = ApiClient::new(&settings.api)?;
            let records = client.fetch_all(settings.export.max_records).await?;
            let selected: Vec<_> = filter_records(&records, &criteria)
                .into_iter()
                .cloned()
                .collect();

            let bytes = match format {
                ExportFormat::Pdf => export_audits_pdf(&selected, &criteria)?,
                ExportFormat::Xlsx => export_audits_xlsx(&selected)?,
            };
            tokio::fs::write(&output, bytes)
                .await
                .with_context(|| format!("writing {}", output.display()))?;
            info!(records = selected.len(), path = %output.display(), "Report written");
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "expedientes=debug,expedientes_services=debug"
    } else {
        "expedientes=info,expedientes_services=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn list(
    settings: &Settings,
    page: u64,
    size: u64,
    criteria: FilterCriteria,
) -> anyhow::Result<()> {
    let client = ApiClient::new(&settings.api)?;
    let mut view =
        AuditListView::with_page_size_options(size, &settings.pagination.page_size_options)?;

    if view.open_page(&client, page).await? == FetchOutcome::Failed {
        anyhow::bail!(view.error().unwrap_or_default().to_string());
    }

    for row in view.visible(&criteria) {
        print_row(row);
    }
    println!(
        "{}  ·  {}",
        view.pagination().range_label(),
        view.pagination().page_label()
    );
    Ok(())
}

fn print_row(row: &AuditRow) {
    let record = &row.record;
    let when = record
        .timestamp
        .map(|ts| ts.format("%d/%m/%Y %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string());
    println!(
        "#{} [{}] {} {} · {} · {}",
        record.id,
        record.action_kind().badge_class(),
        record.action,
        record.entity,
        when,
        record.actor_label()
    );
    for entry in &row.entries {
        println!("    {entry}");
    }
}
