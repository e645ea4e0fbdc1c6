//! ForensiTrain CLI
//!
//! OSINT investigation client: phone enrichment, entity graphs,
//! geosocial footprints and image metadata analysis.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use forensitrain_client::{
    ClientConfig, Enrichment, EnrichmentClient, ExportFormat, ExportPayload, ImagePreview,
    ImageUpload,
};
use forensitrain_core::{
    is_valid_phone, project, InvestigationResult, ResultTab, Subject, TabView,
};
use forensitrain_runtime::Orchestrator;

#[derive(Parser)]
#[command(name = "forensitrain")]
#[command(author, version, about = "ForensiTrain: OSINT investigation client", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity level (0-3)
    #[arg(short, long, default_value = "1")]
    verbose: u8,

    /// Backend API base URL
    #[arg(long, env = "FORENSITRAIN_API", default_value = "http://127.0.0.1:8000/api")]
    api: String,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    timeout: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Investigate a phone number and print the enriched record
    Lookup {
        /// Phone number in E.164 form, e.g. +12025550123
        #[arg(short, long)]
        phone: String,

        /// Show a single tab (general/accounts/breaches/emails/graph)
        #[arg(short, long)]
        tab: Option<String>,

        /// Print the full result as JSON instead of tabs
        #[arg(long)]
        json: bool,

        /// Carrier/validity check only, skip enrichment
        #[arg(long)]
        basic: bool,
    },

    /// Fetch the geosocial footprint for a username
    Footprint {
        /// Social handle to investigate
        #[arg(short, long)]
        username: String,
    },

    /// Analyze an image file (JPEG or PNG, max 5 MiB)
    Image {
        /// Path to the image file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Export a phone report as JSON or PDF
    Export {
        /// Phone number in E.164 form
        #[arg(short, long)]
        phone: String,

        /// Export format: json or pdf
        #[arg(long, default_value = "json")]
        fmt: String,

        /// Output file (default: report_<timestamp>.<fmt>)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let log_level = match cli.verbose {
        0 => Level::ERROR,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .init();

    let config = ClientConfig::default()
        .with_base_url(&cli.api)
        .with_timeout(cli.timeout);
    let client = Arc::new(EnrichmentClient::new(config)?);

    match cli.command {
        Commands::Lookup {
            phone,
            tab,
            json,
            basic,
        } => {
            run_lookup(client, &phone, tab.as_deref(), json, basic).await?;
        }
        Commands::Footprint { username } => {
            run_footprint(client, &username).await?;
        }
        Commands::Image { file } => {
            run_image(client, &file).await?;
        }
        Commands::Export { phone, fmt, output } => {
            run_export(client, &phone, &fmt, output).await?;
        }
    }

    Ok(())
}

async fn run_lookup(
    client: Arc<EnrichmentClient>,
    phone: &str,
    tab: Option<&str>,
    json: bool,
    basic: bool,
) -> Result<()> {
    // The CLI is the input form: phone syntax is validated here, once
    if !is_valid_phone(phone.trim()) {
        anyhow::bail!("Invalid phone number format (expected E.164, e.g. +12025550123)");
    }

    if basic {
        let report = client.analyze_phone(phone.trim()).await?;
        println!("Phone: {}", report.phone_number);
        println!("Valid: {}", if report.valid { "Yes" } else { "No" });
        println!("Country: {}", report.country.as_deref().unwrap_or("N/A"));
        println!("Carrier: {}", report.carrier.as_deref().unwrap_or("N/A"));
        if let Some(line_type) = &report.line_type {
            println!("Line Type: {}", line_type);
        }
        return Ok(());
    }

    let orchestrator = Orchestrator::new(client);
    let result = match orchestrator.search(phone).await? {
        Some(result) => result,
        None => return Ok(()), // superseded; nothing to render
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&*result)?);
        return Ok(());
    }

    match tab {
        Some(name) => {
            let tab = ResultTab::from_name(name)
                .ok_or_else(|| anyhow::anyhow!("Unknown tab: {}", name))?;
            render_tab(&result, tab);
        }
        None => {
            for tab in ResultTab::ALL {
                println!("== {} ==", tab.name());
                render_tab(&result, tab);
                println!();
            }
        }
    }

    Ok(())
}

fn render_tab(result: &InvestigationResult, tab: ResultTab) {
    let view = project(result, tab);
    if view.is_empty() {
        println!("{}", tab.empty_text());
        return;
    }

    match view {
        TabView::General(r) => {
            println!("Phone: {}", r.subject);
            println!("Valid: {}", if r.valid { "Yes" } else { "No" });
            println!("Country: {}", r.country.as_deref().unwrap_or("N/A"));
            println!("Carrier: {}", r.carrier.as_deref().unwrap_or("N/A"));
            if let Some(line_type) = &r.line_type {
                println!("Line Type: {}", line_type);
            }
            if let Some(name) = &r.name {
                println!("Name: {}", name);
            }
        }
        TabView::Accounts(accounts) => {
            for account in accounts {
                println!("{} ({}) - {}", account.handle, account.platform, account.url);
            }
        }
        TabView::Breaches(breaches) | TabView::Emails(breaches) => {
            for entry in breaches {
                println!("{}", entry);
            }
        }
        TabView::Graph(graph) => {
            println!(
                "{} nodes, {} links",
                graph.node_count(),
                graph.link_count()
            );
            for node in &graph.nodes {
                println!("[{}] {}", node.kind.as_str(), node.label);
            }
        }
    }
}

async fn run_footprint(client: Arc<EnrichmentClient>, username: &str) -> Result<()> {
    let orchestrator = Orchestrator::new(client);
    // The subject is a handle by construction here; an all-digit username
    // must not be reclassified as a phone number
    let subject = Subject::Handle(username.trim().to_string());
    let result = match orchestrator.search_subject(subject).await? {
        Some(result) => result,
        None => return Ok(()),
    };

    match result.geosocial.as_ref().filter(|g| !g.locations.is_empty()) {
        Some(footprint) => {
            println!("{} geotagged posts for {}", footprint.locations.len(), username);
            for loc in &footprint.locations {
                println!(
                    "  {:.4}, {:.4}  {}  {}",
                    loc.lat,
                    loc.lon,
                    loc.created_at.as_deref().unwrap_or("-"),
                    loc.text.as_deref().unwrap_or("")
                );
            }
        }
        None => println!("No geotagged posts found for {}", username),
    }

    Ok(())
}

async fn run_image(client: Arc<EnrichmentClient>, file: &Path) -> Result<()> {
    let bytes = fs::read(file)?;
    let file_name = file
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "upload".to_string());
    let upload = ImageUpload {
        mime: guess_mime(file).to_string(),
        file_name,
        bytes,
    };

    // Preview lives for the duration of the request, released on drop
    let preview = ImagePreview::new(&upload)?;
    println!("Preview: {}", preview.path().display());

    let report = client.analyze_image(&upload).await?;

    if let Some(dimensions) = &report.dimensions {
        println!("Dimensions: {}", dimensions);
    }
    if let Some(format) = &report.format {
        println!("Format: {}", format);
    }
    if let Some(exif) = report.exif.as_ref().and_then(|v| v.as_object()) {
        println!("EXIF: {} tags", exif.len());
    }
    println!("Faces detected: {}", report.faces_detected);
    if let Some(text) = report.text.as_deref().filter(|t| !t.is_empty()) {
        println!("Extracted text:\n{}", text);
    }
    if !report.objects.is_empty() {
        println!("Scene elements: {}", report.objects.join(", "));
    }
    if let Some(platform) = &report.inferred_platform {
        println!("Inferred platform: {}", platform);
    }

    Ok(())
}

fn guess_mime(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        // Anything else fails local validation before a request is made
        _ => "application/octet-stream",
    }
}

async fn run_export(
    client: Arc<EnrichmentClient>,
    phone: &str,
    fmt: &str,
    output: Option<PathBuf>,
) -> Result<()> {
    if !is_valid_phone(phone.trim()) {
        anyhow::bail!("Invalid phone number format (expected E.164, e.g. +12025550123)");
    }

    let format = match fmt {
        "json" => ExportFormat::Json,
        "pdf" => ExportFormat::Pdf,
        other => anyhow::bail!("Unknown export format: {} (expected json or pdf)", other),
    };

    let payload = client.export_report(phone, format).await?;

    let output_path = output.unwrap_or_else(|| {
        let timestamp = chrono::Utc::now().format("%Y-%m-%d_%H-%M-%S");
        PathBuf::from(format!("report_{}.{}", timestamp, format.as_str()))
    });

    match payload {
        ExportPayload::Json(value) => {
            fs::write(&output_path, serde_json::to_string_pretty(&value)?)?;
        }
        ExportPayload::Pdf(bytes) => {
            fs::write(&output_path, bytes)?;
        }
    }

    println!("Report saved to: {}", output_path.display());
    Ok(())
}
