use clap::Parser;
use dsa_feed::core::sniffer::{check_file_type, sniff_headers};
use dsa_feed::domain::model::UploadedFile;
use dsa_feed::utils::error::{ErrorSeverity, FeedError};
use dsa_feed::utils::logger;
use dsa_feed::{CliConfig, FeedEngine, FeedOutput, FeedPipeline, FeedSettings, LocalStorage};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    if cli.json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting dsa-feed");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let mut settings = match cli.resolve() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("Configuration validation failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };
    settings.input_path = std::path::absolute(&settings.input_path)?
        .to_string_lossy()
        .into_owned();

    if cli.inspect {
        if let Err(e) = inspect(&settings).await {
            exit_with(e);
        }
        return Ok(());
    }

    let storage = LocalStorage::new(settings.output_path.clone());
    let pipeline = FeedPipeline::new(storage, settings);
    let engine = FeedEngine::new(pipeline);

    match engine.run().await {
        Ok(output) if cli.json => {
            println!("{}", serde_json::to_string_pretty(&summary_json(&output))?);
        }
        Ok(output) => display_result(&output),
        Err(e) => exit_with(e),
    }

    Ok(())
}

async fn inspect(settings: &FeedSettings) -> Result<(), FeedError> {
    let bytes = tokio::fs::read(&settings.input_path).await?;
    let file = UploadedFile::new(settings.input_path.clone(), bytes);
    check_file_type(&file)?;
    let report = sniff_headers(&file.bytes, settings.delimiter)?;

    println!("📋 {}", file.name);
    println!("  Delimiter: {:?}", report.delimiter as char);
    println!("  Columns:");
    for header in &report.headers {
        println!("    {}", header);
    }
    println!("  Sampled rows: {}", report.preview_rows.len());
    Ok(())
}

fn summary_json(output: &FeedOutput) -> serde_json::Value {
    serde_json::json!({
        "outputPath": output.output_path,
        "result": output.result,
    })
}

fn display_result(output: &FeedOutput) {
    let result = &output.result;
    println!("✅ Generated {} with {} pages", result.file_name, result.row_count);
    println!("📁 Output saved to: {}", output.output_path);
    println!();
    println!("Preview:");
    for row in &result.preview_rows {
        println!("  [{}] {}", row.custom_label, row.page_url);
    }
    if result.row_count > result.preview_rows.len() {
        println!("  … and {} more", result.row_count - result.preview_rows.len());
    }
}

fn exit_with(e: FeedError) -> ! {
    tracing::error!(
        "Feed generation failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
