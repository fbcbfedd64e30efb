use business_maps::config::{resolve_source, Command};
use business_maps::core::client::{CLIENT_SCRIPT, CLIENT_SCRIPT_FILENAME};
use business_maps::core::Storage;
use business_maps::utils::error::ErrorSeverity;
use business_maps::utils::{logger, validation::Validate};
use business_maps::{ensure_directory_available, BizMapError, CliConfig, LocalStorage, MapRenderer};
use clap::Parser;

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting business-maps CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = run(&config).await {
        tracing::error!(
            "❌ business-maps failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

async fn run(config: &CliConfig) -> Result<(), BizMapError> {
    let file_config = config.load_file_config()?;
    file_config.validate()?;

    let output_path = config.output_path(&file_config);

    if let Command::Script = config.command {
        return emit(output_path.as_deref(), CLIENT_SCRIPT_FILENAME, CLIENT_SCRIPT).await;
    }

    // 驗證資料來源並建立目錄
    let source = resolve_source(config.source.as_deref(), &file_config)?;
    let directory = source.open()?;
    ensure_directory_available(&directory).await?;

    let renderer = MapRenderer::new(directory);

    match &config.command {
        Command::Map(args) => {
            let options = args.apply(file_config.map.clone());
            options.validate()?;
            let html = renderer.render_map(&options).await?;
            emit(output_path.as_deref(), "map.html", &html).await
        }
        Command::BusinessMap(args) => {
            let options = args.apply(file_config.business_map.clone());
            options.validate()?;
            let html = renderer.render_business_map(&options).await?;
            let filename = format!("business-map-{}.html", options.id);
            emit(output_path.as_deref(), &filename, &html).await
        }
        Command::Script => Ok(()),
    }
}

async fn emit(output_path: Option<&str>, filename: &str, content: &str) -> Result<(), BizMapError> {
    match output_path {
        Some(base) => {
            let storage = LocalStorage::new(base.to_string());
            storage.write_file(filename, content.as_bytes()).await?;
            let written = storage.full_path(filename);
            tracing::info!("📁 Output saved to: {}", written.display());
            eprintln!("📁 Output saved to: {}", written.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}
