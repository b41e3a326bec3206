use anyhow::Result;
use clap::Parser;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// litmus: source code quality verdicts in your terminal.
///
/// Uploads a source file to the analysis service, which scores its
/// complexity, maintainability, and documentation, and renders the
/// verdict as a readable report. By default the service runs embedded
/// in-process; point --server-url at an external instance instead, or
/// run `litmus --serve` to host one.
#[derive(Parser, Debug)]
#[command(name = "litmus", version, about)]
struct Cli {
    /// Source file to analyze (can also be picked in the TUI).
    file: Option<String>,

    /// Print the report to stdout instead of starting the TUI.
    #[arg(long)]
    headless: bool,

    /// Run only the analysis service, without a UI.
    #[arg(long)]
    serve: bool,

    /// Port for --serve (0 picks a free port).
    #[arg(long, default_value_t = 8000)]
    port: u16,

    /// Use an external analysis service at this base URL.
    #[arg(long)]
    server_url: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.serve || cli.headless);

    // Load config.
    let mut config = litmus_core::LitmusConfig::load().unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load config: {}. Using defaults.", e);
        litmus_core::LitmusConfig::default()
    });

    if let Some(url) = cli.server_url.clone() {
        config.service.base_url = url;
        config.service.embedded = false;
    }

    tracing::info!("Starting litmus v{}", env!("CARGO_PKG_VERSION"));

    if cli.serve {
        return serve(config, cli.port).await;
    }

    if cli.headless {
        let file = cli
            .file
            .clone()
            .ok_or_else(|| anyhow::anyhow!("--headless requires a file argument"))?;
        return analyze_once(config, &file).await;
    }

    // Start the TUI.
    let mut app = litmus_tui::App::new(config);
    if let Some(ref file) = cli.file {
        app.set_initial_file(file.clone());
    }
    app.run().await?;

    tracing::info!("litmus exited cleanly");
    Ok(())
}

/// Run the analysis service in the foreground until Ctrl+C.
async fn serve(config: litmus_core::LitmusConfig, port: u16) -> Result<()> {
    let mut service = litmus_service::EmbeddedService::start(config.analyzer, port).await?;
    println!("Analysis service listening on {}", service.base_url());

    tokio::signal::ctrl_c().await?;
    tracing::info!("Ctrl+C received, shutting down");
    service.shutdown().await;
    Ok(())
}

/// Analyze one file and print the plain-text report.
async fn analyze_once(config: litmus_core::LitmusConfig, file: &str) -> Result<()> {
    let timeout = Duration::from_secs(config.service.timeout_secs);

    // With an embedded service the instance must outlive the request.
    let (mut service, base_url) = if config.service.embedded {
        let service = litmus_service::EmbeddedService::start(config.analyzer.clone(), 0).await?;
        let url = service.base_url().to_string();
        (Some(service), url)
    } else {
        (None, config.service.base_url.clone())
    };

    let client = litmus_service::AnalysisClient::new(base_url, timeout);
    let result = client.analyze_file(std::path::Path::new(file)).await;

    if let Some(ref mut service) = service {
        service.shutdown().await;
    }

    match result {
        Ok(report) => {
            let view = litmus_core::build_report(&report, config.analyzer.out_of);
            print!("{}", view.to_plain_text());
            Ok(())
        }
        Err(e) => {
            let view = litmus_core::error_report(format!("{}", e));
            print!("{}", view.to_plain_text());
            std::process::exit(1);
        }
    }
}

/// Log to a cache file so the TUI's alternate screen stays clean; in
/// --serve and --headless modes, log to stderr instead.
fn init_logging(verbose: u8, to_stderr: bool) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter = || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if to_stderr {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_writer(std::io::stderr)
            .init();
        return;
    }

    let log_dir = dirs::cache_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("litmus");
    let _ = std::fs::create_dir_all(&log_dir);
    let log_path = log_dir.join("litmus.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path);

    match log_file {
        Ok(file) => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        Err(_) => {
            // No writable log file: drop logs rather than write into
            // the alternate screen.
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::new("off"))
                .with_writer(std::io::sink)
                .init();
        }
    }
}
