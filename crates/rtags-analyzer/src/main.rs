use clap::Parser;
use tower_lsp::{LspService, Server};
use tracing::info;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use rtags_analyzer::RtagsLanguageServer;

#[derive(Parser, Debug)]
#[command(name = "rtags-analyzer", version, about)]
struct Args {
    #[arg(long, short)]
    verbose: bool,

    #[arg(long)]
    log_file: Option<String>,
}

fn default_log_path() -> std::path::PathBuf {
    dirs_or_tmp().join("rtags-analyzer.log")
}

fn dirs_or_tmp() -> std::path::PathBuf {
    if let Some(home) = std::env::var_os("HOME") {
        let dir = std::path::PathBuf::from(home).join(".rtags-analyzer");
        if std::fs::create_dir_all(&dir).is_ok() {
            return dir;
        }
    }
    std::env::temp_dir()
}

fn env_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("rtags_analyzer=debug,tower_lsp=info")
    } else {
        EnvFilter::new("rtags_analyzer=info,tower_lsp=warn")
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let log_path = args.log_file.as_ref().map(std::path::PathBuf::from).unwrap_or_else(default_log_path);

    let file_appender = tracing_appender::rolling::never(
        log_path.parent().unwrap_or(std::path::Path::new(".")),
        log_path.file_name().unwrap_or(std::ffi::OsStr::new("rtags-analyzer.log")),
    );

    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_target(false)
        .with_filter(env_filter(args.verbose));

    // stdout carries the protocol, so human-readable logs go to stderr.
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_filter(env_filter(args.verbose));

    tracing_subscriber::registry().with(file_layer).with(stderr_layer).init();

    info!("Starting rtags-analyzer v{}", env!("CARGO_PKG_VERSION"));
    info!("Log file: {}", log_path.display());

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(RtagsLanguageServer::new);

    Server::new(stdin, stdout, socket).serve(service).await;

    info!("rtags-analyzer stopped");
}
