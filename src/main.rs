use clap::Parser;
use parlo::core::config;
use parlo::core::language::Language;
use parlo::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "parlo", about = "Terminal translator that pivots into chat")]
struct Args {
    /// Model to request from the completion service
    #[arg(short, long)]
    model: Option<String>,

    /// Preselect the target language
    #[arg(short, long, value_enum)]
    language: Option<Language>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to parlo.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("parlo.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Falling back to default config: {e}");
            Default::default()
        }
    };
    let resolved = config::resolve(&file_config, args.model.as_deref(), args.language);

    log::info!("Parlo starting up with model: {}", resolved.model_name);

    tui::run(resolved).await
}
