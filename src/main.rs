use anyhow::Result;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "vision-translator-rust",
    version,
    about = "Detect text in images and translate it for overlay rendering"
)]
struct Cli {
    /// Address to listen on (overrides settings)
    #[arg(short = 'a', long = "listen")]
    listen: Option<String>,

    /// API key (overrides the GOOGLE_API_KEY environment variable)
    #[arg(short = 'k', long = "key")]
    key: Option<String>,

    /// Read extra settings from a local TOML file
    #[arg(short = 'r', long = "read-settings")]
    read_settings: Option<String>,

    /// Enable verbose logging
    #[arg(long = "verbose")]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    vision_translator_rust::logging::init(cli.verbose)?;

    let settings_path = cli.read_settings.as_deref().map(std::path::Path::new);
    let settings = vision_translator_rust::settings::load_settings(settings_path)?;
    let addr = cli.listen.unwrap_or_else(|| settings.listen.clone());

    vision_translator_rust::server::run_server(settings, addr, cli.key.as_deref()).await
}
