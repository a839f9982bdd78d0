use clap::Parser;
use std::path::PathBuf;

use crawlhttp::FetcherConfig;

/// Print the User-Agent and request headers a fetcher would send
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Interface {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Agent name, overrides the one from the config file
    #[arg(short, long)]
    agent_name: Option<String>,
}

fn main() {
    env_logger::init();

    let interface = Interface::parse();
    let mut config = match interface.config {
        Some(path) => FetcherConfig::load_or_default(path),
        None => FetcherConfig::default(),
    };
    if let Some(agent_name) = interface.agent_name {
        config.user_agent.agent_name = agent_name;
    }

    println!("{}", config.user_agent());
    println!("{}", config.request_headers());
}
