//! settingstack command-line entry point

use clap::Parser;
use settingstack::{
    cli::{run_cli, SettingsCli},
    logging::{init_logging, LogConfig},
};
use tracing::error;

fn main() {
    let cli = SettingsCli::parse();

    let log_config = LogConfig::from_env().with_verbose(cli.verbose);
    if let Err(e) = init_logging(&log_config) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let json_output = cli.json;
    if let Err(e) = run_cli(cli, std::io::stdout().lock()) {
        if json_output {
            let error_json = serde_json::json!({
                "error": true,
                "message": format!("{:#}", e),
            });
            println!("{}", error_json);
        } else {
            error!("Command failed: {:#}", e);
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(1);
    }
}
