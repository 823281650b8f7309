// SPDX-FileCopyrightText: 2026 Mailquill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mailquill -- an email-assistant backend over a local language model.
//!
//! This is the binary entry point for the Mailquill server.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use clap::{Parser, Subcommand};

mod serve;

/// Mailquill -- an email-assistant backend over a local language model.
#[derive(Parser, Debug)]
#[command(name = "mailquill", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the Mailquill gateway server.
    Serve,
    /// Print the resolved configuration and exit.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match mailquill_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            mailquill_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Config) => {
            println!("server    {}:{}", config.server.host, config.server.port);
            println!(
                "backend   {} (model {})",
                config.generation.backend, config.generation.model
            );
            println!(
                "ollama    {}",
                config.generation.ollama_url.as_deref().unwrap_or("<unset>")
            );
            println!("storage   {}", config.storage.database_path);
            println!(
                "auth      {}",
                if config.auth.token_secret.is_some() {
                    "token secret configured"
                } else {
                    "no token secret (chat routes disabled)"
                }
            );
        }
        None => {
            println!("mailquill: use --help for available commands");
        }
    }
}

#[cfg(test)]
mod tests {
    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        // Verify jemalloc is the global allocator by advancing the epoch.
        // Only jemalloc supports this -- the system allocator would fail.
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn binary_loads_config_defaults() {
        // Verify config loads with defaults (no config file needed).
        let config = mailquill_config::load_and_validate().expect("default config should be valid");
        assert_eq!(config.generation.backend, "ollama");
    }
}
