//! dsvault CLI — read objects and hashes from a DS Vault collection.
//!
//! Set DSVAULT_URL (`{endpoint}/collection/{name}`), DSVAULT_COLLECTION and
//! DSVAULT_API_KEY. The descriptor is resolved through the same resolver
//! registry a host framework would use.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use dsvault_cli::{descriptor_from_env, hash_table, init_tracing};
use dsvault_resources::{form, lifecycle, ResolverRegistry, ResourceClient};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "dsvault", about = "DS Vault collection CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resource form descriptor for the host UI
    Form,
    #[command(flatten)]
    Vault(VaultCommand),
}

/// Commands that need a resolved collection.
#[derive(Subcommand, Debug, PartialEq)]
enum VaultCommand {
    /// List object names in the collection
    Objects,
    /// List object names with their SHA-256 hashes
    Hashes {
        /// Output format
        #[arg(long, value_enum, default_value_t = HashFormat::Json)]
        format: HashFormat,
    },
    /// Get the SHA-256 hash of one object
    Hash {
        /// Object name
        name: String,
    },
    /// Download one object
    Download {
        /// Object name
        name: String,
        /// Write to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum HashFormat {
    Json,
    Table,
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

async fn execute(command: VaultCommand, client: &dyn ResourceClient) -> anyhow::Result<()> {
    match command {
        VaultCommand::Objects => {
            let objects = client.list_objects().await?;
            print_json(&objects)
        }
        VaultCommand::Hashes { format } => {
            let hashes = client.list_hashes().await?;
            match format {
                HashFormat::Table => {
                    print!("{}", hash_table(&hashes));
                    Ok(())
                }
                HashFormat::Json => print_json(&hashes),
            }
        }
        VaultCommand::Hash { name } => {
            let hash = client.get_hash(&name).await?;
            print_json(&serde_json::json!({ "name": name, "hash_sha256": hash }))
        }
        VaultCommand::Download { name, output } => {
            let data = client.download(&name).await?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &data)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    tracing::info!(
                        object = %name,
                        path = %path.display(),
                        size = data.len(),
                        "Saved object"
                    );
                    Ok(())
                }
                None => std::io::stdout()
                    .write_all(&data)
                    .context("Failed to write object to stdout"),
            }
        }
    }
}

async fn run(command: VaultCommand, registry: &ResolverRegistry) -> anyhow::Result<()> {
    let descriptor = descriptor_from_env()?;
    let client = registry
        .new_client(&descriptor)
        .await
        .context("Failed to resolve vault resource")?;

    let result = execute(command, client.as_ref()).await;
    client.close().await;
    result
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env first so RUST_LOG from it reaches the subscriber.
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let command = match cli.command {
        Commands::Form => return print_json(&form::resource_forms()),
        Commands::Vault(command) => command,
    };

    let registry = ResolverRegistry::new();
    lifecycle::on_load(&registry).await;

    let result = run(command, &registry).await;

    lifecycle::on_unload(&registry).await;
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("dsvault").chain(args.iter().copied()))
    }

    #[test]
    fn hashes_format_defaults_to_json() {
        let cli = parse(&["hashes"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Vault(VaultCommand::Hashes {
                format: HashFormat::Json
            })
        ));
    }

    #[test]
    fn hashes_format_accepts_table() {
        let cli = parse(&["hashes", "--format", "table"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Vault(VaultCommand::Hashes {
                format: HashFormat::Table
            })
        ));
    }

    #[test]
    fn hashes_format_rejects_unknown_value() {
        let err = parse(&["hashes", "--format", "tabel"]).err().unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn form_and_vault_commands_parse() {
        assert!(matches!(parse(&["form"]).unwrap().command, Commands::Form));

        let cli = parse(&["download", "f.csv", "-o", "out.csv"]).unwrap();
        match cli.command {
            Commands::Vault(command) => assert_eq!(
                command,
                VaultCommand::Download {
                    name: "f.csv".to_string(),
                    output: Some(PathBuf::from("out.csv")),
                }
            ),
            Commands::Form => panic!("expected download command"),
        }
    }
}
