//! bleprof - inspect BLE device profiles
//!
//! Lists the known profiles (built-in plus BLEPROF_HOME/profiles.json),
//! shows their UUIDs and runs a profile's parser over sample data.

use std::path::PathBuf;

use bleprof_registry::{ProfileRegistry, config};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "bleprof")]
#[command(about = "Inspect BLE device profiles and try their parsers")]
struct Cli {
    /// Profiles file (default: $BLEPROF_HOME/profiles.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Only use the built-in profiles
    #[arg(long, global = true)]
    no_user_profiles: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List known profiles
    List,
    /// Print a profile as JSON
    Show {
        /// Profile key, e.g. generic_uart
        key: String,
    },
    /// Validate the UUIDs of every profile
    Check,
    /// Run a profile's parser over some data
    Parse {
        /// Profile key
        key: String,
        /// Data as received on the profile's characteristic
        data: String,
        /// DATA is hex encoded
        #[arg(long)]
        hex: bool,
        /// Print the numeric channels instead of the decoded value
        #[arg(long)]
        channels: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let registry = load_registry(cli.config, cli.no_user_profiles)?;

    match cli.command {
        Commands::List => list_profiles(&registry),
        Commands::Show { key } => show_profile(&registry, &key)?,
        Commands::Check => {
            if !check_profiles(&registry) {
                std::process::exit(1);
            }
        }
        Commands::Parse { key, data, hex, channels } => {
            parse_data(&registry, &key, &data, hex, channels)?;
        }
    }

    Ok(())
}

/// Built-in profiles, then the user's profiles file on top
fn load_registry(
    config_path: Option<PathBuf>,
    no_user_profiles: bool,
) -> Result<ProfileRegistry, Box<dyn std::error::Error>> {
    let mut registry = ProfileRegistry::with_builtin_profiles();
    if no_user_profiles {
        return Ok(registry);
    }

    match config_path.or_else(config::default_profiles_path) {
        Some(path) => {
            let count = config::register_from_file(&mut registry, &path)?;
            if count > 0 {
                log::info!("{} user profile(s) from {}", count, path.display());
            }
        }
        None => log::warn!("no home directory, skipping user profiles"),
    }

    Ok(registry)
}

fn list_profiles(registry: &ProfileRegistry) {
    println!("{} profile(s):", registry.len());
    for (key, profile) in registry.iter() {
        println!("  {} - {} (service {})", key, profile.name(), profile.service());
    }
}

fn show_profile(registry: &ProfileRegistry, key: &str) -> Result<(), Box<dyn std::error::Error>> {
    let profile = registry
        .get(key)
        .ok_or_else(|| format!("unknown profile '{key}'"))?;
    println!("{}", serde_json::to_string_pretty(profile)?);
    Ok(())
}

/// Returns false if any profile is invalid
fn check_profiles(registry: &ProfileRegistry) -> bool {
    let mut ok = true;
    for (key, profile) in registry.iter() {
        match profile.validate() {
            Ok(()) => println!("  {key}: ok"),
            Err(e) => {
                eprintln!("  {key}: {e}");
                ok = false;
            }
        }
    }
    ok
}

fn parse_data(
    registry: &ProfileRegistry,
    key: &str,
    data: &str,
    hex: bool,
    channels: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let profile = registry
        .get(key)
        .ok_or_else(|| format!("unknown profile '{key}'"))?;

    let bytes = read_input(data, hex)?;
    let parsed = profile.parse(&bytes);

    if channels {
        for (name, value) in parsed.channels() {
            println!("{name} {value}");
        }
    } else {
        println!("{}", serde_json::to_string_pretty(&parsed)?);
    }
    Ok(())
}

fn read_input(data: &str, hex: bool) -> Result<Vec<u8>, data_encoding::DecodeError> {
    if hex {
        let digits: String = data.chars().filter(|c| !c.is_whitespace()).collect();
        data_encoding::HEXLOWER_PERMISSIVE.decode(digits.as_bytes())
    } else {
        Ok(data.as_bytes().to_vec())
    }
}
