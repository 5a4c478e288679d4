//! Administrative CLI for Silo clusters.

mod client_config;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use client_config::{AliasConfig, ClientConfig, config_path, load_client_config, save_client_config};
use silo_admin::client::AdminApi;
use silo_admin::{ConnectionCache, ConnectionConfig};
use silo_core::{ClusterStatus, encode_registration_token, summarize};
use silo_registry::{
    CONFIG_SUBSYSTEM, CredentialKind, Endpoints, RegistryHttp, StoredCredentials, TerminalPrompt,
    authorize_url, cluster_supports_hub, extract_api_key, register_cluster, resolve_credential,
};
use std::path::Path;

#[derive(Parser)]
#[command(name = "siloctl")]
#[command(about = "Administrative CLI for Silo clusters")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
struct ClientConfigArgs {
    /// Client config file path
    #[arg(long, env = "SILO_CLIENT_CONFIG")]
    client_config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage local cluster aliases
    Alias {
        #[command(subcommand)]
        command: AliasCommands,
        #[command(flatten)]
        client: ClientConfigArgs,
    },
    /// Show cluster status
    Status {
        /// Cluster alias
        alias: String,
        /// Trace every admin request/response
        #[arg(long, default_value_t = false)]
        debug: bool,
        #[command(flatten)]
        client: ClientConfigArgs,
    },
    /// Register a cluster with the Hub
    Register {
        /// Cluster alias
        alias: String,
        /// Name to associate with this cluster on the Hub (default: alias)
        #[arg(long)]
        name: Option<String>,
        /// HTTP(S) proxy URL for admin and Hub requests
        #[arg(long)]
        proxy: Option<String>,
        /// Print the registration token instead of contacting the Hub
        /// (for airgapped/firewalled environments)
        #[arg(long, default_value_t = false)]
        airgap: bool,
        /// Talk to a local development Hub
        #[arg(long, hide = true, default_value_t = false)]
        dev: bool,
        /// Trace every admin request/response
        #[arg(long, default_value_t = false)]
        debug: bool,
        #[command(flatten)]
        client: ClientConfigArgs,
    },
}

#[derive(Subcommand)]
enum AliasCommands {
    /// Add or replace an alias
    Set {
        alias: String,
        /// Cluster admin endpoint, e.g. https://cluster.example.com:9000
        url: String,
        access_key: String,
        secret_key: String,
        /// Skip TLS certificate verification for this alias
        #[arg(long, default_value_t = false)]
        insecure: bool,
    },
    /// List configured aliases
    List,
    /// Remove an alias
    Remove { alias: String },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let Cli { command } = Cli::parse();

    match command {
        Commands::Alias { command, client } => handle_alias_command(command, &client),
        Commands::Status {
            alias,
            debug,
            client,
        } => handle_status_command(&alias, debug, &client),
        Commands::Register {
            alias,
            name,
            proxy,
            airgap,
            dev,
            debug,
            client,
        } => handle_register_command(&alias, name, proxy, airgap, dev, debug, &client),
    }
}

fn handle_alias_command(command: AliasCommands, client: &ClientConfigArgs) -> Result<()> {
    let path = config_path(client.client_config.as_deref())?;
    let mut config = load_client_config(&path)?;

    match command {
        AliasCommands::Set {
            alias,
            url,
            access_key,
            secret_key,
            insecure,
        } => {
            config.aliases.insert(
                alias.clone(),
                AliasConfig {
                    url,
                    access_key,
                    secret_key,
                    insecure,
                    api_key: None,
                    license: None,
                },
            );
            save_client_config(&path, &config)?;
            println!("Alias '{alias}' saved to {}", path.display());
        }
        AliasCommands::List => {
            if config.aliases.is_empty() {
                println!("No aliases configured.");
            } else {
                println!("{:<20} {:<40} {:<10}", "Alias", "URL", "Insecure");
                println!("{}", "-".repeat(72));
                for (alias, record) in &config.aliases {
                    println!("{:<20} {:<40} {:<10}", alias, record.url, record.insecure);
                }
            }
        }
        AliasCommands::Remove { alias } => {
            if config.aliases.remove(&alias).is_none() {
                anyhow::bail!("unknown alias: {alias}");
            }
            save_client_config(&path, &config)?;
            println!("Alias '{alias}' removed.");
        }
    }
    Ok(())
}

fn lookup_alias(config: &ClientConfig, alias: &str) -> Result<AliasConfig> {
    config.aliases.get(alias).cloned().ok_or_else(|| {
        anyhow::anyhow!("unknown alias: {alias} (add it with 'siloctl alias set')")
    })
}

fn connection_config(record: &AliasConfig, debug: bool) -> ConnectionConfig {
    let mut config = ConnectionConfig::new(&record.url, &record.access_key, &record.secret_key);
    config.insecure = record.insecure;
    config.debug = debug;
    config.app_name = "siloctl".to_string();
    config.app_version = env!("CARGO_PKG_VERSION").to_string();
    config
}

fn handle_status_command(alias: &str, debug: bool, client: &ClientConfigArgs) -> Result<()> {
    let path = config_path(client.client_config.as_deref())?;
    let config = load_client_config(&path)?;
    let record = lookup_alias(&config, alias)?;

    let cache = ConnectionCache::new();
    let admin = cache
        .get_or_create(&connection_config(&record, debug))
        .with_context(|| format!("unable to initialize admin connection for '{alias}'"))?;

    let status = admin
        .status()
        .with_context(|| format!("unable to fetch status of '{alias}'"))?;
    render_status(alias, &status);
    Ok(())
}

fn render_status(alias: &str, status: &ClusterStatus) {
    let info = summarize(status, alias);
    println!("Cluster: {alias}");
    println!("  Deployment ID: {}", status.deployment_id);
    println!("  Version: {}", info.info.version);
    println!("  Server pools: {}", info.info.server_pools);
    println!("  Servers: {}", info.info.servers);
    println!("  Drives: {}", info.info.drives);
    println!(
        "  Drive space: {} used of {}",
        format_bytes(info.info.used_drive_space),
        format_bytes(info.info.total_drive_space)
    );
    println!("  Buckets: {}", info.info.buckets);
    println!("  Objects: {}", info.info.objects);
    println!("  Used capacity: {}", format_bytes(info.used_capacity));
}

fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * KB;
    const GB: u64 = 1024 * MB;
    const TB: u64 = 1024 * GB;

    if bytes >= TB {
        format!("{:.2} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} bytes")
    }
}

#[allow(clippy::too_many_arguments)]
fn handle_register_command(
    alias: &str,
    name: Option<String>,
    proxy: Option<String>,
    airgap: bool,
    dev: bool,
    debug: bool,
    client: &ClientConfigArgs,
) -> Result<()> {
    let path = config_path(client.client_config.as_deref())?;
    let mut config = load_client_config(&path)?;
    let record = lookup_alias(&config, alias)?;

    let mut conn = connection_config(&record, debug);
    conn.proxy_url = proxy.clone();

    let cache = ConnectionCache::new();
    let admin = cache
        .get_or_create(&conn)
        .with_context(|| format!("unable to initialize admin connection for '{alias}'"))?;

    let status = admin
        .status()
        .with_context(|| format!("unable to fetch status of '{alias}'"))?;
    let cluster_name = name.unwrap_or_else(|| alias.to_string());
    let reg_info = summarize(&status, &cluster_name);

    if airgap {
        let token = encode_registration_token(&reg_info)?;
        println!("Registration token for '{cluster_name}':");
        println!("{token}");
        println!("Submit this token through the Hub web console to complete registration.");
        return Ok(());
    }

    let endpoints = if dev {
        Endpoints::development()
    } else {
        Endpoints::production()
    };
    let http = RegistryHttp::new(proxy.as_deref())?;
    http.check_reachable(endpoints.base())
        .with_context(|| format!("Hub is not reachable at {}", endpoints.base()))?;

    let local = StoredCredentials {
        api_key: record.api_key.clone(),
        license: record.license.clone(),
    };
    let api_key = resolve_credential(admin.as_ref(), &local, CredentialKind::ApiKey)
        .context("unable to resolve Hub API key")?;
    let license = match api_key.as_deref() {
        Some(key) if !key.is_empty() => None,
        _ => resolve_credential(admin.as_ref(), &local, CredentialKind::License)
            .context("unable to resolve Hub license")?,
    };

    let mut prompt = TerminalPrompt;
    let auth = authorize_url(
        &http,
        &endpoints,
        &mut prompt,
        &endpoints.register_url(),
        api_key,
        license,
    )?;
    let response = register_cluster(&http, &auth, &reg_info)
        .with_context(|| format!("registration of '{cluster_name}' failed"))?;

    if let Some(new_key) = extract_api_key(&response) {
        store_api_key(admin.as_ref(), &mut config, &path, alias, &new_key)?;
    }

    println!("Cluster '{cluster_name}' registered with the Hub.");
    Ok(())
}

/// Persist a freshly issued API key where it belongs: in the cluster's own
/// config when the cluster owns Hub credentials, otherwise in the local
/// alias record.
fn store_api_key(
    admin: &dyn AdminApi,
    config: &mut ClientConfig,
    path: &Path,
    alias: &str,
    api_key: &str,
) -> Result<()> {
    if cluster_supports_hub(admin)? {
        admin
            .set_config(&format!("{CONFIG_SUBSYSTEM} license= api_key={api_key}"))
            .context("unable to store Hub API key in cluster config")?;
        return Ok(());
    }

    if let Some(record) = config.aliases.get_mut(alias) {
        record.api_key = Some(api_key.to_string());
        record.license = None;
    }
    save_client_config(path, config)
}
