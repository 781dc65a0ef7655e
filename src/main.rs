use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use cloud_image_catalog::helpers::arch_mapper::host_arch;
use cloud_image_catalog::remotes::Remotes;
use cloud_image_catalog::settings::{DRIVER_KEY, StaticSettings};
use cloud_image_catalog::source::{FileSource, HttpSource, ManifestSource};
use cloud_image_catalog::{Catalog, ImageRecord, resolve};

/// Find cloud images published in a Simplestreams manifest.
#[derive(Debug, Parser)]
#[command(name = "cloud-image-catalog", version)]
struct Cli {
    /// Alias or version id to look up. Lists the latest releases when omitted.
    query: Option<String>,

    /// Configured remote to fetch the manifest from
    #[arg(long, default_value = "release")]
    remote: String,

    /// Remotes file (defaults to the bundled resources/remotes.json)
    #[arg(long)]
    remotes: Option<PathBuf>,

    /// Read the manifest from a local file instead of a remote
    #[arg(long, requires = "host")]
    manifest: Option<PathBuf>,

    /// Base URL for the paths of a local manifest
    #[arg(long, requires = "manifest")]
    host: Option<String>,

    /// Host architecture to resolve for (defaults to the running one)
    #[arg(long)]
    arch: Option<String>,

    /// Hypervisor backend, e.g. qemu or lxd
    #[arg(long)]
    backend: Option<String>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn default_remotes_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("resources").join("remotes.json")
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // stdout carries the listing
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn source_for(cli: &Cli) -> Result<(Box<dyn ManifestSource>, String)> {
    if let (Some(path), Some(host)) = (&cli.manifest, &cli.host) {
        return Ok((Box::new(FileSource::new(path)), host.clone()));
    }

    let path = cli.remotes.clone().unwrap_or_else(default_remotes_path);
    let remotes =
        Remotes::from_file(&path).with_context(|| format!("load remotes from {}", path.display()))?;
    let remote = remotes
        .by_name(&cli.remote)
        .with_context(|| format!("remote '{}' is not configured", cli.remote))?;

    Ok((Box::new(HttpSource::new(remote.url())?), remote.host().to_string()))
}

/// A tiny wrapper to render one record cleanly
fn print_record(record: &ImageRecord) {
    println!("Release:  {} ({})", record.release_title(), record.release());
    println!("Version:  {}", record.version_id());
    println!("Aliases:  {}", record.aliases().join(", "));
    println!("OS:       {}", record.os());
    println!("Supported: {}", record.supported());
    if let Some(url) = record.image_url() {
        println!("Image:    {url}");
    }
    if let Some(url) = record.kernel_url() {
        println!("Kernel:   {url}");
    }
    if let Some(url) = record.initrd_url() {
        println!("Initrd:   {url}");
    }
    println!("Checksum: {}", if record.checksum().is_empty() { "<none>" } else { record.checksum() });
    if record.size_bytes() >= 0 {
        println!("Size:     {}", record.size_bytes());
    }
}

fn print_latest(catalog: &Catalog) {
    println!("Updated: {}", catalog.updated_at());
    for record in catalog.records().iter().filter(|r| !r.aliases().is_empty()) {
        println!(
            "{:<28} {:<20} {}",
            record.aliases().join(","),
            record.release_title(),
            record.version_id()
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut settings = StaticSettings::new();
    if let Some(backend) = &cli.backend {
        settings = settings.with(DRIVER_KEY, backend.as_str())?;
    }

    let (source, host) = source_for(&cli)?;
    let bytes = source
        .fetch()
        .await
        .with_context(|| format!("fetch manifest from {}", source.location()))?;

    let arch = cli.arch.as_deref().unwrap_or_else(|| host_arch());
    let catalog = resolve(&bytes, &host, arch, &settings)
        .with_context(|| format!("resolve manifest from {}", source.location()))?;

    match cli.query.as_deref() {
        Some(query) => {
            let Some(record) = catalog.lookup(query) else {
                bail!("Unable to find an image matching '{query}'");
            };
            if cli.json {
                println!("{}", serde_json::to_string_pretty(record)?);
            } else {
                print_record(record);
            }
        }
        None if cli.json => println!("{}", serde_json::to_string_pretty(catalog.records())?),
        None => print_latest(&catalog),
    }

    Ok(())
}
