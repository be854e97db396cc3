use clap::{Parser, Subcommand};
use folio::registry::Site;
use folio::render::{self, PageStatus};
use folio::{config, generate, output, scan};
use std::path::{Path, PathBuf};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Static site generator for a personal portfolio and blog")]
#[command(long_about = "\
Static site generator for a personal portfolio and blog

Posts are markdown files with TOML front matter. Gallery posts show a folder
of images instead of prose.

Content structure:

  content/
  ├── config.toml                  # Site config (optional)
  ├── posts/
  │   ├── happy-new-year.md        # id: happy-new-year → /blog/happy-new-year
  │   ├── 010-binary-objections.md # Number prefix is dropped from the id
  │   └── rvc.md                   # path = \"/blog/...\" sets the canonical url
  └── images/
      ├── profile-photo.png        # [site] avatar
      └── binary-objections/       # Gallery images for that post
          ├── 001-stairs.jpg       # Ordered by number prefix
          └── 002-window.jpg

Front matter:

  +++
  title = \"Happy New Year\"        # optional, else first # heading, else filename
  date = \"1-1-2020\"               # required, shown as written on the index
  path = \"/blog/happy-new-year\"   # optional canonical url
  layout = \"gallery\"              # optional: default | gallery
  gallery = \"binary-objections\"   # optional image folder, defaults to the id
  +++

Run 'folio gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (manifest)
    #[arg(long, default_value = ".folio-temp", global = true)]
    temp_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan content directory into a manifest
    Scan,
    /// Produce the HTML site from the scanned manifest
    Generate,
    /// Run the full pipeline: scan → generate
    Build,
    /// Validate content and report posts whose url differs from their id
    Check,
    /// List posts, newest first
    List,
    /// Print the HTML for a single route, e.g. /blog/happy-new-year
    Render {
        /// Navigation path to render
        path: String,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match &cli.command {
        Command::Scan => {
            let manifest = scan::scan(&cli.source)?;
            write_manifest(&manifest, &cli.temp_dir)?;
            let site = Site::new(manifest.posts, manifest.config)?;
            output::print_scan_output(&site, &cli.source);
        }
        Command::Generate => {
            let manifest_path = cli.temp_dir.join("manifest.json");
            let report = generate::generate(&manifest_path, &cli.source, &cli.output)?;
            output::print_generate_output(&report);
        }
        Command::Build => {
            println!("==> Stage 1: Scanning {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            let manifest_path = write_manifest(&manifest, &cli.temp_dir)?;
            let site = Site::new(manifest.posts, manifest.config)?;
            output::print_scan_output(&site, &cli.source);

            println!("==> Stage 2: Generating HTML → {}", cli.output.display());
            let report = generate::generate(&manifest_path, &cli.source, &cli.output)?;
            output::print_generate_output(&report);

            output::print_url_warnings(&site);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let site = load_site(&cli.source)?;
            output::print_scan_output(&site, &cli.source);
            output::print_url_warnings(&site);
            println!("==> Content is valid");
        }
        Command::List => {
            let site = load_site(&cli.source)?;
            output::print_listing(&site);
        }
        Command::Render { path } => {
            let site = load_site(&cli.source)?;
            let page = render::render_route(&site, path);
            if page.status == PageStatus::NotFound {
                eprintln!("warning: nothing at {path}, rendering the not-found page");
            }
            println!("{}", page.html.into_string());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Write the scan manifest into the temp directory and return its path.
fn write_manifest(
    manifest: &scan::Manifest,
    temp_dir: &Path,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    std::fs::create_dir_all(temp_dir)?;
    let manifest_path = temp_dir.join("manifest.json");
    let json = serde_json::to_string_pretty(manifest)?;
    std::fs::write(&manifest_path, json)?;
    Ok(manifest_path)
}

fn load_site(source: &Path) -> Result<Site, Box<dyn std::error::Error>> {
    let manifest = scan::scan(source)?;
    Ok(Site::new(manifest.posts, manifest.config)?)
}
