use clap::{Parser, Subcommand};
use docsite::engine::BuiltinCatalog;
use docsite::{SiteConfigResolver, config, logging, output, overlay, scan};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "docsite")]
#[command(about = "Inspect documentation site configuration")]
#[command(long_about = "\
Inspect documentation site configuration

Loads docs/conf.toml together with the project's .version file and answers
the questions a documentation build asks: which pages are excluded, which
sidebar widgets each page gets, which theme and static overlays apply.

Project structure:

  project/
  ├── .version                 # Version string, used as version and release
  └── docs/
      ├── conf.toml            # Site config
      ├── _static/             # Static overlay (overrides theme files)
      ├── _templates/          # Custom templates
      ├── index.rst            # Page 'index'
      └── tutorial/
          └── intro.rst        # Page 'tutorial/intro'

Sidebar rules are tried top to bottom; the first matching pattern wins.

Run 'docsite gen-config' to generate a documented conf.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Path to conf.toml
    #[arg(long, default_value = "docs/conf.toml", global = true)]
    config: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load the config, print a summary and warnings, check theme and widgets
    Check {
        /// Additional theme names the engine provides
        #[arg(long = "theme")]
        themes: Vec<String>,
        /// Additional sidebar widget names the engine provides
        #[arg(long = "widget")]
        widgets: Vec<String>,
    },
    /// Resolve exclusion and sidebar widgets for page ids
    Resolve {
        /// Page ids, e.g. tutorial/intro
        #[arg(required = true)]
        pages: Vec<String>,
    },
    /// Resolve every source page under the docs directory
    Scan {
        /// Source directory (defaults to the config's directory)
        #[arg(long)]
        source: Option<PathBuf>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show which static file wins for every output path
    Overlays {
        /// The theme's built-in static directory (lowest layer)
        #[arg(long)]
        theme_static: Option<PathBuf>,
        /// Copy the composed files into this directory
        #[arg(long)]
        apply: Option<PathBuf>,
    },
    /// Print the configuration handed to the build engine as JSON
    Dump,
    /// Print a stock conf.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match cli.command {
        Command::Check { themes, widgets } => {
            let resolver = SiteConfigResolver::load(&cli.config)?;
            output::print_check_output(&resolver);
            let catalog = BuiltinCatalog::with_extras(themes, widgets);
            resolver.check_with(&catalog)?;
            println!();
            println!("==> Configuration is valid");
        }
        Command::Resolve { pages } => {
            let resolver = SiteConfigResolver::load(&cli.config)?;
            output::print_resolve_output(&resolver, &pages);
        }
        Command::Scan { source, json } => {
            let resolver = SiteConfigResolver::load(&cli.config)?;
            let source = source.unwrap_or_else(|| resolver.config_dir().to_path_buf());
            let pages = scan::scan(&resolver, &source)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&pages)?);
            } else {
                output::print_scan_output(&pages);
            }
        }
        Command::Overlays {
            theme_static,
            apply,
        } => {
            let resolver = SiteConfigResolver::load(&cli.config)?;
            let plan = overlay::compose(
                theme_static.as_deref(),
                resolver.effective_static_overlays(),
            )?;
            output::print_overlay_output(&plan);
            if let Some(dest) = apply {
                let written = plan.apply(&dest)?;
                println!("==> Copied {} files → {}", written, dest.display());
            }
        }
        Command::Dump => {
            let resolver = SiteConfigResolver::load(&cli.config)?;
            println!("{}", serde_json::to_string_pretty(&resolver.engine_view())?);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
