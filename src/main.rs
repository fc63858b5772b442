use bandstand::{config, output, site};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bandstand")]
#[command(about = "Static site generator for band websites")]
#[command(long_about = "\
Static site generator for band websites

Your filesystem is the data source. Markdown files become pages, YAML files
become the concert calendar and discography, and the photo directories become
a derived gallery with original, resized, and thumbnail tiers.

Source structure:

  site/
  ├── site.toml                    # Site config (optional)
  ├── content/
  │   ├── pages/about.md           # Content pages (front matter title)
  │   ├── concerts.yaml            # Concert calendar
  │   └── albums.yaml              # Discography
  ├── photos/                      # Gallery sources (subdirectories OK)
  ├── images/                      # Banner/artwork sources
  └── static/                      # Copied verbatim to the output

Run 'bandstand gen-config' to print a documented site.toml.")]
#[command(version)]
struct Cli {
    /// Site source directory
    #[arg(long, default_value = ".", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the full site: content, image tiers, HTML
    Build,
    /// Validate the source tree without writing anything
    Check,
    /// Print a stock site.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            println!("Building band site...");
            let summary = site::build(&cli.source, &cli.output)?;
            output::print_summary(&summary);
            println!("Site is in {}", cli.output.display());
        }
        Command::Check => {
            let summary = site::check(&cli.source)?;
            output::print_summary(&summary);
            println!("Source tree is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
