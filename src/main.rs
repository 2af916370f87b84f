use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fits_driver::{from_image, ImageDriver, Settings};

#[derive(Parser)]
#[command(name = "fits-driver")]
#[command(about = "Inspect and copy 1-D / 2-D floating point FITS images")]
#[command(version)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load an image and print its type, shape and pixel statistics
    Info {
        /// FITS file to load
        #[arg(required_unless_present = "config", conflicts_with = "config")]
        path: Option<PathBuf>,

        /// JSON settings file naming the source image
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Load an image and store it in a new file
    Copy {
        /// FITS file to load
        source: PathBuf,

        /// Destination; must not exist yet
        dest: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let result = match cli.command {
        Commands::Info { path, config } => cmd_info(path, config),
        Commands::Copy { source, dest } => cmd_copy(source, dest),
    };

    // Any error ends the run with a non-zero status.
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn settings_from_args(path: Option<PathBuf>, config: Option<PathBuf>) -> Result<Settings> {
    match (path, config) {
        (_, Some(config)) => Ok(Settings::from_file(&config)?),
        (Some(path), None) => Ok(Settings::new(path)),
        (None, None) => anyhow::bail!("no image given: pass a path or --config"),
    }
}

fn cmd_info(path: Option<PathBuf>, config: Option<PathBuf>) -> Result<()> {
    let settings = settings_from_args(path, config)?;
    let source = settings.source.clone();
    let driver =
        from_image(settings).with_context(|| format!("loading {}", source.display()))?;

    print_summary(driver.as_ref());
    Ok(())
}

fn cmd_copy(source: PathBuf, dest: PathBuf) -> Result<()> {
    let driver = from_image(Settings::new(source.clone()))
        .with_context(|| format!("loading {}", source.display()))?;
    driver
        .write_image(&dest)
        .with_context(|| format!("writing {}", dest.display()))?;

    println!(
        "copied {} -> {} ({} pixels)",
        source.display(),
        dest.display(),
        driver.size()
    );
    Ok(())
}

fn print_summary(driver: &dyn ImageDriver) {
    let extents: Vec<String> = driver.extents().iter().map(|n| n.to_string()).collect();
    println!("file:    {}", driver.settings().source.display());
    println!("type:    {}", driver.type_descr());
    println!("shape:   {}", extents.join("x"));
    println!("pixels:  {}", driver.size());
    println!("stats:   {}", driver.stats());
}
