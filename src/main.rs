//! ptc CLI entry point.

use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser};
use log::debug;

use ptc::{Config, PtcError, add_features, list_features, remove_features};

/// Project Template Creator.
#[derive(Parser, Debug)]
#[command(name = "ptc", version = env!("PTC_VERSION"), about = "Project Template Creator")]
struct Cli {
    /// Lists features
    #[arg(short = 'l', long = "list-features")]
    list_features: bool,

    /// Add features
    #[arg(short = 'a', long = "add", num_args = 1.., value_name = "FEATURE")]
    add: Vec<String>,

    /// Removes features
    #[arg(short = 'r', long = "remove", num_args = 1.., value_name = "FEATURE")]
    remove: Vec<String>,

    /// Template directory (defaults to the directory holding this executable)
    #[arg(short = 't', long = "templates", env = "PTC_TEMPLATES")]
    templates: Option<PathBuf>,

    /// JSON feature catalogue to use instead of the built-in one
    #[arg(short = 'c', long = "catalogue")]
    catalogue: Option<PathBuf>,

    /// Project directory to work in (defaults to the current directory)
    #[arg(short = 'C', long = "directory")]
    directory: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = match build_config(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    };
    debug!("{config:?}");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let result = if cli.list_features {
        config
            .catalogue()
            .map_err(PtcError::from)
            .and_then(|catalogue| list_features(&catalogue, &mut out))
    } else if !cli.remove.is_empty() {
        remove_features(&config, cli.remove.as_slice(), &mut out).map(|_| ())
    } else if !cli.add.is_empty() {
        add_features(&config, cli.add.as_slice(), &mut out).map(|_| ())
    } else {
        Ok(())
    };

    if let Err(e) = out.flush() {
        eprintln!("error: cannot flush stdout: {}", e);
        process::exit(1);
    }

    if let Err(e) = result {
        eprintln!("error: {}", e);
        if matches!(e, PtcError::DangerousDirectory(_)) {
            print_dangerous_directory_hint();
        }
        process::exit(1);
    }
}

fn build_config(cli: &Cli) -> io::Result<Config> {
    let destination = match &cli.directory {
        Some(dir) => dir.clone(),
        None => env::current_dir()?,
    };
    let template_root = match &cli.templates {
        Some(dir) => dir.clone(),
        None => {
            let exe = env::current_exe()?;
            exe.parent().map(|p| p.to_path_buf()).unwrap_or_default()
        }
    };

    let mut config = Config::new(template_root, destination);
    if let Some(path) = &cli.catalogue {
        config = config.with_catalogue(path);
    }
    Ok(config)
}

fn print_dangerous_directory_hint() {
    eprintln!();
    eprintln!("       ptc is supposed to be executed from the destination");
    eprintln!("       directory, not from the template directory.");
    eprintln!();
    eprintln!("  example:");
    eprintln!();
    eprintln!("  $ mkdir project");
    eprintln!("  $ cd project");
    eprintln!("  $ ptc --add linux sonar");
    eprintln!();
}
