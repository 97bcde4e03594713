// asascan - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading
// 3. Logging initialisation (debug mode support)
// 4. Scan and report, mapped onto the process exit code

use asascan::{app, platform, util};
use clap::Parser;
use std::io;
use std::path::PathBuf;

/// asascan - Cisco ASA log triage.
///
/// Lists the distinct message sources, ASA message types and IP addresses
/// found in a firewall log file.
#[derive(Parser, Debug)]
#[command(name = "asascan", version, about)]
struct Cli {
    /// Log file to analyse.
    file: PathBuf,

    /// config.toml to use instead of the one in the platform config directory.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    // Usage errors exit 1, not clap's default of 2. --help and --version
    // are also reported through this path and exit 0.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    // Config is read first so its [logging] level can take part in the
    // subscriber setup; its warnings are emitted once logging is up.
    let (config_path, explicit) = match cli.config {
        Some(ref path) => (path.clone(), true),
        None => (platform::config::PlatformPaths::resolve().config_file(), false),
    };
    let (config, mut warnings) = platform::config::load_config(&config_path, explicit);

    util::logging::init(cli.debug, config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        config = %config_path.display(),
        "asascan starting"
    );

    let (scanner, pattern_warnings) = app::run::build_scanner(&config);
    warnings.extend(pattern_warnings);
    for warning in &warnings {
        tracing::debug!(error = %warning, "Configuration warning");
        eprintln!("Warning: {warning}");
    }

    let stdout = io::stdout();
    let out = io::BufWriter::new(stdout.lock());
    if let Err(e) = app::run::run(&cli.file, &scanner, out) {
        tracing::error!(error = %e, "Scan failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
