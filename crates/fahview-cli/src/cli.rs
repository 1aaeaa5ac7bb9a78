use clap::{Args, Parser};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "fahview contributors",
    version,
    about = "fahview - Inspect the molecules simulated by a running molecular-dynamics daemon and detect (and repair) periodic-boundary fragmentation.",
    help_template = HELP_TEMPLATE,
)]
pub struct Cli {
    #[command(flatten)]
    pub inspect: InspectArgs,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel decoding.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, value_name = "NUM")]
    pub threads: Option<usize>,
}

/// Connection and analysis settings. Each flag overrides the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct InspectArgs {
    // --- Connection ---
    /// Host name or address of the daemon's command server.
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// TCP port of the daemon's command server.
    #[arg(long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Password sent with `auth` after the greeting.
    #[arg(long, value_name = "PASSWORD")]
    pub password: Option<String>,

    /// Give up on a response after this many seconds without data.
    #[arg(long, value_name = "SECS")]
    pub read_timeout: Option<u64>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Analysis ---
    /// Grid cell size used to decide which atoms are spatially connected.
    #[arg(short = 'b', long, value_name = "FLOAT")]
    pub bond_length: Option<f64>,

    /// Report fragmentation without translating fragments back together.
    #[arg(long)]
    pub no_reassemble: bool,
}
