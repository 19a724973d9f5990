use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Build a reconciled emoji dataset from CLDR, Unicode and GitHub sources"
)]
pub struct EmojiFetchArgs {
    /// Path to KDL config file (built-in sources are used if it does not exist)
    #[arg(short = 'c', long, default_value = "emoji.kdl")]
    pub config: PathBuf,

    /// Output file, overriding the config
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Verbose output
    #[arg(short = 'v', long)]
    pub verbose: bool,
}
