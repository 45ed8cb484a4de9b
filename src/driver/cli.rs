use std::path::PathBuf;

/// Command-line arguments for the translator.
#[derive(Debug, clap::Parser)]
#[command(
    name = "ccr",
    version,
    about = "Translates a subset of C into semantically equivalent Rust source"
)]
pub struct Cli {
    /// Input C source file.
    pub input: PathBuf,

    /// Write the emitted Rust here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
