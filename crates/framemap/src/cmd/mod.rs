use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod inspect;
pub mod publish;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Publish synthetic test frames into a directory and write an index
    /// snapshot beside them.
    Publish(PublishArgs),
    /// Read an index snapshot and print channels, histories, or one record.
    Inspect(InspectArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Publish(args) => publish::run(args, format),
        Command::Inspect(args) => inspect::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct PublishArgs {
    /// Directory to write backing files and index.json into.
    pub out_dir: PathBuf,
    /// Frame width in pixels.
    #[arg(long, default_value_t = 64)]
    pub width: u32,
    /// Frame height in pixels.
    #[arg(long, default_value_t = 64)]
    pub height: u32,
    /// Pixel depth in bits (8 or 16).
    #[arg(long, default_value_t = 16)]
    pub depth: u8,
    /// Channel names (comma-separated).
    #[arg(long, value_delimiter = ',', default_value = "DAPI,GFP")]
    pub channels: Vec<String>,
    /// Frames to publish per channel.
    #[arg(long, default_value_t = 1)]
    pub frames: u32,
    /// Acquisition prefix used in filenames and metadata.
    #[arg(long, default_value = "acq")]
    pub prefix: String,
    /// Display-window name recorded in metadata.
    #[arg(long, default_value = "preview")]
    pub window_name: String,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Path to an index.json written by `framemap publish`.
    pub index: PathBuf,
    /// Show one channel's history instead of the summary.
    #[arg(long, conflicts_with = "filename")]
    pub channel: Option<String>,
    /// Look up the record for one backing-file path.
    #[arg(long, conflicts_with = "channel")]
    pub filename: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub struct VersionArgs {
    /// Show extended build information.
    #[arg(long)]
    pub extended: bool,
}
