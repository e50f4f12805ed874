use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use framemap::index::{ChannelSnapshot, IndexSnapshot};
use framemap::FrameMetadata;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

pub fn print_record(record: &FrameMetadata, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(record).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["CHANNEL", "T", "POS", "Z", "GEOMETRY", "WINDOW"])
                .add_row(vec![
                    record.channel_name.clone(),
                    record.time.to_string(),
                    record.stage_position.to_string(),
                    record.z.to_string(),
                    geometry(record),
                    record.window_name.clone(),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "channel={} t={} pos={} z={} {} window={}",
                record.channel_name,
                record.time,
                record.stage_position,
                record.z,
                geometry(record),
                record.window_name
            );
        }
    }
}

pub fn print_snapshot(snapshot: &IndexSnapshot, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(snapshot).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["CHANNEL", "FRAMES", "LATEST"]);
            for (channel, slice) in &snapshot.channels {
                table.add_row(vec![
                    channel.clone(),
                    slice.history.len().to_string(),
                    latest_of(slice),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for (channel, slice) in &snapshot.channels {
                println!(
                    "{channel}: {} frames, latest={}",
                    slice.history.len(),
                    latest_of(slice)
                );
            }
        }
    }
}

fn latest_of(slice: &ChannelSnapshot) -> String {
    slice
        .latest
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn geometry(record: &FrameMetadata) -> String {
    format!(
        "{}x{}x{}B",
        record.width, record.height, record.bytes_per_pixel
    )
}
