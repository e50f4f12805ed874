use std::fs;

use bytes::Bytes;
use framemap::{Frame, FrameChannelManager, FrameCoords, FrameEvent, PixelData};
use tracing::info;

use crate::cmd::PublishArgs;
use crate::exit::{io_error, publish_error, CliError, CliResult, INTERNAL, SUCCESS, USAGE};
use crate::output::{print_snapshot, OutputFormat};

pub fn run(args: PublishArgs, format: OutputFormat) -> CliResult<i32> {
    if args.channels.is_empty() {
        return Err(CliError::new(USAGE, "at least one channel name required"));
    }

    fs::create_dir_all(&args.out_dir)
        .map_err(|err| io_error("failed creating output directory", err))?;

    let manager = FrameChannelManager::new();
    let mut published = 0usize;

    for time in 0..args.frames {
        for (channel_index, channel) in args.channels.iter().enumerate() {
            let path = args.out_dir.join(format!(
                "{}_{}_t{:04}.dat",
                args.prefix, channel, time
            ));
            let event = FrameEvent {
                frame: test_pattern(&args, time, channel_index as u32)?,
                coords: FrameCoords {
                    time,
                    stage_position: 0,
                    z: 0,
                    channel: channel_index as u32,
                },
                path,
                prefix: args.prefix.clone(),
                window_name: args.window_name.clone(),
                channel_names: args.channels.clone(),
            };
            manager
                .publish(&event)
                .map_err(|err| publish_error("publish failed", err))?;
            published += 1;
        }
    }

    let snapshot = manager.index().snapshot();
    let index_path = args.out_dir.join("index.json");
    let json = serde_json::to_string_pretty(&snapshot)
        .map_err(|err| CliError::new(INTERNAL, format!("failed encoding index: {err}")))?;
    fs::write(&index_path, json).map_err(|err| io_error("failed writing index.json", err))?;

    info!(
        frames = published,
        index = ?index_path,
        "publish complete"
    );
    print_snapshot(&snapshot, format);

    Ok(SUCCESS)
}

/// Deterministic ramp pattern so a consumer can verify byte layout by eye.
fn test_pattern(args: &PublishArgs, time: u32, channel: u32) -> CliResult<Frame> {
    let samples = args.width as usize * args.height as usize;
    let pixels = match args.depth {
        8 => {
            let data: Vec<u8> = (0..samples)
                .map(|i| (i as u32 + time + channel) as u8)
                .collect();
            PixelData::Gray8(Bytes::from(data))
        }
        16 => {
            let data: Vec<u16> = (0..samples)
                .map(|i| (i as u32 + time * 256 + channel) as u16)
                .collect();
            PixelData::Gray16(data)
        }
        other => {
            return Err(CliError::new(
                USAGE,
                format!("unsupported --depth {other}, expected 8 or 16"),
            ))
        }
    };
    Ok(Frame::new(pixels, args.width, args.height))
}
