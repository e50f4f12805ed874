//! Simulates an acquisition host publishing two channels concurrently.
//!
//! One `FrameChannelManager` is shared across per-channel publisher threads,
//! the way a host event dispatcher fans frames out. Afterwards the index is
//! queried the way a consumer process would.

use std::sync::Arc;
use std::thread;

use framemap::{Frame, FrameChannelManager, FrameCoords, FrameEvent, PixelData};

const FRAMES_PER_CHANNEL: u32 = 5;
const WIDTH: u32 = 256;
const HEIGHT: u32 = 256;

fn main() {
    let dir = std::env::temp_dir().join(format!("framemap-sim-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("temp dir should be creatable");

    let channel_names = vec!["DAPI".to_string(), "GFP".to_string()];
    let manager = Arc::new(FrameChannelManager::new());

    let mut handles = Vec::new();
    for (channel_index, channel) in channel_names.iter().enumerate() {
        let manager = Arc::clone(&manager);
        let channel = channel.clone();
        let channel_names = channel_names.clone();
        let dir = dir.clone();

        handles.push(thread::spawn(move || {
            for time in 0..FRAMES_PER_CHANNEL {
                let samples = (WIDTH * HEIGHT) as usize;
                let pixels: Vec<u16> = (0..samples)
                    .map(|i| (i as u32 + time * 1000) as u16)
                    .collect();
                let event = FrameEvent {
                    frame: Frame::new(PixelData::Gray16(pixels), WIDTH, HEIGHT),
                    coords: FrameCoords {
                        time,
                        stage_position: 0,
                        z: 0,
                        channel: channel_index as u32,
                    },
                    path: dir.join(format!("sim_{channel}_t{time:04}.dat")),
                    prefix: "sim".to_string(),
                    window_name: "simulated acquisition".to_string(),
                    channel_names: channel_names.clone(),
                };
                manager.publish(&event).expect("publish should succeed");
            }
        }));
    }
    for handle in handles {
        handle.join().expect("publisher thread should not panic");
    }

    // Consumer view.
    for channel in manager.index().channels() {
        let latest = manager
            .index()
            .latest_filename(&channel)
            .expect("published channel should have a latest frame");
        let history = manager.index().history(&channel);
        println!(
            "{channel}: {} frames, latest {}",
            history.len(),
            latest.display()
        );
        let record = manager
            .index()
            .metadata_for(&latest)
            .expect("latest frame should have metadata");
        println!(
            "  latest record: t={} {}x{} {}B/px",
            record.time, record.width, record.height, record.bytes_per_pixel
        );
    }

    let _ = std::fs::remove_dir_all(&dir);
}
