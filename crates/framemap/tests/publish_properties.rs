//! End-to-end properties of the publish path: file layout, index
//! consistency, failure atomicity, and cross-channel isolation.

use std::path::Path;
use std::sync::Arc;
use std::thread;

use bytes::Bytes;
use framemap::{
    Frame, FrameChannelManager, FrameCoords, FrameEvent, PixelData, PublishError,
};
use framemap::index::IndexError;
use framemap::store::StoreError;

fn channel_table() -> Vec<String> {
    vec!["DAPI".to_string(), "GFP".to_string(), "RFP".to_string()]
}

fn gray16_event(dir: &Path, channel: u32, time: u32, fill: u16) -> FrameEvent {
    let width = 32u32;
    let height = 24u32;
    let pixels = vec![fill; (width * height) as usize];
    FrameEvent {
        frame: Frame::new(PixelData::Gray16(pixels), width, height),
        coords: FrameCoords {
            time,
            stage_position: 0,
            z: 0,
            channel,
        },
        path: dir.join(format!("ch{channel}_t{time:04}.dat")),
        prefix: "acq".to_string(),
        window_name: "preview".to_string(),
        channel_names: channel_table(),
    }
}

#[test]
fn backing_file_size_matches_geometry() {
    let dir = tempfile::tempdir().unwrap();
    let manager = FrameChannelManager::new();

    let event = gray16_event(dir.path(), 0, 0, 7);
    manager.publish(&event).unwrap();
    assert_eq!(
        std::fs::metadata(&event.path).unwrap().len(),
        32 * 24 * 2u64
    );

    let mut event8 = gray16_event(dir.path(), 1, 0, 0);
    event8.frame = Frame::new(PixelData::Gray8(Bytes::from(vec![9u8; 32 * 24])), 32, 24);
    event8.path = dir.path().join("gray8.dat");
    manager.publish(&event8).unwrap();
    assert_eq!(
        std::fs::metadata(&event8.path).unwrap().len(),
        32 * 24u64
    );
}

#[test]
fn sixteen_bit_frames_land_in_native_byte_order() {
    let dir = tempfile::tempdir().unwrap();
    let manager = FrameChannelManager::new();

    let event = gray16_event(dir.path(), 0, 0, 0x1234);
    manager.publish(&event).unwrap();

    let contents = std::fs::read(&event.path).unwrap();
    assert_eq!(&contents[..2], &0x1234u16.to_ne_bytes());
}

#[test]
fn metadata_is_queryable_immediately_after_publish() {
    let dir = tempfile::tempdir().unwrap();
    let manager = FrameChannelManager::new();

    let event = gray16_event(dir.path(), 1, 3, 0);
    manager.publish(&event).unwrap();

    let record = manager
        .index()
        .metadata_for(&event.path)
        .expect("record should be present the moment publish returns");
    assert_eq!(record.width, 32);
    assert_eq!(record.height, 24);
    assert_eq!(record.bytes_per_pixel, 2);
    assert_eq!(record.channel_name, "GFP");
    assert_eq!(record.time, 3);
}

#[test]
fn republishing_a_slot_is_last_writer_wins() {
    let dir = tempfile::tempdir().unwrap();
    let manager = FrameChannelManager::new();

    let mut first = gray16_event(dir.path(), 0, 0, 0x1111);
    first.path = dir.path().join("slot.dat");
    let mut second = gray16_event(dir.path(), 0, 1, 0x2222);
    second.path = first.path.clone();

    manager.publish(&first).unwrap();
    manager.publish(&second).unwrap();

    let contents = std::fs::read(&first.path).unwrap();
    assert_eq!(contents.len(), 32 * 24 * 2);
    assert_eq!(&contents[..2], &0x2222u16.to_ne_bytes());
    assert_eq!(
        manager.index().latest_filename("DAPI"),
        Some(first.path.clone())
    );
    // History keeps both publishes, in order.
    let history = manager.index().history("DAPI");
    assert_eq!(history.len(), 2);
    assert_eq!(history[1].time, 1);
}

#[test]
fn store_failure_leaves_previous_index_state_intact() {
    let dir = tempfile::tempdir().unwrap();
    let manager = FrameChannelManager::new();

    let good = gray16_event(dir.path(), 1, 0, 1);
    manager.publish(&good).unwrap();

    let mut bad = gray16_event(dir.path(), 1, 1, 2);
    bad.path = dir.path().join("missing-dir").join("frame.dat");
    let err = manager.publish(&bad).unwrap_err();

    assert!(matches!(
        err,
        PublishError::Store(StoreError::Create { .. })
    ));
    assert_eq!(
        manager.index().latest_filename("GFP"),
        Some(good.path.clone()),
        "failed publish must not disturb the last good frame"
    );
    assert!(manager.index().metadata_for(&bad.path).is_none());
    assert_eq!(manager.index().history("GFP").len(), 1);
}

#[test]
fn out_of_range_channel_produces_no_file_and_no_index_entry() {
    let dir = tempfile::tempdir().unwrap();
    let manager = FrameChannelManager::new();

    let event = gray16_event(dir.path(), 5, 0, 0);
    let err = manager.publish(&event).unwrap_err();

    assert!(matches!(
        err,
        PublishError::Index(IndexError::ChannelOutOfRange { index: 5, len: 3 })
    ));
    assert!(!event.path.exists());
    assert!(manager.index().channels().is_empty());
}

#[test]
fn empty_frame_is_rejected_without_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let manager = FrameChannelManager::new();

    let mut event = gray16_event(dir.path(), 0, 0, 0);
    event.frame = Frame::new(PixelData::Gray8(Bytes::new()), 0, 0);

    let err = manager.publish(&event).unwrap_err();
    assert!(matches!(
        err,
        PublishError::Store(StoreError::EmptyFrame { .. })
    ));
    assert!(!event.path.exists());
    assert!(manager.index().channels().is_empty());
}

#[test]
fn concurrent_publishes_to_distinct_channels_do_not_interfere() {
    let dir = tempfile::tempdir().unwrap();
    let manager = Arc::new(FrameChannelManager::new());
    let frames_per_channel = 16u32;

    let mut handles = Vec::new();
    for channel in 0..3u32 {
        let manager = Arc::clone(&manager);
        let dir = dir.path().to_path_buf();
        handles.push(thread::spawn(move || {
            for time in 0..frames_per_channel {
                let event = gray16_event(&dir, channel, time, channel as u16);
                manager.publish(&event).unwrap();
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    for (channel_index, channel) in channel_table().iter().enumerate() {
        let expected_latest = dir.path().join(format!(
            "ch{channel_index}_t{:04}.dat",
            frames_per_channel - 1
        ));
        assert_eq!(
            manager.index().latest_filename(channel),
            Some(expected_latest),
            "each channel's latest filename reflects only its own writes"
        );
        let history = manager.index().history(channel);
        assert_eq!(history.len(), frames_per_channel as usize);
        for (i, record) in history.iter().enumerate() {
            assert_eq!(record.time, i as u32, "history preserves publish order");
            assert_eq!(record.channel_index, channel_index as u32);
        }
    }
}

#[test]
fn snapshot_reflects_the_live_index() {
    let dir = tempfile::tempdir().unwrap();
    let manager = FrameChannelManager::new();

    manager.publish(&gray16_event(dir.path(), 0, 0, 1)).unwrap();
    manager.publish(&gray16_event(dir.path(), 0, 1, 2)).unwrap();
    manager.publish(&gray16_event(dir.path(), 2, 0, 3)).unwrap();

    let snapshot = manager.index().snapshot();
    assert_eq!(snapshot.channels.len(), 2);
    assert_eq!(snapshot.channels["DAPI"].history.len(), 2);
    assert_eq!(
        snapshot.channels["RFP"].latest,
        manager.index().latest_filename("RFP")
    );
    assert_eq!(snapshot.by_filename.len(), 3);
}
