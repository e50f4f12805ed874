use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::record::FrameMetadata;

/// Concurrent per-channel frame index.
///
/// Three mappings behind one mutex: channel → latest filename (overwritten
/// each publish), channel → metadata history (append-only, publish order),
/// and filename → metadata for reverse lookup. [`ChannelIndex::update`]
/// applies all three inside a single critical section, so to any observer the
/// update is indistinguishable from one atomic write: a reader can never see
/// a latest filename whose metadata is missing, or vice versa.
#[derive(Debug, Default)]
pub struct ChannelIndex {
    state: Mutex<IndexState>,
}

#[derive(Debug, Default)]
struct IndexState {
    latest: HashMap<String, PathBuf>,
    history: HashMap<String, Vec<Arc<FrameMetadata>>>,
    by_filename: HashMap<PathBuf, Arc<FrameMetadata>>,
}

impl ChannelIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// File a published frame: overwrite the channel's latest filename,
    /// append to the channel's history, and record the filename → metadata
    /// mapping, as one atomic step.
    pub fn update(&self, channel: &str, filename: &Path, record: Arc<FrameMetadata>) {
        let mut state = self.lock();
        state
            .latest
            .insert(channel.to_string(), filename.to_path_buf());
        state
            .history
            .entry(channel.to_string())
            .or_default()
            .push(Arc::clone(&record));
        state.by_filename.insert(filename.to_path_buf(), record);
        debug!(channel, ?filename, "channel index updated");
    }

    /// Latest backing-file path published for `channel`.
    pub fn latest_filename(&self, channel: &str) -> Option<PathBuf> {
        self.lock().latest.get(channel).cloned()
    }

    /// All records published for `channel`, in publish order.
    pub fn history(&self, channel: &str) -> Vec<Arc<FrameMetadata>> {
        self.lock().history.get(channel).cloned().unwrap_or_default()
    }

    /// Reverse lookup: the record filed under a backing-file path.
    pub fn metadata_for(&self, filename: &Path) -> Option<Arc<FrameMetadata>> {
        self.lock().by_filename.get(filename).cloned()
    }

    /// Channel names with at least one published frame, sorted.
    pub fn channels(&self) -> Vec<String> {
        let mut names: Vec<String> = self.lock().latest.keys().cloned().collect();
        names.sort();
        names
    }

    /// Point-in-time copy of the whole index, suitable for serializing to a
    /// consumer process.
    pub fn snapshot(&self) -> IndexSnapshot {
        let state = self.lock();
        let mut channels = BTreeMap::new();
        for (channel, records) in &state.history {
            channels.insert(
                channel.clone(),
                ChannelSnapshot {
                    latest: state.latest.get(channel).cloned(),
                    history: records.iter().map(|record| (**record).clone()).collect(),
                },
            );
        }
        let by_filename = state
            .by_filename
            .iter()
            .map(|(path, record)| (path.clone(), (**record).clone()))
            .collect();
        IndexSnapshot {
            channels,
            by_filename,
        }
    }

    fn lock(&self) -> MutexGuard<'_, IndexState> {
        // Poisoning means an update panicked mid-write and the three maps may
        // disagree with each other; refuse to serve torn state.
        match self.state.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("channel index lock poisoned"),
        }
    }
}

/// Serializable copy of the index at one instant.
///
/// This is the document handed to the out-of-process consumer; it mirrors
/// the three live mappings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexSnapshot {
    pub channels: BTreeMap<String, ChannelSnapshot>,
    pub by_filename: BTreeMap<PathBuf, FrameMetadata>,
}

/// One channel's slice of an [`IndexSnapshot`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelSnapshot {
    pub latest: Option<PathBuf>,
    pub history: Vec<FrameMetadata>,
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::record::FrameCoords;

    fn record_for(channel: &str, time: u32) -> Arc<FrameMetadata> {
        let names = vec![channel.to_string()];
        Arc::new(
            FrameMetadata::new(
                "acq",
                "preview",
                FrameCoords {
                    time,
                    ..Default::default()
                },
                64,
                64,
                2,
                &names,
            )
            .unwrap(),
        )
    }

    #[test]
    fn update_makes_all_three_lookups_visible() {
        let index = ChannelIndex::new();
        let path = PathBuf::from("/tmp/frames/gfp_t0.dat");

        index.update("GFP", &path, record_for("GFP", 0));

        assert_eq!(index.latest_filename("GFP"), Some(path.clone()));
        assert_eq!(index.history("GFP").len(), 1);
        assert_eq!(index.metadata_for(&path).unwrap().channel_name, "GFP");
    }

    #[test]
    fn latest_overwrites_history_appends() {
        let index = ChannelIndex::new();
        let first = PathBuf::from("/tmp/frames/gfp_t0.dat");
        let second = PathBuf::from("/tmp/frames/gfp_t1.dat");

        index.update("GFP", &first, record_for("GFP", 0));
        index.update("GFP", &second, record_for("GFP", 1));

        assert_eq!(index.latest_filename("GFP"), Some(second));
        let history = index.history("GFP");
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].time, 0);
        assert_eq!(history[1].time, 1);
    }

    #[test]
    fn channels_are_isolated() {
        let index = ChannelIndex::new();
        index.update(
            "DAPI",
            Path::new("/tmp/frames/dapi_t0.dat"),
            record_for("DAPI", 0),
        );
        index.update(
            "GFP",
            Path::new("/tmp/frames/gfp_t0.dat"),
            record_for("GFP", 0),
        );

        assert_eq!(
            index.latest_filename("DAPI"),
            Some(PathBuf::from("/tmp/frames/dapi_t0.dat"))
        );
        assert_eq!(index.history("GFP").len(), 1);
        assert_eq!(index.channels(), vec!["DAPI".to_string(), "GFP".to_string()]);
    }

    #[test]
    fn unknown_channel_reads_are_empty() {
        let index = ChannelIndex::new();
        assert_eq!(index.latest_filename("nope"), None);
        assert!(index.history("nope").is_empty());
        assert_eq!(index.metadata_for(Path::new("/tmp/nope.dat")), None);
    }

    #[test]
    fn concurrent_updates_lose_nothing() {
        let index = Arc::new(ChannelIndex::new());
        let mut handles = Vec::new();

        for channel in ["a", "b", "c", "d"] {
            let index = Arc::clone(&index);
            handles.push(thread::spawn(move || {
                for t in 0..50u32 {
                    let path = PathBuf::from(format!("/tmp/frames/{channel}_t{t}.dat"));
                    index.update(channel, &path, record_for(channel, t));
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        for channel in ["a", "b", "c", "d"] {
            assert_eq!(index.history(channel).len(), 50);
            assert_eq!(
                index.latest_filename(channel),
                Some(PathBuf::from(format!("/tmp/frames/{channel}_t49.dat")))
            );
        }
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let index = ChannelIndex::new();
        let path = PathBuf::from("/tmp/frames/gfp_t0.dat");
        index.update("GFP", &path, record_for("GFP", 0));

        let snapshot = index.snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        let restored: IndexSnapshot = serde_json::from_str(&json).unwrap();

        let channel = &restored.channels["GFP"];
        assert_eq!(channel.latest, Some(path.clone()));
        assert_eq!(channel.history.len(), 1);
        assert_eq!(restored.by_filename[&path].channel_name, "GFP");
    }
}
