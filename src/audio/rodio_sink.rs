//! Audio sink backed by rodio.

use super::{AudioSink, Cue, Track};
use crate::settings::AudioSettings;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use std::collections::HashMap;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Clip {
    Crash,
    Landing,
    Thrust,
    Music,
}

impl From<Cue> for Clip {
    fn from(cue: Cue) -> Self {
        match cue {
            Cue::Crash => Clip::Crash,
            Cue::Landing => Clip::Landing,
        }
    }
}

impl From<Track> for Clip {
    fn from(track: Track) -> Self {
        match track {
            Track::Thrust => Clip::Thrust,
            Track::Music => Clip::Music,
        }
    }
}

type ClipData = Arc<[u8]>;

pub struct RodioSink {
    // Dropping the stream silences everything; keep it alive with the sink.
    _stream: OutputStream,
    handle: OutputStreamHandle,
    volume: f32,
    clips: HashMap<Clip, ClipData>,
    loops: HashMap<Track, Sink>,
}

impl RodioSink {
    /// Open the default output device and load every configured asset.
    ///
    /// Returns `None` when no output device is available. Individual assets
    /// that are missing or undecodable are skipped with a warning.
    pub fn open(settings: &AudioSettings) -> Option<Self> {
        let (stream, handle) = match OutputStream::try_default() {
            Ok(pair) => pair,
            Err(e) => {
                log::warn!("No audio output device ({}) - audio disabled", e);
                return None;
            }
        };

        let dir = settings.asset_dir.as_path();
        let mut clips = HashMap::new();
        let wanted = [
            (Clip::Thrust, Some(settings.thrust.as_str())),
            (Clip::Crash, Some(settings.crash.as_str())),
            (Clip::Landing, Some(settings.landing.as_str())),
            (Clip::Music, settings.music.as_deref()),
        ];
        for (clip, name) in wanted {
            if let Some(data) = name.and_then(|name| load_clip(dir, name)) {
                clips.insert(clip, data);
            }
        }
        log::info!(
            "Audio ready: {} of {} clips loaded from {}",
            clips.len(),
            wanted.len(),
            dir.display()
        );

        Some(Self {
            _stream: stream,
            handle,
            volume: settings.volume,
            clips,
            loops: HashMap::new(),
        })
    }

    fn decoder(&self, clip: Clip) -> Option<Decoder<Cursor<ClipData>>> {
        let data = self.clips.get(&clip)?;
        Decoder::new(Cursor::new(Arc::clone(data))).ok()
    }

    fn new_sink(&self) -> Option<Sink> {
        match Sink::try_new(&self.handle) {
            Ok(sink) => {
                sink.set_volume(self.volume);
                Some(sink)
            }
            Err(e) => {
                log::warn!("Could not open audio sink: {}", e);
                None
            }
        }
    }
}

/// Read an asset and confirm it decodes.
fn load_clip(dir: &Path, name: &str) -> Option<ClipData> {
    let path = dir.join(name);
    let bytes: ClipData = match fs::read(&path) {
        Ok(bytes) => bytes.into(),
        Err(e) => {
            log::warn!("Sound {} unavailable ({}) - cue disabled", path.display(), e);
            return None;
        }
    };
    if let Err(e) = Decoder::new(Cursor::new(Arc::clone(&bytes))) {
        log::warn!("Sound {} not decodable ({}) - cue disabled", path.display(), e);
        return None;
    }
    Some(bytes)
}

impl AudioSink for RodioSink {
    fn play(&mut self, cue: Cue) {
        let Some(source) = self.decoder(cue.into()) else {
            return;
        };
        if let Some(sink) = self.new_sink() {
            sink.append(source);
            sink.detach();
        }
    }

    fn start_loop(&mut self, track: Track) {
        if self.loops.contains_key(&track) {
            return;
        }
        let Some(source) = self.decoder(track.into()) else {
            return;
        };
        if let Some(sink) = self.new_sink() {
            sink.append(source.repeat_infinite());
            self.loops.insert(track, sink);
        }
    }

    fn stop_loop(&mut self, track: Track) {
        if let Some(sink) = self.loops.remove(&track) {
            sink.stop();
        }
    }
}
