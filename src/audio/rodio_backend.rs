//! `rodio` output: one `Sink` per opened track on a shared output stream.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use lofty::prelude::AudioFile;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};

use crate::error::AudioError;
use crate::library::SourceHandle;

use super::backend::{AudioBackend, AudioHandle};
use super::types::{AudioEvent, EventSink};

pub struct RodioBackend {
    stream: OutputStream,
}

impl RodioBackend {
    /// Open the default output device.
    pub fn open_default() -> Result<Self, AudioError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| AudioError::NoOutputDevice(e.to_string()))?;
        // rodio logs to stderr when the stream is dropped, which would land on
        // top of the TUI.
        stream.log_on_drop(false);
        Ok(Self { stream })
    }
}

impl AudioBackend for RodioBackend {
    type Handle = RodioHandle;

    fn load(&mut self, source: &SourceHandle) -> Result<RodioHandle, AudioError> {
        let path = source.path();
        let (decoder, duration) = open_decoder(path)?;

        let sink = Sink::connect_new(self.stream.mixer());
        sink.append(decoder);
        sink.pause();

        log::debug!("audio: opened {} ({duration:?})", path.display());
        Ok(RodioHandle {
            sink,
            duration,
            events: None,
            progress: Progress::default(),
        })
    }
}

/// Open `path` as a seekable decoder and work out its length.
///
/// Going through `File` lets rodio record the byte length, which MP3 needs
/// for backward seeks and for a known total duration.
pub(super) fn open_decoder(
    path: &Path,
) -> Result<(Decoder<BufReader<File>>, Option<Duration>), AudioError> {
    let file = File::open(path).map_err(|e| AudioError::Open {
        path: path.to_path_buf(),
        source: e,
    })?;

    let decoder = Decoder::try_from(file).map_err(|e| AudioError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    // Many MP3 streams have no length header; lofty reads it from frames.
    let duration = decoder
        .total_duration()
        .or_else(|| read_duration(path));
    Ok((decoder, duration))
}

fn read_duration(path: &Path) -> Option<Duration> {
    let tagged = lofty::read_from_path(path).ok()?;
    let d = tagged.properties().duration();
    (!d.is_zero()).then_some(d)
}

/// What a handle has already told its listener since the last attach.
#[derive(Debug, Default)]
pub(super) struct Progress {
    announced: bool,
    ended: bool,
    last_pos: Option<Duration>,
}

impl Progress {
    /// A new listener hears the duration again and the next position.
    pub(super) fn reattach(&mut self) {
        self.announced = false;
        self.last_pos = None;
    }

    pub(super) fn seeked(&mut self) {
        self.last_pos = None;
    }

    /// Emit whatever changed since the last report. `drained` is true once
    /// the sink has played everything queued on it.
    pub(super) fn report(
        &mut self,
        events: &EventSink,
        duration: Option<Duration>,
        drained: bool,
        pos: Duration,
    ) {
        if !self.announced {
            if let Some(d) = duration {
                events.emit(AudioEvent::MetadataLoaded(d));
            }
            self.announced = true;
        }

        if self.ended {
            return;
        }
        if drained {
            self.ended = true;
            events.emit(AudioEvent::Ended);
            return;
        }

        if self.last_pos != Some(pos) {
            self.last_pos = Some(pos);
            events.emit(AudioEvent::TimeUpdate(pos));
        }
    }
}

pub struct RodioHandle {
    sink: Sink,
    duration: Option<Duration>,
    events: Option<EventSink>,
    progress: Progress,
}

impl AudioHandle for RodioHandle {
    fn play(&mut self) {
        self.sink.play();
    }

    fn pause(&mut self) {
        self.sink.pause();
    }

    fn seek(&mut self, position: Duration) -> Result<(), AudioError> {
        self.sink.try_seek(position).map_err(|e| {
            log::debug!("audio: seek to {position:?} failed: {e}");
            AudioError::Seek(position)
        })?;
        self.progress.seeked();
        Ok(())
    }

    fn attach(&mut self, sink: EventSink) {
        self.events = Some(sink);
        self.progress.reattach();
    }

    fn detach(&mut self) {
        self.events = None;
    }

    fn poll(&mut self) {
        let Some(events) = &self.events else {
            return;
        };
        self.progress
            .report(events, self.duration, self.sink.empty(), self.sink.get_pos());
    }
}
