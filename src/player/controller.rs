use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use crate::audio::{AudioBackend, AudioEvent, AudioHandle, BindingId, BoundEvent, EventSink};
use crate::error::PlaybackError;
use crate::library::SourceHandle;
use crate::playlist::{Playlist, Track, TrackId};

use super::state::PlaybackState;

struct Binding<H> {
    id: BindingId,
    track: TrackId,
    source: SourceHandle,
    handle: H,
}

/// Owns the playback cursor and the single audio handle bound to it.
///
/// The controller never holds the playlist; operations that need to look a
/// track up borrow it. After removing a track from the playlist the caller
/// must report it through [`PlaybackController::on_track_removed`].
pub struct PlaybackController<B: AudioBackend> {
    backend: B,
    state: PlaybackState,
    current: Option<usize>,
    elapsed: Duration,
    duration: Option<Duration>,
    bound: Option<Binding<B::Handle>>,
    last_binding: BindingId,
    events_tx: Sender<BoundEvent>,
    events_rx: Receiver<BoundEvent>,
}

impl<B: AudioBackend> PlaybackController<B> {
    pub fn new(backend: B) -> Self {
        let (events_tx, events_rx) = mpsc::channel();
        Self {
            backend,
            state: PlaybackState::Idle,
            current: None,
            elapsed: Duration::ZERO,
            duration: None,
            bound: None,
            last_binding: BindingId::default(),
            events_tx,
            events_rx,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_track_id(&self) -> Option<&TrackId> {
        self.bound.as_ref().map(|b| &b.track)
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing()
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    /// Elapsed time as a fraction of the duration, `0.0` when unknown.
    pub fn progress(&self) -> f64 {
        match self.duration {
            Some(d) if !d.is_zero() => (self.elapsed.as_secs_f64() / d.as_secs_f64()).clamp(0.0, 1.0),
            _ => 0.0,
        }
    }

    /// Select the track at `index` and start playing it from the beginning.
    ///
    /// Out of range leaves everything untouched. If the track cannot be
    /// opened the controller ends up idle.
    pub fn select_track(&mut self, playlist: &Playlist, index: usize) -> Result<(), PlaybackError> {
        let track = playlist.get(index).ok_or(PlaybackError::IndexOutOfBounds {
            index,
            len: playlist.len(),
        })?;

        if let Err(e) = self.bind(track) {
            self.reset();
            return Err(e);
        }
        self.current = Some(index);
        if let Some(b) = self.bound.as_mut() {
            b.handle.play();
        }
        self.state = PlaybackState::Playing;
        log::info!("playback: playing {} ({})", track.display_name, index);
        Ok(())
    }

    /// Flip between playing and paused. Does nothing when idle.
    pub fn toggle_play_pause(&mut self) {
        let Some(b) = self.bound.as_mut() else {
            return;
        };
        self.state = match self.state {
            PlaybackState::Playing => {
                b.handle.pause();
                PlaybackState::Paused
            }
            PlaybackState::Paused => {
                b.handle.play();
                PlaybackState::Playing
            }
            PlaybackState::Idle => PlaybackState::Idle,
        };
    }

    /// Rewind to the start and pause. The selection is kept.
    pub fn stop(&mut self) {
        self.elapsed = Duration::ZERO;
        if self.bound.is_none() {
            self.state = PlaybackState::Idle;
            return;
        }
        if let Some(b) = self.bound.as_mut() {
            b.handle.pause();
            if b.handle.seek(Duration::ZERO).is_err() {
                log::debug!("playback: source cannot seek, reopening to rewind");
                let source = b.source.clone();
                let track = b.track.clone();
                if let Err(e) = self.rebind(track, &source) {
                    log::warn!("playback: reopening failed: {e}");
                    self.reset();
                    return;
                }
            }
        }
        self.state = PlaybackState::Paused;
    }

    /// Advance circularly. From idle this selects the first track.
    pub fn next(&mut self, playlist: &Playlist) -> Result<(), PlaybackError> {
        let len = playlist.len();
        if len == 0 {
            return Ok(());
        }
        let index = match self.current {
            Some(i) => (i + 1) % len,
            None => 0,
        };
        self.select_track(playlist, index)
    }

    /// Step back circularly. From idle this selects the last track.
    pub fn previous(&mut self, playlist: &Playlist) -> Result<(), PlaybackError> {
        let len = playlist.len();
        if len == 0 {
            return Ok(());
        }
        let index = match self.current {
            Some(i) => (i + len - 1) % len,
            None => len - 1,
        };
        self.select_track(playlist, index)
    }

    /// Keep the cursor consistent after the playlist dropped `removed`.
    pub fn on_track_removed(&mut self, removed: usize) {
        match self.current {
            Some(c) if c == removed => {
                log::info!("playback: current track removed, stopping");
                self.reset();
            }
            // Same track, new position: keep the handle playing.
            Some(c) if removed < c => self.current = Some(c - 1),
            _ => {}
        }
    }

    /// The playlist gained a track at `inserted`; later tracks moved up one.
    pub fn on_track_inserted(&mut self, inserted: usize) {
        if let Some(c) = self.current {
            if inserted <= c {
                self.current = Some(c + 1);
            }
        }
    }

    /// The bound source finished: move on, or go idle if nothing is left.
    pub fn on_playback_ended(&mut self, playlist: &Playlist) -> Result<(), PlaybackError> {
        if playlist.is_empty() {
            self.reset();
            return Ok(());
        }
        self.next(playlist)
    }

    /// Jump to `fraction` of the track (clamped to `0.0..=1.0`).
    pub fn seek(&mut self, fraction: f64) -> Result<(), PlaybackError> {
        let duration = self.duration.ok_or(PlaybackError::DurationUnknown)?;
        let fraction = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };
        self.seek_to(duration.mul_f64(fraction))
    }

    /// Move `seconds` forward (or back when negative), staying inside the track.
    pub fn seek_by(&mut self, seconds: i64) -> Result<(), PlaybackError> {
        let duration = self.duration.ok_or(PlaybackError::DurationUnknown)?;
        let step = Duration::from_secs(seconds.unsigned_abs());
        let target = if seconds >= 0 {
            self.elapsed.saturating_add(step).min(duration)
        } else {
            self.elapsed.saturating_sub(step)
        };
        self.seek_to(target)
    }

    /// Poll the bound handle and apply its events. Events from earlier
    /// bindings are dropped.
    pub fn pump(&mut self, playlist: &Playlist) -> Result<(), PlaybackError> {
        if let Some(b) = self.bound.as_mut() {
            b.handle.poll();
        }

        while let Ok(BoundEvent { binding, event }) = self.events_rx.try_recv() {
            if self.bound.as_ref().map(|b| b.id) != Some(binding) {
                log::trace!("playback: dropping {event:?} from stale binding {binding:?}");
                continue;
            }
            match event {
                AudioEvent::TimeUpdate(pos) => {
                    self.elapsed = match self.duration {
                        Some(d) => pos.min(d),
                        None => pos,
                    };
                }
                AudioEvent::MetadataLoaded(d) => self.duration = Some(d),
                AudioEvent::Ended => {
                    log::debug!("playback: track ended");
                    self.on_playback_ended(playlist)?;
                }
            }
        }
        Ok(())
    }

    /// Unbind and go idle.
    pub fn reset(&mut self) {
        self.unbind();
        self.current = None;
        self.state = PlaybackState::Idle;
        self.elapsed = Duration::ZERO;
        self.duration = None;
    }

    fn seek_to(&mut self, target: Duration) -> Result<(), PlaybackError> {
        if let Some(b) = self.bound.as_mut() {
            b.handle.seek(target)?;
        }
        self.elapsed = target;
        Ok(())
    }

    fn bind(&mut self, track: &Track) -> Result<(), PlaybackError> {
        self.rebind(track.id.clone(), &track.source)
    }

    fn rebind(&mut self, track: TrackId, source: &SourceHandle) -> Result<(), PlaybackError> {
        self.unbind();
        let mut handle = self.backend.load(source)?;

        self.last_binding = self.last_binding.next();
        let id = self.last_binding;
        handle.attach(EventSink::new(id, self.events_tx.clone()));

        self.bound = Some(Binding {
            id,
            track,
            source: source.clone(),
            handle,
        });
        self.elapsed = Duration::ZERO;
        self.duration = None;
        Ok(())
    }

    fn unbind(&mut self) {
        if let Some(mut b) = self.bound.take() {
            b.handle.pause();
            b.handle.detach();
        }
    }
}
