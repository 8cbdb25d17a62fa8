//! Best-effort audio cues.
//!
//! Playback runs on its own thread fed through a channel, so the UI never
//! waits on the sound device.  Cues stay silent until the first key press,
//! click or scroll, and a missing device just switches them off.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use rodio::source::{SineWave, Source};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use thiserror::Error;

/// A sound the UI can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Start the looping spin sound.
    SpinStart,
    /// Stop the looping spin sound.
    SpinStop,
    /// Short notification when a spin lands.
    Tick,
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio output device: {0}")]
    Device(#[from] rodio::StreamError),
    #[error("cannot create sink: {0}")]
    Sink(#[from] rodio::PlayError),
    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot decode {path}: {source}")]
    Decode {
        path: PathBuf,
        source: rodio::decoder::DecoderError,
    },
}

/// UI-side handle to the playback thread.
#[derive(Debug)]
pub struct AudioCues {
    tx: Option<mpsc::Sender<Cue>>,
    unlocked: bool,
}

impl AudioCues {
    /// Cues that never play (`--mute`).
    pub fn disabled() -> Self {
        Self {
            tx: None,
            unlocked: false,
        }
    }

    /// Start the playback thread.  `None` paths use built-in tones.
    pub fn spawn(tick_sound: Option<PathBuf>, spin_sound: Option<PathBuf>) -> Self {
        let (tx, rx) = mpsc::channel();
        let spawned = std::thread::Builder::new()
            .name("audio-cues".into())
            .spawn(move || playback_loop(rx, tick_sound, spin_sound));
        match spawned {
            Ok(_) => Self {
                tx: Some(tx),
                unlocked: false,
            },
            Err(err) => {
                tracing::warn!(%err, "audio thread failed to start");
                Self::disabled()
            }
        }
    }

    /// Record the first user interaction.  Until then nothing plays.
    pub fn unlock(&mut self) {
        if !self.unlocked {
            self.unlocked = true;
            tracing::debug!("audio cues unlocked");
        }
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    /// Queue a cue.  Returns `true` if it was handed to the playback thread.
    /// `SpinStop` bypasses the gate so a running loop can always be stopped.
    pub fn play(&mut self, cue: Cue) -> bool {
        if !self.unlocked && cue != Cue::SpinStop {
            return false;
        }
        let Some(tx) = &self.tx else {
            return false;
        };
        if tx.send(cue).is_err() {
            // Playback thread gave up (no device); stop trying.
            self.tx = None;
            return false;
        }
        true
    }
}

// ───────────────────────────────────────── playback thread ───

fn playback_loop(rx: mpsc::Receiver<Cue>, tick_sound: Option<PathBuf>, spin_sound: Option<PathBuf>) {
    let (_stream, handle) = match OutputStream::try_default() {
        Ok(pair) => pair,
        Err(err) => {
            tracing::warn!(error = %AudioError::from(err), "audio cues disabled");
            return;
        }
    };

    let mut spin_sink: Option<Sink> = None;
    for cue in rx {
        let result = match cue {
            Cue::Tick => play_tick(&handle, tick_sound.as_deref()),
            Cue::SpinStart => start_loop(&handle, spin_sound.as_deref()).map(|sink| {
                if let Some(old) = spin_sink.replace(sink) {
                    old.stop();
                }
            }),
            Cue::SpinStop => {
                if let Some(sink) = spin_sink.take() {
                    sink.stop();
                }
                Ok(())
            }
        };
        if let Err(err) = result {
            tracing::warn!(%err, ?cue, "audio cue failed");
        }
    }
}

fn play_tick(handle: &OutputStreamHandle, path: Option<&Path>) -> Result<(), AudioError> {
    let sink = Sink::try_new(handle)?;
    match path {
        Some(path) => sink.append(open_file(path, Decoder::new)?),
        None => sink.append(
            SineWave::new(880.0)
                .take_duration(Duration::from_millis(70))
                .amplify(0.25),
        ),
    }
    sink.detach();
    Ok(())
}

fn start_loop(handle: &OutputStreamHandle, path: Option<&Path>) -> Result<Sink, AudioError> {
    let sink = Sink::try_new(handle)?;
    match path {
        Some(path) => sink.append(open_file(path, Decoder::new_looped)?),
        // A short click every 100 ms, like a ratchet.
        None => sink.append(
            SineWave::new(660.0)
                .take_duration(Duration::from_millis(20))
                .delay(Duration::from_millis(80))
                .amplify(0.15)
                .repeat_infinite(),
        ),
    }
    Ok(sink)
}

fn open_file<T>(
    path: &Path,
    decode: fn(BufReader<File>) -> Result<T, rodio::decoder::DecoderError>,
) -> Result<T, AudioError> {
    let file = File::open(path).map_err(|source| AudioError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    decode(BufReader::new(file)).map_err(|source| AudioError::Decode {
        path: path.to_path_buf(),
        source,
    })
}
