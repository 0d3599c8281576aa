//! The sound capability the rules engine reports to.

use super::error::AudioError;

/// Sound clips the game can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundClip {
    /// Played when the head touches a bonus tile.
    Ding,
}

impl SoundClip {
    /// Identifier of the clip's resource.
    pub fn id(self) -> &'static str {
        match self {
            Self::Ding => "ding",
        }
    }
}

/// Fire-and-forget sound playback.
///
/// Implementations must not block. Errors are handed back to the caller,
/// which logs them and carries on.
pub trait AudioSink {
    /// Starts playing `clip`.
    fn play(&mut self, clip: SoundClip) -> Result<(), AudioError>;
}

/// Sink that discards every request.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl AudioSink for Silent {
    fn play(&mut self, _clip: SoundClip) -> Result<(), AudioError> {
        Ok(())
    }
}

/// Sink that records requests through `tracing` instead of playing them.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggedAudio;

impl AudioSink for LoggedAudio {
    fn play(&mut self, clip: SoundClip) -> Result<(), AudioError> {
        tracing::info!(clip = clip.id(), "play sound");
        Ok(())
    }
}

impl<A: AudioSink + ?Sized> AudioSink for &mut A {
    fn play(&mut self, clip: SoundClip) -> Result<(), AudioError> {
        (**self).play(clip)
    }
}
