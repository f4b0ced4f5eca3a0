//! Audio system
//!
//! The simulation only needs to trigger keyed sounds and ask whether one is
//! still playing. [`SoundSink`] is that capability; [`AudioManager`] is a
//! headless implementation that tracks voices by clip length so frontends can
//! mirror it onto a real mixer.

use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Player leaves the ground
    Jump,
    /// Player shoved or deflected by a spiker
    SpikerHit,
    /// Looping play-scene music
    BackgroundMusic,
    /// Goal reached
    Victory,
}

/// Per-effect playback configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoundConfig {
    /// Clip volume (0.0 - 1.0), before master/category volume
    pub volume: f32,
    pub looping: bool,
    /// Clip length; ignored for looping sounds
    pub duration_ms: f32,
}

impl SoundEffect {
    pub fn config(&self) -> SoundConfig {
        match self {
            SoundEffect::Jump => SoundConfig {
                volume: 0.75,
                looping: false,
                duration_ms: 350.0,
            },
            SoundEffect::SpikerHit => SoundConfig {
                volume: 0.75,
                looping: false,
                duration_ms: 500.0,
            },
            SoundEffect::BackgroundMusic => SoundConfig {
                volume: 0.25,
                looping: true,
                duration_ms: 0.0,
            },
            SoundEffect::Victory => SoundConfig {
                volume: 1.0,
                looping: false,
                duration_ms: 3000.0,
            },
        }
    }

    pub fn is_music(&self) -> bool {
        matches!(self, SoundEffect::BackgroundMusic)
    }
}

/// Keyed sound trigger capability handed to the simulation
pub trait SoundSink {
    fn play(&mut self, effect: SoundEffect);

    fn is_playing(&self, effect: SoundEffect) -> bool;

    /// Play unless the same effect is already sounding. Returns whether it started.
    fn play_once(&mut self, effect: SoundEffect) -> bool {
        if self.is_playing(effect) {
            return false;
        }
        self.play(effect);
        true
    }
}

/// An active voice
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Voice {
    pub effect: SoundEffect,
    /// Final gain after master/category/mute
    pub gain: f32,
    remaining_ms: f32,
}

/// Audio manager for the game
#[derive(Debug, Clone)]
pub struct AudioManager {
    voices: Vec<Voice>,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            voices: Vec::new(),
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut audio = Self::new();
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_music_volume(settings.music_volume);
        audio.set_muted(settings.muted);
        audio
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self, effect: SoundEffect) -> f32 {
        if self.muted {
            return 0.0;
        }
        let category = if effect.is_music() {
            self.music_volume
        } else {
            self.sfx_volume
        };
        self.master_volume * category * effect.config().volume
    }

    /// Advance clip timers, dropping finished one-shots
    pub fn update(&mut self, dt_ms: f32) {
        for voice in &mut self.voices {
            if !voice.effect.config().looping {
                voice.remaining_ms -= dt_ms;
            }
        }
        self.voices
            .retain(|v| v.effect.config().looping || v.remaining_ms > 0.0);
    }

    pub fn stop(&mut self, effect: SoundEffect) {
        self.voices.retain(|v| v.effect != effect);
    }

    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }
}

impl SoundSink for AudioManager {
    fn play(&mut self, effect: SoundEffect) {
        let config = effect.config();
        // A looping sound restarted replaces its previous voice
        if config.looping {
            self.stop(effect);
        }
        let gain = self.effective_volume(effect);
        log::debug!("play {:?} (gain {:.2})", effect, gain);
        self.voices.push(Voice {
            effect,
            gain,
            remaining_ms: config.duration_ms,
        });
    }

    fn is_playing(&self, effect: SoundEffect) -> bool {
        self.voices.iter().any(|v| v.effect == effect)
    }
}
