//=========================================================================
// Audio Manager
//=========================================================================
//
// Playback bookkeeping: which music track is playing, which sound effects
// occupy the mixer channels, and at what volume. There is no output device;
// a mixer backend would read this state.
//
// Sound effects share a fixed pool of channels. A new effect takes a free
// channel, or replaces the one that started longest ago.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use super::Subsystem;

//=== MusicState ==========================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MusicState {
    #[default]
    Stopped,
    Playing { track: String, loops: Option<u32> },
    Paused { track: String, loops: Option<u32> },
}

//=== AudioService ========================================================

/// Audio contract available to screens.
pub trait AudioService: Subsystem {
    /// Starts `track`, replacing whatever was playing. `loops: None`
    /// repeats forever.
    fn play_music(&mut self, track: &str, loops: Option<u32>);

    fn pause_music(&mut self);
    fn resume_music(&mut self);
    fn stop_music(&mut self);

    fn music_state(&self) -> &MusicState;

    /// Triggers a one-shot effect and returns its channel.
    fn play_sfx(&mut self, sound: &str) -> usize;

    /// Frees `channel`. Out-of-range channels are ignored.
    fn stop_sfx(&mut self, channel: usize);

    /// Sets the music volume, clamped to `[0, 1]`.
    fn set_music_volume(&mut self, volume: f32);

    /// Sets the effects volume, clamped to `[0, 1]`.
    fn set_sfx_volume(&mut self, volume: f32);

    fn music_volume(&self) -> f32;
    fn sfx_volume(&self) -> f32;
}

//=== AudioManager ========================================================

/// Sound effect channels available when none are requested.
pub const DEFAULT_SFX_CHANNELS: usize = 8;

#[derive(Debug, Clone)]
struct SfxChannel {
    sound: String,
    started: u64,
}

pub struct AudioManager {
    music: MusicState,
    channels: Vec<Option<SfxChannel>>,
    triggered: u64,
    music_volume: f32,
    sfx_volume: f32,
}

fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        0.0
    } else {
        volume.clamp(0.0, 1.0)
    }
}

impl AudioManager {
    pub fn new(music_volume: f32, sfx_volume: f32) -> Self {
        Self::with_channels(music_volume, sfx_volume, DEFAULT_SFX_CHANNELS)
    }

    /// Creates a manager with `channels` effect channels (at least one).
    pub fn with_channels(music_volume: f32, sfx_volume: f32, channels: usize) -> Self {
        Self {
            music: MusicState::Stopped,
            channels: vec![None; channels.max(1)],
            triggered: 0,
            music_volume: clamp_volume(music_volume),
            sfx_volume: clamp_volume(sfx_volume),
        }
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Effect playing on `channel`, if any.
    pub fn sfx_on(&self, channel: usize) -> Option<&str> {
        self.channels
            .get(channel)
            .and_then(|slot| slot.as_ref())
            .map(|playing| playing.sound.as_str())
    }

    /// Channels currently holding an effect.
    pub fn active_sfx(&self) -> usize {
        self.channels.iter().filter(|slot| slot.is_some()).count()
    }

    fn claim_channel(&self) -> usize {
        if let Some(free) = self.channels.iter().position(Option::is_none) {
            return free;
        }
        self.channels
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|playing| (index, playing.started)))
            .min_by_key(|&(_, started)| started)
            .map_or(0, |(index, _)| index)
    }
}

impl AudioService for AudioManager {
    fn play_music(&mut self, track: &str, loops: Option<u32>) {
        debug!(target: "audio", "Music: {}", track);
        self.music = MusicState::Playing {
            track: track.to_owned(),
            loops,
        };
    }

    fn pause_music(&mut self) {
        if let MusicState::Playing { track, loops } = std::mem::take(&mut self.music) {
            self.music = MusicState::Paused { track, loops };
        }
    }

    fn resume_music(&mut self) {
        match std::mem::take(&mut self.music) {
            MusicState::Paused { track, loops } => {
                self.music = MusicState::Playing { track, loops };
            }
            other => self.music = other,
        }
    }

    fn stop_music(&mut self) {
        self.music = MusicState::Stopped;
    }

    fn music_state(&self) -> &MusicState {
        &self.music
    }

    fn play_sfx(&mut self, sound: &str) -> usize {
        let channel = self.claim_channel();
        if let Some(Some(replaced)) = self.channels.get(channel) {
            trace!(target: "audio", "Channel {} cuts off {}", channel, replaced.sound);
        }
        trace!(target: "audio", "Sfx: {} on channel {}", sound, channel);

        self.channels[channel] = Some(SfxChannel {
            sound: sound.to_owned(),
            started: self.triggered,
        });
        self.triggered += 1;
        channel
    }

    fn stop_sfx(&mut self, channel: usize) {
        if let Some(slot) = self.channels.get_mut(channel) {
            *slot = None;
        }
    }

    fn set_music_volume(&mut self, volume: f32) {
        self.music_volume = clamp_volume(volume);
    }

    fn set_sfx_volume(&mut self, volume: f32) {
        self.sfx_volume = clamp_volume(volume);
    }

    fn music_volume(&self) -> f32 {
        self.music_volume
    }

    fn sfx_volume(&self) -> f32 {
        self.sfx_volume
    }
}

impl Subsystem for AudioManager {
    fn name(&self) -> &'static str {
        "audio"
    }

    fn release(&mut self) {
        self.music = MusicState::Stopped;
        self.channels.fill(None);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
