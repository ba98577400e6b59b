//! Audio system using the Web Audio API
//!
//! Procedurally generated sound effects and looping music beds - no external
//! files needed. If the `AudioContext` cannot be created everything degrades
//! to silent no-ops. Native builds get the same API as a logging stub.

use crate::sim::MusicTrack;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Bullet fired
    Shot,
    /// Player took damage
    Hit,
    /// Monster destroyed
    Death,
    /// Coin collected
    Coin,
    /// UI button press
    ButtonClick,
}

#[cfg(target_arch = "wasm32")]
pub use wasm::AudioManager;

#[cfg(target_arch = "wasm32")]
mod wasm {
    use super::SoundEffect;
    use crate::sim::MusicTrack;
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    /// Seconds to fade the outgoing track
    const MUSIC_FADE_OUT: f64 = 0.5;
    /// Seconds to fade the incoming track
    const MUSIC_FADE_IN: f64 = 1.0;

    /// A playing music bed: master gain plus its oscillators
    struct MusicBed {
        track: MusicTrack,
        gain: GainNode,
        oscillators: Vec<OscillatorNode>,
    }

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        music: Option<MusicBed>,
        music_volume: f32,
        sfx_volume: f32,
        muted: bool,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // May fail outside a secure context.
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                music: None,
                music_volume: 0.7,
                sfx_volume: 1.0,
                muted: false,
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        pub fn set_music_volume(&mut self, vol: f32) {
            self.music_volume = vol.clamp(0.0, 1.0);
            if let (Some(ctx), Some(bed)) = (&self.ctx, &self.music) {
                let target = if self.muted { 0.0 } else { self.music_volume };
                bed.gain
                    .gain()
                    .set_value_at_time(target, ctx.current_time())
                    .ok();
            }
        }

        pub fn set_sfx_volume(&mut self, vol: f32) {
            self.sfx_volume = vol.clamp(0.0, 1.0);
        }

        pub fn toggle_mute(&mut self) -> bool {
            self.muted = !self.muted;
            let vol = self.music_volume;
            if let (Some(ctx), Some(bed)) = (&self.ctx, &self.music) {
                let target = if self.muted { 0.0 } else { vol };
                bed.gain
                    .gain()
                    .set_value_at_time(target, ctx.current_time())
                    .ok();
            }
            self.muted
        }

        pub fn is_muted(&self) -> bool {
            self.muted
        }

        fn effective_sfx_volume(&self) -> f32 {
            if self.muted { 0.0 } else { self.sfx_volume }
        }

        /// Switch the looping background bed, cross-fading between tracks.
        /// Replaying the current track is a no-op.
        pub fn play_music(&mut self, track: MusicTrack) {
            let Some(ctx) = &self.ctx else { return };

            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            if self.music.as_ref().is_some_and(|bed| bed.track == track) {
                return;
            }

            let now = ctx.current_time();

            if let Some(old) = self.music.take() {
                fade_out_bed(&old, now);
            }

            let target = if self.muted { 0.0 } else { self.music_volume };
            if let Some(bed) = start_bed(ctx, track, target, now) {
                self.music = Some(bed);
            }
        }

        pub fn stop_music(&mut self) {
            let Some(ctx) = &self.ctx else { return };
            if let Some(old) = self.music.take() {
                fade_out_bed(&old, ctx.current_time());
            }
        }

        /// Play a fire-and-forget sound effect. Overlapping calls mix.
        pub fn play_sound(&self, effect: SoundEffect) {
            let vol = self.effective_sfx_volume();
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::Shot => play_shot(ctx, vol),
                SoundEffect::Hit => play_hit(ctx, vol),
                SoundEffect::Death => play_death(ctx, vol),
                SoundEffect::Coin => play_coin(ctx, vol),
                SoundEffect::ButtonClick => play_button_click(ctx, vol),
            }
        }
    }

    /// Create an oscillator with a gain stage wired to the destination
    fn create_osc(
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Chord voicings for the looping music beds
    fn bed_voices(track: MusicTrack) -> &'static [(f32, OscillatorType)] {
        match track {
            MusicTrack::Menu => &[
                (110.0, OscillatorType::Sine),
                (164.81, OscillatorType::Sine),
                (220.0, OscillatorType::Triangle),
            ],
            MusicTrack::Main => &[
                (82.41, OscillatorType::Sawtooth),
                (123.47, OscillatorType::Triangle),
                (164.81, OscillatorType::Sine),
                (246.94, OscillatorType::Sine),
            ],
            MusicTrack::GameOver => &[
                (73.42, OscillatorType::Sine),
                (87.31, OscillatorType::Sine),
                (110.0, OscillatorType::Triangle),
            ],
        }
    }

    /// Start a bed at zero gain and ramp it in
    fn start_bed(ctx: &AudioContext, track: MusicTrack, volume: f32, now: f64) -> Option<MusicBed> {
        let master = ctx.create_gain().ok()?;
        master.gain().set_value_at_time(0.0, now).ok()?;
        master
            .gain()
            .linear_ramp_to_value_at_time(volume, now + MUSIC_FADE_IN)
            .ok()?;
        master.connect_with_audio_node(&ctx.destination()).ok()?;

        let mut oscillators = Vec::new();
        for &(freq, osc_type) in bed_voices(track) {
            let osc = ctx.create_oscillator().ok()?;
            let voice_gain = ctx.create_gain().ok()?;
            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            // Keep the stacked voices well under clipping.
            voice_gain.gain().set_value(0.08);
            osc.connect_with_audio_node(&voice_gain).ok()?;
            voice_gain.connect_with_audio_node(&master).ok()?;
            osc.start().ok()?;
            oscillators.push(osc);
        }

        Some(MusicBed {
            track,
            gain: master,
            oscillators,
        })
    }

    /// Ramp a bed to silence and stop its oscillators at the ramp's end
    fn fade_out_bed(bed: &MusicBed, now: f64) {
        bed.gain
            .gain()
            .linear_ramp_to_value_at_time(0.0, now + MUSIC_FADE_OUT)
            .ok();
        for osc in &bed.oscillators {
            osc.stop_with_when(now + MUSIC_FADE_OUT).ok();
        }
    }

    // === Sound generators ===

    /// Shot - short bright zap
    fn play_shot(ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = create_osc(ctx, 900.0, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.2, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.08)
            .ok();
        osc.frequency().set_value_at_time(900.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(300.0, t + 0.08)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.1).ok();
    }

    /// Hit - dull low thump
    fn play_hit(ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = create_osc(ctx, 150.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.5, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.25)
            .ok();
        osc.frequency().set_value_at_time(150.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(50.0, t + 0.2)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.3).ok();
    }

    /// Death - descending growl with a crack on top
    fn play_death(ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        if let Some((osc, gain)) = create_osc(ctx, 200.0, OscillatorType::Sawtooth) {
            gain.gain().set_value_at_time(vol * 0.4, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                .ok();
            osc.frequency().set_value_at_time(200.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(40.0, t + 0.3)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.35).ok();
        }

        if let Some((osc, gain)) = create_osc(ctx, 1200.0, OscillatorType::Square) {
            gain.gain().set_value_at_time(vol * 0.15, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.08)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.1).ok();
        }
    }

    /// Coin - rising two-note chime
    fn play_coin(ctx: &AudioContext, vol: f32) {
        for (i, freq) in [900.0, 1350.0].iter().enumerate() {
            let delay = i as f64 * 0.07;
            if let Some((osc, gain)) = create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.25, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.2).ok();
            }
        }
    }

    /// Button click - soft tap
    fn play_button_click(ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = create_osc(ctx, 400.0, OscillatorType::Triangle) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.2, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.05)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.08).ok();
    }
}

/// Logging stub so native builds share the same call sites
#[cfg(not(target_arch = "wasm32"))]
pub struct AudioManager {
    music: Option<MusicTrack>,
    music_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl AudioManager {
    pub fn new() -> Self {
        Self {
            music: None,
            music_volume: 0.7,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    pub fn resume(&self) {}

    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn play_music(&mut self, track: MusicTrack) {
        if self.music != Some(track) {
            log::debug!("music: {track:?} at volume {}", self.music_volume);
            self.music = Some(track);
        }
    }

    pub fn stop_music(&mut self) {
        self.music = None;
    }

    pub fn play_sound(&self, effect: SoundEffect) {
        if !self.muted && self.sfx_volume > 0.0 {
            log::debug!("sfx: {effect:?}");
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn mute_toggles() {
        let mut audio = AudioManager::new();
        assert!(!audio.is_muted());
        assert!(audio.toggle_mute());
        assert!(!audio.toggle_mute());
    }

    #[test]
    fn volumes_are_clamped() {
        let mut audio = AudioManager::new();
        audio.set_music_volume(2.0);
        audio.set_sfx_volume(-1.0);
        assert_eq!(audio.music_volume, 1.0);
        assert_eq!(audio.sfx_volume, 0.0);
    }
}
