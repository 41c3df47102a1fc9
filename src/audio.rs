//! Audio collaborator
//!
//! The store fires cues and never waits on them. Every implementation must
//! swallow its own failures.

/// One-shot sound cues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Token collected
    Coin,
}

/// Fire-and-forget audio sink
pub trait AudioSink {
    /// Start the background loop from the beginning
    fn start_loop(&mut self);
    /// Stop and rewind the background loop
    fn stop_loop(&mut self);
    /// Play a one-shot cue
    fn play(&mut self, effect: SoundEffect);
}

/// Sink that plays nothing (native builds, tests, audio-less pages)
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn start_loop(&mut self) {
        log::trace!("audio: start loop (silent)");
    }

    fn stop_loop(&mut self) {
        log::trace!("audio: stop loop (silent)");
    }

    fn play(&mut self, effect: SoundEffect) {
        log::trace!("audio: {effect:?} (silent)");
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, HtmlAudioElement, OscillatorNode, OscillatorType};

    use super::{AudioSink, SoundEffect};

    /// Background track served next to the page
    const MUSIC_URL: &str = "/traingameaudio.ogg";
    const MUSIC_VOLUME: f64 = 0.15;
    /// Peak gain of the coin cue
    const SFX_VOLUME: f32 = 0.3;

    /// Web Audio cues plus an HTML audio element for the loop
    pub struct WebAudio {
        ctx: Option<AudioContext>,
        music: Option<HtmlAudioElement>,
    }

    impl Default for WebAudio {
        fn default() -> Self {
            Self::new()
        }
    }

    impl WebAudio {
        pub fn new() -> Self {
            // Either part may fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - sound effects disabled");
            }
            let music = HtmlAudioElement::new_with_src(MUSIC_URL).ok();
            match &music {
                Some(el) => {
                    el.set_loop(true);
                    el.set_volume(MUSIC_VOLUME);
                }
                None => log::warn!("Failed to create background music element"),
            }
            Self { ctx, music }
        }

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

        /// Bright "ding": sine sweeping 800 -> 1200 Hz with a fast decay
        fn play_coin(&self, ctx: &AudioContext) {
            let now = ctx.current_time();
            let Some((osc, gain)) = Self::create_osc(ctx, 800.0, OscillatorType::Sine) else {
                log::warn!("Failed to build coin cue");
                return;
            };
            osc.frequency().set_value_at_time(800.0, now).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(1200.0, now + 0.05)
                .ok();
            gain.gain().set_value_at_time(0.0, now).ok();
            gain.gain()
                .linear_ramp_to_value_at_time(SFX_VOLUME, now + 0.01)
                .ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, now + 0.15)
                .ok();
            osc.start().ok();
            osc.stop_with_when(now + 0.2).ok();
        }
    }

    impl AudioSink for WebAudio {
        fn start_loop(&mut self) {
            let Some(music) = &self.music else { return };
            music.set_current_time(0.0);
            if let Err(e) = music.play() {
                log::warn!("Failed to start background music: {e:?}");
            }
        }

        fn stop_loop(&mut self) {
            let Some(music) = &self.music else { return };
            if let Err(e) = music.pause() {
                log::warn!("Failed to stop background music: {e:?}");
            }
            music.set_current_time(0.0);
        }

        fn play(&mut self, effect: SoundEffect) {
            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::Coin => self.play_coin(ctx),
            }
        }
    }
}
