use web_sys as web;

/// Hover/click blip playback over a lazily resumed `AudioContext`.
pub struct SoundFx {
    ctx: Option<web::AudioContext>,
}

impl SoundFx {
    pub fn new() -> Self {
        let ctx = match web::AudioContext::new() {
            Ok(ctx) => Some(ctx),
            Err(e) => {
                log::warn!("AudioContext error: {:?}", e);
                None
            }
        };
        Self { ctx }
    }

    /// Fire a short percussive blip. Fire-and-forget: a missing or suspended
    /// context degrades to silence rather than failing the interaction.
    pub fn bump(&self) {
        let Some(ctx) = &self.ctx else {
            return;
        };
        if ctx.state() == web::AudioContextState::Suspended {
            let _ = ctx.resume();
        }
        let now = ctx.current_time();
        if let (Ok(src), Ok(gain)) = (web::OscillatorNode::new(ctx), web::GainNode::new(ctx)) {
            src.set_type(web::OscillatorType::Triangle);
            src.frequency().set_value(180.0);
            gain.gain().set_value(0.0);
            let t0 = now + 0.005;
            let _ = gain.gain().linear_ramp_to_value_at_time(0.5, t0 + 0.01);
            let _ = gain.gain().linear_ramp_to_value_at_time(0.0, t0 + 0.12);
            let _ = src.connect_with_audio_node(&gain);
            let _ = gain.connect_with_audio_node(&ctx.destination());
            let _ = src.start_with_when(t0);
            let _ = src.stop_with_when(t0 + 0.15);
        }
    }
}

impl Default for SoundFx {
    fn default() -> Self {
        Self::new()
    }
}
