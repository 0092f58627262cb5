//! Sound cues. Synthesis and playback sit behind the `audio` feature.

use crate::game::GameEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Jump,
    Crash,
}

impl Cue {
    /// Tone frequency (Hz) and length (seconds).
    pub const fn tone(self) -> (f32, f32) {
        match self {
            Cue::Jump => (784.0, 0.1),
            Cue::Crash => (220.0, 0.3),
        }
    }

    pub fn for_event(event: &GameEvent) -> Option<Cue> {
        match event {
            GameEvent::Jumped => Some(Cue::Jump),
            GameEvent::Crashed { .. } => Some(Cue::Crash),
            _ => None,
        }
    }
}

/// Fire-and-forget cue playback.
pub trait Audio {
    fn play(&mut self, cue: Cue);
}

/// Plays nothing.
#[derive(Debug, Default)]
pub struct Silent;

impl Audio for Silent {
    fn play(&mut self, _cue: Cue) {}
}

#[cfg(feature = "audio")]
pub use speaker::Speaker;

#[cfg(feature = "audio")]
mod speaker {
    use super::{Audio, Cue};
    use fundsp::prelude::*;
    use rodio::buffer::SamplesBuffer;
    use rodio::{OutputStream, OutputStreamBuilder, Sink, StreamError};

    const SAMPLE_RATE: u32 = 44100;

    /// Square-wave beeps rendered up front and mixed into the default output.
    pub struct Speaker {
        stream: OutputStream,
        jump: Vec<f32>,
        crash: Vec<f32>,
    }

    impl Speaker {
        pub fn open() -> Result<Self, StreamError> {
            let stream = OutputStreamBuilder::open_default_stream()?;
            Ok(Self {
                stream,
                jump: beep(Cue::Jump),
                crash: beep(Cue::Crash),
            })
        }
    }

    impl Audio for Speaker {
        fn play(&mut self, cue: Cue) {
            let samples = match cue {
                Cue::Jump => self.jump.clone(),
                Cue::Crash => self.crash.clone(),
            };
            let sink = Sink::connect_new(self.stream.mixer());
            sink.append(SamplesBuffer::new(1, SAMPLE_RATE, samples));
            sink.detach(); // Play in background
        }
    }

    fn beep(cue: Cue) -> Vec<f32> {
        let (freq, secs) = cue.tone();
        let mut tone = square_hz(freq.into()) * 0.5;
        let n = (SAMPLE_RATE as f32 * secs) as usize;
        (0..n).map(|_| tone.get_mono() as f32).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::Crash;

    #[test]
    fn test_cues_for_events() {
        assert_eq!(Cue::for_event(&GameEvent::Jumped), Some(Cue::Jump));
        assert_eq!(
            Cue::for_event(&GameEvent::Crashed {
                cause: Crash::Pipe,
                score: 2
            }),
            Some(Cue::Crash)
        );
        assert_eq!(Cue::for_event(&GameEvent::Scored { score: 1 }), None);
        assert_eq!(Cue::for_event(&GameEvent::SessionStarted), None);
    }

    #[test]
    fn test_crash_tone_is_lower_and_longer() {
        let (jf, jd) = Cue::Jump.tone();
        let (cf, cd) = Cue::Crash.tone();
        assert!(cf < jf);
        assert!(cd > jd);
    }
}
