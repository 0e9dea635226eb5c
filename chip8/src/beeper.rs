use sdl2::audio::{AudioCallback, AudioDevice, AudioSpecDesired};

const TONE_HZ: f32 = 440.0;
const SAMPLE_RATE: i32 = 44_100;

/// The audio collaborator. The event loop tells it when the sound timer
/// comes up and when it runs out; everything about tone generation and
/// device lifetime stays in here.
pub trait Beeper {
    fn start_tone(&mut self);
    fn stop_tone(&mut self);
}

/// A beeper that never makes a sound, for `--mute`.
pub struct MuteBeeper;

impl Beeper for MuteBeeper {
    fn start_tone(&mut self) {}
    fn stop_tone(&mut self) {}
}

struct SquareWave {
    phase_inc: f32,
    phase: f32,
    volume: f32,
}

impl AudioCallback for SquareWave {
    type Channel = f32;

    fn callback(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = if self.phase <= 0.5 {
                self.volume
            } else {
                -self.volume
            };
            self.phase = (self.phase + self.phase_inc) % 1.0;
        }
    }
}

/// A beeper that plays a square-wave tone through an SDL2 audio device.
/// The device starts paused; start/stop just resume and pause it.
pub struct SdlBeeper {
    device: AudioDevice<SquareWave>,
}

impl SdlBeeper {
    pub fn new(sdl: &sdl2::Sdl) -> Result<Self, String> {
        let audio = sdl.audio()?;
        let spec = AudioSpecDesired {
            freq: Some(SAMPLE_RATE),
            channels: Some(1),
            samples: None,
        };
        let device = audio.open_playback(None, &spec, |spec| SquareWave {
            phase_inc: TONE_HZ / spec.freq as f32,
            phase: 0.0,
            volume: 0.25,
        })?;

        Ok(SdlBeeper { device })
    }
}

impl Beeper for SdlBeeper {
    fn start_tone(&mut self) {
        self.device.resume();
    }

    fn stop_tone(&mut self) {
        self.device.pause();
    }
}
