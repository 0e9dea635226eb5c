use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::{Duration, Instant};

use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use chip8_core::{Chip8, CLOCK_SPEED};
use chip8_display::Display;

use crate::beeper::{Beeper, MuteBeeper, SdlBeeper};
use crate::keymap::keymap;

/// Drive an emulation session to completion.
///
/// Everything is strictly sequenced on this thread: one machine step,
/// then a render if the core flagged a redraw, then the sound edge, then
/// input, then the pacing sleep. A decode fault from the core halts the
/// session and propagates out.
pub fn run(rom: &Path, mute: bool, scale: u32) -> Result<(), Box<dyn Error>> {
    let mut chip8 = Chip8::new();

    let file = File::open(rom)?;
    let mut reader = BufReader::new(file);
    chip8.load_program(&mut reader)?;

    // Get SDL2 context
    let sdl = sdl2::init()?;
    let mut display = Display::new(&sdl, scale)?;
    let mut beeper: Box<dyn Beeper> = if mute {
        Box::new(MuteBeeper)
    } else {
        Box::new(SdlBeeper::new(&sdl)?)
    };
    let mut events = sdl.event_pump()?;

    // Set initial timing
    let cycle_time = Duration::from_nanos(CLOCK_SPEED);
    let mut last_cycle = Instant::now();

    // The sound timer level after the previous step, for edge detection
    let mut sound_was_active = false;

    'event: loop {
        chip8.step()?;

        // If the core flagged a redraw, take the frame and render it
        if let Some(frame) = chip8.take_frame() {
            display.render(&frame)?;
        }

        // Start the tone when the sound timer comes up, stop it the
        // moment the timer runs out
        let sound_active = chip8.sound_active();
        if sound_active && !sound_was_active {
            beeper.start_tone();
        } else if !sound_active && sound_was_active {
            beeper.stop_tone();
        }
        sound_was_active = sound_active;

        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'event,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => {
                    if let Some(kc) = keymap(key) {
                        chip8.key_press(kc);
                    }
                }
                Event::KeyUp {
                    keycode: Some(key), ..
                } => {
                    if let Some(kc) = keymap(key) {
                        chip8.key_release(kc);
                    }
                }
                _ => continue,
            }
        }

        // Handle timing
        let elapsed = last_cycle.elapsed();
        if cycle_time > elapsed {
            std::thread::sleep(cycle_time - elapsed);
        }
        last_cycle = Instant::now();
    }

    Ok(())
}
