use std::io::Read;

use rand::RngCore;

use crate::constants::{MAX_PROGRAM_SIZE, MEMORY_SIZE, NUM_KEYS, PROGRAM_START};
use crate::error::Error;
use crate::instruction::Instruction;
use crate::state::{FrameBuffer, State};

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Owns the machine `state` and the keypad, and supplies the narrow
/// interfaces the surrounding collaborators drive it through:
/// - loading a program image
/// - advancing the machine one fetch-decode-execute-tick step at a time
/// - pressing and releasing keys
/// - taking the frame buffer for rendering when a redraw is pending
/// - signalling whether the sound timer is running
///
/// Randomness for the random-mask instruction comes from an injected
/// source so tests can run deterministically.
pub struct Chip8 {
    state: State,
    pressed_keys: [bool; NUM_KEYS],
    rng: Box<dyn RngCore>,
}

impl Chip8 {
    pub fn new() -> Self {
        Self::with_rng(rand::thread_rng())
    }

    /// Build a machine around a specific random source.
    pub fn with_rng(rng: impl RngCore + 'static) -> Self {
        Chip8 {
            state: State::new(),
            pressed_keys: [false; NUM_KEYS],
            rng: Box::new(rng),
        }
    }

    /// Load a program image into memory at the load offset.
    ///
    /// The whole image is read before anything is written, so a failed
    /// load leaves memory untouched. Images that don't fit in the space
    /// above the load offset are rejected.
    ///
    /// # Arguments
    /// * `reader` a reader over the raw binary image
    pub fn load_program(&mut self, reader: &mut dyn Read) -> Result<(), Error> {
        let mut image = Vec::new();
        reader.read_to_end(&mut image)?;
        if image.len() > MAX_PROGRAM_SIZE {
            return Err(Error::ProgramTooLarge { size: image.len() });
        }
        self.state.memory[PROGRAM_START..PROGRAM_START + image.len()].copy_from_slice(&image);
        Ok(())
    }

    /// Restore the machine to its freshly initialized state: memory
    /// zeroed and the font reloaded, registers and timers cleared, the
    /// program counter back at the load offset, all keys up.
    pub fn reset(&mut self) {
        self.state = State::new();
        self.pressed_keys = [false; NUM_KEYS];
    }

    /// Run one fetch-decode-execute-tick cycle.
    ///
    /// A decode fault aborts the step before any state changes and is
    /// returned to the caller, which should halt rather than skip: the
    /// next word is as likely to be data as code. The timers tick only
    /// after the instruction took effect.
    pub fn step(&mut self) -> Result<(), Error> {
        let word = self.fetch();
        let instruction = Instruction::decode(word)?;
        instruction.execute(&mut self.state, &self.pressed_keys, self.rng.as_mut())?;
        self.tick_timers();
        Ok(())
    }

    /// Returns the frame buffer if the display should be redrawn, and
    /// clears the redraw flag so the frame is only handed out once.
    pub fn take_frame(&mut self) -> Option<FrameBuffer> {
        if self.state.draw_flag {
            self.state.draw_flag = false;
            Some(self.state.frame_buffer)
        } else {
            None
        }
    }

    /// Set the pressed status of `key`.
    pub fn key_press(&mut self, key: u8) {
        self.pressed_keys[key as usize] = true;
    }

    /// Unset the pressed status of `key`.
    pub fn key_release(&mut self, key: u8) {
        self.pressed_keys[key as usize] = false;
    }

    /// Whether the sound timer is running. The audio collaborator plays
    /// its tone while this is true; the transition back to false is its
    /// signal to stop.
    pub fn sound_active(&self) -> bool {
        self.state.sound_timer > 0
    }

    /// The instruction word at the program counter. Memory holds bytes
    /// but instructions are 16 bits, so two consecutive bytes combine
    /// big-endian. The second byte wraps around the end of memory the
    /// same way index-derived accesses do.
    fn fetch(&self) -> u16 {
        let pc = self.state.pc as usize;
        let high = u16::from(self.state.memory[pc % MEMORY_SIZE]);
        let low = u16::from(self.state.memory[(pc + 1) % MEMORY_SIZE]);
        high << 8 | low
    }

    fn tick_timers(&mut self) {
        if self.state.delay_timer > 0 {
            self.state.delay_timer -= 1;
        }
        if self.state.sound_timer > 0 {
            self.state.sound_timer -= 1;
        }
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}
