//! NES APU (Audio Processing Unit) implementation.
//!
//! Two pulse channels and the noise channel of the Ricoh 2A03, the
//! [frame counter](https://www.nesdev.org/wiki/APU_Frame_Counter) (4-step or 5-step), and the
//! [APU Mixer](https://www.nesdev.org/wiki/APU_Mixer) (non-linear). Registers $4000–$4007,
//! $400C–$400F, $4015, $4017. See [APU registers](https://www.nesdev.org/wiki/APU_registers).
//!
//! ## Timing
//!
//! [`APU::clock`] is called once per system (PPU dot) tick. Every third tick is a CPU cycle, which
//! clocks the noise timer; every sixth is an APU cycle, which clocks the pulse timers and the
//! frame sequencer.

use crate::apu::{
    noise::Noise,
    pulse::{Pulse, PulseUnit},
};

/// NTSC master clock / 4: one tick per PPU dot.
const SYSTEM_CLOCK_HZ: f64 = 5_369_318.0;

pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Cap on undrained samples (about 1.5 s at the default rate); newer samples are dropped.
const MAX_BUFFERED_SAMPLES: usize = 1 << 16;

// Frame sequencer steps, in APU cycles.
const STEP_1: u32 = 3729;
const STEP_2: u32 = 7457;
const STEP_3: u32 = 11186;
const STEP_4: u32 = 14916;
const STEP_5: u32 = 18641;

/// $4015 bit 6.
const STATUS_FRAME_IRQ: u8 = 0x40;

// -----------------------------------------------------------------------------
// Mixer: NES non-linear combination (APU_Mixer). Pulse group and TND group combined.
// -----------------------------------------------------------------------------

/// Pulse output: 95.52 / (8128/n + 100), n = pulse1 + pulse2 (0–30).
fn pulse_table(n: usize) -> f32 {
    if n == 0 {
        return 0.0;
    }
    95.52 / (8128.0 / (n as f32) + 100.0)
}

/// TND output: 163.67 / (24329/n + 100), n = 2*noise with no triangle or DMC.
fn tnd_table(n: usize) -> f32 {
    if n == 0 {
        return 0.0;
    }
    163.67 / (24329.0 / (n as f32) + 100.0)
}

// -----------------------------------------------------------------------------
// APU: register dispatch, frame sequencer, clock, sample buffer
// -----------------------------------------------------------------------------

pub struct APU {
    pub(super) pulse1: Pulse,
    pub(super) pulse2: Pulse,
    pub(super) noise: Noise,
    five_step: bool,
    irq_inhibit: bool,
    frame_irq: bool,
    /// APU cycles since the sequencer last wrapped.
    frame_cycle: u32,
    clock_count: u64,
    sample_rate: u32,
    ticks_per_sample: f64,
    sample_phase: f64,
    pub sample_buffer: Vec<f32>,
}

impl Default for APU {
    fn default() -> Self {
        Self::new()
    }
}

impl APU {
    pub fn new() -> Self {
        Self::with_sample_rate(DEFAULT_SAMPLE_RATE)
    }

    pub fn with_sample_rate(hz: u32) -> Self {
        let hz = hz.max(1);
        Self {
            pulse1: Pulse::new(PulseUnit::One),
            pulse2: Pulse::new(PulseUnit::Two),
            noise: Noise::new(),
            five_step: false,
            irq_inhibit: false,
            frame_irq: false,
            frame_cycle: 0,
            clock_count: 0,
            sample_rate: hz,
            ticks_per_sample: SYSTEM_CLOCK_HZ / hz as f64,
            sample_phase: 0.0,
            sample_buffer: Vec::new(),
        }
    }

    /// Silence all channels and restart the sequencer. The sample rate is kept.
    pub fn reset(&mut self) {
        *self = Self::with_sample_rate(self.sample_rate);
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn set_sample_rate(&mut self, hz: u32) {
        self.sample_rate = hz.max(1);
        self.ticks_per_sample = SYSTEM_CLOCK_HZ / self.sample_rate as f64;
        self.sample_phase = 0.0;
    }

    /// Write to APU registers. $4015 enables channels; $4017 selects the sequencer mode and IRQ
    /// inhibit and restarts the sequencer.
    pub fn write(&mut self, addr: u16, data: u8) {
        match addr {
            0x4000..=0x4003 => self.pulse1.write(addr, data),
            0x4004..=0x4007 => self.pulse2.write(addr, data),
            0x400C..=0x400F => self.noise.write(addr, data),
            0x4015 => {
                self.pulse1.set_enabled(data & 0x01 != 0);
                self.pulse2.set_enabled(data & 0x02 != 0);
                self.noise.set_enabled(data & 0x08 != 0);
            }
            0x4017 => {
                self.five_step = data & 0x80 != 0;
                self.irq_inhibit = data & 0x40 != 0;
                if self.irq_inhibit {
                    self.frame_irq = false;
                }
                self.frame_cycle = 0;
                // Selecting 5-step mode clocks both units immediately.
                if self.five_step {
                    self.clock_quarter_frame();
                    self.clock_half_frame();
                }
            }
            // Triangle and DMC registers are accepted and ignored.
            _ => {}
        }
    }

    /// Read $4015: bits 0, 1, 3 = length counter > 0 for pulse 1, pulse 2, noise; bit 6 = frame
    /// IRQ. Reading clears the frame IRQ flag.
    pub fn read_status(&mut self) -> u8 {
        let mut r = 0;
        if self.pulse1.length.active() {
            r |= 0x01;
        }
        if self.pulse2.length.active() {
            r |= 0x02;
        }
        if self.noise.length.active() {
            r |= 0x08;
        }
        if self.frame_irq {
            r |= STATUS_FRAME_IRQ;
        }
        self.frame_irq = false;
        r
    }

    pub fn frame_irq(&self) -> bool {
        self.frame_irq
    }

    /// Quarter-frame: clock envelopes.
    fn clock_quarter_frame(&mut self) {
        self.pulse1.clock_envelope();
        self.pulse2.clock_envelope();
        self.noise.clock_envelope();
    }

    /// Half-frame: clock length counters and sweep units.
    fn clock_half_frame(&mut self) {
        self.pulse1.clock_length();
        self.pulse2.clock_length();
        self.noise.clock_length();
        self.pulse1.clock_sweep();
        self.pulse2.clock_sweep();
    }

    fn step_frame_sequencer(&mut self) {
        self.frame_cycle += 1;

        match (self.five_step, self.frame_cycle) {
            (_, STEP_1) | (_, STEP_3) => self.clock_quarter_frame(),
            (_, STEP_2) => {
                self.clock_quarter_frame();
                self.clock_half_frame();
            }
            (false, STEP_4) => {
                self.clock_quarter_frame();
                self.clock_half_frame();
                if !self.irq_inhibit {
                    self.frame_irq = true;
                }
                self.frame_cycle = 0;
            }
            (true, STEP_5) => {
                self.clock_quarter_frame();
                self.clock_half_frame();
                self.frame_cycle = 0;
            }
            _ => {}
        }
    }

    /// Mixed output of all channels, 0.0..1.0.
    pub fn sample(&self) -> f32 {
        let pulse = (self.pulse1.output() + self.pulse2.output()) as usize;
        let tnd = 2 * self.noise.output() as usize;
        pulse_table(pulse) + tnd_table(tnd)
    }

    /// Advance one system tick. A sample is pushed every `SYSTEM_CLOCK_HZ / sample_rate` ticks.
    pub fn clock(&mut self) {
        if self.clock_count % 3 == 0 {
            self.noise.clock_timer();

            if self.clock_count % 6 == 0 {
                self.pulse1.clock_timer();
                self.pulse2.clock_timer();
                self.step_frame_sequencer();
            }
        }

        self.sample_phase += 1.0;
        if self.sample_phase >= self.ticks_per_sample {
            self.sample_phase -= self.ticks_per_sample;
            if self.sample_buffer.len() < MAX_BUFFERED_SAMPLES {
                self.sample_buffer.push(self.sample());
            }
        }

        self.clock_count += 1;
    }

    /// Drain samples from the internal buffer into `out`. Returns number of samples copied.
    pub fn drain_samples(&mut self, out: &mut [f32]) -> usize {
        let n = out.len().min(self.sample_buffer.len());
        out[..n].copy_from_slice(&self.sample_buffer[..n]);
        self.sample_buffer.drain(..n);
        n
    }
}
