//! NES emulator entry point.
//!
//! Loads a cartridge and runs it in a window, with controller 1 on the keyboard and the APU on
//! the default audio device.
//! Usage: nesbox [path/to/game.nes] [--scale N] [--mute] [--trace] [--sample-rate HZ]

use std::error::Error;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use ansi_term::Colour::{Cyan, Green};
use clap::{Parser, ValueEnum};
use log::{error, info, warn};
use minifb::{Key, Scale, Window, WindowOptions};
use rodio::{OutputStream, Sink, buffer::SamplesBuffer};

use nesbox::{
    apu::apu::DEFAULT_SAMPLE_RATE,
    cartridge::cartridge::Cartridge,
    controller::{
        BUTTON_A, BUTTON_B, BUTTON_DOWN, BUTTON_LEFT, BUTTON_RIGHT, BUTTON_SELECT, BUTTON_START,
        BUTTON_UP,
    },
    cpu::flags,
    nes::Nes,
    ppu::ppu::{SCREEN_HEIGHT, SCREEN_WIDTH},
};

/// NES runs at ~60.0988 Hz (NTSC). Target one frame per 16.67 ms for ~60 fps.
const FRAME_DURATION: Duration = Duration::from_nanos(16_666_667);

/// Audio chunks queued ahead of playback before new ones are dropped.
const MAX_QUEUED_CHUNKS: usize = 4;

const KEYMAP: [(Key, u8); 8] = [
    (Key::X, BUTTON_A),
    (Key::Z, BUTTON_B),
    (Key::RightShift, BUTTON_SELECT),
    (Key::Enter, BUTTON_START),
    (Key::Up, BUTTON_UP),
    (Key::Down, BUTTON_DOWN),
    (Key::Left, BUTTON_LEFT),
    (Key::Right, BUTTON_RIGHT),
];

#[derive(Clone, Copy, ValueEnum)]
enum WindowScale {
    #[value(name = "1")]
    X1,
    #[value(name = "2")]
    X2,
    #[value(name = "4")]
    X4,
}

impl From<WindowScale> for Scale {
    fn from(scale: WindowScale) -> Self {
        match scale {
            WindowScale::X1 => Scale::X1,
            WindowScale::X2 => Scale::X2,
            WindowScale::X4 => Scale::X4,
        }
    }
}

#[derive(Parser)]
#[command(version, about = "A cycle-stepped NES emulator")]
struct Args {
    /// Path to an iNES (.nes) ROM
    #[arg(default_value = "test/nestest.nes")]
    rom: PathBuf,

    /// Window scale factor
    #[arg(long, value_enum, default_value = "2")]
    scale: WindowScale,

    /// Do not open an audio stream
    #[arg(long)]
    mute: bool,

    /// Print one trace line per instruction
    #[arg(long)]
    trace: bool,

    /// Audio sample rate in Hz
    #[arg(long, default_value_t = DEFAULT_SAMPLE_RATE)]
    sample_rate: u32,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(args) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let cart = Cartridge::load(&args.rom)?;
    let mut nes = Nes::new(cart);
    nes.set_sample_rate(args.sample_rate);
    info!("loaded {}", args.rom.display());

    let mut window = Window::new(
        "nesbox",
        SCREEN_WIDTH,
        SCREEN_HEIGHT,
        WindowOptions {
            resize: true,
            scale: args.scale.into(),
            scale_mode: minifb::ScaleMode::AspectRatioStretch,
            ..WindowOptions::default()
        },
    )?;
    window.set_target_fps(60);

    // The stream must outlive the sink.
    let audio = if args.mute {
        None
    } else {
        match open_audio() {
            Ok(audio) => Some(audio),
            Err(e) => {
                warn!("audio disabled: {e}");
                None
            }
        }
    };

    let mut samples = vec![0.0; args.sample_rate as usize / 30];

    while window.is_open() && !window.is_key_down(Key::Escape) {
        let frame_start = Instant::now();

        let pad = KEYMAP
            .iter()
            .filter(|(key, _)| window.is_key_down(*key))
            .fold(0, |state, (_, button)| state | button);
        nes.set_controller(0, pad);

        if args.trace {
            trace_frame(&mut nes);
        } else {
            nes.run_frame();
        }

        let n = nes.drain_samples(&mut samples);
        if let Some((_, sink)) = &audio {
            if n > 0 && sink.len() < MAX_QUEUED_CHUNKS {
                sink.append(SamplesBuffer::new(1, args.sample_rate, &samples[..n]));
            }
        }

        window.update_with_buffer(nes.framebuffer(), SCREEN_WIDTH, SCREEN_HEIGHT)?;

        // Pace to ~60 fps so we don't burn CPU (emulation is far faster than real NES)
        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
    }

    Ok(())
}

fn open_audio() -> Result<(OutputStream, Sink), Box<dyn Error>> {
    let (stream, handle) = OutputStream::try_default()?;
    let sink = Sink::try_new(&handle)?;
    Ok((stream, sink))
}

/// Run one frame an instruction at a time, printing each instruction before it executes.
fn trace_frame(nes: &mut Nes) {
    while !nes.bus.ppu.frame_complete {
        let line = nes.trace_line();
        println!(
            "{} {} {}",
            Green.bold().paint("TRACE"),
            line,
            Cyan.paint(flags::describe(nes.cpu.status))
        );
        nes.step_instruction();
    }
    nes.bus.ppu.frame_complete = false;
}
