//! Refresh waveform tables
//!
//! Each table is written verbatim with the write-LUT command. The first 35
//! bytes are the phase-voltage matrix (five LUTs by seven phases, two bits
//! per sub-phase A-D), the last 35 the per-phase durations of A-D plus a
//! repeat count.
//!
//! `Black` is a short black/white-only refresh that skips the red phases.
//! `Red` runs the full slow sequence that brings in red pigment.

/// Waveform table length in bytes
pub const LUT_LEN: usize = 70;

/// Named waveform profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WaveformProfile {
    /// Profile used unless configured otherwise (same table as `Red`)
    #[default]
    Default,
    /// Fast black/white refresh
    Black,
    /// Full tri-colour refresh
    Red,
}

impl WaveformProfile {
    /// Look up a profile by name: "default", "black" or "red"
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "default" => Some(WaveformProfile::Default),
            "black" => Some(WaveformProfile::Black),
            "red" => Some(WaveformProfile::Red),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            WaveformProfile::Default => "default",
            WaveformProfile::Black => "black",
            WaveformProfile::Red => "red",
        }
    }

    /// The table sent to the controller
    pub fn lut(&self) -> &'static [u8; LUT_LEN] {
        match self {
            WaveformProfile::Default | WaveformProfile::Red => &RED_LUT,
            WaveformProfile::Black => &BLACK_LUT,
        }
    }
}

/// Phase-voltage matrix shared by every profile
#[rustfmt::skip]
const PHASES: [u8; 35] = [
    // LUT0 black
    0b0100_1000, 0b1010_0000, 0b0001_0000, 0b0001_0000, 0b0001_0011, 0b0000_0000, 0b0000_0000,
    // LUT1 white
    0b0100_1000, 0b1010_0000, 0b1000_0000, 0b0000_0000, 0b0000_0011, 0b0000_0000, 0b0000_0000,
    // LUT2 unused
    0b0000_0000, 0b0000_0000, 0b0000_0000, 0b0000_0000, 0b0000_0000, 0b0000_0000, 0b0000_0000,
    // LUT3 red
    0b0100_1000, 0b1010_0101, 0b0000_0000, 0b1011_1011, 0b0000_0000, 0b0000_0000, 0b0000_0000,
    // LUT4 VCOM
    0b0000_0000, 0b0000_0000, 0b0000_0000, 0b0000_0000, 0b0000_0000, 0b0000_0000, 0b0000_0000,
];

const fn table(timing: [u8; 35]) -> [u8; LUT_LEN] {
    let mut out = [0u8; LUT_LEN];
    let mut i = 0;
    while i < 35 {
        out[i] = PHASES[i];
        out[35 + i] = timing[i];
        i += 1;
    }
    out
}

#[rustfmt::skip]
const RED_LUT: [u8; LUT_LEN] = table([
    // A   B   C   D  repeat
    64, 12, 32, 12,  6, // flash
    16,  8,  4,  4,  6, // clear
     4,  8,  8, 16, 16, // bring in black
     2,  2,  2, 64, 32, // red
     2,  2,  2,  2,  2, // sharpen black
     0,  0,  0,  0,  0,
     0,  0,  0,  0,  0,
]);

// Timings not tuned on a panel yet; only the phase matrix is shared with RED_LUT
#[rustfmt::skip]
const BLACK_LUT: [u8; LUT_LEN] = table([
    // A   B   C   D  repeat
    16,  4,  4,  4,  4, // flash
    16,  4,  4,  4,  4, // clear
     4,  8,  8, 16, 16, // bring in black
     0,  0,  0,  0,  0,
     0,  0,  0,  0,  0,
     0,  0,  0,  0,  0,
     0,  0,  0,  0,  0,
]);
