use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

pub const CHANNELS: usize = 16;
/// Sentinel for "no program selected yet on this channel".
pub const PROGRAM_UNSET: u8 = 255;

/// Point-in-time copy of one channel's bank/program assignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChannelRecord {
    pub bank_msb: u8,
    pub bank_lsb: u8,
    pub program: u8,
    pub is_drum: bool,
}

impl ChannelRecord {
    /// 14-bit bank number composed from the last CC0/CC32 seen.
    pub fn bank(&self) -> u16 {
        ((self.bank_msb as u16) << 7) | self.bank_lsb as u16
    }
}

/// Result of committing a program change on a channel.
#[derive(Clone, Copy, Debug)]
pub struct ProgramUpdate {
    pub bank: u16,
    pub is_drum: bool,
    /// True when the drum classification changed relative to the stored flag.
    pub drum_flipped: bool,
}

struct ChannelCell {
    bank_msb: AtomicU8,
    bank_lsb: AtomicU8,
    program: AtomicU8,
    is_drum: AtomicBool,
}

impl ChannelCell {
    fn new() -> Self {
        Self {
            bank_msb: AtomicU8::new(0),
            bank_lsb: AtomicU8::new(0),
            program: AtomicU8::new(PROGRAM_UNSET),
            is_drum: AtomicBool::new(false),
        }
    }

    fn bank(&self) -> u16 {
        ((self.bank_msb.load(Ordering::Relaxed) as u16) << 7)
            | self.bank_lsb.load(Ordering::Relaxed) as u16
    }
}

/// Per-channel bank/program/drum-kit tracker.
///
/// Written by the audio thread while events are demultiplexed; read
/// lock-free by the naming path, which tolerates slightly stale values.
pub struct ChannelMap {
    cells: [ChannelCell; CHANNELS],
    drum_banks: Vec<u16>,
}

impl ChannelMap {
    pub fn new(drum_banks: Vec<u16>) -> Self {
        Self {
            cells: std::array::from_fn(|_| ChannelCell::new()),
            drum_banks,
        }
    }

    fn cell(&self, channel: u8) -> &ChannelCell {
        &self.cells[(channel & 0x0F) as usize]
    }

    pub fn update_bank(&self, channel: u8, is_msb: bool, value: u8) {
        let cell = self.cell(channel);
        if is_msb {
            cell.bank_msb.store(value, Ordering::Relaxed);
        } else {
            cell.bank_lsb.store(value, Ordering::Relaxed);
        }
    }

    /// Commit a program change: stores the program, classifies the channel
    /// against the configured drum banks, and reports whether the
    /// classification flipped.
    pub fn update_program(&self, channel: u8, program: u8) -> ProgramUpdate {
        let cell = self.cell(channel);
        cell.program.store(program, Ordering::Relaxed);
        let bank = cell.bank();
        let is_drum = self.drum_banks.contains(&bank);
        let was_drum = cell.is_drum.swap(is_drum, Ordering::Relaxed);
        ProgramUpdate {
            bank,
            is_drum,
            drum_flipped: was_drum != is_drum,
        }
    }

    /// Direct assignment, used when reload defaults are applied.
    pub fn select(&self, channel: u8, bank: u16, program: u8, is_drum: bool) {
        let cell = self.cell(channel);
        cell.bank_msb.store((bank >> 7) as u8, Ordering::Relaxed);
        cell.bank_lsb.store((bank & 0x7F) as u8, Ordering::Relaxed);
        cell.program.store(program, Ordering::Relaxed);
        cell.is_drum.store(is_drum, Ordering::Relaxed);
    }

    pub fn record(&self, channel: u8) -> ChannelRecord {
        let cell = self.cell(channel);
        ChannelRecord {
            bank_msb: cell.bank_msb.load(Ordering::Relaxed),
            bank_lsb: cell.bank_lsb.load(Ordering::Relaxed),
            program: cell.program.load(Ordering::Relaxed),
            is_drum: cell.is_drum.load(Ordering::Relaxed),
        }
    }

    pub fn snapshot(&self) -> [ChannelRecord; CHANNELS] {
        std::array::from_fn(|channel| self.record(channel as u8))
    }
}
