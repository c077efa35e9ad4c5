//! iNES / NES 2.0 cartridge header.
//!
//! Layout (16 bytes):
//!
//! | Offset | Meaning |
//! |--------|---------|
//! | 0-3    | `NES` 0x1A |
//! | 4      | PRG ROM size, 16 KiB units (LSB) |
//! | 5      | CHR ROM size, 8 KiB units (LSB) |
//! | 6      | mirroring, battery, trainer, four-screen, mapper low nibble |
//! | 7      | console type, NES 2.0 marker, mapper high nibble |
//! | 8      | NES 2.0: mapper bits 8-11, submapper |
//! | 9      | iNES: TV system bit / NES 2.0: PRG and CHR size MSB |
//! | 12     | NES 2.0: CPU/PPU timing |

use crate::core::types::{GameSystem, Mirroring};

pub const INES_MAGIC: [u8; 4] = *b"NES\x1a";
pub const HEADER_SIZE: usize = 16;
pub const TRAINER_SIZE: usize = 512;
pub const PRG_BANK_SIZE: usize = 16 * 1024;
pub const CHR_BANK_SIZE: usize = 8 * 1024;

/// A 16-byte cartridge header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NesHeader(pub [u8; HEADER_SIZE]);

impl NesHeader {
    /// Read a header from the start of `data`. Returns `None` if `data` is too short.
    #[must_use]
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        let bytes: [u8; HEADER_SIZE] = data.get(..HEADER_SIZE)?.try_into().ok()?;
        Some(Self(bytes))
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; HEADER_SIZE] {
        &self.0
    }

    #[must_use]
    pub fn has_magic(&self) -> bool {
        self.0[..4] == INES_MAGIC
    }

    #[must_use]
    pub fn is_nes2(&self) -> bool {
        self.0[7] & 0x0C == 0x08
    }

    #[must_use]
    pub fn mapper(&self) -> u16 {
        let low = u16::from(self.0[6] >> 4) | u16::from(self.0[7] & 0xF0);
        if self.is_nes2() {
            low | (u16::from(self.0[8] & 0x0F) << 8)
        } else {
            low
        }
    }

    #[must_use]
    pub fn submapper(&self) -> u8 {
        if self.is_nes2() {
            self.0[8] >> 4
        } else {
            0
        }
    }

    /// PRG ROM size in bytes
    #[must_use]
    pub fn prg_rom_size(&self) -> usize {
        let units = if self.is_nes2() {
            usize::from(self.0[4]) | (usize::from(self.0[9] & 0x0F) << 8)
        } else {
            usize::from(self.0[4])
        };
        units * PRG_BANK_SIZE
    }

    /// CHR ROM size in bytes (0 means the board uses CHR RAM)
    #[must_use]
    pub fn chr_rom_size(&self) -> usize {
        let units = if self.is_nes2() {
            usize::from(self.0[5]) | (usize::from(self.0[9] >> 4) << 8)
        } else {
            usize::from(self.0[5])
        };
        units * CHR_BANK_SIZE
    }

    #[must_use]
    pub fn mirroring(&self) -> Mirroring {
        if self.0[6] & 0x08 != 0 {
            Mirroring::FourScreen
        } else if self.0[6] & 0x01 != 0 {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        }
    }

    #[must_use]
    pub fn has_battery(&self) -> bool {
        self.0[6] & 0x02 != 0
    }

    #[must_use]
    pub fn has_trainer(&self) -> bool {
        self.0[6] & 0x04 != 0
    }

    /// Console variant declared by the header, `Unknown` when the header is silent
    #[must_use]
    pub fn game_system(&self) -> GameSystem {
        if self.0[7] & 0x03 == 0x01 {
            return GameSystem::VsSystem;
        }

        if self.is_nes2() {
            match self.0[12] & 0x03 {
                0 => GameSystem::NesNtsc,
                // 3 is Dendy, which runs at PAL frame rate
                1 | 3 => GameSystem::NesPal,
                _ => GameSystem::Unknown,
            }
        } else if self.0[9] & 0x01 != 0 {
            GameSystem::NesPal
        } else {
            GameSystem::Unknown
        }
    }

    /// Start building a NES 2.0 header
    #[must_use]
    pub fn builder() -> NesHeaderBuilder {
        NesHeaderBuilder::default()
    }
}

/// Builder for reconstructed NES 2.0 headers
#[derive(Debug, Clone, Default)]
pub struct NesHeaderBuilder {
    mapper: u16,
    submapper: u8,
    prg_rom_size: usize,
    chr_rom_size: usize,
    mirroring: Option<Mirroring>,
    battery: bool,
    system: GameSystem,
}

impl NesHeaderBuilder {
    #[must_use]
    pub fn mapper(mut self, mapper: u16, submapper: u8) -> Self {
        self.mapper = mapper;
        self.submapper = submapper;
        self
    }

    #[must_use]
    pub fn prg_rom_size(mut self, bytes: usize) -> Self {
        self.prg_rom_size = bytes;
        self
    }

    #[must_use]
    pub fn chr_rom_size(mut self, bytes: usize) -> Self {
        self.chr_rom_size = bytes;
        self
    }

    #[must_use]
    pub fn mirroring(mut self, mirroring: Mirroring) -> Self {
        self.mirroring = Some(mirroring);
        self
    }

    #[must_use]
    pub fn battery(mut self, battery: bool) -> Self {
        self.battery = battery;
        self
    }

    #[must_use]
    pub fn system(mut self, system: GameSystem) -> Self {
        self.system = system;
        self
    }

    #[must_use]
    pub fn build(self) -> NesHeader {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[..4].copy_from_slice(&INES_MAGIC);

        let prg_units = self.prg_rom_size.div_ceil(PRG_BANK_SIZE);
        let chr_units = self.chr_rom_size.div_ceil(CHR_BANK_SIZE);
        #[allow(clippy::cast_possible_truncation)] // Masked to the field width
        {
            bytes[4] = (prg_units & 0xFF) as u8;
            bytes[5] = (chr_units & 0xFF) as u8;
            bytes[9] = (((prg_units >> 8) & 0x0F) | (((chr_units >> 8) & 0x0F) << 4)) as u8;

            bytes[6] = ((self.mapper & 0x0F) << 4) as u8;
            bytes[7] = ((self.mapper & 0xF0) as u8) | 0x08;
            bytes[8] = ((self.mapper >> 8) & 0x0F) as u8 | (self.submapper << 4);
        }

        match self.mirroring {
            Some(Mirroring::Vertical) => bytes[6] |= 0x01,
            Some(Mirroring::FourScreen) => bytes[6] |= 0x08,
            Some(Mirroring::Horizontal) | None => {}
        }
        if self.battery {
            bytes[6] |= 0x02;
        }

        match self.system {
            GameSystem::VsSystem => bytes[7] |= 0x01,
            GameSystem::NesPal => bytes[12] = 0x01,
            GameSystem::Unknown => bytes[12] = 0x02,
            GameSystem::NesNtsc => bytes[12] = 0x00,
        }

        NesHeader(bytes)
    }
}
