use serde::{Deserialize, Serialize};

/// Console variant a ROM runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameSystem {
    /// Not yet resolved
    #[default]
    Unknown,
    /// NTSC NES / Famicom (the default)
    NesNtsc,
    /// PAL NES
    NesPal,
    /// Nintendo Vs. System arcade board
    VsSystem,
}

impl std::fmt::Display for GameSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown => write!(f, "Unknown"),
            Self::NesNtsc => write!(f, "NES (NTSC)"),
            Self::NesPal => write!(f, "NES (PAL)"),
            Self::VsSystem => write!(f, "Vs. System"),
        }
    }
}

/// Container formats recognized by signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RomFormat {
    /// iNES / NES 2.0 cartridge image
    Ines,
    /// Famicom Disk System image
    Fds,
    /// NES Sound Format
    Nsf,
    /// Extended NES Sound Format
    Nsfe,
    /// Universal NES Image Format
    Unif,
    /// StudyBox cassette image
    StudyBox,
}

impl RomFormat {
    /// All formats, in signature dispatch order
    pub const ALL: [RomFormat; 6] = [
        RomFormat::Ines,
        RomFormat::Fds,
        RomFormat::Nsf,
        RomFormat::Nsfe,
        RomFormat::Unif,
        RomFormat::StudyBox,
    ];

    /// Get the display name for this format
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            RomFormat::Ines => "iNES",
            RomFormat::Fds => "Famicom Disk System",
            RomFormat::Nsf => "NSF",
            RomFormat::Nsfe => "NSFe",
            RomFormat::Unif => "UNIF",
            RomFormat::StudyBox => "StudyBox",
        }
    }
}

impl std::fmt::Display for RomFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Nametable mirroring declared by a cartridge header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mirroring {
    Horizontal,
    Vertical,
    FourScreen,
}

impl std::fmt::Display for Mirroring {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Horizontal => write!(f, "horizontal"),
            Self::Vertical => write!(f, "vertical"),
            Self::FourScreen => write!(f, "four-screen"),
        }
    }
}

/// File extensions treated as ROM images when listing folders or archives
pub const ROM_EXTENSIONS: &[&str] = &[".nes", ".fds", ".unf", ".unif", ".nsf", ".nsfe", ".studybox"];

/// File extensions treated as archives when collecting candidates
pub const ARCHIVE_EXTENSIONS: &[&str] = &[".gz"];

/// Check whether a file name ends with one of `extensions` (case-insensitive)
#[must_use]
pub fn has_extension(name: &str, extensions: &[&str]) -> bool {
    let lower = name.to_lowercase();
    extensions.iter().any(|ext| lower.ends_with(ext))
}
