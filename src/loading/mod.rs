//! ROM identification: signature dispatch, header database fallback and
//! region inference.
//!
//! ## Pipeline
//!
//! 1. Read the buffer and reject anything under [`MIN_ROM_SIZE`](loader::MIN_ROM_SIZE) bytes
//! 2. Compute the CRC-32
//! 3. Pick a parser from the [`SignatureTable`](signatures::SignatureTable), or
//!    rebuild an iNES header from the header database by CRC-32
//! 4. Compute the SHA-1 unless the parser opts out
//! 5. Guess the region from the file name if the parser left it unknown
//!
//! ## Example
//!
//! ```rust,no_run
//! use romident::archive::LocalProvider;
//! use romident::catalog::store::HeaderDatabase;
//! use romident::core::source::ByteSource;
//! use romident::loading::RomLoader;
//!
//! let provider = LocalProvider::new();
//! let database = HeaderDatabase::new();
//! let loader = RomLoader::new(&provider, &database);
//!
//! let record = loader.load(&ByteSource::file("roms/Game (E).nes"));
//! if !record.is_failed() {
//!     println!("{} {:?}", record.info.rom_name, record.crc32_hex());
//! }
//! ```

pub mod loader;
pub mod region;
pub mod signatures;

pub use loader::{LoadMode, RomLoader, MIN_ROM_SIZE};
pub use signatures::{Signature, SignatureTable, SignatureTableError};
