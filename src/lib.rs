//! # zbar-scan
//!
//! A safe Rust interface to the ZBar symbol-recognition engine: pixel
//! normalization to the engine's 8-bit grayscale format, symbology
//! filtering, scan-session lifetime management and result extraction.
//!
//! The engine itself stays a black box behind its C interface. What this
//! crate owns is everything around the foreign call: the paired native
//! handles, the pinning of pixel storage across the scan, and the eager
//! copy-out of the engine's transient result list.
//!
//! ## Quick Start
//!
//! ```ignore
//! use zbar_scan::{Scanner, SymbolKind};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // An empty filter searches for every symbology the engine knows.
//!     let mut scanner = Scanner::new(&[])?;
//!
//!     let image = image::open("ticket.png")?;
//!     for symbol in scanner.decode_image(&image)? {
//!         println!("{}: {}", symbol.symbology, symbol.text);
//!     }
//!
//!     scanner.close();
//!     Ok(())
//! }
//! ```
//!
//! Restricting the search makes scans cheaper and rules out whole families
//! of misreads:
//!
//! ```ignore
//! use zbar_scan::{Scanner, SymbolKind};
//!
//! let mut scanner = Scanner::new(&[SymbolKind::Ean13, SymbolKind::Ean8])?;
//! ```
//!
//! ## Module Structure
//!
//! - [`zbar`]: engine FFI binding layer, owned native handles
//! - [`preprocess`]: raster images to contiguous 8-bit luminance buffers
//! - [`symbol`]: symbology kinds, native-code mapping, decoded results
//! - [`scanner`]: the decoding session tying the above together
//! - [`error`]: error types [`ScanError`]
//!
//! ## Linking
//!
//! Normal builds link against the system `libzbar`; point the linker at a
//! non-standard install with `ZBAR_LIB_DIR`. The `docsrs` feature replaces
//! the engine with a stub that builds anywhere and finds nothing, which is
//! what docs.rs uses and what lets the test suite run without the engine.

// Core modules
pub mod error;
pub mod preprocess;
pub mod scanner;
pub mod symbol;
pub mod zbar;

// Re-export commonly used types
pub use error::{ScanError, ScanResult};
pub use scanner::Scanner;
pub use symbol::{DecodedSymbol, SymbolKind};
pub use zbar::{Config, EngineError};

/// Get library version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        let v = version();
        assert!(!v.is_empty());
    }
}
