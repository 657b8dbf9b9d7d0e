//! Barcode scan sessions
//!
//! A [`Scanner`] owns one engine context and one reusable image handle for
//! its whole lifetime. The two are created together, torn down together, and
//! never outlive each other; a closed session rejects every further decode
//! instead of touching freed handles.

use std::borrow::Cow;

use image::{DynamicImage, GenericImageView};
use log::debug;

use crate::error::{ScanError, ScanResult};
use crate::preprocess;
use crate::symbol::{DecodedSymbol, SymbolKind};
use crate::zbar::{Config, EngineImage, ImageScanner, FOURCC_Y800};

/// A reusable decoding session over the engine.
///
/// Decode calls take `&mut self` and block until the engine returns; the
/// type is `Send` but deliberately not shareable, so one session stays on
/// one thread of control while independent sessions run concurrently on
/// others.
pub struct Scanner {
    handles: Option<Handles>,
}

/// The session's two native handles, live together or destroyed together.
///
/// Field order is teardown order: the image handle is destroyed before the
/// scanner context.
struct Handles {
    image: EngineImage,
    scanner: ImageScanner,
}

impl Scanner {
    /// Create a session searching for `kinds`.
    ///
    /// An empty slice, or one containing [`SymbolKind::All`], enables every
    /// symbology the engine knows. Otherwise everything is disabled first
    /// and exactly the requested kinds are enabled. The filter is applied
    /// once here and is immutable for the session's lifetime.
    ///
    /// # Errors
    ///
    /// Fails only when the engine cannot allocate its handles or rejects
    /// the filter configuration. There is no degraded mode; the error
    /// should be treated as unrecoverable.
    pub fn new(kinds: &[SymbolKind]) -> ScanResult<Self> {
        let mut scanner = ImageScanner::new()?;
        configure_symbologies(&mut scanner, kinds)?;

        let mut image = EngineImage::new()?;
        image.set_format(FOURCC_Y800);

        Ok(Scanner {
            handles: Some(Handles { image, scanner }),
        })
    }

    /// True once [`close`](Scanner::close) has run.
    pub fn is_closed(&self) -> bool {
        self.handles.is_none()
    }

    /// Decode every enabled symbology from a structured image.
    ///
    /// Grayscale images are scanned without conversion; everything else is
    /// normalized to 8-bit luminance first (see [`preprocess::to_luma`]).
    ///
    /// # Errors
    ///
    /// [`ScanError::Closed`] after [`close`](Scanner::close),
    /// [`ScanError::InvalidInput`] for zero-sized images,
    /// [`ScanError::ScanFailed`] when the engine reports a failed pass.
    /// Finding no symbols is success with an empty list, not an error.
    pub fn decode_image(&mut self, img: &DynamicImage) -> ScanResult<Vec<DecodedSymbol>> {
        let handles = self.handles.as_mut().ok_or(ScanError::Closed)?;

        let (width, height) = img.dimensions();
        if width == 0 || height == 0 {
            return Err(ScanError::InvalidInput(
                "image has zero width or height".into(),
            ));
        }

        let luma: Cow<'_, [u8]> = preprocess::to_luma(img)?;
        handles.scan(&luma, width, height)
    }

    /// Decode from an already-grayscale buffer of `width * height` bytes in
    /// row-major order. Skips pixel normalization entirely; the buffer is
    /// only read.
    ///
    /// # Errors
    ///
    /// [`ScanError::Closed`] after [`close`](Scanner::close),
    /// [`ScanError::InvalidInput`] when `data` is empty or its length does
    /// not equal `width * height`,
    /// [`ScanError::ScanFailed`] when the engine reports a failed pass.
    pub fn decode_bytes(
        &mut self,
        data: &[u8],
        width: u32,
        height: u32,
    ) -> ScanResult<Vec<DecodedSymbol>> {
        let handles = self.handles.as_mut().ok_or(ScanError::Closed)?;

        if data.is_empty() {
            return Err(ScanError::InvalidInput("pixel buffer is empty".into()));
        }
        if data.len() as u64 != u64::from(width) * u64::from(height) {
            return Err(ScanError::InvalidInput(format!(
                "pixel buffer holds {} bytes, expected {}x{}",
                data.len(),
                width,
                height,
            )));
        }

        handles.scan(data, width, height)
    }

    /// Destroy the image handle, then the scanner context, and mark the
    /// session closed. Safe to call any number of times; only the first
    /// call performs native teardown. Dropping an open session runs the
    /// same teardown, so resources are released on every exit path.
    pub fn close(&mut self) {
        self.handles = None;
    }
}

impl Handles {
    /// Size the image handle, bind the pixel storage, run one scan pass and
    /// copy the results out.
    fn scan(&mut self, luma: &[u8], width: u32, height: u32) -> ScanResult<Vec<DecodedSymbol>> {
        self.image.set_size(width, height);
        // Safety: `luma` stays borrowed for the rest of this call, so its
        // storage cannot move or be reclaimed before the scan below
        // returns, and the engine does not read the pointer after that.
        unsafe { self.image.set_data(luma) };

        let hits = self.scanner.scan(&mut self.image);
        if hits < 0 {
            return Err(ScanError::ScanFailed);
        }
        debug!("scan over {}x{} returned {} symbols", width, height, hits);
        if hits == 0 {
            return Ok(Vec::new());
        }

        // The engine's list only lives until the next scan on this handle;
        // materialize it eagerly.
        Ok(self
            .image
            .symbols()
            .map(|sym| DecodedSymbol {
                symbology: sym.type_name(),
                text: sym.data(),
            })
            .collect())
    }
}

/// Symbology code 0 addresses every symbology at once in a config call.
const ALL_SYMBOLOGIES: i32 = 0;

/// Apply the session's symbology filter: nothing requested means everything
/// enabled; otherwise disable everything, then enable exactly the requested
/// kinds. Enabling the same kind twice is idempotent on the engine side.
fn configure_symbologies(scanner: &mut ImageScanner, kinds: &[SymbolKind]) -> ScanResult<()> {
    if kinds.is_empty() || kinds.contains(&SymbolKind::All) {
        scanner.set_config(ALL_SYMBOLOGIES, Config::Enable, 1)?;
        return Ok(());
    }

    scanner.set_config(ALL_SYMBOLOGIES, Config::Enable, 0)?;
    for kind in kinds {
        if let Some(code) = kind.to_native() {
            scanner.set_config(code, Config::Enable, 1)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_session() -> Scanner {
        Scanner::new(&[]).expect("session creation")
    }

    #[test]
    fn test_empty_buffer_is_invalid_input() {
        let mut scanner = open_session();
        for (w, h) in [(0, 0), (4, 4), (640, 480)] {
            let err = scanner.decode_bytes(&[], w, h).unwrap_err();
            assert!(matches!(err, ScanError::InvalidInput(_)), "{}x{}", w, h);
        }
    }

    #[test]
    fn test_length_mismatch_is_invalid_input() {
        let mut scanner = open_session();
        let data = vec![0u8; 15];
        let err = scanner.decode_bytes(&data, 4, 4).unwrap_err();
        assert!(matches!(err, ScanError::InvalidInput(_)));
    }

    #[test]
    fn test_zero_sized_image_is_invalid_input() {
        let mut scanner = open_session();
        let img = DynamicImage::new_luma8(0, 4);
        let err = scanner.decode_image(&img).unwrap_err();
        assert!(matches!(err, ScanError::InvalidInput(_)));
    }

    #[test]
    fn test_blank_scan_is_success_with_no_symbols() {
        let mut scanner = open_session();
        let data = vec![255u8; 64 * 64];
        let symbols = scanner.decode_bytes(&data, 64, 64).unwrap();
        assert!(symbols.is_empty());
    }

    #[test]
    fn test_decode_bytes_leaves_the_buffer_untouched() {
        let mut scanner = open_session();
        let data: Vec<u8> = (0..64 * 64).map(|i| (i % 251) as u8).collect();
        let before = data.clone();
        scanner.decode_bytes(&data, 64, 64).unwrap();
        assert_eq!(data, before);
    }

    #[test]
    fn test_sequential_decodes_reuse_the_session() {
        let mut scanner = open_session();
        let first = vec![255u8; 32 * 32];
        let second = vec![0u8; 16 * 16];

        assert!(scanner.decode_bytes(&first, 32, 32).unwrap().is_empty());
        assert!(scanner.decode_bytes(&second, 16, 16).unwrap().is_empty());
        assert!(!scanner.is_closed());
    }

    #[test]
    fn test_decodes_after_close_are_rejected() {
        let mut scanner = open_session();
        scanner.close();

        let data = vec![0u8; 16];
        let err = scanner.decode_bytes(&data, 4, 4).unwrap_err();
        assert!(matches!(err, ScanError::Closed));

        let img = DynamicImage::new_luma8(4, 4);
        let err = scanner.decode_image(&img).unwrap_err();
        assert!(matches!(err, ScanError::Closed));
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut scanner = open_session();
        assert!(!scanner.is_closed());
        scanner.close();
        assert!(scanner.is_closed());
        // Second close must be a no-op, not a double free or an error.
        scanner.close();
        assert!(scanner.is_closed());
    }

    #[test]
    fn test_filtered_session_creation() {
        let scanner = Scanner::new(&[SymbolKind::Ean13, SymbolKind::Qr]).unwrap();
        assert!(!scanner.is_closed());
    }

    #[test]
    fn test_wildcard_in_a_nonempty_set_enables_everything() {
        let scanner = Scanner::new(&[SymbolKind::All, SymbolKind::Qr]).unwrap();
        assert!(!scanner.is_closed());
    }

    #[test]
    fn test_dropping_an_open_session_is_clean() {
        let scanner = open_session();
        drop(scanner);
    }
}
