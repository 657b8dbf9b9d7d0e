//! Symbology kinds and decoded results

/// Barcode families the engine can be asked to search for.
///
/// Each variant's discriminant is the engine's `zbar_symbol_type_t` code.
/// [`SymbolKind::All`] is a configuration directive only: its zero value is
/// the engine's "apply to every symbology" sentinel and never names a real
/// symbol type, so it has no entry in the code mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum SymbolKind {
    All = 0,
    Ean8 = 8,
    UpcE = 9,
    Isbn10 = 10,
    UpcA = 12,
    Ean13 = 13,
    Isbn13 = 14,
    I25 = 25,
    DataBar = 34,
    DataBarExp = 35,
    Codabar = 38,
    Code39 = 39,
    Pdf417 = 57,
    Qr = 64,
    Code93 = 93,
    Code128 = 128,
    /// Not in mainline `zbar.h` through 0.23; matches the extended headers
    /// that ship Aztec support. Engines without it reject the enable call.
    Aztec = 225,
}

impl SymbolKind {
    /// The engine's integer code for this kind, or `None` for the wildcard.
    pub fn to_native(self) -> Option<i32> {
        match self {
            SymbolKind::All => None,
            other => Some(other as i32),
        }
    }

    /// Map an engine code back to a kind. Unknown codes (including the
    /// engine's internal partial-result markers) have no mapping.
    pub fn from_native(code: i32) -> Option<SymbolKind> {
        Some(match code {
            8 => SymbolKind::Ean8,
            9 => SymbolKind::UpcE,
            10 => SymbolKind::Isbn10,
            12 => SymbolKind::UpcA,
            13 => SymbolKind::Ean13,
            14 => SymbolKind::Isbn13,
            25 => SymbolKind::I25,
            34 => SymbolKind::DataBar,
            35 => SymbolKind::DataBarExp,
            38 => SymbolKind::Codabar,
            39 => SymbolKind::Code39,
            57 => SymbolKind::Pdf417,
            64 => SymbolKind::Qr,
            93 => SymbolKind::Code93,
            128 => SymbolKind::Code128,
            225 => SymbolKind::Aztec,
            _ => return None,
        })
    }
}

/// One decoded symbol.
///
/// Owned by the caller from the moment it is returned; it carries no
/// reference to the session or the engine's result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedSymbol {
    /// The engine-assigned name of the matched symbology. The engine is
    /// authoritative here; the spelling can differ from the requested
    /// [`SymbolKind`]'s label.
    pub symbology: String,
    /// The decoded payload interpreted as text.
    pub text: String,
}
