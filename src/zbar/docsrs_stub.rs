//! docsrs stub engine - compiled in place of the FFI layer
//!
//! Builds without libzbar: handle creation succeeds, configuration is
//! accepted, and every scan finds nothing. docs.rs uses it to build the
//! crate; the test suite uses it to run on hosts without the engine
//! installed (`cargo test --features docsrs`).

use std::marker::PhantomData;

// ============== Error Types ==============

/// Engine-level errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The engine could not allocate a native handle
    AllocationFailed(&'static str),
    /// The engine rejected a configuration call
    ConfigRejected(i32),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::AllocationFailed(what) => write!(f, "failed to allocate {}", what),
            EngineError::ConfigRejected(symbology) => {
                write!(f, "engine rejected configuration for symbology code {}", symbology)
            }
        }
    }
}

impl std::error::Error for EngineError {}

// ============== Constants & Configuration ==============

/// The fourcc tag for 8-bit single-plane grayscale ("Y800").
pub const FOURCC_Y800: u32 = u32::from_le_bytes(*b"Y800");

/// Per-symbology configuration knobs understood by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum Config {
    Enable = 0,
    AddCheck = 1,
    EmitCheck = 2,
    Ascii = 3,
    Binary = 4,
    MinLen = 0x20,
    MaxLen = 0x21,
    Uncertainty = 0x40,
    Position = 0x80,
    TestInverted = 0x81,
    XDensity = 0x100,
    YDensity = 0x101,
}

// ============== Scanner Context ==============

/// Stub scanner context; accepts any configuration.
pub struct ImageScanner {
    // keep parity with the FFI handle: movable between threads, not shared
    _not_sync: PhantomData<*mut ()>,
}

impl ImageScanner {
    pub fn new() -> Result<Self, EngineError> {
        Ok(ImageScanner {
            _not_sync: PhantomData,
        })
    }

    pub fn set_config(
        &mut self,
        _symbology: i32,
        _config: Config,
        _value: i32,
    ) -> Result<(), EngineError> {
        Ok(())
    }

    /// A stub scan pass finds nothing.
    pub fn scan(&mut self, _image: &mut EngineImage) -> i32 {
        0
    }
}

unsafe impl Send for ImageScanner {}

// ============== Image Handle ==============

/// Stub image handle; format, size and data binding are accepted and
/// discarded.
pub struct EngineImage {
    _not_sync: PhantomData<*mut ()>,
}

impl EngineImage {
    pub fn new() -> Result<Self, EngineError> {
        Ok(EngineImage {
            _not_sync: PhantomData,
        })
    }

    pub fn set_format(&mut self, _fourcc: u32) {}

    pub fn set_size(&mut self, _width: u32, _height: u32) {}

    /// # Safety
    ///
    /// No pointer is retained; the contract mirrors the real engine's so
    /// callers are written the same either way.
    pub unsafe fn set_data(&mut self, _data: &[u8]) {}

    pub fn symbols(&self) -> Symbols<'_> {
        Symbols {
            _image: PhantomData,
        }
    }
}

unsafe impl Send for EngineImage {}

// ============== Result List ==============

/// Forward iterator over the (always empty) stub result list.
pub struct Symbols<'a> {
    _image: PhantomData<&'a EngineImage>,
}

impl<'a> Iterator for Symbols<'a> {
    type Item = Symbol<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        None
    }
}

/// One matched symbol; never produced by the stub engine.
pub struct Symbol<'a> {
    _image: PhantomData<&'a EngineImage>,
}

impl Symbol<'_> {
    pub fn type_code(&self) -> i32 {
        unreachable!("the stub engine yields no symbols")
    }

    pub fn type_name(&self) -> String {
        unreachable!("the stub engine yields no symbols")
    }

    pub fn data(&self) -> String {
        unreachable!("the stub engine yields no symbols")
    }
}
