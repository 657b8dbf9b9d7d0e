//! ZBar engine FFI binding layer
//!
//! This module encapsulates the C interface of the ZBar symbol-recognition
//! engine behind owned handle types. Handle lifetime is manual on the C side
//! (paired create/destroy calls, no finalization), so each wrapper ties the
//! destroy call to `Drop` and is unusable after it runs.

// Use the stub implementation when building on docs.rs
#[cfg(feature = "docsrs")]
mod docsrs_stub;

#[cfg(feature = "docsrs")]
pub use docsrs_stub::*;

// Use the complete implementation for normal builds
#[cfg(not(feature = "docsrs"))]
mod normal_impl {

    use std::ffi::{c_char, c_int, c_ulong, c_void, CStr};
    use std::marker::PhantomData;
    use std::ptr::NonNull;

    /// Hand-maintained declarations for the subset of `zbar.h` used here.
    /// The ZBar C ABI for these entry points has been stable since 0.10.
    #[allow(non_camel_case_types)]
    #[allow(dead_code)]
    mod ffi {
        use std::ffi::{c_char, c_int, c_uint, c_ulong, c_void};
        use std::marker::{PhantomData, PhantomPinned};

        #[repr(C)]
        pub struct zbar_image_scanner_t {
            _data: [u8; 0],
            _marker: PhantomData<(*mut u8, PhantomPinned)>,
        }

        #[repr(C)]
        pub struct zbar_image_t {
            _data: [u8; 0],
            _marker: PhantomData<(*mut u8, PhantomPinned)>,
        }

        #[repr(C)]
        pub struct zbar_symbol_t {
            _data: [u8; 0],
            _marker: PhantomData<(*mut u8, PhantomPinned)>,
        }

        pub type zbar_image_cleanup_handler_t = unsafe extern "C" fn(image: *mut zbar_image_t);

        extern "C" {
            pub fn zbar_image_scanner_create() -> *mut zbar_image_scanner_t;
            pub fn zbar_image_scanner_destroy(scanner: *mut zbar_image_scanner_t);
            pub fn zbar_image_scanner_set_config(
                scanner: *mut zbar_image_scanner_t,
                symbology: c_int,
                config: c_int,
                value: c_int,
            ) -> c_int;

            pub fn zbar_image_create() -> *mut zbar_image_t;
            pub fn zbar_image_destroy(image: *mut zbar_image_t);
            pub fn zbar_image_set_format(image: *mut zbar_image_t, format: c_ulong);
            pub fn zbar_image_set_size(image: *mut zbar_image_t, width: c_uint, height: c_uint);
            pub fn zbar_image_set_data(
                image: *mut zbar_image_t,
                data: *const c_void,
                data_byte_length: c_ulong,
                cleanup_hndlr: Option<zbar_image_cleanup_handler_t>,
            );

            pub fn zbar_scan_image(
                scanner: *mut zbar_image_scanner_t,
                image: *mut zbar_image_t,
            ) -> c_int;

            pub fn zbar_image_first_symbol(image: *const zbar_image_t) -> *const zbar_symbol_t;
            pub fn zbar_symbol_next(symbol: *const zbar_symbol_t) -> *const zbar_symbol_t;
            pub fn zbar_symbol_get_type(symbol: *const zbar_symbol_t) -> c_int;
            pub fn zbar_symbol_get_data(symbol: *const zbar_symbol_t) -> *const c_char;
            pub fn zbar_get_symbol_name(symbology: c_int) -> *const c_char;
        }
    }

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
                EngineError::AllocationFailed(what) => {
                    write!(f, "failed to allocate {}", what)
                }
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
    ///
    /// Passed to [`ImageScanner::set_config`]; symbology code 0 applies the
    /// knob to every symbology at once.
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

    /// Owned engine scanner context.
    pub struct ImageScanner {
        ptr: NonNull<ffi::zbar_image_scanner_t>,
    }

    impl ImageScanner {
        pub fn new() -> Result<Self, EngineError> {
            let ptr = NonNull::new(unsafe { ffi::zbar_image_scanner_create() })
                .ok_or(EngineError::AllocationFailed("scanner context"))?;
            Ok(ImageScanner { ptr })
        }

        /// Set a configuration knob for one symbology; code 0 applies to all.
        pub fn set_config(
            &mut self,
            symbology: i32,
            config: Config,
            value: i32,
        ) -> Result<(), EngineError> {
            let rc = unsafe {
                ffi::zbar_image_scanner_set_config(
                    self.ptr.as_ptr(),
                    symbology,
                    config as c_int,
                    value,
                )
            };
            if rc == 0 {
                Ok(())
            } else {
                Err(EngineError::ConfigRejected(symbology))
            }
        }

        /// Run one scan pass over `image`, returning the engine's signed hit
        /// count. The image's bound data pointer is only read while this call
        /// is in flight.
        pub fn scan(&mut self, image: &mut EngineImage) -> i32 {
            unsafe { ffi::zbar_scan_image(self.ptr.as_ptr(), image.ptr.as_ptr()) }
        }
    }

    impl Drop for ImageScanner {
        fn drop(&mut self) {
            unsafe { ffi::zbar_image_scanner_destroy(self.ptr.as_ptr()) }
        }
    }

    // One scan session per thread of control; the handle itself may move
    // between threads.
    unsafe impl Send for ImageScanner {}

    // ============== Image Handle ==============

    /// Owned engine image handle.
    ///
    /// The handle carries a declared pixel format and size plus a borrowed
    /// pointer to caller-owned pixel storage; it never owns pixel data.
    pub struct EngineImage {
        ptr: NonNull<ffi::zbar_image_t>,
    }

    impl EngineImage {
        pub fn new() -> Result<Self, EngineError> {
            let ptr = NonNull::new(unsafe { ffi::zbar_image_create() })
                .ok_or(EngineError::AllocationFailed("image handle"))?;
            Ok(EngineImage { ptr })
        }

        pub fn set_format(&mut self, fourcc: u32) {
            unsafe { ffi::zbar_image_set_format(self.ptr.as_ptr(), c_ulong::from(fourcc)) }
        }

        pub fn set_size(&mut self, width: u32, height: u32) {
            unsafe { ffi::zbar_image_set_size(self.ptr.as_ptr(), width, height) }
        }

        /// Bind `data` as the image's backing pixel storage. Ownership is not
        /// transferred and no cleanup handler is registered; the engine only
        /// reads through the pointer during a scan call.
        ///
        /// # Safety
        ///
        /// The engine keeps the raw pointer until it is rebound. `data` must
        /// stay alive and unmoved at least until the next
        /// [`ImageScanner::scan`] on this image returns.
        pub unsafe fn set_data(&mut self, data: &[u8]) {
            ffi::zbar_image_set_data(
                self.ptr.as_ptr(),
                data.as_ptr() as *const c_void,
                data.len() as c_ulong,
                None,
            );
        }

        /// Iterate the result list left behind by the most recent scan.
        ///
        /// The engine invalidates the list on the next scan or destroy; the
        /// borrow on `self` rules both out while the iterator lives, so
        /// results must be copied out before the handle is reused.
        pub fn symbols(&self) -> Symbols<'_> {
            Symbols {
                cur: unsafe { ffi::zbar_image_first_symbol(self.ptr.as_ptr()) },
                _image: PhantomData,
            }
        }
    }

    impl Drop for EngineImage {
        fn drop(&mut self) {
            unsafe { ffi::zbar_image_destroy(self.ptr.as_ptr()) }
        }
    }

    unsafe impl Send for EngineImage {}

    // ============== Result List ==============

    /// Forward iterator over the engine's null-terminated, singly linked
    /// result list.
    pub struct Symbols<'a> {
        cur: *const ffi::zbar_symbol_t,
        _image: PhantomData<&'a EngineImage>,
    }

    impl<'a> Iterator for Symbols<'a> {
        type Item = Symbol<'a>;

        fn next(&mut self) -> Option<Self::Item> {
            let ptr = NonNull::new(self.cur.cast_mut())?;
            self.cur = unsafe { ffi::zbar_symbol_next(self.cur) };
            Some(Symbol {
                ptr,
                _image: PhantomData,
            })
        }
    }

    /// One matched symbol, borrowed from the engine's result list.
    pub struct Symbol<'a> {
        ptr: NonNull<ffi::zbar_symbol_t>,
        _image: PhantomData<&'a EngineImage>,
    }

    impl Symbol<'_> {
        /// The engine's integer code for the matched symbology.
        pub fn type_code(&self) -> i32 {
            unsafe { ffi::zbar_symbol_get_type(self.ptr.as_ptr()) }
        }

        /// The engine's human-readable name for the matched symbology.
        pub fn type_name(&self) -> String {
            cstr_lossy(unsafe { ffi::zbar_get_symbol_name(self.type_code()) })
        }

        /// The decoded payload, read up to the engine's terminating NUL.
        pub fn data(&self) -> String {
            cstr_lossy(unsafe { ffi::zbar_symbol_get_data(self.ptr.as_ptr()) })
        }
    }

    fn cstr_lossy(ptr: *const c_char) -> String {
        if ptr.is_null() {
            String::new()
        } else {
            unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_y800_fourcc() {
            // 'Y' | '8' << 8 | '0' << 16 | '0' << 24
            assert_eq!(FOURCC_Y800, 0x3030_3859);
        }

        #[test]
        fn test_config_values() {
            assert_eq!(Config::Enable as i32, 0);
            assert_eq!(Config::MinLen as i32, 0x20);
            assert_eq!(Config::XDensity as i32, 0x100);
        }
    }
} // end of normal_impl module

// Re-export types from the normal implementation
#[cfg(not(feature = "docsrs"))]
pub use normal_impl::*;
