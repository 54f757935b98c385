//! Bindings to the linker-provided boundary symbols.
//!
//! The symbols are defined by the linker script fragment that `build.rs`
//! attaches to the probe binaries, so these macros are meant to be expanded
//! in a binary, never in this library.

/// Captures the addresses of the nine boundary symbols as a `Layout`.
///
/// Nothing is read through the symbols; only `addr_of!` is applied to them.
/// Linking fails if the symbols are not defined.
///
/// # Example
///
/// ```ignore
/// let layout = tls_probe::boundary_symbols!();
/// print!("{}", layout);
/// ```
#[macro_export]
macro_rules! boundary_symbols(
    () => ({
        #[allow(non_upper_case_globals)]
        extern "C" {
            static _stdata: u8;
            static _etdata: u8;
            static _stbss: u8;
            static _etbss: u8;
            static _tls_end: u8;
            static _stbootdata: u8;
            static _etbootdata: u8;
            static _stbootbss: u8;
            static _etbootbss: u8;
        }

        #[allow(unused_unsafe)]
        unsafe {
            $crate::Layout {
                tdata_start: ::std::ptr::addr_of!(_stdata),
                tdata_end: ::std::ptr::addr_of!(_etdata),
                tbss_start: ::std::ptr::addr_of!(_stbss),
                tbss_end: ::std::ptr::addr_of!(_etbss),
                tls_end: ::std::ptr::addr_of!(_tls_end),
                boot_tdata_start: ::std::ptr::addr_of!(_stbootdata),
                boot_tdata_end: ::std::ptr::addr_of!(_etbootdata),
                boot_tbss_start: ::std::ptr::addr_of!(_stbootbss),
                boot_tbss_end: ::std::ptr::addr_of!(_etbootbss),
            }
        }
    })
);

/// Declares the contents of the boot TLS image.
///
/// `tdata` is the initialized part and normally repeats the initializer of
/// the binary's `.tdata` buffers; `tbss` is a zero area. The two land in the
/// `.tboot.data` and `.tboot.bss` input sections, which the linker fragment
/// collects between `_stbootdata`/`_etbootdata` and
/// `_stbootbss`/`_etbootbss`. The zero part goes to a `NOLOAD` output
/// section, so like `.tbss` it is zero-filled at load time rather than
/// stored in the file.
#[macro_export]
macro_rules! boot_image(
    (tdata: [u8; $dlen:expr] = $init:expr; tbss: [u8; $blen:expr];) => (
        #[used]
        #[allow(dead_code)]
        #[link_section = ".tboot.data"]
        static BOOT_TDATA: [u8; $dlen] = $init;

        #[used]
        #[allow(dead_code)]
        #[link_section = ".tboot.bss"]
        static mut BOOT_TBSS: [u8; $blen] = [0; $blen];
    );
);
