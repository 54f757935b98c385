//! Reporting logic shared by the probe binaries.

use std::cell::Cell;
use std::fmt;
use std::thread::LocalKey;

use crate::layout::Layout;
use crate::segment;

/// Which TLS subregion a buffer is declared for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageClass {
    /// Explicitly initialized, lands in `.tdata`.
    Tdata,
    /// Zero-initialized, lands in `.tbss`.
    Tbss,
}

/// A thread-local buffer declared by a probe, as seen from the current
/// thread.
#[derive(Clone, Copy, Debug)]
pub struct Buffer {
    pub name: &'static str,
    pub class: StorageClass,
    pub addr: *const u8,
    pub len: usize,
}

impl Buffer {
    /// Describes `key`, taking the address of this thread's instance.
    ///
    /// The buffer is never read or written; only its address escapes.
    ///
    /// Buffers are `Cell`s so the compiler treats the backing static as
    /// writable; an immutable all-zero static would be emitted into `.tdata`
    /// instead of `.tbss`.
    pub fn new<const N: usize>(name: &'static str,
                               class: StorageClass,
                               key: &'static LocalKey<Cell<[u8; N]>>) -> Buffer {
        let addr = key.with(|buf| buf.as_ptr().cast::<u8>() as *const u8);
        Buffer { name, class, addr, len: N }
    }

    pub fn tdata<const N: usize>(name: &'static str,
                                 key: &'static LocalKey<Cell<[u8; N]>>) -> Buffer {
        Buffer::new(name, StorageClass::Tdata, key)
    }

    pub fn tbss<const N: usize>(name: &'static str,
                                key: &'static LocalKey<Cell<[u8; N]>>) -> Buffer {
        Buffer::new(name, StorageClass::Tbss, key)
    }
}

impl fmt::Display for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let class = match self.class {
            StorageClass::Tdata => "tdata",
            StorageClass::Tbss => "tbss",
        };
        write!(f, "{} ({}, {} bytes) at {:p}", self.name, class, self.len, self.addr)
    }
}

/// Builds an `N`-byte initializer whose leading bytes are `head` and whose
/// remainder is zero.
///
/// # Panics
///
/// Fails to evaluate (at compile time, in a `const` context) if `head` is
/// longer than `N`.
pub const fn padded<const N: usize, const M: usize>(head: [u8; M]) -> [u8; N] {
    assert!(M <= N);
    let mut out = [0; N];
    let mut i = 0;
    while i < M {
        out[i] = head[i];
        i += 1;
    }
    out
}

/// Prints the boundary report for `layout` on standard output.
///
/// `buffers` and the runtime `PT_TLS` segment are only logged, at debug
/// level, on standard error. Nothing here validates the layout.
pub fn run(layout: &Layout, buffers: &[Buffer]) {
    for buffer in buffers {
        debug!("thread-local {}", buffer);
    }
    match segment::tls_segment() {
        Some(seg) => debug!("PT_TLS segment: {}", seg),
        None => debug!("no PT_TLS segment found"),
    }
    for seg in segment::load_segments() {
        debug!("PT_LOAD segment: {}", seg);
    }

    print!("{}", layout);
}
