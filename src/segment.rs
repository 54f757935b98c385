//! Program headers of the running executable, as loaded.
//!
//! `PT_TLS` is what the runtime copies into every new thread's TLS block, so
//! its address and sizes should agree with the `.tdata`/`.tbss` boundary
//! symbols. `PT_LOAD` entries tell which addresses are backed by the file and
//! which are zero-filled at load time.

use std::fmt;

#[cfg(target_os = "linux")] #[path = "segment/unix.rs"] mod imp;
#[cfg(not(target_os = "linux"))] #[path = "segment/fallback.rs"] mod imp;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentKind {
    Load,
    Tls,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment {
    /// Runtime address of the first byte.
    pub addr: usize,
    /// Bytes backed by the file. For `PT_TLS` this is `.tdata`.
    pub file_size: usize,
    /// Full size in memory; the tail past `file_size` is zero-filled.
    pub mem_size: usize,
    pub align: usize,
}

impl Segment {
    pub fn contains(&self, addr: usize) -> bool {
        addr >= self.addr && addr - self.addr < self.mem_size
    }

    /// Whether `addr` lies in the zero-filled tail of this segment.
    pub fn is_zero_fill(&self, addr: usize) -> bool {
        self.contains(addr) && addr - self.addr >= self.file_size
    }
}

/// Looks up the `PT_TLS` segment of the running executable.
///
/// Returns `None` if the executable has no TLS or the platform offers no way
/// to find its program headers.
pub fn tls_segment() -> Option<Segment> {
    imp::program_headers().into_iter()
        .find(|&(kind, _)| kind == SegmentKind::Tls)
        .map(|(_, seg)| seg)
}

/// All `PT_LOAD` segments of the running executable, in header order.
pub fn load_segments() -> Vec<Segment> {
    imp::program_headers().into_iter()
        .filter(|&(kind, _)| kind == SegmentKind::Load)
        .map(|(_, seg)| seg)
        .collect()
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "addr={:#x} filesz={} memsz={} align={}",
               self.addr, self.file_size, self.mem_size, self.align)
    }
}
