//! Thread-local storage layout probing.
//!
//! The probe binaries declare thread-local buffers of known sizes and print
//! where the linker put the TLS data (`.tdata`), TLS zero (`.tbss`) and boot
//! TLS image regions. This library holds the pieces both binaries share.

extern crate libc;
#[macro_use]
extern crate log;

pub use layout::{Layout, LayoutError, LABELS};
pub use probe::{padded, run, Buffer, StorageClass};
pub use segment::{load_segments, tls_segment, Segment, SegmentKind};

pub mod layout;
pub mod probe;
pub mod segment;
#[macro_use]
pub mod symbols;
