//! Probe with small initialized and zero buffers plus one larger buffer.
//!
//! `TEST_VAR_LARGE` is zero-initialized unless the `large-tdata` feature is
//! enabled, in which case it carries a nonzero initializer and moves from
//! `.tbss` to `.tdata`.

#[macro_use]
extern crate tls_probe;

use std::cell::Cell;

use tls_probe::Buffer;

const TEST_VAR_DATA_INIT: [u8; 10] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];

#[cfg(feature = "large-tdata")]
const TEST_VAR_LARGE_INIT: [u8; 1136] = tls_probe::padded([1]);
#[cfg(not(feature = "large-tdata"))]
const TEST_VAR_LARGE_INIT: [u8; 1136] = [0; 1136];

thread_local! {
    static TEST_VAR_DATA: Cell<[u8; 10]> = const { Cell::new(TEST_VAR_DATA_INIT) };
    static TEST_VAR_BSS: Cell<[u8; 20]> = const { Cell::new([0; 20]) };
    static TEST_VAR_LARGE: Cell<[u8; 1136]> = const { Cell::new(TEST_VAR_LARGE_INIT) };
}

#[cfg(not(feature = "large-tdata"))]
boot_image! {
    tdata: [u8; 10] = TEST_VAR_DATA_INIT;
    tbss: [u8; 20 + 1136];
}

#[cfg(feature = "large-tdata")]
boot_image! {
    tdata: [u8; 10 + 1136] = tls_probe::padded([1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 1]);
    tbss: [u8; 20];
}

fn main() {
    env_logger::init();

    #[cfg(feature = "large-tdata")]
    let large = Buffer::tdata("TEST_VAR_LARGE", &TEST_VAR_LARGE);
    #[cfg(not(feature = "large-tdata"))]
    let large = Buffer::tbss("TEST_VAR_LARGE", &TEST_VAR_LARGE);

    let buffers = [
        Buffer::tdata("TEST_VAR_DATA", &TEST_VAR_DATA),
        Buffer::tbss("TEST_VAR_BSS", &TEST_VAR_BSS),
        large,
    ];
    tls_probe::run(&boundary_symbols!(), &buffers);
}
