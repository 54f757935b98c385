//! Probe with one large initialized and one large zero thread-local buffer.

#[macro_use]
extern crate tls_probe;

use std::cell::Cell;

use tls_probe::{padded, Buffer};

const TEST_VAR_DATA_INIT: [u8; 2408] =
    padded([34, 4, 4, 4, 3, 32, 2, 45, 4, 3, 4, 3, 43]);

thread_local! {
    static TEST_VAR_BSS: Cell<[u8; 2984]> = const { Cell::new([0; 2984]) };
    static TEST_VAR_DATA: Cell<[u8; 2408]> = const { Cell::new(TEST_VAR_DATA_INIT) };
}

boot_image! {
    tdata: [u8; 2408] = TEST_VAR_DATA_INIT;
    tbss: [u8; 2984];
}

fn main() {
    env_logger::init();

    let buffers = [
        Buffer::tbss("TEST_VAR_BSS", &TEST_VAR_BSS),
        Buffer::tdata("TEST_VAR_DATA", &TEST_VAR_DATA),
    ];
    tls_probe::run(&boundary_symbols!(), &buffers);
}
