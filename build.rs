use std::env;
use std::fs;
use std::path::PathBuf;

// Boundary symbols live inside the boot sections so they are ordinary
// section-relative symbols, never TLS ones. Both boot sections go after
// `.data`, clear of the TLS block; the zero part takes no file space.
const SCRIPT: &str = "\
SECTIONS
{
  .tboot : ALIGN(64)
  {
    _stdata = ADDR(.tdata);
    _etdata = ADDR(.tdata) + SIZEOF(.tdata);
    _stbss = ADDR(.tbss);
    _etbss = ADDR(.tbss) + SIZEOF(.tbss);
    _tls_end = ALIGN(ADDR(.tbss) + SIZEOF(.tbss), MAX(ALIGNOF(.tdata), ALIGNOF(.tbss)));
    _stbootdata = .;
    KEEP(*(.tboot.data .tboot.data.*))
    _etbootdata = .;
  }
  .tboot.bss (NOLOAD) : ALIGN(16)
  {
    _stbootbss = .;
    KEEP(*(.tboot.bss .tboot.bss.*))
    _etbootbss = .;
  }
}
INSERT AFTER .data;
";

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let family = env::var("CARGO_CFG_TARGET_FAMILY").unwrap_or_default();
    let vendor = env::var("CARGO_CFG_TARGET_VENDOR").unwrap_or_default();
    let os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    let elf = family.split(',').any(|f| f == "unix") && vendor != "apple";
    if !elf {
        println!("cargo:warning=tls-probe: no boundary symbol script for \
                  target os `{}`, the probe binaries will not link", os);
        return
    }

    let out = PathBuf::from(env::var_os("OUT_DIR").unwrap());
    let script = out.join("tls-probe.ld");
    fs::write(&script, SCRIPT).unwrap();
    println!("cargo:rustc-link-arg-bins={}", script.display());
}
