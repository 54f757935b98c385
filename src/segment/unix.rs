use std::mem;

use libc::{getauxval, AT_PHDR, AT_PHENT, AT_PHNUM, PT_LOAD, PT_PHDR, PT_TLS};

use super::{Segment, SegmentKind};

#[cfg(target_pointer_width = "64")]
type Phdr = libc::Elf64_Phdr;

#[cfg(target_pointer_width = "32")]
type Phdr = libc::Elf32_Phdr;

pub fn program_headers() -> Vec<(SegmentKind, Segment)> {
    let (first, phent, phnum) = unsafe {
        (getauxval(AT_PHDR), getauxval(AT_PHENT), getauxval(AT_PHNUM))
    };
    if first == 0 || phnum == 0 || (phent as usize) < mem::size_of::<Phdr>() {
        return Vec::new()
    }

    let phdrs: Vec<&Phdr> = (0..phnum as usize).map(|i| {
        let at = first as usize + i * phent as usize;
        // The kernel hands us the loaded program header table, which stays
        // mapped for the lifetime of the process.
        unsafe { &*(at as *const Phdr) }
    }).collect();

    // Without PT_PHDR we can't compute the load bias; assume a fixed
    // executable.
    let bias = phdrs.iter()
        .find(|phdr| phdr.p_type == PT_PHDR)
        .map(|phdr| (first as usize).wrapping_sub(phdr.p_vaddr as usize))
        .unwrap_or(0);

    phdrs.into_iter().filter_map(|phdr| {
        let kind = match phdr.p_type {
            PT_LOAD => SegmentKind::Load,
            PT_TLS => SegmentKind::Tls,
            _ => return None,
        };
        Some((kind, Segment {
            addr: bias.wrapping_add(phdr.p_vaddr as usize),
            file_size: phdr.p_filesz as usize,
            mem_size: phdr.p_memsz as usize,
            align: phdr.p_align as usize,
        }))
    }).collect()
}
