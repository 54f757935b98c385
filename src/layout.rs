//! The nine boundary addresses and their textual report.
//!
//! A `Layout` is produced by the `boundary_symbols!` macro inside a probe
//! binary and printed through its `Display` implementation. Harnesses go the
//! other way: they parse a probe's standard output back into a `Layout` with
//! `str::parse` and then call `check` on it.
//!
//! # Example
//!
//! ```
//! use tls_probe::Layout;
//!
//! let report = "\
//! start-of-tdata: 0x1000
//! end-of-tdata: 0x1968
//! start-of-tbss: 0x1970
//! end-of-tbss: 0x2518
//! end-of-tls-block: 0x2520
//! start-of-boot-tdata: 0x9000
//! end-of-boot-tdata: 0x9968
//! start-of-boot-tbss: 0x9970
//! end-of-boot-tbss: 0xa518
//! ";
//!
//! let layout: Layout = report.parse().unwrap();
//! assert_eq!(layout.tdata_len(), 2408);
//! assert!(layout.check().is_ok());
//! assert_eq!(layout.to_string(), report);
//! ```

use std::fmt;
use std::ptr;
use std::str::FromStr;

/// Report labels, in the order the probe prints them.
pub const LABELS: [&str; 9] = [
    "start-of-tdata",
    "end-of-tdata",
    "start-of-tbss",
    "end-of-tbss",
    "end-of-tls-block",
    "start-of-boot-tdata",
    "end-of-boot-tdata",
    "start-of-boot-tbss",
    "end-of-boot-tbss",
];

/// Addresses of the nine linker-provided boundary symbols.
///
/// The probe only ever takes these addresses; nothing is read through them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    pub tdata_start: *const u8,
    pub tdata_end: *const u8,
    pub tbss_start: *const u8,
    pub tbss_end: *const u8,
    pub tls_end: *const u8,
    pub boot_tdata_start: *const u8,
    pub boot_tdata_end: *const u8,
    pub boot_tbss_start: *const u8,
    pub boot_tbss_end: *const u8,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("report ended before `{label}`")]
    MissingLine { label: &'static str },
    #[error("expected `{expected}`, found `{found}`")]
    UnexpectedLabel { expected: &'static str, found: String },
    #[error("`{label}` has a malformed address `{value}`")]
    BadAddress { label: &'static str, value: String },
    #[error("unexpected line after the report: `{0}`")]
    TrailingLine(String),
    #[error("{region} ends at {end:#x} before it starts at {start:#x}")]
    Inverted { region: &'static str, start: usize, end: usize },
    #[error("boot image overlaps the TLS block")]
    BootOverlap,
}

impl Layout {
    /// Builds a layout from raw addresses given in `LABELS` order.
    pub fn from_addrs(addrs: [usize; 9]) -> Layout {
        let p = |i: usize| addrs[i] as *const u8;
        Layout {
            tdata_start: p(0),
            tdata_end: p(1),
            tbss_start: p(2),
            tbss_end: p(3),
            tls_end: p(4),
            boot_tdata_start: p(5),
            boot_tdata_end: p(6),
            boot_tbss_start: p(7),
            boot_tbss_end: p(8),
        }
    }

    /// The `(label, address)` pairs of the report, in print order.
    pub fn entries(&self) -> [(&'static str, *const u8); 9] {
        let addrs = [
            self.tdata_start,
            self.tdata_end,
            self.tbss_start,
            self.tbss_end,
            self.tls_end,
            self.boot_tdata_start,
            self.boot_tdata_end,
            self.boot_tbss_start,
            self.boot_tbss_end,
        ];
        let mut out = [("", ptr::null()); 9];
        for (slot, (label, addr)) in out.iter_mut().zip(LABELS.iter().zip(addrs)) {
            *slot = (*label, addr);
        }
        out
    }

    pub fn tdata_len(&self) -> usize { span(self.tdata_start, self.tdata_end) }
    pub fn tbss_len(&self) -> usize { span(self.tbss_start, self.tbss_end) }
    pub fn tls_block_len(&self) -> usize { span(self.tdata_start, self.tls_end) }
    pub fn boot_tdata_len(&self) -> usize { span(self.boot_tdata_start, self.boot_tdata_end) }
    pub fn boot_tbss_len(&self) -> usize { span(self.boot_tbss_start, self.boot_tbss_end) }

    /// Verifies the properties a correct link must give the boundaries.
    ///
    /// Every region must end at or after its start, and the boot image must
    /// not share any address with the TLS block. The probe never calls this;
    /// it is for whoever inspects the probe's output.
    pub fn check(&self) -> Result<(), LayoutError> {
        let regions = [
            ("tdata", self.tdata_start, self.tdata_end),
            ("tbss", self.tbss_start, self.tbss_end),
            ("tls block", self.tdata_start, self.tls_end),
            ("boot tdata", self.boot_tdata_start, self.boot_tdata_end),
            ("boot tbss", self.boot_tbss_start, self.boot_tbss_end),
        ];
        for (region, start, end) in regions {
            if (end as usize) < (start as usize) {
                return Err(LayoutError::Inverted {
                    region,
                    start: start as usize,
                    end: end as usize,
                })
            }
        }

        let tls = (self.tdata_start as usize, self.tls_end as usize);
        let boot = (self.boot_tdata_start as usize, self.boot_tbss_end as usize);
        if boot.0 < tls.1 && tls.0 < boot.1 {
            return Err(LayoutError::BootOverlap)
        }
        Ok(())
    }
}

fn span(start: *const u8, end: *const u8) -> usize {
    (end as usize).saturating_sub(start as usize)
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (label, addr) in self.entries() {
            writeln!(f, "{}: {:p}", label, addr)?;
        }
        Ok(())
    }
}

impl FromStr for Layout {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Layout, LayoutError> {
        let mut lines = s.lines();
        let mut addrs = [0; 9];
        for (slot, &label) in addrs.iter_mut().zip(LABELS.iter()) {
            let line = lines.next().ok_or(LayoutError::MissingLine { label })?;
            let (found, value) = line.split_once(": ").unwrap_or((line, ""));
            if found != label {
                return Err(LayoutError::UnexpectedLabel {
                    expected: label,
                    found: found.to_string(),
                })
            }
            *slot = parse_addr(value).ok_or_else(|| LayoutError::BadAddress {
                label,
                value: value.to_string(),
            })?;
        }
        if let Some(extra) = lines.find(|l| !l.is_empty()) {
            return Err(LayoutError::TrailingLine(extra.to_string()))
        }
        Ok(Layout::from_addrs(addrs))
    }
}

fn parse_addr(value: &str) -> Option<usize> {
    let digits = value.strip_prefix("0x")?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None
    }
    usize::from_str_radix(digits, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::{Layout, LayoutError, LABELS};

    fn sample() -> Layout {
        Layout::from_addrs([
            0x1000, 0x1968, 0x1970, 0x2518, 0x2520,
            0x9000, 0x9968, 0x9970, 0xa518,
        ])
    }

    #[test]
    fn prints_nine_labelled_lines() {
        let text = sample().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "start-of-tdata: 0x1000");
        assert_eq!(lines[4], "end-of-tls-block: 0x2520");
        assert_eq!(lines[8], "end-of-boot-tbss: 0xa518");
        for (line, label) in lines.iter().zip(LABELS.iter()) {
            assert!(line.starts_with(&format!("{}: 0x", label)), "{}", line);
        }
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn parses_its_own_report() {
        let layout = sample();
        assert_eq!(layout.to_string().parse::<Layout>(), Ok(layout));
    }

    #[test]
    fn sizes() {
        let layout = sample();
        assert_eq!(layout.tdata_len(), 2408);
        assert_eq!(layout.tbss_len(), 2984);
        assert_eq!(layout.tls_block_len(), 0x1520);
        assert_eq!(layout.boot_tdata_len(), 2408);
        assert_eq!(layout.boot_tbss_len(), 2984);
    }

    #[test]
    fn rejects_short_report() {
        let text: String = sample().to_string().lines().take(4)
            .map(|l| format!("{}\n", l)).collect();
        assert_eq!(text.parse::<Layout>(),
                   Err(LayoutError::MissingLine { label: "end-of-tls-block" }));
    }

    #[test]
    fn rejects_reordered_labels() {
        let text = sample().to_string()
            .replacen("start-of-tdata", "end-of-tdata", 1);
        match text.parse::<Layout>() {
            Err(LayoutError::UnexpectedLabel { expected, found }) => {
                assert_eq!(expected, "start-of-tdata");
                assert_eq!(found, "end-of-tdata");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn rejects_bad_addresses() {
        for bad in ["1000", "0x", "0xzz", "(nil)"] {
            let text = sample().to_string()
                .replacen("0x1000", bad, 1);
            assert_eq!(text.parse::<Layout>(), Err(LayoutError::BadAddress {
                label: "start-of-tdata",
                value: bad.to_string(),
            }));
        }
    }

    #[test]
    fn rejects_trailing_lines() {
        let text = format!("{}\nextra: 0x1\n", sample());
        assert_eq!(text.parse::<Layout>(),
                   Err(LayoutError::TrailingLine("extra: 0x1".to_string())));
    }

    #[test]
    fn check_accepts_sane_layout() {
        assert_eq!(sample().check(), Ok(()));
    }

    #[test]
    fn check_flags_inverted_tbss() {
        let mut layout = sample();
        layout.tbss_end = 0x1900 as *const u8;
        assert_eq!(layout.check(), Err(LayoutError::Inverted {
            region: "tbss",
            start: 0x1970,
            end: 0x1900,
        }));
    }

    #[test]
    fn check_flags_boot_overlap() {
        let layout = Layout::from_addrs([
            0x1000, 0x1968, 0x1970, 0x2518, 0x2520,
            0x2000, 0x2100, 0x2100, 0x2200,
        ]);
        assert_eq!(layout.check(), Err(LayoutError::BootOverlap));
    }

    #[test]
    fn adjacent_boot_image_is_disjoint() {
        let layout = Layout::from_addrs([
            0x1000, 0x1968, 0x1970, 0x2518, 0x2520,
            0x2520, 0x2600, 0x2600, 0x2700,
        ]);
        assert_eq!(layout.check(), Ok(()));
    }
}
