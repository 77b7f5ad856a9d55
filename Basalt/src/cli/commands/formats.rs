//! CLI command listing target formats

use crate::basis::ALIASES;
use crate::formats::target::TargetFormat;

pub fn execute() {
    println!("{:<16} {:<12} {:>6}  {}", "Format", "Kind", "Bytes", "Alias");
    for (format, alias) in TargetFormat::ALL.iter().zip(ALIASES) {
        let (kind, unit) = if format.is_compressed() {
            ("compressed", "/block")
        } else {
            ("pixels", "/pixel")
        };
        println!(
            "{:<16} {:<12} {:>6}{}  {}",
            format.name(),
            kind,
            format.bytes_per_block_or_pixel(),
            unit,
            alias
        );
    }
}
