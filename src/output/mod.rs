//! Output module for exporting and summarizing crawl results
//!
//! The engine itself never persists anything; this module is the boundary
//! where the franchise map is handed to the outside world, either as a JSON
//! file for the downstream store or as a console summary for operators.

use crate::catalog::FranchiseMap;
use crate::Result;
use std::fs;
use std::path::Path;

/// Writes the franchise map as pretty-printed JSON
///
/// Record fields use the downstream store's names (`image`, `link`, `type`)
/// and unknown optional values are emitted as the literal "N/A" it expects.
pub fn write_json(releases: &FranchiseMap, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(releases)?;
    fs::write(path, json)?;
    Ok(())
}

/// Prints per-franchise and total record counts to stdout
pub fn print_summary(releases: &FranchiseMap) {
    let total: usize = releases.values().map(Vec::len).sum();

    println!("=== Crawl Summary ===");
    println!("Franchises: {}", releases.len());
    println!("Records:    {}", total);

    for (franchise, records) in releases {
        println!("  {} ({})", franchise, records.len());
    }
}
