//! # Golden Tests
//!
//! These tests ensure that receipt layout produces consistent output.
//!
//! ## Test Coverage
//!
//! - **Layout** (`.layout`): laid-out markup for each `.markup` receipt, tags kept.
//! - **Preview** (`.preview`): the visible text of the same receipt.
//!
//! ## Regenerating Golden Files
//!
//! ```bash
//! cargo test generate_golden_files -- --ignored --nocapture
//! ```

use pretty_assertions::assert_eq;
use std::fs;

use slipmark::Composer;
use slipmark::markup::{tag_balance, visible_length};

/// Path to golden test directory
const GOLDEN_DIR: &str = "tests/golden";

/// Receipts with a `.markup` source in the golden directory.
const RECEIPTS: &[&str] = &["cafe"];

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

fn read_source(name: &str) -> String {
    let path = format!("{}/{}.markup", GOLDEN_DIR, name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {}: {}", path, e))
}

fn write_golden(name: &str, ext: &str, data: &str) {
    let path = format!("{}/{}.{}", GOLDEN_DIR, name, ext);
    fs::write(&path, data).unwrap_or_else(|e| panic!("Failed to write {}: {}", path, e));
    println!("Wrote {} ({} bytes)", path, data.len());
}

/// Compare output against a golden file
fn check_golden(name: &str, ext: &str, data: &str) {
    let path = format!("{}/{}.{}", GOLDEN_DIR, name, ext);
    let golden = fs::read_to_string(&path).unwrap_or_else(|_| {
        panic!(
            "Golden file not found: {}. Run `cargo test generate_golden_files -- --ignored` to generate.",
            path
        )
    });
    assert_eq!(data, golden, "golden mismatch for {}", path);
}

// ============================================================================
// GOLDEN FILE GENERATOR
// ============================================================================

/// Generate all golden files.
#[test]
#[ignore]
fn generate_golden_files() {
    let composer = Composer::default();
    for &name in RECEIPTS {
        let source = read_source(name);
        write_golden(name, "layout", &composer.format(&source));
        write_golden(name, "preview", &composer.preview(&source).text());
    }
    println!("\nAll golden files written to {}/", GOLDEN_DIR);
}

// ============================================================================
// RECEIPT TESTS
// ============================================================================

#[test]
fn test_layout_receipts() {
    let composer = Composer::default();
    for &name in RECEIPTS {
        check_golden(name, "layout", &composer.format(&read_source(name)));
    }
}

#[test]
fn test_preview_receipts() {
    let composer = Composer::default();
    for &name in RECEIPTS {
        check_golden(name, "preview", &composer.preview(&read_source(name)).text());
    }
}

#[test]
fn test_receipt_lines_fit_paper() {
    let composer = Composer::default();
    for &name in RECEIPTS {
        let laid_out = composer.format(&read_source(name));
        for line in laid_out.lines() {
            assert!(visible_length(line) <= 42, "{}: {:?}", name, line);
            assert!(tag_balance(line).is_balanced(), "{}: {:?}", name, line);
        }
    }
}

#[test]
fn test_print_cafe() {
    let job = Composer::default().print(&read_source("cafe")).unwrap();
    assert!(!job.clipped);
    let total = job.commands.iter().find(|c| c.text == "TOTAL $12.50").unwrap();
    assert!(total.bold);
    assert!(job.commands.windows(2).all(|w| w[0].y <= w[1].y));
}
