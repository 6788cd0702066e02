//! # Printer Configuration
//!
//! Hardware characteristics of the receipt printers the layout targets.
//!
//! ## Supported Printers
//!
//! | Model | Columns | Width (dots) |
//! |-------|---------|--------------|
//! | TSP100 | 42 | 576 |
//!
//! ## Usage
//!
//! ```
//! use slipmark::printer::PrinterConfig;
//!
//! let config = PrinterConfig::TSP100;
//! assert_eq!(config.columns, 42);
//! assert_eq!(config.width_dots, 576);
//! ```

/// # Printer Configuration
///
/// The canvas spreads `columns` base-size characters across `width_dots`:
///
/// ```text
/// For TSP100:
///   dots per column = 576 / 42 ≈ 13.7
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrinterConfig {
    /// Printer model name
    pub name: &'static str,

    /// Maximum print width in dots (pixels)
    pub width_dots: u16,

    /// Characters per line at the base font size
    pub columns: usize,
}

impl PrinterConfig {
    /// # Star TSP100
    ///
    /// 80mm paper width thermal receipt printer.
    ///
    /// ## Print Area
    ///
    /// ```text
    /// ├── 4mm ──┼────── 72mm printable ──────┼── 4mm ──┤
    /// │ margin  │   576 dots / 42 columns    │ margin  │
    /// ```
    pub const TSP100: Self = Self {
        name: "Star TSP100",
        width_dots: 576,
        columns: 42,
    };
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self::TSP100
    }
}
