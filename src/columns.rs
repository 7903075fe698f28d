//! Column whitelists for the two MaxQuant tables we rewrite.
//!
//! MaxQuant DDA output carries dozens of columns that a DIA re-analysis
//! never reads; only the ones listed here survive, in this order.

/// Columns retained from `evidence.txt`, in output order.
pub const EVIDENCE_COLUMNS: [&str; 8] = [
    "Sequence",
    "Modified sequence",
    "Proteins",
    "MS/MS IDs",
    "Type",
    "Reverse",
    "Charge",
    "Calibrated retention time",
];

/// Columns retained from `msms.txt`, in output order.
pub const MSMS_COLUMNS: [&str; 8] = [
    "Fragmentation",
    "Mass analyzer",
    "Retention time",
    "PEP",
    "Score",
    "Matches",
    "Intensities",
    "id",
];

/// Peptide sequence annotated with inline modification markers.
pub const MODIFIED_SEQUENCE: &str = "Modified sequence";

/// Semicolon-delimited list of msms row ids supporting an evidence row.
pub const MSMS_IDS: &str = "MS/MS IDs";

/// Unique integer id of an msms row.
pub const MSMS_ID: &str = "id";
