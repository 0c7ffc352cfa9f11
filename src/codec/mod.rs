//! Workbook codec: the in-memory document model and its on-disk encoding

mod encode;
mod workbook;
mod xml;

pub use workbook::{Workbook, Worksheet, DEFAULT_SHEET_NAME};
