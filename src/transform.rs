//! Pure conversions between the tabular model and CSV / JSON / XML

use crate::error::{Result, SheetError};
use crate::reader;
use crate::types::{Record, Row, SheetRecords};
use crate::writer;
use quick_xml::events::Event;
use quick_xml::Reader as XmlReader;
use std::path::{Path, PathBuf};

/// Convert a workbook to one CSV file per sheet.
///
/// Output files are named `{stem}_{sheet_index}.csv`, where the stem comes
/// from `csv_path` or, when absent, from the workbook path itself. Fields are
/// comma-delimited and always quoted. Returns the written paths in sheet
/// order.
///
/// # Errors
///
/// [`SheetError::AlreadyExists`] if any target path exists and `overwrite` is
/// false; the check covers every target before anything is written.
///
/// # Examples
///
/// ```no_run
/// # fn main() -> sheetcast::Result<()> {
/// let written = sheetcast::to_csv("report.xlsx", None, false)?;
/// println!("wrote {} CSV files", written.len());
/// # Ok(())
/// # }
/// ```
pub fn to_csv<P: AsRef<Path>>(
    workbook_path: P,
    csv_path: Option<&Path>,
    overwrite: bool,
) -> Result<Vec<PathBuf>> {
    let workbook_path = workbook_path.as_ref();
    let model = reader::read_model(workbook_path)?;

    let base = match csv_path {
        Some(p) => p.to_path_buf(),
        None => workbook_path.with_extension("csv"),
    };
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let targets: Vec<PathBuf> = (0..model.len())
        .map(|idx| base.with_file_name(format!("{stem}_{idx}.csv")))
        .collect();

    if !overwrite {
        for target in &targets {
            if target.exists() {
                return Err(SheetError::AlreadyExists(target.display().to_string()));
            }
        }
    }

    for ((_, rows), target) in model.iter().zip(&targets) {
        let mut csv_writer = csv::WriterBuilder::new()
            .quote_style(csv::QuoteStyle::Always)
            .from_path(target)?;
        for row in rows {
            csv_writer.write_record(row.iter())?;
        }
        csv_writer.flush()?;
    }

    Ok(targets)
}

/// Convert a workbook to per-sheet JSON records.
///
/// Each sheet's first row is consumed as its header; subsequent rows are
/// right-padded with empty strings to header width and zipped into records.
/// Cells beyond the header width are dropped, and a repeated header keeps the
/// last value. A sheet with zero rows yields an empty record sequence.
///
/// # Examples
///
/// ```no_run
/// # fn main() -> sheetcast::Result<()> {
/// let records = sheetcast::to_json("people.xlsx")?;
/// for (sheet, rows) in &records {
///     println!("{sheet}: {} records", rows.len());
/// }
/// # Ok(())
/// # }
/// ```
pub fn to_json<P: AsRef<Path>>(workbook_path: P) -> Result<SheetRecords> {
    let model = reader::read_model(workbook_path)?;
    let mut output = SheetRecords::new();

    for (name, rows) in model.iter() {
        let mut records = Vec::new();

        if let Some((headers, data)) = rows.split_first() {
            for row in data {
                let mut padded = row.clone();
                padded.pad_to(headers.len());

                let mut record = Record::new();
                for (idx, header) in headers.iter().enumerate() {
                    record.insert(header.clone(), padded[idx].clone());
                }
                records.push(record);
            }
        }

        output.insert(name.to_string(), records);
    }

    Ok(output)
}

/// Build a workbook file from a flat, tag-delimited XML document.
///
/// The header row comes from the tag names of the first root child's
/// children; every root child then contributes one data row holding its
/// children's text content in document order. Each child must match the
/// header schema exactly; a heterogeneous child fails with
/// [`SheetError::Xml`] instead of producing misaligned rows. An element with
/// no text yields an empty cell.
///
/// File creation is delegated to [`writer::create`], so the result is
/// sanitized and persisted like any other new workbook.
///
/// # Errors
///
/// [`SheetError::NotFound`] if `xml_path` does not exist;
/// [`SheetError::AlreadyExists`] if `out_path` exists and `overwrite` is
/// false.
pub fn xml_to_workbook<P: AsRef<Path>, Q: AsRef<Path>>(
    xml_path: P,
    out_path: Q,
    overwrite: bool,
) -> Result<()> {
    let xml_path = xml_path.as_ref();
    if !xml_path.exists() {
        return Err(SheetError::NotFound(xml_path.display().to_string()));
    }

    let rows = parse_flat_xml(xml_path)?;
    writer::create(out_path, &rows, None, overwrite)?;
    Ok(())
}

/// Parse a flat XML document into a header row plus one row per root child
fn parse_flat_xml(path: &Path) -> Result<Vec<Row>> {
    let mut xml = XmlReader::from_file(path)?;
    xml.config_mut().trim_text(true);

    let mut header: Vec<String> = Vec::new();
    let mut rows: Vec<Row> = Vec::new();
    let mut record_tags: Vec<String> = Vec::new();
    let mut current_row = Row::new();
    let mut current_text = String::new();
    let mut record_index = 0usize;
    let mut depth = 0usize;
    let mut buf = Vec::new();

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(e) => {
                depth += 1;
                if depth == 3 {
                    record_tags.push(tag_name(e.name().as_ref()));
                    current_text.clear();
                }
            }
            Event::Empty(e) => {
                if depth == 1 {
                    // Childless record: zero fields, validated like any other
                    record_index += 1;
                    close_record(
                        record_index,
                        &mut header,
                        &mut record_tags,
                        &mut rows,
                        &mut current_row,
                    )?;
                } else if depth == 2 {
                    // Self-closing field: empty cell
                    record_tags.push(tag_name(e.name().as_ref()));
                    current_row.push(String::new());
                }
            }
            Event::Text(e) if depth == 3 => {
                let text = e
                    .unescape()
                    .map_err(|err| SheetError::Xml(err.to_string()))?;
                current_text.push_str(&text);
            }
            Event::End(_) => {
                if depth == 3 {
                    current_row.push(std::mem::take(&mut current_text));
                } else if depth == 2 {
                    record_index += 1;
                    close_record(
                        record_index,
                        &mut header,
                        &mut record_tags,
                        &mut rows,
                        &mut current_row,
                    )?;
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    let mut output = Vec::with_capacity(rows.len() + 1);
    output.push(header.into_iter().collect::<Row>());
    output.extend(rows);
    Ok(output)
}

/// Finish one root child: the first record's tags become the header, every
/// later record must match it exactly.
fn close_record(
    record_index: usize,
    header: &mut Vec<String>,
    record_tags: &mut Vec<String>,
    rows: &mut Vec<Row>,
    current_row: &mut Row,
) -> Result<()> {
    if record_index == 1 {
        *header = record_tags.clone();
    } else if record_tags != header {
        return Err(SheetError::Xml(format!(
            "element {} has schema [{}], expected [{}]",
            record_index,
            record_tags.join(", "),
            header.join(", ")
        )));
    }
    rows.push(std::mem::take(current_row));
    record_tags.clear();
    Ok(())
}

fn tag_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).into_owned()
}
