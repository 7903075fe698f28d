use std::io::{Read, Write};

use anyhow::Context;
use csv::StringRecord;

/// Per-row policy applied before projection.
///
/// Returning `Ok(None)` drops the row from the output entirely; returning a
/// record (the original or a rewritten one) keeps it.
pub trait RowTransform {
    fn apply(&self, record: StringRecord) -> anyhow::Result<Option<StringRecord>>;
}

/// Pass-through policy used when no modifications are being removed.
pub struct Identity;

impl RowTransform for Identity {
    fn apply(&self, record: StringRecord) -> anyhow::Result<Option<StringRecord>> {
        Ok(Some(record))
    }
}

/// Tab-delimited reader over a MaxQuant table. Quoting is disabled so that
/// fields pass through byte-for-byte.
pub fn reader<R: Read>(input: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .quoting(false)
        .from_reader(input)
}

fn writer<W: Write>(output: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(output)
}

/// Position of `name` in the header row.
pub fn index_of(headers: &StringRecord, name: &str) -> anyhow::Result<usize> {
    headers
        .iter()
        .position(|header| header == name)
        .with_context(|| format!("column `{}` not found in header", name))
}

/// Locate a column index by reading just the header of `input`.
pub fn locate_column<R: Read>(input: R, name: &str) -> anyhow::Result<usize> {
    let mut rdr = reader(input);
    let headers = rdr.headers()?;
    index_of(headers, name)
}

/// Copy `input` to `output`, keeping only the `keep` columns, in `keep` order.
///
/// Every data row is offered to `transform` before projection; rows it
/// returns `None` for are dropped. Rows are written one at a time, the whole
/// table is never buffered. A data row whose field count differs from the
/// header is a hard error. Returns `(rows read, rows written)`.
pub fn project<R: Read, W: Write>(
    input: R,
    output: W,
    keep: &[&str],
    transform: &dyn RowTransform,
) -> anyhow::Result<(usize, usize)> {
    let mut rdr = reader(input);
    let mut wtr = writer(output);

    let headers = rdr.headers()?;
    let indexes = keep
        .iter()
        .map(|name| index_of(headers, name))
        .collect::<anyhow::Result<Vec<_>>>()?;

    wtr.write_record(keep)?;

    let mut read = 0;
    let mut written = 0;
    for record in rdr.records() {
        read += 1;
        let record = match transform.apply(record?)? {
            Some(record) => record,
            None => continue,
        };
        wtr.write_record(indexes.iter().map(|&i| &record[i]))?;
        written += 1;
    }
    wtr.flush()?;

    Ok((read, written))
}
