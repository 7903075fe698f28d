//! Modification-based removal of MS/MS cross-references.
//!
//! An evidence row is flagged when its modified sequence contains one of the
//! requested modification markers as a plain substring, e.g. `(ox)`. The
//! flagged row's spectra ids form the removal set consumed by the two
//! concrete [`RowTransform`] policies below: the evidence side shrinks
//! `MS/MS IDs` lists, the msms side drops whole rows by id.

use std::io::Read;

use anyhow::Context;
use csv::StringRecord;
use fnv::FnvHashSet;

use crate::columns::{MODIFIED_SEQUENCE, MSMS_IDS};
use crate::project::{index_of, reader, RowTransform};

/// Scan the evidence table and collect every `MS/MS IDs` token belonging to
/// a row whose modified sequence contains any of `markers`.
///
/// Empty tokens are skipped, so evidence rows without associated spectra
/// contribute nothing to the set.
pub fn flagged_msms_ids<R: Read>(
    input: R,
    markers: &[String],
) -> anyhow::Result<FnvHashSet<String>> {
    let mut rdr = reader(input);
    let headers = rdr.headers()?;
    let sequence = index_of(headers, MODIFIED_SEQUENCE)?;
    let ids = index_of(headers, MSMS_IDS)?;

    let mut flagged = FnvHashSet::default();
    let mut matches = vec![0usize; markers.len()];
    for record in rdr.records() {
        let record = record?;
        let mut hit = false;
        for (marker, count) in markers.iter().zip(matches.iter_mut()) {
            if record[sequence].contains(marker.as_str()) {
                *count += 1;
                hit = true;
            }
        }
        if hit {
            flagged.extend(
                record[ids]
                    .split(';')
                    .filter(|id| !id.is_empty())
                    .map(String::from),
            );
        }
    }

    for (marker, count) in markers.iter().zip(matches) {
        if count == 0 {
            log::warn!("modification `{}` did not match any evidence rows", marker);
        } else {
            log::trace!("modification `{}` matched {} evidence rows", marker, count);
        }
    }

    Ok(flagged)
}

/// The msms-side removal set: the same ids, parsed as integers.
pub fn parse_ids(flagged: &FnvHashSet<String>) -> anyhow::Result<FnvHashSet<u64>> {
    flagged
        .iter()
        .map(|id| {
            id.parse::<u64>()
                .with_context(|| format!("non-integer MS/MS id `{}` in evidence", id))
        })
        .collect()
}

/// Evidence-side policy: strip flagged ids from the `MS/MS IDs` list,
/// dropping the row outright only when nothing remains.
///
/// Rows whose id list was empty to begin with are always kept.
pub struct ShrinkMsmsIds<'a> {
    column: usize,
    flagged: &'a FnvHashSet<String>,
}

impl<'a> ShrinkMsmsIds<'a> {
    pub fn new(column: usize, flagged: &'a FnvHashSet<String>) -> Self {
        ShrinkMsmsIds { column, flagged }
    }
}

impl RowTransform for ShrinkMsmsIds<'_> {
    fn apply(&self, record: StringRecord) -> anyhow::Result<Option<StringRecord>> {
        let remaining = record[self.column]
            .split(';')
            .filter(|id| !self.flagged.contains(*id))
            .collect::<Vec<_>>();
        if remaining.is_empty() {
            return Ok(None);
        }
        if remaining.len() == record[self.column].split(';').count() {
            return Ok(Some(record));
        }

        let reduced = remaining.join(";");
        Ok(Some(
            record
                .iter()
                .enumerate()
                .map(|(i, field)| {
                    if i == self.column {
                        reduced.as_str()
                    } else {
                        field
                    }
                })
                .collect(),
        ))
    }
}

/// Msms-side policy: drop the whole row when its integer `id` is flagged.
pub struct DropFlagged<'a> {
    column: usize,
    flagged: &'a FnvHashSet<u64>,
}

impl<'a> DropFlagged<'a> {
    pub fn new(column: usize, flagged: &'a FnvHashSet<u64>) -> Self {
        DropFlagged { column, flagged }
    }
}

impl RowTransform for DropFlagged<'_> {
    fn apply(&self, record: StringRecord) -> anyhow::Result<Option<StringRecord>> {
        let id = record[self.column]
            .parse::<u64>()
            .with_context(|| format!("non-integer msms id `{}`", &record[self.column]))?;
        if self.flagged.contains(&id) {
            Ok(None)
        } else {
            Ok(Some(record))
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const EVIDENCE: &str =
        "Sequence\tModified sequence\tProteins\tMS/MS IDs\tType\tReverse\tCharge\tCalibrated retention time\n\
         PEP\tPEP(ox)\tP1\t1;2\tMULTI-MSMS\t\t2\t10.5\n\
         AAA\tAAA\tP2\t3\tMULTI-MSMS\t\t2\t11.0\n";

    fn set(ids: &[&str]) -> FnvHashSet<String> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    fn row(ids: &str) -> StringRecord {
        StringRecord::from(vec![
            "PEP",
            "PEP(ox)",
            "P1",
            ids,
            "MULTI-MSMS",
            "",
            "2",
            "10.5",
        ])
    }

    #[test]
    fn collects_ids_from_marked_rows() {
        let flagged = flagged_msms_ids(EVIDENCE.as_bytes(), &["(ox)".to_string()]).unwrap();
        assert_eq!(flagged, set(&["1", "2"]));
    }

    #[test]
    fn unmarked_rows_contribute_nothing() {
        let flagged = flagged_msms_ids(EVIDENCE.as_bytes(), &["(ph)".to_string()]).unwrap();
        assert!(flagged.is_empty());
    }

    #[test]
    fn markers_union_across_rows() {
        let markers = vec!["(ox)".to_string(), "AAA".to_string()];
        let flagged = flagged_msms_ids(EVIDENCE.as_bytes(), &markers).unwrap();
        assert_eq!(flagged, set(&["1", "2", "3"]));
    }

    #[test]
    fn empty_id_lists_are_skipped() {
        let table = "Modified sequence\tMS/MS IDs\nPEP(ox)\t\n";
        let flagged = flagged_msms_ids(table.as_bytes(), &["(ox)".to_string()]).unwrap();
        assert!(flagged.is_empty());
    }

    #[test]
    fn shrink_drops_row_when_all_ids_flagged() {
        let flagged = set(&["1", "2"]);
        let transform = ShrinkMsmsIds::new(3, &flagged);
        assert!(transform.apply(row("1;2")).unwrap().is_none());
    }

    #[test]
    fn shrink_keeps_reduced_list_in_order() {
        let flagged = set(&["1"]);
        let transform = ShrinkMsmsIds::new(3, &flagged);
        let out = transform.apply(row("1;2;3")).unwrap().unwrap();
        assert_eq!(&out[3], "2;3");
        assert_eq!(&out[0], "PEP");
        assert_eq!(&out[7], "10.5");
    }

    #[test]
    fn shrink_keeps_unflagged_rows_untouched() {
        let flagged = set(&["9"]);
        let transform = ShrinkMsmsIds::new(3, &flagged);
        let out = transform.apply(row("1;2")).unwrap().unwrap();
        assert_eq!(&out[3], "1;2");
    }

    #[test]
    fn shrink_keeps_rows_without_cross_references() {
        let flagged = set(&["1"]);
        let transform = ShrinkMsmsIds::new(3, &flagged);
        let out = transform.apply(row("")).unwrap().unwrap();
        assert_eq!(&out[3], "");
    }

    #[test]
    fn drop_flagged_removes_whole_rows() {
        let flagged: FnvHashSet<u64> = [7].into_iter().collect();
        let transform = DropFlagged::new(0, &flagged);
        assert!(transform.apply(StringRecord::from(vec!["7"])).unwrap().is_none());
        assert!(transform.apply(StringRecord::from(vec!["8"])).unwrap().is_some());
    }

    #[test]
    fn non_integer_id_is_fatal() {
        let flagged = FnvHashSet::default();
        let transform = DropFlagged::new(0, &flagged);
        assert!(transform.apply(StringRecord::from(vec!["x"])).is_err());
    }

    #[test]
    fn parse_ids_rejects_garbage() {
        assert_eq!(
            parse_ids(&set(&["1", "2"])).unwrap(),
            [1, 2].into_iter().collect::<FnvHashSet<u64>>()
        );
        assert!(parse_ids(&set(&["1", "x"])).is_err());
    }
}
