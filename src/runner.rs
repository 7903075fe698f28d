use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use fnv::FnvHashSet;
use log::info;

use crate::columns::{EVIDENCE_COLUMNS, MODIFIED_SEQUENCE, MSMS_COLUMNS, MSMS_ID, MSMS_IDS};
use crate::filter::{flagged_msms_ids, parse_ids, DropFlagged, ShrinkMsmsIds};
use crate::input::Settings;
use crate::project::{locate_column, project, Identity, RowTransform};

pub struct Runner {
    settings: Settings,
    start: Instant,
}

impl Runner {
    pub fn new(settings: Settings) -> Self {
        Runner {
            settings,
            start: Instant::now(),
        }
    }

    fn open(path: &Path) -> anyhow::Result<BufReader<File>> {
        File::open(path)
            .map(BufReader::new)
            .with_context(|| format!("failed to open `{}`", path.display()))
    }

    fn create(path: &Path) -> anyhow::Result<BufWriter<File>> {
        File::create(path)
            .map(BufWriter::new)
            .with_context(|| format!("failed to create `{}`", path.display()))
    }

    /// Run both passes: build the removal set if any modifications were
    /// requested, then project each file down to its column whitelist.
    pub fn run(self) -> anyhow::Result<()> {
        let flagged = match self.settings.remove.is_empty() {
            true => None,
            false => {
                let ids =
                    flagged_msms_ids(Self::open(&self.settings.evidence)?, &self.settings.remove)
                        .with_context(|| {
                            format!(
                                "failed to scan `{}` for `{}`",
                                self.settings.evidence.display(),
                                MODIFIED_SEQUENCE
                            )
                        })?;
                info!("flagged {} MS/MS ids for removal", ids.len());
                Some(ids)
            }
        };

        self.fix_evidence(flagged.as_ref())?;
        self.fix_msms(flagged.as_ref())?;

        info!("finished in {:.3}s", self.start.elapsed().as_secs_f64());
        Ok(())
    }

    fn fix_evidence(&self, flagged: Option<&FnvHashSet<String>>) -> anyhow::Result<()> {
        let transform: Box<dyn RowTransform + '_> = match flagged {
            Some(flagged) => {
                let column = locate_column(Self::open(&self.settings.evidence)?, MSMS_IDS)?;
                Box::new(ShrinkMsmsIds::new(column, flagged))
            }
            None => Box::new(Identity),
        };

        let input = Self::open(&self.settings.evidence)?;
        let output = Self::create(&self.settings.out_evidence)?;
        let (read, written) = project(input, output, &EVIDENCE_COLUMNS, transform.as_ref())
            .with_context(|| format!("failed to fix `{}`", self.settings.evidence.display()))?;
        info!(
            "evidence: kept {} of {} rows -> {}",
            written,
            read,
            self.settings.out_evidence.display()
        );
        Ok(())
    }

    fn fix_msms(&self, flagged: Option<&FnvHashSet<String>>) -> anyhow::Result<()> {
        let ids;
        let transform: Box<dyn RowTransform + '_> = match flagged {
            Some(flagged) => {
                ids = parse_ids(flagged)?;
                let column = locate_column(Self::open(&self.settings.msms)?, MSMS_ID)?;
                Box::new(DropFlagged::new(column, &ids))
            }
            None => Box::new(Identity),
        };

        let input = Self::open(&self.settings.msms)?;
        let output = Self::create(&self.settings.out_msms)?;
        let (read, written) = project(input, output, &MSMS_COLUMNS, transform.as_ref())
            .with_context(|| format!("failed to fix `{}`", self.settings.msms.display()))?;
        info!(
            "msms: kept {} of {} rows -> {}",
            written,
            read,
            self.settings.out_msms.display()
        );
        Ok(())
    }
}
