use crate::areas::checksum_store::ChecksumStore;
use crate::areas::comparison::{Comparison, Side};
use crate::areas::diff_engine::DiffEngine;
use crate::artifacts::diff::diff_outcome::ComparisonSummary;
use crate::artifacts::diff::last_lines::{LastLinesReader, SystemTail, TailReader};
use crate::artifacts::diff::unified::{MyersDiffer, SystemDiffer, UnifiedDiffer};
use crate::artifacts::reconcile::reconciliation_record::reconcile;
use crate::artifacts::reconcile::report::ComparisonReport;
use anyhow::Context;
use colored::Colorize;
use std::io::Write;
use tracing::{debug, info};

impl Comparison {
    /// Compare both directories and write every artifact into the output
    /// directory, returning how each differing file was resolved
    pub fn run(&self) -> anyhow::Result<ComparisonSummary> {
        let output_path = self.output_path();
        std::fs::create_dir_all(output_path).with_context(|| {
            format!("unable to create output directory {}", output_path.display())
        })?;

        writeln!(
            self.writer(),
            "{}",
            format!(
                "# Compare {} and {}",
                self.side(Side::A).path().display(),
                self.side(Side::B).path().display()
            )
            .bold()
        )?;

        let store_a = self.checksums(Side::A)?;
        let store_b = self.checksums(Side::B)?;

        let records = reconcile(&store_a, &store_b);
        info!(differing = records.len(), "reconciled checksums");

        let report_path = self.report_path();
        let report = ComparisonReport::new(
            self.side(Side::A).path().to_string_lossy().into_owned(),
            self.side(Side::B).path().to_string_lossy().into_owned(),
            records,
        );
        report.write(&report_path)?;
        writeln!(
            self.writer(),
            "{}",
            format!("# Combined CSV generated at {}", report_path.display()).bold()
        )?;

        // the diff stage works from the report on disk, not from memory
        let report = ComparisonReport::read(&report_path)?;
        debug!(
            label_a = report.label_a(),
            label_b = report.label_b(),
            records = report.records().len(),
            "read comparison report"
        );

        let diffs_path = self.diffs_path();
        std::fs::create_dir_all(&diffs_path).with_context(|| {
            format!("unable to create diffs directory {}", diffs_path.display())
        })?;
        writeln!(self.writer(), "{}", "# Start comparing files".bold())?;

        let engine = self.diff_engine(diffs_path.clone().into_boxed_path());
        let mut summary = ComparisonSummary::default();
        for record in report.records() {
            let outcome = engine
                .resolve(record, &mut **self.writer())
                .with_context(|| format!("unable to compare {}", record.file_name))?;
            debug!(file = record.file_name.as_str(), %outcome, "resolved");
            summary.record(outcome);
        }

        writeln!(
            self.writer(),
            "{}",
            format!(
                "# Files compared and differences stored in {}",
                diffs_path.display()
            )
            .bold()
        )?;
        writeln!(
            self.writer(),
            "{}",
            format!(
                "# Total differences found: {} ({})",
                summary.total(),
                diffs_path.display()
            )
            .green()
        )?;
        self.writer().flush()?;

        Ok(summary)
    }

    fn checksums(&self, side: Side) -> anyhow::Result<ChecksumStore> {
        let workspace = self.side(side);
        let cache_path = self.checksums_path(side);

        ChecksumStore::build(
            workspace,
            self.options().use_cache,
            &cache_path,
            &mut **self.writer(),
        )
        .with_context(|| format!("unable to checksum {}", workspace.path().display()))
    }

    fn diff_engine(&self, diffs_path: Box<std::path::Path>) -> DiffEngine<'_> {
        let options = self.options();
        let (tail, differ): (Box<dyn LastLinesReader>, Box<dyn UnifiedDiffer>) =
            if options.external_tools {
                (
                    Box::new(SystemTail::default()),
                    Box::new(SystemDiffer::default()),
                )
            } else {
                (
                    Box::new(TailReader::default()),
                    Box::new(MyersDiffer::default()),
                )
            };

        DiffEngine::new(
            self.side(Side::A),
            self.side(Side::B),
            diffs_path,
            options.size_limit_bytes(),
            options.line_limit,
            tail,
            differ,
        )
    }
}
