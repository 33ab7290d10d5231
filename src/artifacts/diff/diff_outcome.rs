use std::fmt::Display;

/// How a reconciliation record was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiffOutcome {
    /// Only side A has the file; it was copied verbatim
    CopiedFromA,
    /// Only side B has the file; it was copied verbatim
    CopiedFromB,
    UnifiedDiffProduced,
    /// The compared windows were identical although the checksums differ,
    /// which can only be seen when just the tail of a large file is compared
    NoDiffContentButListed,
}

impl Display for DiffOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            DiffOutcome::CopiedFromA => "copied from A",
            DiffOutcome::CopiedFromB => "copied from B",
            DiffOutcome::UnifiedDiffProduced => "diff produced",
            DiffOutcome::NoDiffContentButListed => "no diff content",
        };
        write!(f, "{label}")
    }
}

/// Which bytes of two present files get compared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonStrategy {
    Full,
    TailWindow { lines: usize },
}

impl ComparisonStrategy {
    /// The tail window is used as soon as either file is larger than
    /// `size_limit` bytes
    pub fn select(size_a: u64, size_b: u64, size_limit: u64, line_limit: usize) -> Self {
        if size_a > size_limit || size_b > size_limit {
            ComparisonStrategy::TailWindow { lines: line_limit }
        } else {
            ComparisonStrategy::Full
        }
    }
}

/// Per-outcome counts of a finished comparison
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComparisonSummary {
    pub copied_from_a: usize,
    pub copied_from_b: usize,
    pub diffs_produced: usize,
    pub empty_diffs: usize,
}

impl ComparisonSummary {
    pub fn record(&mut self, outcome: DiffOutcome) {
        match outcome {
            DiffOutcome::CopiedFromA => self.copied_from_a += 1,
            DiffOutcome::CopiedFromB => self.copied_from_b += 1,
            DiffOutcome::UnifiedDiffProduced => self.diffs_produced += 1,
            DiffOutcome::NoDiffContentButListed => self.empty_diffs += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.copied_from_a + self.copied_from_b + self.diffs_produced + self.empty_diffs
    }
}
