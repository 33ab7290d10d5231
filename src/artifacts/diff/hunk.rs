use crate::artifacts::diff::diff_algorithm::Edit;

/// Lines of unchanged context kept around each change
pub const HUNK_CONTEXT: usize = 3;

/// A run of edits with its surrounding context
///
/// `a_offset` and `b_offset` count the lines of each side that come before
/// the hunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk<T> {
    a_offset: usize,
    b_offset: usize,
    edits: Vec<Edit<T>>,
}

impl<T: Clone> Hunk<T> {
    /// Group an edit script into hunks
    ///
    /// Changes separated by at most `2 * context` unchanged lines share a hunk.
    /// A script without changes yields no hunks.
    pub fn build(edits: &[Edit<T>], context: usize) -> Vec<Hunk<T>> {
        let mut offsets = Vec::with_capacity(edits.len());
        let (mut a, mut b) = (0, 0);
        for edit in edits {
            offsets.push((a, b));
            match edit {
                Edit::Delete { .. } => a += 1,
                Edit::Insert { .. } => b += 1,
                Edit::Equal { .. } => {
                    a += 1;
                    b += 1;
                }
            }
        }

        let mut changes = edits
            .iter()
            .enumerate()
            .filter(|(_, edit)| edit.is_change())
            .map(|(i, _)| i)
            .peekable();

        let mut hunks = Vec::new();
        while let Some(first) = changes.next() {
            let mut last = first;
            while let Some(&next) = changes.peek() {
                if next - last - 1 > 2 * context {
                    break;
                }
                last = next;
                changes.next();
            }

            let start = first.saturating_sub(context);
            let end = (last + context + 1).min(edits.len());
            let (a_offset, b_offset) = offsets[start];

            hunks.push(Hunk {
                a_offset,
                b_offset,
                edits: edits[start..end].to_vec(),
            });
        }

        hunks
    }
}

impl<T> Hunk<T> {
    pub fn edits(&self) -> &[Edit<T>] {
        &self.edits
    }

    pub fn a_size(&self) -> usize {
        self.edits
            .iter()
            .filter(|edit| !matches!(edit, Edit::Insert { .. }))
            .count()
    }

    pub fn b_size(&self) -> usize {
        self.edits
            .iter()
            .filter(|edit| !matches!(edit, Edit::Delete { .. }))
            .count()
    }

    /// `@@ -a +b @@` header
    ///
    /// A single-line range omits its length, and an empty range names the line
    /// before it.
    pub fn header(&self) -> String {
        format!(
            "@@ -{} +{} @@",
            format_range(self.a_offset, self.a_size()),
            format_range(self.b_offset, self.b_size())
        )
    }
}

fn format_range(offset: usize, size: usize) -> String {
    match size {
        0 => format!("{offset},0"),
        1 => format!("{}", offset + 1),
        _ => format!("{},{}", offset + 1, size),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::diff::diff_algorithm::MyersDiff;
    use pretty_assertions::assert_eq;

    fn numbered(range: std::ops::RangeInclusive<usize>) -> Vec<String> {
        range.map(|i| format!("line{i}")).collect()
    }

    #[test]
    fn single_change_gets_three_lines_of_context() {
        let a = numbered(1..=10);
        let mut b = a.clone();
        b[4] = "changed".to_string();

        let edits = MyersDiff::new(&a, &b).diff();
        let hunks = Hunk::build(&edits, HUNK_CONTEXT);

        assert_eq!(hunks.len(), 1);
        assert_eq!(hunks[0].header(), "@@ -2,7 +2,7 @@");
        assert_eq!(hunks[0].edits().first(), Some(&Edit::Equal { value: "line2".to_string() }));
    }

    #[test]
    fn distant_changes_are_split_and_close_ones_merged() {
        let a = numbered(1..=30);
        let mut b = a.clone();
        b[1] = "x".to_string();
        // 6 unchanged lines between: merged
        b[8] = "y".to_string();
        // 20 unchanged lines between: split
        b[29] = "z".to_string();

        let edits = MyersDiff::new(&a, &b).diff();
        let headers = Hunk::build(&edits, HUNK_CONTEXT)
            .iter()
            .map(Hunk::header)
            .collect::<Vec<_>>();

        assert_eq!(headers, vec!["@@ -1,12 +1,12 @@", "@@ -27,4 +27,4 @@"]);
    }

    #[test]
    fn empty_ranges_name_the_preceding_line() {
        let a: Vec<String> = vec![];
        let b = numbered(1..=2);

        let edits = MyersDiff::new(&a, &b).diff();
        let hunks = Hunk::build(&edits, HUNK_CONTEXT);

        assert_eq!(hunks[0].header(), "@@ -0,0 +1,2 @@");
    }

    #[test]
    fn unchanged_script_has_no_hunks() {
        let a = numbered(1..=3);

        let edits = MyersDiff::new(&a, &a).diff();

        assert!(Hunk::build(&edits, HUNK_CONTEXT).is_empty());
    }
}
