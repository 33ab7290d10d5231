use crate::areas::checksum_store::ChecksumStore;
use crate::artifacts::checksums::checksum::Checksum;
use derive_new::new;
use std::collections::BTreeSet;

/// A file whose checksums differ between the two sides
///
/// A missing checksum means the file does not exist on that side.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct ReconciliationRecord {
    pub file_name: String,
    pub checksum_a: Option<Checksum>,
    pub checksum_b: Option<Checksum>,
}

/// Names whose checksums differ between `a` and `b`, sorted by name
///
/// The union of both name sets is walked in byte-wise order. A name present on
/// one side only always differs, since an absent checksum never equals a real
/// one.
pub fn reconcile(a: &ChecksumStore, b: &ChecksumStore) -> Vec<ReconciliationRecord> {
    let file_names = a.file_names().chain(b.file_names()).collect::<BTreeSet<_>>();

    file_names
        .into_iter()
        .filter_map(|file_name| {
            let checksum_a = a.get(file_name);
            let checksum_b = b.get(file_name);

            if checksum_a == checksum_b {
                return None;
            }

            Some(ReconciliationRecord::new(
                file_name.to_string(),
                checksum_a.cloned(),
                checksum_b.cloned(),
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::checksums::checksum_entry::ChecksumEntry;
    use pretty_assertions::assert_eq;

    fn store(files: &[(&str, &str)]) -> ChecksumStore {
        files
            .iter()
            .map(|(name, content)| {
                ChecksumEntry::new(name.to_string(), Checksum::of_bytes(content.as_bytes()))
            })
            .collect()
    }

    #[test]
    fn identical_stores_reconcile_to_nothing() {
        let a = store(&[("a.txt", "hello"), ("b.txt", "world")]);
        let b = store(&[("b.txt", "world"), ("a.txt", "hello")]);

        assert!(reconcile(&a, &b).is_empty());
    }

    #[test]
    fn reports_changed_and_one_sided_files() {
        let a = store(&[("a.txt", "hello")]);
        let b = store(&[("a.txt", "hellp"), ("b.txt", "only in b")]);

        let records = reconcile(&a, &b);

        assert_eq!(
            records,
            vec![
                ReconciliationRecord::new(
                    "a.txt".to_string(),
                    Some(Checksum::of_bytes(b"hello")),
                    Some(Checksum::of_bytes(b"hellp")),
                ),
                ReconciliationRecord::new(
                    "b.txt".to_string(),
                    None,
                    Some(Checksum::of_bytes(b"only in b")),
                ),
            ]
        );
    }

    #[test]
    fn records_are_sorted_byte_wise() {
        let a = store(&[("zeta", "1"), ("Alpha", "1"), ("beta", "1")]);
        let b = store(&[("_under", "2"), ("beta", "2")]);

        let names = reconcile(&a, &b)
            .into_iter()
            .map(|record| record.file_name)
            .collect::<Vec<_>>();

        assert_eq!(names, vec!["Alpha", "_under", "beta", "zeta"]);
    }
}
