const UNIT: u64 = 1024;
const PREFIXES: [char; 6] = ['K', 'M', 'G', 'T', 'P', 'E'];

/// Format a byte count with 1024-based units, e.g. `1.5 MB`.
pub fn human_readable_size(size: u64) -> String {
    if size < UNIT {
        return format!("{size} B");
    }

    let (mut div, mut exp) = (UNIT, 0);
    let mut n = size / UNIT;
    while n >= UNIT {
        div *= UNIT;
        exp += 1;
        n /= UNIT;
    }

    format!("{:.1} {}B", size as f64 / div as f64, PREFIXES[exp])
}
