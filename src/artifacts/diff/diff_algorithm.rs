//! Myers' shortest edit script, in linear space
//!
//! Instead of keeping one frontier per edit distance and walking them back,
//! the search meets in the middle: a forward and a backward search run until
//! their paths overlap, the overlap point splits both inputs in two, and each
//! half is diffed the same way. Only two frontiers are ever alive, so memory
//! stays proportional to the input length whatever the edit distance.
//!
//! Lines shared at the start and end of a range are split off before each
//! search. When a search has spent `MAX_COST` edits without meeting, it
//! settles for the furthest-reaching forward path as the split point, which
//! keeps inputs that differ everywhere from costing quadratic time.
//!
//! Within a run of consecutive changes, deletions always come before
//! insertions.

use derive_new::new;
use std::ops::{Index, IndexMut, Range};

/// Edit distance a single middle-snake search explores before settling
const MAX_COST: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit<T> {
    Delete { value: T },
    Insert { value: T },
    Equal { value: T },
}

impl<T> Edit<T> {
    pub fn value(&self) -> &T {
        match self {
            Edit::Delete { value } | Edit::Insert { value } | Edit::Equal { value } => value,
        }
    }

    pub fn is_change(&self) -> bool {
        !matches!(self, Edit::Equal { .. })
    }

    /// Unified diff line prefix
    pub fn marker(&self) -> u8 {
        match self {
            Edit::Delete { .. } => b'-',
            Edit::Insert { .. } => b'+',
            Edit::Equal { .. } => b' ',
        }
    }
}

/// Furthest-reaching x per diagonal `k`, addressed by signed diagonal
struct Frontier {
    offset: isize,
    furthest: Vec<usize>,
}

impl Frontier {
    fn new(bound: usize) -> Self {
        Frontier {
            offset: bound as isize,
            furthest: vec![0; 2 * bound + 2],
        }
    }
}

impl Index<isize> for Frontier {
    type Output = usize;

    fn index(&self, k: isize) -> &usize {
        &self.furthest[(self.offset + k) as usize]
    }
}

impl IndexMut<isize> for Frontier {
    fn index_mut(&mut self, k: isize) -> &mut usize {
        &mut self.furthest[(self.offset + k) as usize]
    }
}

/// Upper bound on the `d` either half of a search needs for `n` by `m` items
fn max_d(n: usize, m: usize) -> usize {
    (n + m).div_ceil(2) + 1
}

fn common_prefix<T: Eq>(a: &[T], b: &[T]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

fn common_suffix<T: Eq>(a: &[T], b: &[T]) -> usize {
    a.iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count()
}

/// Turn a point relative to `a` x `b` into an absolute split point, refusing
/// the corners, which would not shrink the problem
fn split_point(a: &Range<usize>, b: &Range<usize>, x: usize, y: usize) -> Option<(usize, usize)> {
    let inside = x <= a.len() && y <= b.len();
    let corner = (x == 0 && y == 0) || (x == a.len() && y == b.len());

    (inside && !corner).then_some((a.start + x, b.start + y))
}

/// Within each run of consecutive changes, move deletions ahead of insertions
fn deletions_first<T>(edits: &mut [Edit<T>]) {
    let mut start = 0;
    while start < edits.len() {
        if !edits[start].is_change() {
            start += 1;
            continue;
        }

        let end = start + edits[start..].iter().take_while(|edit| edit.is_change()).count();
        edits[start..end].sort_by_key(|edit| matches!(edit, Edit::Insert { .. }));
        start = end;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct MyersDiff<'d, T> {
    a: &'d [T],
    b: &'d [T],
}

impl<'d, T: Eq + Clone> MyersDiff<'d, T> {
    pub fn diff(&self) -> Vec<Edit<T>> {
        let bound = max_d(self.a.len(), self.b.len());
        let mut forward = Frontier::new(bound);
        let mut backward = Frontier::new(bound);

        let mut edits = Vec::with_capacity(self.a.len().max(self.b.len()));
        self.conquer(
            0..self.a.len(),
            0..self.b.len(),
            &mut forward,
            &mut backward,
            &mut edits,
        );
        deletions_first(&mut edits);

        edits
    }

    fn conquer(
        &self,
        mut a: Range<usize>,
        mut b: Range<usize>,
        forward: &mut Frontier,
        backward: &mut Frontier,
        edits: &mut Vec<Edit<T>>,
    ) {
        let prefix = common_prefix(&self.a[a.clone()], &self.b[b.clone()]);
        edits.extend(self.a[a.start..a.start + prefix].iter().map(|value| Edit::Equal {
            value: value.clone(),
        }));
        a.start += prefix;
        b.start += prefix;

        let suffix = common_suffix(&self.a[a.clone()], &self.b[b.clone()]);
        a.end -= suffix;
        b.end -= suffix;
        let shared_tail = a.end..a.end + suffix;

        if a.is_empty() {
            edits.extend(self.b[b].iter().map(|value| Edit::Insert {
                value: value.clone(),
            }));
        } else if b.is_empty() {
            edits.extend(self.a[a].iter().map(|value| Edit::Delete {
                value: value.clone(),
            }));
        } else if let Some((x, y)) = self.middle_snake(&a, &b, forward, backward) {
            self.conquer(a.start..x, b.start..y, forward, backward, edits);
            self.conquer(x..a.end, y..b.end, forward, backward, edits);
        } else {
            edits.extend(self.a[a].iter().map(|value| Edit::Delete {
                value: value.clone(),
            }));
            edits.extend(self.b[b].iter().map(|value| Edit::Insert {
                value: value.clone(),
            }));
        }

        edits.extend(self.a[shared_tail].iter().map(|value| Edit::Equal {
            value: value.clone(),
        }));
    }

    /// A point on a shortest path through `a` x `b`, or on a short one when
    /// the search gives up at `MAX_COST`
    ///
    /// Both ranges are non-empty and differ in their first and last items.
    fn middle_snake(
        &self,
        a: &Range<usize>,
        b: &Range<usize>,
        forward: &mut Frontier,
        backward: &mut Frontier,
    ) -> Option<(usize, usize)> {
        let (n, m) = (a.len(), b.len());
        let delta = n as isize - m as isize;
        let odd = delta & 1 == 1;

        forward[1] = 0;
        backward[1] = 0;

        for d in 0..max_d(n, m) as isize {
            for k in (-d..=d).rev().step_by(2) {
                // moving down from diagonal k + 1 inserts, moving right from
                // k - 1 deletes; deletions win ties
                let mut x = if k == -d || (k != d && forward[k - 1] < forward[k + 1]) {
                    forward[k + 1]
                } else {
                    forward[k - 1] + 1
                };
                let y = (x as isize - k) as usize;
                let (snake_x, snake_y) = (x, y);

                if x < n && y < m {
                    x += common_prefix(&self.a[a.start + x..a.end], &self.b[b.start + y..b.end]);
                }
                forward[k] = x;

                if odd && (k - delta).abs() < d && x + backward[delta - k] >= n {
                    return split_point(a, b, snake_x, snake_y);
                }
            }

            // the backward search counts x and y from the ends of both ranges
            for k in (-d..=d).rev().step_by(2) {
                let mut x = if k == -d || (k != d && backward[k - 1] < backward[k + 1]) {
                    backward[k + 1]
                } else {
                    backward[k - 1] + 1
                };
                let mut y = (x as isize - k) as usize;

                if x < n && y < m {
                    let shared = common_suffix(
                        &self.a[a.start..a.end - x],
                        &self.b[b.start..b.end - y],
                    );
                    x += shared;
                    y += shared;
                }
                backward[k] = x;

                if !odd && (k - delta).abs() <= d && x + forward[delta - k] >= n {
                    let point = n.checked_sub(x).zip(m.checked_sub(y))?;
                    return split_point(a, b, point.0, point.1);
                }
            }

            if d as usize >= MAX_COST {
                return (-d..=d)
                    .step_by(2)
                    .map(|k| (forward[k], forward[k] as isize - k))
                    .filter(|&(x, y)| x <= n && y >= 0 && y as usize <= m)
                    .max_by_key(|&(x, y)| x as isize + y)
                    .and_then(|(x, y)| split_point(a, b, x, y as usize));
            }
        }

        None
    }
}
