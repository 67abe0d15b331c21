//! Gestalt (Ratcliff/Obershelp) string similarity for fuzzy folder lookup.

/// Similarity in `0.0..=1.0`: twice the matched characters over the combined length.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_characters(&a, &b) as f64 / total as f64
}

/// Best candidate whose ratio against `word` reaches `cutoff`.
///
/// Ties go to the lexicographically greater candidate.
pub fn best_match<'a, I>(word: &str, candidates: I, cutoff: f64) -> Option<(&'a str, f64)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(&'a str, f64)> = None;
    for candidate in candidates {
        if upper_bound(candidate, word) < cutoff {
            continue;
        }
        let score = ratio(candidate, word);
        if score < cutoff {
            continue;
        }
        let better = match best {
            None => true,
            Some((name, top)) => score > top || (score == top && candidate > name),
        };
        if better {
            best = Some((candidate, score));
        }
    }
    best
}

/// Cheap ceiling on `ratio` from the lengths alone.
fn upper_bound(a: &str, b: &str) -> f64 {
    let (la, lb) = (a.chars().count(), b.chars().count());
    if la + lb == 0 {
        return 1.0;
    }
    2.0 * la.min(lb) as f64 / (la + lb) as f64
}

fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut total = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, size) = longest_match(a, b, alo, ahi, blo, bhi);
        if size == 0 {
            continue;
        }
        total += size;
        if alo < i && blo < j {
            pending.push((alo, i, blo, j));
        }
        if i + size < ahi && j + size < bhi {
            pending.push((i + size, ahi, j + size, bhi));
        }
    }

    total
}

/// Longest common block in `a[alo..ahi]` and `b[blo..bhi]`; earliest in `a`, then in `b`.
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let width = bhi - blo;
    let mut best = (alo, blo, 0);
    let mut previous = vec![0usize; width + 1];
    let mut current = vec![0usize; width + 1];

    for i in alo..ahi {
        for j in blo..bhi {
            let slot = j - blo + 1;
            if a[i] == b[j] {
                let size = previous[slot - 1] + 1;
                current[slot] = size;
                if size > best.2 {
                    best = (i + 1 - size, j + 1 - size, size);
                }
            } else {
                current[slot] = 0;
            }
        }
        std::mem::swap(&mut previous, &mut current);
    }

    best
}
