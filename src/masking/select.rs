//! Lowest-cost non-adjacent subset selection over mask candidates.
//!
//! Candidates are char positions in ascending order; two candidates are
//! adjacent when their positions differ by one. The table is filled
//! bottom-up over `(index, remaining, prev_selected)`.

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    cost: f64,
    take: bool,
}

/// Largest subset size with no two adjacent positions.
pub fn max_non_adjacent(positions: &[usize]) -> usize {
    let mut count = 0usize;
    let mut last: Option<usize> = None;
    for &p in positions {
        if last.map_or(true, |l| p > l + 1) {
            count += 1;
            last = Some(p);
        }
    }
    count
}

/// Picks up to `target` candidates with the lowest total cost such that no two
/// picked positions are adjacent. When `target` is not reachable, the largest
/// feasible count is used instead. Returns indices into `positions`, ascending.
pub fn select_mask_candidates(positions: &[usize], costs: &[f64], target: usize) -> Vec<usize> {
    let n = positions.len().min(costs.len());
    let k = target.min(max_non_adjacent(&positions[..n]));
    if k == 0 {
        return Vec::new();
    }

    // table[i][r][prev]: best way to pick `r` more from candidates i.. when
    // candidate i-1 was (prev = 1) or was not (prev = 0) picked.
    let mut table: Vec<Vec<[Option<Cell>; 2]>> = vec![vec![[None, None]; k + 1]; n + 1];
    table[n][0] = [Some(Cell { cost: 0.0, take: false }); 2];

    for i in (0..n).rev() {
        for r in 0..=k {
            for prev in 0..2 {
                let skip = table[i + 1][r][0].map(|c| c.cost);

                let blocked = prev == 1 && i > 0 && positions[i] == positions[i - 1] + 1;
                let take = if r > 0 && !blocked {
                    table[i + 1][r - 1][1].map(|c| c.cost + costs[i])
                } else {
                    None
                };

                table[i][r][prev] = match (skip, take) {
                    (Some(s), Some(t)) if t < s => Some(Cell { cost: t, take: true }),
                    (Some(s), _) => Some(Cell { cost: s, take: false }),
                    (None, Some(t)) => Some(Cell { cost: t, take: true }),
                    (None, None) => None,
                };
            }
        }
    }

    let mut picked = Vec::with_capacity(k);
    let (mut r, mut prev) = (k, 0usize);
    for i in 0..n {
        match table[i][r][prev] {
            Some(Cell { take: true, .. }) => {
                picked.push(i);
                r -= 1;
                prev = 1;
            }
            Some(_) => prev = 0,
            None => break,
        }
    }
    picked
}
