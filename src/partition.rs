//! Exhaustive Connections partitioning.
//!
//! Sixteen items, four groups of four. All C(16, 4) = 1820 candidate groups
//! are scored once; a depth-first search then covers the items by always
//! placing the lowest unplaced item, so each partition is visited exactly
//! once: C(15,3)·C(11,3)·C(7,3) = 2,627,625 leaves.

use rayon::prelude::*;
use serde::Serialize;

use crate::error::PartitionError;
use crate::similarity::SimilarityMatrix;

/// Items in a puzzle.
pub const ITEM_COUNT: usize = 16;

/// Items per group.
pub const GROUP_SIZE: usize = 4;

/// Groups per partition.
pub const GROUP_COUNT: usize = ITEM_COUNT / GROUP_SIZE;

const ALL_ITEMS: u16 = u16::MAX;

/// A 4-item subset and the sum of its six pairwise similarities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Group {
    pub mask: u16,
    pub score: f64,
}

impl Group {
    /// Member indices, ascending.
    pub fn members(&self) -> [usize; GROUP_SIZE] {
        let mut members = [0usize; GROUP_SIZE];
        let mut mask = self.mask;
        for member in members.iter_mut() {
            *member = mask.trailing_zeros() as usize;
            mask &= mask - 1;
        }
        members
    }

    pub fn contains(&self, item: usize) -> bool {
        self.mask & (1 << item) != 0
    }
}

/// Four disjoint groups covering every item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Partition {
    pub groups: Vec<Group>,
    pub score: f64,
}

impl Partition {
    pub fn members(&self) -> Vec<[usize; GROUP_SIZE]> {
        self.groups.iter().map(Group::members).collect()
    }

    /// Group number of each item.
    pub fn group_of(&self) -> [usize; ITEM_COUNT] {
        let mut group_of = [0usize; ITEM_COUNT];
        for (g, group) in self.groups.iter().enumerate() {
            for item in group.members() {
                group_of[item] = g;
            }
        }
        group_of
    }
}

/// Per-search mutable state, owned by one search (or one branch of a
/// parallel search).
#[derive(Debug, Clone)]
struct SearchContext {
    current: Vec<usize>,
    best: Vec<usize>,
    best_score: f64,
    leaves: usize,
}

impl SearchContext {
    fn new() -> Self {
        Self {
            current: Vec::with_capacity(GROUP_COUNT),
            best: Vec::new(),
            best_score: f64::NEG_INFINITY,
            leaves: 0,
        }
    }
}

/// Group table for one similarity matrix.
#[derive(Debug, Clone)]
pub struct PartitionSearch {
    groups: Vec<Group>,
    groups_by_item: [Vec<usize>; ITEM_COUNT],
    // groups_by_item[i][led_from[i]..] are the groups whose lowest member is i
    led_from: [usize; ITEM_COUNT],
}

impl PartitionSearch {
    /// Score every group of four. Needs exactly [`ITEM_COUNT`] items.
    pub fn new(similarity: &SimilarityMatrix) -> Result<Self, PartitionError> {
        if similarity.len() != ITEM_COUNT {
            return Err(PartitionError::WrongItemCount {
                expected: ITEM_COUNT,
                actual: similarity.len(),
            });
        }

        let mut groups = Vec::with_capacity(1820);
        let mut groups_by_item: [Vec<usize>; ITEM_COUNT] = Default::default();
        for bucket in groups_by_item.iter_mut() {
            bucket.reserve(455);
        }

        let mut led_from = [0usize; ITEM_COUNT];
        let s = |a: usize, b: usize| similarity.get(a, b);
        for i in 0..ITEM_COUNT {
            led_from[i] = groups_by_item[i].len();
            for j in i + 1..ITEM_COUNT {
                for k in j + 1..ITEM_COUNT {
                    for l in k + 1..ITEM_COUNT {
                        let mask = (1u16 << i) | (1 << j) | (1 << k) | (1 << l);
                        let score = s(i, j) + s(i, k) + s(i, l) + s(j, k) + s(j, l) + s(k, l);
                        let index = groups.len();
                        groups.push(Group { mask, score });
                        for item in [i, j, k, l] {
                            groups_by_item[item].push(index);
                        }
                    }
                }
            }
        }

        Ok(Self {
            groups,
            groups_by_item,
            led_from,
        })
    }

    /// Every candidate group, in lexicographic member order.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Highest scoring partition. Among equal scores the first one reached
    /// in lexicographic group order wins.
    pub fn solve(&self) -> Partition {
        let mut ctx = SearchContext::new();
        self.search(ALL_ITEMS, 0.0, &mut ctx);
        log::debug!("partition search visited {} partitions", ctx.leaves);
        self.partition(&ctx.best, ctx.best_score)
    }

    /// Same result as [`solve`](Self::solve), with the groups containing
    /// item 0 explored in parallel.
    pub fn solve_parallel(&self) -> Partition {
        let best = self.groups_by_item[0]
            .par_iter()
            .enumerate()
            .map(|(branch, &group_index)| {
                let group = &self.groups[group_index];
                let mut ctx = SearchContext::new();
                ctx.current.push(group_index);
                self.search(ALL_ITEMS ^ group.mask, group.score, &mut ctx);
                (branch, ctx)
            })
            .reduce_with(|a, b| {
                let b_wins = b.1.best_score > a.1.best_score
                    || (b.1.best_score == a.1.best_score && b.0 < a.0);
                if b_wins {
                    b
                } else {
                    a
                }
            });

        match best {
            Some((_, ctx)) => self.partition(&ctx.best, ctx.best_score),
            None => self.solve(),
        }
    }

    fn partition(&self, indices: &[usize], score: f64) -> Partition {
        Partition {
            groups: indices.iter().map(|&i| self.groups[i]).collect(),
            score,
        }
    }

    fn search(&self, remaining: u16, score: f64, ctx: &mut SearchContext) {
        if remaining == 0 {
            ctx.leaves += 1;
            if score > ctx.best_score {
                ctx.best_score = score;
                ctx.best.clone_from(&ctx.current);
            }
            return;
        }

        // Items below the pivot are placed, so only groups led by it can fit.
        let pivot = remaining.trailing_zeros() as usize;
        for &group_index in &self.groups_by_item[pivot][self.led_from[pivot]..] {
            let group = &self.groups[group_index];
            if group.mask & remaining != group.mask {
                continue;
            }
            ctx.current.push(group_index);
            self.search(remaining ^ group.mask, score + group.score, ctx);
            ctx.current.pop();
        }
    }
}

/// Mean pairwise similarity inside one group.
pub fn average_within_group_similarity(similarity: &SimilarityMatrix, members: &[usize]) -> f64 {
    let mut total = 0.0;
    let mut pairs = 0usize;
    for (n, &a) in members.iter().enumerate() {
        for &b in &members[n + 1..] {
            total += similarity.get(a, b);
            pairs += 1;
        }
    }
    if pairs == 0 {
        0.0
    } else {
        total / pairs as f64
    }
}

/// Rank of each group when sorted by descending score; the most cohesive
/// (easiest) group gets rank 0. Equal scores keep their original order.
pub fn rank_groups_by_difficulty(scores: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
    let mut rank = vec![0usize; scores.len()];
    for (r, &group) in order.iter().enumerate() {
        rank[group] = r;
    }
    rank
}

/// The `n` items that sit closest to another group: smallest margin between
/// mean similarity to their own group-mates and mean similarity to the best
/// other group.
pub fn red_herrings(similarity: &SimilarityMatrix, partition: &Partition, n: usize) -> Vec<usize> {
    let members = partition.members();
    let group_of = partition.group_of();

    let mean_to = |item: usize, group: &[usize; GROUP_SIZE]| {
        let others: Vec<usize> = group.iter().copied().filter(|&m| m != item).collect();
        if others.is_empty() {
            return 0.0;
        }
        others.iter().map(|&m| similarity.get(item, m)).sum::<f64>() / others.len() as f64
    };

    let mut margins: Vec<(usize, f64)> = (0..ITEM_COUNT)
        .map(|item| {
            let own = mean_to(item, &members[group_of[item]]);
            let other = members
                .iter()
                .enumerate()
                .filter(|&(g, _)| g != group_of[item])
                .map(|(_, group)| mean_to(item, group))
                .fold(f64::NEG_INFINITY, f64::max);
            (item, own - other)
        })
        .collect();

    margins.sort_by(|a, b| a.1.total_cmp(&b.1));
    margins.into_iter().take(n).map(|(item, _)| item).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_members() {
        let group = Group {
            mask: 0b1000_0000_0100_0011,
            score: 0.0,
        };
        assert_eq!(group.members(), [0, 1, 6, 15]);
        assert!(group.contains(6));
        assert!(!group.contains(2));
    }

    #[test]
    fn test_group_table_shape() {
        let values = vec![0.0; ITEM_COUNT * ITEM_COUNT];
        let matrix = SimilarityMatrix::from_values(ITEM_COUNT, values).unwrap();
        let search = PartitionSearch::new(&matrix).unwrap();
        assert_eq!(search.groups().len(), 1820);
        assert!(search.groups_by_item.iter().all(|g| g.len() == 455));
        assert!(search.groups().iter().all(|g| g.mask.count_ones() == 4));
        for item in 0..ITEM_COUNT {
            let led = &search.groups_by_item[item][search.led_from[item]..];
            assert!(led.iter().all(|&g| search.groups()[g].members()[0] == item));
        }
    }

    #[test]
    fn test_leaf_count() {
        let values = vec![0.0; ITEM_COUNT * ITEM_COUNT];
        let matrix = SimilarityMatrix::from_values(ITEM_COUNT, values).unwrap();
        let search = PartitionSearch::new(&matrix).unwrap();
        let mut ctx = SearchContext::new();
        search.search(ALL_ITEMS, 0.0, &mut ctx);
        assert_eq!(ctx.leaves, 2_627_625);
    }

    #[test]
    fn test_ranks() {
        assert_eq!(rank_groups_by_difficulty(&[1.0, 3.0, 2.0, 3.0]), vec![3, 0, 2, 1]);
    }
}
