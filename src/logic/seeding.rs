//! Seeding: order a competitor pool and cut it into first-round pairings that keep
//! clubmates apart where the pool allows it.

use crate::models::{AffiliationId, BracketError, Competitor};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{BinaryHeap, HashMap};

/// A first-round pairing. `b` is `None` when `a` has no opponent (a bye).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Pairing {
    pub a: Option<Competitor>,
    pub b: Option<Competitor>,
}

impl Pairing {
    pub fn is_bye(&self) -> bool {
        self.a.is_some() != self.b.is_some()
    }
}

/// Shuffle `competitors` and pair them up: `ceil(N/2)` pairings, the last one a bye when N is odd.
///
/// Fails with `InsufficientParticipants` below two competitors.
pub fn pair_competitors<R: Rng>(
    competitors: &[Competitor],
    rng: &mut R,
) -> Result<Vec<Pairing>, BracketError> {
    if competitors.len() < 2 {
        return Err(BracketError::InsufficientParticipants {
            found: competitors.len(),
        });
    }
    let order = seeding_order(competitors, rng);
    Ok(order
        .chunks(2)
        .map(|pair| Pairing {
            a: Some(pair[0]),
            b: pair.get(1).copied(),
        })
        .collect())
}

/// Greedy anti-collision order.
///
/// 1. Shuffle the pool and group it by affiliation (no affiliation = a group of one).
/// 2. Shuffle each group.
/// 3. Repeatedly take one competitor from the largest group (random tie-break). The group just
///    taken from sits out one pick before it is eligible again.
pub fn seeding_order<R: Rng>(competitors: &[Competitor], rng: &mut R) -> Vec<Competitor> {
    let mut pool = competitors.to_vec();
    pool.shuffle(rng);

    let mut groups: Vec<Vec<Competitor>> = Vec::new();
    let mut by_affiliation: HashMap<AffiliationId, usize> = HashMap::new();
    for competitor in pool {
        match competitor.affiliation_id {
            Some(affiliation) => {
                let idx = *by_affiliation.entry(affiliation).or_insert_with(|| {
                    groups.push(Vec::new());
                    groups.len() - 1
                });
                groups[idx].push(competitor);
            }
            None => groups.push(vec![competitor]),
        }
    }
    for group in &mut groups {
        group.shuffle(rng);
    }

    // (remaining size, random tie-break, group index)
    let mut heap: BinaryHeap<(usize, u32, usize)> = BinaryHeap::with_capacity(groups.len());
    for (idx, group) in groups.iter().enumerate() {
        heap.push((group.len(), rng.gen(), idx));
    }

    let mut order = Vec::with_capacity(competitors.len());
    let mut cooling: Option<usize> = None;
    loop {
        let picked = match heap.pop() {
            Some((_, _, idx)) => idx,
            // Only the cooling group is left, so it has to go again.
            None => match cooling.take() {
                Some(idx) => idx,
                None => break,
            },
        };
        if let Some(prev) = cooling.take() {
            heap.push((groups[prev].len(), rng.gen(), prev));
        }
        if let Some(competitor) = groups[picked].pop() {
            order.push(competitor);
        }
        if !groups[picked].is_empty() {
            cooling = Some(picked);
        }
    }
    order
}
