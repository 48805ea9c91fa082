//! Integration tests for seeding: pairing shape and same-club avoidance.

use martial_bracket::{pair_competitors, seeding_order, BracketError, Competitor, Pairing};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use uuid::Uuid;

fn club(size: usize) -> Vec<Competitor> {
    let affiliation = Uuid::new_v4();
    (0..size).map(|_| Competitor::affiliated(affiliation)).collect()
}

fn same_club_pairs(pairings: &[Pairing]) -> usize {
    pairings
        .iter()
        .filter(|p| match (p.a, p.b) {
            (Some(a), Some(b)) => a.affiliation_id.is_some() && a.affiliation_id == b.affiliation_id,
            _ => false,
        })
        .count()
}

#[test]
fn needs_at_least_two_competitors() {
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(
        pair_competitors(&[], &mut rng),
        Err(BracketError::InsufficientParticipants { found: 0 })
    );
    assert_eq!(
        pair_competitors(&[Competitor::unaffiliated()], &mut rng),
        Err(BracketError::InsufficientParticipants { found: 1 })
    );
}

#[test]
fn pairs_every_competitor_exactly_once() {
    let mut rng = StdRng::seed_from_u64(42);
    for n in 2..=33usize {
        let pool: Vec<Competitor> = (0..n).map(|_| Competitor::unaffiliated()).collect();
        let pairings = pair_competitors(&pool, &mut rng).unwrap();
        assert_eq!(pairings.len(), n.div_ceil(2));

        let seen: HashSet<_> = pairings
            .iter()
            .flat_map(|p| [p.a, p.b])
            .flatten()
            .map(|c| c.registration_id)
            .collect();
        assert_eq!(seen.len(), n);

        // Only the last pairing can be a bye, and only for odd pools.
        let byes: Vec<usize> = pairings
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_bye())
            .map(|(i, _)| i)
            .collect();
        if n % 2 == 1 {
            assert_eq!(byes, vec![pairings.len() - 1]);
            assert!(pairings[pairings.len() - 1].b.is_none());
        } else {
            assert!(byes.is_empty());
        }
    }
}

#[test]
fn two_even_clubs_never_meet_in_round_one() {
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut pool = club(4);
        pool.extend(club(4));
        let pairings = pair_competitors(&pool, &mut rng).unwrap();
        assert_eq!(same_club_pairs(&pairings), 0, "seed {seed}");
    }
}

#[test]
fn balanced_clubs_alternate_in_the_order() {
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut pool = club(3);
        pool.extend(club(3));
        pool.extend(club(2));
        let order = seeding_order(&pool, &mut rng);
        assert_eq!(order.len(), 8);
        for w in order.windows(2) {
            assert_ne!(w[0].affiliation_id, w[1].affiliation_id, "seed {seed}");
        }
    }
}

#[test]
fn dominant_club_collides_only_as_much_as_it_must() {
    // 6 of 8 from one club: at least two same-club pairs are unavoidable.
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut pool = club(6);
        pool.extend(club(2));
        let pairings = pair_competitors(&pool, &mut rng).unwrap();
        assert_eq!(same_club_pairs(&pairings), 2, "seed {seed}");
    }
}

#[test]
fn unaffiliated_competitors_are_not_grouped_together() {
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut pool = club(2);
        pool.push(Competitor::unaffiliated());
        pool.push(Competitor::unaffiliated());
        let pairings = pair_competitors(&pool, &mut rng).unwrap();
        assert_eq!(same_club_pairs(&pairings), 0, "seed {seed}");
    }
}

#[test]
fn same_seed_gives_same_pairings() {
    let pool: Vec<Competitor> = (0..9).map(|_| Competitor::unaffiliated()).collect();
    let a = pair_competitors(&pool, &mut StdRng::seed_from_u64(9)).unwrap();
    let b = pair_competitors(&pool, &mut StdRng::seed_from_u64(9)).unwrap();
    assert_eq!(a, b);
}
