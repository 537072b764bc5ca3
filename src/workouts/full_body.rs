use std::collections::{BTreeMap, HashMap, HashSet};

use rand::{seq::SliceRandom, Rng};
use tracing::debug;

use crate::exercises::model::{Exercise, MuscleGroup};

use super::selection::{compound_slots, pick_free, Claims};

/// Compound share for full-body plans, independent of the goal.
const FULL_BODY_COMPOUND_PERCENT: usize = 70;

/// Full-body-tagged compounds seeded before the per-group picks.
const MAX_FULL_BODY_SEEDS: usize = 2;

#[derive(Default)]
struct GroupPool<'a> {
    compound: Vec<&'a Exercise>,
    isolation: Vec<&'a Exercise>,
}

impl<'a> GroupPool<'a> {
    fn all(&self) -> impl Iterator<Item = &'a Exercise> + '_ {
        self.compound.iter().chain(&self.isolation).copied()
    }

    fn has_free(&self, claims: &Claims<'_>) -> bool {
        self.all().any(|e| claims.is_free(e))
    }
}

/// What a pick uses up: its family, or the exercise itself when it has none.
type SlotKey<'a> = (bool, &'a str);

fn slot_key(ex: &Exercise) -> SlotKey<'_> {
    match ex.exercise_family.as_deref() {
        Some(family) => (true, family),
        None => (false, ex.name.as_str()),
    }
}

/// Size of a maximum matching between `uncovered` groups and free slot keys,
/// i.e. how many of those groups can still each get an exercise.
fn coverable<'a>(
    uncovered: &[MuscleGroup],
    groups: &BTreeMap<MuscleGroup, GroupPool<'a>>,
    claims: &Claims<'_>,
) -> usize {
    let options: Vec<Vec<SlotKey<'a>>> = uncovered
        .iter()
        .map(|g| {
            let mut keys: Vec<SlotKey<'a>> = groups
                .get(g)
                .into_iter()
                .flat_map(|pool| pool.all())
                .filter(|e| claims.is_free(e))
                .map(slot_key)
                .collect();
            keys.sort_unstable();
            keys.dedup();
            keys
        })
        .collect();

    let mut owner: HashMap<SlotKey<'a>, usize> = HashMap::new();
    (0..options.len())
        .filter(|&i| augment(i, &options, &mut owner, &mut HashSet::new()))
        .count()
}

fn augment<'a>(
    i: usize,
    options: &[Vec<SlotKey<'a>>],
    owner: &mut HashMap<SlotKey<'a>, usize>,
    seen: &mut HashSet<SlotKey<'a>>,
) -> bool {
    for &key in &options[i] {
        if !seen.insert(key) {
            continue;
        }
        let free = match owner.get(&key).copied() {
            None => true,
            Some(j) => augment(j, options, owner, seen),
        };
        if free {
            owner.insert(key, i);
            return true;
        }
    }
    false
}

/// Random free member of `pool` whose claim does not cost another group its
/// last usable family. `group` is the group the pick is counted for.
fn pick_covering<'a, R: Rng + ?Sized>(
    pool: &[&'a Exercise],
    group: Option<MuscleGroup>,
    groups: &BTreeMap<MuscleGroup, GroupPool<'a>>,
    counts: &BTreeMap<MuscleGroup, usize>,
    claims: &Claims<'a>,
    rng: &mut R,
) -> Option<&'a Exercise> {
    let uncovered: Vec<MuscleGroup> = counts
        .iter()
        .filter(|(_, n)| **n == 0)
        .map(|(g, _)| *g)
        .collect();
    if uncovered.is_empty() {
        return pick_free(pool, claims, rng);
    }

    let mut free: Vec<&'a Exercise> = pool.iter().copied().filter(|e| claims.is_free(e)).collect();
    free.shuffle(rng);
    let before = coverable(&uncovered, groups, claims);
    let rest: Vec<MuscleGroup> = uncovered.iter().copied().filter(|g| Some(*g) != group).collect();
    let gained = uncovered.len() - rest.len();

    free.into_iter().find(|&ex| {
        let mut next = claims.clone();
        next.claim(ex);
        coverable(&rest, groups, &next) + gained >= before
    })
}

/// Selection for full-body requests: compound seeding across the major muscle
/// groups, then balance filling towards the least represented group. Once the
/// groups are level, unused full-body exercises fill the next slots.
///
/// When `target` is at least the number of major groups with candidates, each
/// of those groups ends up with at least one exercise whenever some choice of
/// distinct families allows it.
pub fn select_full_body<R: Rng + ?Sized>(
    candidates: &[Exercise],
    target: usize,
    rng: &mut R,
) -> Vec<Exercise> {
    if target == 0 || candidates.is_empty() {
        return Vec::new();
    }

    let mut full_body = GroupPool::default();
    let mut groups: BTreeMap<MuscleGroup, GroupPool> = BTreeMap::new();
    for ex in candidates {
        let pool = if ex.muscle_group == MuscleGroup::FullBody {
            &mut full_body
        } else if ex.muscle_group.is_major() {
            groups.entry(ex.muscle_group).or_default()
        } else {
            continue;
        };
        if ex.is_compound {
            pool.compound.push(ex);
        } else {
            pool.isolation.push(ex);
        }
    }

    let compound_target = compound_slots(target, FULL_BODY_COMPOUND_PERCENT);
    // full-body seeds never take the slots the major groups need for coverage
    let seed_limit = MAX_FULL_BODY_SEEDS.min(target.saturating_sub(groups.len()));

    let mut claims = Claims::default();
    let mut counts: BTreeMap<MuscleGroup, usize> = groups.keys().map(|g| (*g, 0)).collect();
    let mut seeded: Vec<&Exercise> = Vec::new();

    // phase 1: compound seeding
    while seeded.len() < seed_limit && seeded.len() < compound_target {
        let Some(ex) = pick_covering(&full_body.compound, None, &groups, &counts, &claims, rng)
        else {
            break;
        };
        claims.claim(ex);
        seeded.push(ex);
    }

    let mut order: Vec<MuscleGroup> = groups
        .iter()
        .filter(|(_, p)| !p.compound.is_empty())
        .map(|(g, _)| *g)
        .collect();
    order.shuffle(rng);
    for group in order {
        if seeded.len() >= compound_target {
            break;
        }
        let pool = &groups[&group].compound;
        if let Some(ex) = pick_covering(pool, Some(group), &groups, &counts, &claims, rng) {
            claims.claim(ex);
            seeded.push(ex);
            *counts.entry(group).or_default() += 1;
        }
    }

    // phase 2: least represented group first, isolation preferred; full-body
    // leftovers whenever every open group is equally represented
    let leftovers: Vec<&Exercise> = full_body.all().collect();
    let mut balance: Vec<&Exercise> = Vec::new();
    while seeded.len() + balance.len() < target {
        let open: Vec<MuscleGroup> = groups
            .iter()
            .filter(|(_, p)| p.has_free(&claims))
            .map(|(g, _)| *g)
            .collect();
        let fewest = open.iter().map(|g| counts[g]).min();
        let level = fewest.map_or(true, |f| f > 0 && open.iter().all(|g| counts[g] == f));

        if level {
            if let Some(ex) = pick_covering(&leftovers, None, &groups, &counts, &claims, rng) {
                claims.claim(ex);
                balance.push(ex);
                continue;
            }
        }

        let Some(fewest) = fewest else {
            break;
        };
        let tied: Vec<MuscleGroup> = open.into_iter().filter(|g| counts[g] == fewest).collect();
        let Some(&group) = tied.choose(rng) else {
            break;
        };
        let pool = &groups[&group];
        let Some(ex) = pick_covering(&pool.isolation, Some(group), &groups, &counts, &claims, rng)
            .or_else(|| pick_covering(&pool.compound, Some(group), &groups, &counts, &claims, rng))
        else {
            break;
        };
        claims.claim(ex);
        balance.push(ex);
        *counts.entry(group).or_default() += 1;
    }

    // groups and full-body pool exhausted: anything still free
    if seeded.len() + balance.len() < target {
        let mut others: Vec<&Exercise> = candidates
            .iter()
            .filter(|e| e.muscle_group != MuscleGroup::FullBody)
            .collect();
        others.shuffle(rng);
        for ex in others {
            if seeded.len() + balance.len() >= target {
                break;
            }
            if claims.is_free(ex) {
                claims.claim(ex);
                balance.push(ex);
            }
        }
    }

    debug!(
        target,
        seeded = seeded.len(),
        balanced = balance.len(),
        groups = groups.len(),
        "full body selection"
    );

    let mut picks = seeded;
    picks.extend(balance);
    picks.truncate(target);
    let (compound, isolation): (Vec<&Exercise>, Vec<&Exercise>) =
        picks.into_iter().partition(|e| e.is_compound);
    compound.into_iter().chain(isolation).cloned().collect()
}
