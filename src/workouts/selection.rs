use std::collections::{BTreeMap, HashSet};

use rand::{seq::SliceRandom, Rng};

use crate::exercises::model::{Exercise, Goal};

use super::{dto::Focus, full_body::select_full_body};

/// Names and exercise families already placed in a plan. A family may
/// contribute at most one exercise.
#[derive(Default, Clone)]
pub(super) struct Claims<'a> {
    names: HashSet<&'a str>,
    families: HashSet<&'a str>,
}

impl<'a> Claims<'a> {
    pub(super) fn is_free(&self, ex: &Exercise) -> bool {
        !self.names.contains(ex.name.as_str())
            && ex
                .exercise_family
                .as_deref()
                .map_or(true, |f| !self.families.contains(f))
    }

    pub(super) fn claim(&mut self, ex: &'a Exercise) {
        self.names.insert(ex.name.as_str());
        if let Some(f) = ex.exercise_family.as_deref() {
            self.families.insert(f);
        }
    }
}

/// Random free member of `pool`, if any.
pub(super) fn pick_free<'a, R: Rng + ?Sized>(
    pool: &[&'a Exercise],
    claims: &Claims<'a>,
    rng: &mut R,
) -> Option<&'a Exercise> {
    let free: Vec<&'a Exercise> = pool.iter().copied().filter(|e| claims.is_free(e)).collect();
    free.choose(rng).copied()
}

/// Share of compound slots, in percent.
pub fn compound_percent(goal: Goal) -> usize {
    match goal {
        Goal::Strength => 70,
        Goal::Cardio | Goal::GeneralFitness => 60,
    }
}

/// `ceil(target * percent / 100)`, in integers.
pub fn compound_slots(target: usize, percent: usize) -> usize {
    ((target * percent + 99) / 100).min(target)
}

/// Majority vote on `is_compound`; a tie counts as compound.
fn family_is_compound(members: &[&Exercise]) -> bool {
    let compound = members.iter().filter(|e| e.is_compound).count();
    compound * 2 >= members.len()
}

/// Draws one member of the wanted kind from each family until `quota` is met.
fn fill_from_families<'a, R: Rng + ?Sized>(
    families: &[Vec<&'a Exercise>],
    want_compound: bool,
    quota: usize,
    out: &mut Vec<&'a Exercise>,
    claims: &mut Claims<'a>,
    rng: &mut R,
) {
    for members in families {
        if out.len() >= quota {
            break;
        }
        let kind: Vec<&'a Exercise> = members
            .iter()
            .copied()
            .filter(|e| e.is_compound == want_compound)
            .collect();
        if let Some(ex) = pick_free(&kind, claims, rng) {
            claims.claim(ex);
            out.push(ex);
        }
    }
}

fn fill_from_pool<'a>(
    pool: &[&'a Exercise],
    quota: usize,
    out: &mut Vec<&'a Exercise>,
    claims: &mut Claims<'a>,
) {
    for &ex in pool {
        if out.len() >= quota {
            break;
        }
        if claims.is_free(ex) {
            claims.claim(ex);
            out.push(ex);
        }
    }
}

/// Compound/isolation mixture without repeating an exercise family.
///
/// The result holds every compound pick (in selection order) before every
/// isolation pick. When the candidates cannot fill the compound/isolation
/// quotas, the ratio is dropped and any free candidate fills the gap; the
/// result is shorter than `target` only when the candidates run out.
pub fn select_balanced<R: Rng + ?Sized>(
    candidates: &[Exercise],
    target: usize,
    goal: Goal,
    rng: &mut R,
) -> Vec<Exercise> {
    if target == 0 || candidates.is_empty() {
        return Vec::new();
    }

    let mut families: BTreeMap<&str, Vec<&Exercise>> = BTreeMap::new();
    let mut unique_compound = Vec::new();
    let mut unique_isolation = Vec::new();
    for ex in candidates {
        match ex.exercise_family.as_deref() {
            Some(f) => families.entry(f).or_default().push(ex),
            None if ex.is_compound => unique_compound.push(ex),
            None => unique_isolation.push(ex),
        }
    }
    let (mut compound_families, mut isolation_families): (Vec<_>, Vec<_>) =
        families.into_values().partition(|m| family_is_compound(m));

    compound_families.shuffle(rng);
    isolation_families.shuffle(rng);
    unique_compound.shuffle(rng);
    unique_isolation.shuffle(rng);

    let compound_target = compound_slots(target, compound_percent(goal));
    let isolation_target = target - compound_target;
    let mut claims = Claims::default();

    let mut compound = Vec::with_capacity(compound_target);
    fill_from_families(&compound_families, true, compound_target, &mut compound, &mut claims, rng);
    fill_from_pool(&unique_compound, compound_target, &mut compound, &mut claims);

    let mut isolation = Vec::with_capacity(isolation_target);
    fill_from_families(&isolation_families, false, isolation_target, &mut isolation, &mut claims, rng);
    fill_from_pool(&unique_isolation, isolation_target, &mut isolation, &mut claims);

    if compound.len() + isolation.len() < target {
        let mut rest: Vec<&Exercise> = candidates.iter().filter(|e| claims.is_free(e)).collect();
        rest.shuffle(rng);
        for ex in rest {
            if compound.len() + isolation.len() >= target {
                break;
            }
            if !claims.is_free(ex) {
                continue;
            }
            claims.claim(ex);
            if ex.is_compound {
                compound.push(ex);
            } else {
                isolation.push(ex);
            }
        }
    }

    compound.into_iter().chain(isolation).cloned().collect()
}

/// Dispatches to the full-body balancer or the balanced partitioner.
pub fn select_exercises<R: Rng + ?Sized>(
    focus: &Focus,
    candidates: &[Exercise],
    target: usize,
    goal: Goal,
    rng: &mut R,
) -> Vec<Exercise> {
    if focus.is_full_body() {
        select_full_body(candidates, target, rng)
    } else {
        select_balanced(candidates, target, goal, rng)
    }
}
