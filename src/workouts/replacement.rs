use rand::{seq::SliceRandom, Rng};
use tracing::{debug, info, warn};

use crate::exercises::{
    model::{EquipmentSelection, Exercise, Goal, MuscleGroup},
    repo::{CatalogFilter, ExerciseCatalog},
};

use super::{dto::ReplacementRequest, fallback::static_replacement, prescription::ensure_tips};

/// What a hidden exercise must be replaced with.
#[derive(Debug, Clone)]
pub struct ReplacementCriteria {
    pub muscle_group: MuscleGroup,
    pub goal: Goal,
    pub equipment: EquipmentSelection,
    pub is_compound: bool,
    pub exclude_names: Vec<String>,
}

impl From<ReplacementRequest> for ReplacementCriteria {
    fn from(req: ReplacementRequest) -> Self {
        Self {
            muscle_group: req.muscle_group,
            goal: req.goal,
            equipment: EquipmentSelection::from_names(&req.equipment),
            is_compound: req.is_compound,
            exclude_names: req.exclude_names,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GroupScope {
    Exact,
    /// The group itself, `full_body` and the related groups.
    Related,
    Any,
}

/// One step of the search, from strict to loose.
#[derive(Debug, Clone, Copy)]
struct Strategy {
    name: &'static str,
    groups: GroupScope,
    same_kind: bool,
}

const STRATEGIES: [Strategy; 5] = [
    Strategy { name: "exact group and kind", groups: GroupScope::Exact, same_kind: true },
    Strategy { name: "exact group", groups: GroupScope::Exact, same_kind: false },
    Strategy { name: "related group and kind", groups: GroupScope::Related, same_kind: true },
    Strategy { name: "related group", groups: GroupScope::Related, same_kind: false },
    Strategy { name: "any compatible", groups: GroupScope::Any, same_kind: false },
];

impl Strategy {
    fn filter(&self, c: &ReplacementCriteria) -> CatalogFilter {
        let muscle_groups = match self.groups {
            GroupScope::Exact => Some(vec![c.muscle_group]),
            GroupScope::Related => {
                let mut groups = vec![c.muscle_group];
                for g in std::iter::once(&MuscleGroup::FullBody).chain(c.muscle_group.related()) {
                    if !groups.contains(g) {
                        groups.push(*g);
                    }
                }
                Some(groups)
            }
            GroupScope::Any => None,
        };
        CatalogFilter {
            muscle_groups,
            equipment: c.equipment.clone(),
            goal: Some(c.goal),
            is_compound: self.same_kind.then_some(c.is_compound),
            exclude_names: c.exclude_names.clone(),
        }
    }
}

/// Single substitute for a hidden exercise, or `None` when neither the catalog
/// nor the static table has anything left. A catalog failure skips straight to
/// the static table.
pub async fn find_replacement<R: Rng + Send + ?Sized>(
    catalog: &dyn ExerciseCatalog,
    criteria: &ReplacementCriteria,
    rng: &mut R,
) -> Option<Exercise> {
    for strategy in &STRATEGIES {
        match catalog.query(&strategy.filter(criteria)).await {
            Ok(found) => {
                debug!(strategy = strategy.name, matches = found.len(), "replacement search");
                if let Some(ex) = found.choose(rng) {
                    info!(strategy = strategy.name, replacement = %ex.name, "replacement found");
                    return Some(ensure_tips(ex.clone()));
                }
            }
            Err(e) => {
                warn!(error = %e, "catalog unavailable during replacement search");
                break;
            }
        }
    }

    let found = static_replacement(
        criteria.muscle_group,
        criteria.is_compound,
        criteria.goal,
        &criteria.exclude_names,
        rng,
    );
    match &found {
        Some(ex) => info!(replacement = %ex.name, "replacement taken from static table"),
        None => info!(group = %criteria.muscle_group, "no replacement available"),
    }
    found.map(ensure_tips)
}
