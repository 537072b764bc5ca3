use tracing::debug;

use crate::exercises::{
    model::Exercise,
    repo::{CatalogFilter, ExerciseCatalog},
};

use super::dto::PlanCriteria;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The store holds no exercises at all, whatever the filters.
    #[error("exercise catalog is empty")]
    EmptyCatalog,
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// Filter for plan candidates. Full-body requests are not restricted by muscle
/// group; the balancer takes care of diversity.
pub fn candidate_filter(criteria: &PlanCriteria) -> CatalogFilter {
    CatalogFilter {
        muscle_groups: criteria.focus.groups(),
        equipment: criteria.equipment.clone(),
        goal: Some(criteria.goal),
        is_compound: None,
        exclude_names: criteria.blacklist.iter().cloned().collect(),
    }
}

/// Candidates for a plan. An empty `Ok` means nothing matched the filters;
/// `EmptyCatalog` means there is nothing to filter in the first place.
pub async fn fetch_candidates(
    catalog: &dyn ExerciseCatalog,
    criteria: &PlanCriteria,
) -> Result<Vec<Exercise>, FetchError> {
    let total = catalog.count().await?;
    if total == 0 {
        return Err(FetchError::EmptyCatalog);
    }
    let candidates = catalog.query(&candidate_filter(criteria)).await?;
    debug!(total, matched = candidates.len(), "fetched plan candidates");
    Ok(candidates)
}
