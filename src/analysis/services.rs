use tracing::debug;
use uuid::Uuid;

use crate::analysis::dto::AnalysisResponse;
use crate::analysis::engine::{aggregate_entries, span_days};
use crate::analysis::repo;
use crate::error::ApiError;
use crate::intake::dto::parse_date;
use crate::plans::targets::resolve_targets;
use crate::state::AppState;

/// Merges the range aggregation with the active plan's daily targets. No
/// role-specific branching happens here; callers differ only in how they
/// supply `patient_id`.
pub async fn compose_analysis(
    state: &AppState,
    patient_id: Uuid,
    from: &str,
    to: &str,
) -> Result<AnalysisResponse, ApiError> {
    let start = parse_date(from)?;
    let end = parse_date(to)?;

    let days_logged = repo::count_logs(&state.db, patient_id, start, end).await?;
    let entries = repo::fetch_entry_nutrients(&state.db, patient_id, start, end).await?;
    let aggregate = aggregate_entries(&entries, days_logged, span_days(start, end));

    let resolved = resolve_targets(&state.db, &state.config.targets, patient_id).await?;

    debug!(
        patient_id = %patient_id,
        %start,
        %end,
        days_logged = aggregate.days_logged,
        entries = entries.len(),
        plan = %resolved.plan_name,
        "analysis composed"
    );

    Ok(AnalysisResponse {
        days_logged: aggregate.days_logged,
        totals: aggregate.totals,
        targets: resolved.targets,
        plan_name: resolved.plan_name,
        dosha_analysis: aggregate.dosha,
    })
}
