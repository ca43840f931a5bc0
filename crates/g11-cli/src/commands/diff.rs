use anyhow::Result;
use g11_reconcile::reconcile_checked;
use g11_schemas::NearPoint;
use tracing::info;

use super::load_points;

/// Print `{"added":[ids],"removed":[ids]}` for the two payloads.
///
/// Without `assume_sorted` both sides are sorted by id first; duplicate ids
/// are still rejected.
pub fn run(old_path: &str, new_path: &str, assume_sorted: bool) -> Result<()> {
    let mut old = load_points(old_path)?;
    let mut new = load_points(new_path)?;

    if !assume_sorted {
        old.sort_by(NearPoint::cmp_by_id);
        new.sort_by(NearPoint::cmp_by_id);
    }

    let diff = reconcile_checked(&old, &new, NearPoint::cmp_by_id)?;
    info!(
        old = old.len(),
        new = new.len(),
        added = diff.added.len(),
        removed = diff.removed.len(),
        "diffed point payloads"
    );

    let ids = diff.map(|p| p.id().to_string());
    println!("{}", serde_json::to_string(&ids)?);
    Ok(())
}
