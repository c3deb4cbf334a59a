use crate::forms::goal::SalesGoalForm;
use crate::repository::SettingsWriter;
use crate::services::ServiceResult;

/// Parses and stores a new sales goal. On a parse failure the stored goal is
/// left unchanged.
pub fn update_sales_goal<R>(repo: &R, form: &SalesGoalForm) -> ServiceResult<u32>
where
    R: SettingsWriter + ?Sized,
{
    let goal = form.parse().map_err(|err| {
        log::warn!("Rejected sales goal {:?}: {err}", form.goal);
        err
    })?;

    repo.set_sales_goal(goal)?;
    log::info!("Sales goal set to {goal}");

    Ok(goal)
}
