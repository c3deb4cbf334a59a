use crate::dto::dashboard::DashboardSummary;
use crate::repository::{ClientReader, OrderReader, SettingsReader};
use crate::services::ServiceResult;
use crate::views::dashboard_summary;

/// Collects the aggregates read by the dashboard, settings and profile
/// screens.
pub fn load_dashboard<R>(repo: &R) -> ServiceResult<DashboardSummary>
where
    R: ClientReader + OrderReader + SettingsReader + ?Sized,
{
    let orders = repo.list_orders()?;
    let clients = repo.list_clients()?;

    Ok(dashboard_summary(&clients, &orders, repo.sales_goal()?))
}
