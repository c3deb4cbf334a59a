use serde::Serialize;

/// Read-only figures shown on the dashboard and settings screens.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct DashboardSummary {
    pub client_count: usize,
    pub unassigned_count: usize,
    pub unpaid_count: usize,
    pub sales_goal: u32,
}
