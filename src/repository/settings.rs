use crate::repository::errors::RepositoryResult;
use crate::repository::{InMemoryRepository, SettingsReader, SettingsWriter};

impl SettingsReader for InMemoryRepository {
    fn sales_goal(&self) -> RepositoryResult<u32> {
        Ok(self.lock()?.sales_goal)
    }
}

impl SettingsWriter for InMemoryRepository {
    fn set_sales_goal(&self, goal: u32) -> RepositoryResult<()> {
        self.lock()?.sales_goal = goal;
        Ok(())
    }
}
