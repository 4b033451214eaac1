use revbot_database_interface::{DbService, DbTransaction};
use tracing::error;

use crate::Result;

/// Scoped unit of work.
///
/// Every store call made through [`UnitOfWork::store`] is applied atomically by
/// [`UnitOfWork::finish`]. A unit of work dropped before being finished is discarded.
pub struct UnitOfWork {
    tx: Box<dyn DbTransaction>,
}

impl UnitOfWork {
    pub async fn begin(db_service: &dyn DbService) -> Result<Self> {
        Ok(Self {
            tx: db_service.begin().await?,
        })
    }

    pub fn store(&mut self) -> &mut dyn DbTransaction {
        &mut *self.tx
    }

    /// Commits on success, rolls back on error, and hands the result back.
    pub async fn finish<T>(self, result: Result<T>) -> Result<T> {
        match result {
            Ok(value) => {
                self.tx.commit().await?;
                Ok(value)
            }
            Err(e) => {
                if let Err(rollback_error) = self.tx.rollback().await {
                    error!(error = %rollback_error, "Could not roll back transaction");
                }

                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use revbot_database_interface::{DatabaseError, TeamStore};
    use revbot_database_memory::MemoryDb;

    use super::*;
    use crate::DomainError;

    #[tokio::test]
    async fn commit_on_success() {
        let db = MemoryDb::new();

        let mut uow = UnitOfWork::begin(&db).await.unwrap();
        let result = uow.store().teams_create("backend").await.map_err(Into::into);
        uow.finish(result).await.unwrap();

        let mut uow = UnitOfWork::begin(&db).await.unwrap();
        assert!(uow.store().teams_get("backend").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn rollback_on_error() {
        let db = MemoryDb::new();

        let mut uow = UnitOfWork::begin(&db).await.unwrap();
        uow.store().teams_create("backend").await.unwrap();
        let result: Result<()> = Err(DatabaseError::UnknownTeam("frontend".into()).into());
        assert!(matches!(
            uow.finish(result).await,
            Err(DomainError::TeamNotFound(_))
        ));

        let mut uow = UnitOfWork::begin(&db).await.unwrap();
        assert!(uow.store().teams_get("backend").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn discard_on_drop() {
        let db = MemoryDb::new();

        {
            let mut uow = UnitOfWork::begin(&db).await.unwrap();
            uow.store().teams_create("backend").await.unwrap();
        }

        let mut uow = UnitOfWork::begin(&db).await.unwrap();
        assert!(uow.store().teams_get("backend").await.unwrap().is_none());
    }
}
