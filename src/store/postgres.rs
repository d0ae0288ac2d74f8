use super::StoreError;
use crate::models::{columns, MemberTeam};
use crate::query_builder::{ComposedFilter, Join, SortOrder, TableSource};
use crate::repository::{ContentQuery, CountQuery};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

/// PostgreSQL-backed roster store
#[derive(Debug, Clone)]
pub struct PgMemberStore {
    pool: PgPool,
    source: TableSource,
}

impl PgMemberStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            source: Self::member_team_source(),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// `members` left-joined with `teams`, projected onto [`MemberTeam`]
    pub fn member_team_source() -> TableSource {
        TableSource::new("members", "m", "m.member_id")
            .select(&[
                "m.member_id",
                "m.username",
                "m.age",
                "t.team_id",
                "t.name AS team_name",
            ])
            .join(Join::left("teams", "t", "t.team_id = m.team_id"))
            .column(columns::MEMBER_ID, "m.member_id")
            .column(columns::USERNAME, "m.username")
            .column(columns::AGE, "m.age")
            .column(columns::TEAM_ID, "t.team_id")
            .column(columns::TEAM_NAME, "t.name")
    }
}

#[async_trait]
impl ContentQuery for PgMemberStore {
    type Row = MemberTeam;

    fn sortable_properties(&self) -> Vec<&'static str> {
        self.source.column_names()
    }

    async fn run_content_query(
        &self,
        filter: &ComposedFilter,
        offset: u64,
        limit: u64,
        order: &[SortOrder],
    ) -> Result<Vec<MemberTeam>, StoreError> {
        let mut query = self
            .source
            .content_query(filter, order, Some((offset, limit)))?;
        debug!(sql = %query.sql(), "Running content query");

        let rows = query
            .build_query_as::<MemberTeam>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn run_unpaged_query(
        &self,
        filter: &ComposedFilter,
        order: &[SortOrder],
    ) -> Result<Vec<MemberTeam>, StoreError> {
        let mut query = self.source.content_query(filter, order, None)?;
        debug!(sql = %query.sql(), "Running unpaged content query");

        let rows = query
            .build_query_as::<MemberTeam>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}

#[async_trait]
impl CountQuery for PgMemberStore {
    async fn run_count_query(&self, filter: &ComposedFilter) -> Result<u64, StoreError> {
        let mut query = self.source.count_query(filter)?;
        debug!(sql = %query.sql(), "Running count query");

        let count: i64 = query
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;
        u64::try_from(count)
            .map_err(|_| StoreError::contract_violation(format!("negative row count {count}")))
    }
}


#[cfg(all(test, feature = "test-db"))]
mod tests {
    use super::*;
    use crate::models::MemberSearchCondition;
    use crate::query_builder::{compose, PageRequest};
    use crate::repository::SearchRepository;

    async fn seed(pool: &PgPool) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO teams (team_id, name) VALUES (1, 'teamA'), (2, 'teamB')")
            .execute(pool)
            .await?;
        sqlx::query(
            "INSERT INTO members (member_id, username, age, team_id) VALUES \
             (1, 'memberA', 10, 1), (2, 'memberB', 20, 1), \
             (3, 'memberC', 30, 2), (4, 'memberD', 40, 2)",
        )
        .execute(pool)
        .await?;
        Ok(())
    }

    #[sqlx::test(migrator = "crate::database::MIGRATOR")]
    async fn test_team_join_search(pool: PgPool) -> sqlx::Result<()> {
        seed(&pool).await?;
        let repository = SearchRepository::new(PgMemberStore::new(pool));
        let condition = MemberSearchCondition::new()
            .with_age_goe(35)
            .with_age_loe(40)
            .with_team_name("teamB");

        let rows = repository.search_all(&condition).await.unwrap();
        let names: Vec<&str> = rows.iter().map(|row| row.username.as_str()).collect();
        assert_eq!(names, vec!["memberD"]);
        Ok(())
    }

    #[sqlx::test(migrator = "crate::database::MIGRATOR")]
    async fn test_paged_search_counts_full_page(pool: PgPool) -> sqlx::Result<()> {
        seed(&pool).await?;
        let repository = SearchRepository::new(PgMemberStore::new(pool));
        let condition = MemberSearchCondition::new().with_age_goe(15);
        let page = PageRequest::new(0, 2).unwrap();

        let result = repository.search(&condition, &page).await.unwrap();
        let ages: Vec<i32> = result.content().iter().map(|row| row.age).collect();
        assert_eq!(ages, vec![20, 30]);
        assert_eq!(result.total(), 3);
        Ok(())
    }

    #[sqlx::test(migrator = "crate::database::MIGRATOR")]
    async fn test_count_query_without_join(pool: PgPool) -> sqlx::Result<()> {
        seed(&pool).await?;
        let store = PgMemberStore::new(pool);
        let filter = compose(&MemberSearchCondition::new().with_age_loe(20));
        assert_eq!(store.run_count_query(&filter).await.unwrap(), 2);
        Ok(())
    }
}
