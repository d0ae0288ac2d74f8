//! In-memory roster store.
//!
//! Evaluates composed filters with [`ComposedFilter::matches`] over members
//! left-joined with their teams, and orders rows the way PostgreSQL would
//! (NULLs last ascending, first descending, unless told otherwise). Every
//! query is counted so callers can assert how many round trips a search made.

use super::StoreError;
use crate::models::{columns, Member, MemberTeam, Team};
use crate::query_builder::{
    ComposedFilter, Direction, FilterValue, Filterable, NullHandling, SortOrder,
};
use crate::repository::{ContentQuery, CountQuery};
use async_trait::async_trait;
use std::cmp::Ordering;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

#[derive(Debug, Default)]
pub struct InMemoryMemberStore {
    teams: Vec<Team>,
    members: Vec<Member>,
    content_queries: AtomicUsize,
    count_queries: AtomicUsize,
    content_failure: Option<String>,
    count_failure: Option<String>,
}

impl InMemoryMemberStore {
    pub fn new(teams: Vec<Team>, members: Vec<Member>) -> Self {
        Self {
            teams,
            members,
            ..Self::default()
        }
    }

    /// Make every content query fail with `message`
    pub fn failing_content(mut self, message: impl Into<String>) -> Self {
        self.content_failure = Some(message.into());
        self
    }

    /// Make every count query fail with `message`
    pub fn failing_count(mut self, message: impl Into<String>) -> Self {
        self.count_failure = Some(message.into());
        self
    }

    /// Content queries issued so far, including unpaged ones
    pub fn content_query_count(&self) -> usize {
        self.content_queries.load(AtomicOrdering::SeqCst)
    }

    pub fn count_query_count(&self) -> usize {
        self.count_queries.load(AtomicOrdering::SeqCst)
    }

    fn joined_rows(&self) -> impl Iterator<Item = MemberTeam> + '_ {
        self.members.iter().map(|member| {
            let team = member
                .team_id
                .and_then(|team_id| self.teams.iter().find(|team| team.team_id == team_id));
            MemberTeam {
                member_id: member.member_id,
                username: member.username.clone(),
                age: member.age,
                team_id: team.map(|team| team.team_id),
                team_name: team.map(|team| team.name.clone()),
            }
        })
    }

    fn matching_sorted(
        &self,
        filter: &ComposedFilter,
        order: &[SortOrder],
    ) -> Result<Vec<MemberTeam>, StoreError> {
        if let Some(order) = order
            .iter()
            .find(|order| !columns::ALL.contains(&order.property.as_str()))
        {
            return Err(StoreError::contract_violation(format!(
                "unknown column '{}'",
                order.property
            )));
        }

        let mut rows: Vec<MemberTeam> = self
            .joined_rows()
            .filter(|row| filter.matches(row))
            .collect();
        rows.sort_by(|a, b| {
            order
                .iter()
                .map(|key| compare_by(a, b, key))
                .find(|ordering| ordering.is_ne())
                .unwrap_or_else(|| a.member_id.cmp(&b.member_id))
        });
        Ok(rows)
    }

    fn begin_content_query(&self) -> Result<(), StoreError> {
        self.content_queries.fetch_add(1, AtomicOrdering::SeqCst);
        match &self.content_failure {
            Some(message) => Err(StoreError::unavailable(message.clone())),
            None => Ok(()),
        }
    }
}

fn compare_by(a: &MemberTeam, b: &MemberTeam, key: &SortOrder) -> Ordering {
    let nulls_last = match key.nulls {
        NullHandling::NullsLast => true,
        NullHandling::NullsFirst => false,
        NullHandling::Native => key.direction == Direction::Asc,
    };
    match (a.column_value(&key.property), b.column_value(&key.property)) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) if nulls_last => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) if nulls_last => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => {
            let ordering = compare_values(&x, &y);
            match key.direction {
                Direction::Asc => ordering,
                Direction::Desc => ordering.reverse(),
            }
        }
    }
}

fn compare_values(x: &FilterValue, y: &FilterValue) -> Ordering {
    match (x, y) {
        (FilterValue::Text(x), FilterValue::Text(y)) => x.cmp(y),
        (FilterValue::Integer(x), FilterValue::Integer(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

#[async_trait]
impl ContentQuery for InMemoryMemberStore {
    type Row = MemberTeam;

    fn sortable_properties(&self) -> Vec<&'static str> {
        columns::ALL.to_vec()
    }

    async fn run_content_query(
        &self,
        filter: &ComposedFilter,
        offset: u64,
        limit: u64,
        order: &[SortOrder],
    ) -> Result<Vec<MemberTeam>, StoreError> {
        self.begin_content_query()?;
        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(self
            .matching_sorted(filter, order)?
            .into_iter()
            .skip(offset)
            .take(limit)
            .collect())
    }

    async fn run_unpaged_query(
        &self,
        filter: &ComposedFilter,
        order: &[SortOrder],
    ) -> Result<Vec<MemberTeam>, StoreError> {
        self.begin_content_query()?;
        self.matching_sorted(filter, order)
    }
}

#[async_trait]
impl CountQuery for InMemoryMemberStore {
    async fn run_count_query(&self, filter: &ComposedFilter) -> Result<u64, StoreError> {
        self.count_queries.fetch_add(1, AtomicOrdering::SeqCst);
        if let Some(message) = &self.count_failure {
            return Err(StoreError::unavailable(message.clone()));
        }
        Ok(self.joined_rows().filter(|row| filter.matches(row)).count() as u64)
    }
}
