//! Read-only dashboard queries: the object catalog, a user's journal
//! entries, and the per-type progress summary.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::models::MessierObject;
use crate::schema::{images, journal_entries, messier_objects, user_object_images};

/// Full catalog, ascending by Messier number. Bounded reference set
/// (~110 rows), so no pagination.
pub fn list_catalog(conn: &mut PgConnection) -> QueryResult<Vec<MessierObject>> {
    messier_objects::table
        .order(messier_objects::messier_number.asc())
        .select(MessierObject::as_select())
        .load(conn)
}

/// One journal entry joined with its catalog object and bound image,
/// shaped for display.
#[derive(Queryable, Debug)]
pub struct EntryRow {
    pub messier_number: i32,
    pub object_name: String,
    pub object_type: String,
    pub image_path: String,
    pub journal_text: String,
    pub observed_date: NaiveDate,
    pub updated_at: DateTime<Utc>,
}

/// A user's entries, most recently relevant first: observed date
/// descending, ties broken by last update descending.
pub fn list_entries(conn: &mut PgConnection, user_id: Uuid) -> QueryResult<Vec<EntryRow>> {
    journal_entries::table
        .inner_join(messier_objects::table)
        .inner_join(images::table)
        .filter(journal_entries::user_id.eq(user_id))
        .order((
            journal_entries::observed_date.desc(),
            journal_entries::updated_at.desc(),
        ))
        .select((
            messier_objects::messier_number,
            messier_objects::name,
            messier_objects::object_type,
            images::stored_path,
            journal_entries::journal_text,
            journal_entries::observed_date,
            journal_entries::updated_at,
        ))
        .load(conn)
}

#[derive(Debug, Default, PartialEq)]
pub struct ProgressSummary {
    /// Number of objects this user has a bound image for.
    pub total: i64,
    /// Binding counts grouped by object type. Types with zero bindings
    /// are absent; readers treat absence as zero.
    pub per_type: BTreeMap<String, i64>,
}

/// Count a user's bindings grouped by the bound object's type.
pub fn progress_summary(conn: &mut PgConnection, user_id: Uuid) -> QueryResult<ProgressSummary> {
    let rows: Vec<(String, i64)> = user_object_images::table
        .inner_join(messier_objects::table)
        .filter(user_object_images::user_id.eq(user_id))
        .group_by(messier_objects::object_type)
        .select((messier_objects::object_type, diesel::dsl::count_star()))
        .load(conn)?;

    Ok(summarize(rows))
}

fn summarize(rows: Vec<(String, i64)>) -> ProgressSummary {
    let mut summary = ProgressSummary::default();
    for (object_type, count) in rows {
        summary.total += count;
        summary.per_type.insert(object_type, count);
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_totals_and_groups() {
        let summary = summarize(vec![
            ("Galaxy".to_string(), 3),
            ("Nebula".to_string(), 1),
        ]);

        assert_eq!(summary.total, 4);
        assert_eq!(summary.per_type.get("Galaxy"), Some(&3));
        assert_eq!(summary.per_type.get("Nebula"), Some(&1));
        // Types without bindings never appear.
        assert!(!summary.per_type.contains_key("Star Cluster"));
    }

    #[test]
    fn summary_of_nothing_is_empty() {
        let summary = summarize(Vec::new());
        assert_eq!(summary.total, 0);
        assert!(summary.per_type.is_empty());
    }
}
