//! The journal-entry upsert transaction.
//!
//! One call records an uploaded image, binds it as the single image for a
//! (user, object) pair, and creates-or-updates the single journal entry
//! for that pair. All three writes commit together or not at all, and
//! both upserts are keyed on the `(user_id, messier_object_id)` unique
//! constraints so concurrent calls for the same pair serialize in the
//! database rather than racing a read-then-write check.

use chrono::{NaiveDate, Utc};
use diesel::prelude::*;
use diesel::upsert::excluded;
use uuid::Uuid;

use crate::error::JournalSaveError;
use crate::models::{NewImage, NewJournalEntry, NewUserObjectImage};
use crate::schema::{images, journal_entries, user_object_images};
use crate::uploads::StoredFile;

/// Validated inputs for one upsert. The stored file has already been
/// written by upload intake; everything here is DB-side.
pub struct JournalUpsert<'a> {
    pub user_id: Uuid,
    pub object_id: Uuid,
    pub observed_date: NaiveDate,
    pub journal_text: &'a str,
    pub stored: &'a StoredFile,
}

/// Parse an observed date in `YYYY-MM-DD` form. chrono rejects
/// non-calendar dates such as `2024-02-30`.
pub fn parse_observed_date(raw: &str) -> Result<NaiveDate, JournalSaveError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| JournalSaveError::InvalidDate(raw.to_string()))
}

/// Record the image and upsert the binding and entry for
/// `(user_id, object_id)` in a single transaction.
///
/// Returns the new image id. After a successful call the binding's and
/// entry's `image_id` both equal it; a repeat call for the same pair
/// supersedes the previous binding and entry in place, leaving the old
/// image row unreferenced.
pub fn upsert_entry(
    conn: &mut PgConnection,
    req: &JournalUpsert,
) -> Result<Uuid, diesel::result::Error> {
    conn.transaction(|conn| {
        // 1. Record the upload.
        let new_image = NewImage {
            user_id: req.user_id,
            original_filename: &req.stored.original_filename,
            stored_path: &req.stored.relative_path,
            content_type: &req.stored.content_type,
            byte_size: req.stored.byte_size,
        };

        let image_id: Uuid = diesel::insert_into(images::table)
            .values(&new_image)
            .returning(images::id)
            .get_result(conn)?;

        // 2. Bind it as the one image for this (user, object) pair.
        let new_binding = NewUserObjectImage {
            user_id: req.user_id,
            messier_object_id: req.object_id,
            image_id,
        };

        diesel::insert_into(user_object_images::table)
            .values(&new_binding)
            .on_conflict((
                user_object_images::user_id,
                user_object_images::messier_object_id,
            ))
            .do_update()
            .set((
                user_object_images::image_id.eq(excluded(user_object_images::image_id)),
                user_object_images::updated_at.eq(Utc::now()),
            ))
            .execute(conn)?;

        // 3. Create or update the entry, keeping its image_id equal to
        //    the binding's.
        let new_entry = NewJournalEntry {
            user_id: req.user_id,
            messier_object_id: req.object_id,
            image_id,
            journal_text: req.journal_text,
            observed_date: req.observed_date,
        };

        diesel::insert_into(journal_entries::table)
            .values(&new_entry)
            .on_conflict((
                journal_entries::user_id,
                journal_entries::messier_object_id,
            ))
            .do_update()
            .set((
                journal_entries::image_id.eq(excluded(journal_entries::image_id)),
                journal_entries::journal_text.eq(excluded(journal_entries::journal_text)),
                journal_entries::observed_date.eq(excluded(journal_entries::observed_date)),
                journal_entries::updated_at.eq(Utc::now()),
            ))
            .execute(conn)?;

        Ok(image_id)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_iso_calendar_dates() {
        assert_eq!(
            parse_observed_date("2025-08-21").unwrap(),
            NaiveDate::from_ymd_opt(2025, 8, 21).unwrap()
        );
        // Leading/trailing whitespace from form input is tolerated.
        assert!(parse_observed_date(" 2024-02-29 ").is_ok());
    }

    #[test]
    fn rejects_impossible_calendar_dates() {
        assert!(parse_observed_date("2024-02-30").is_err());
        assert!(parse_observed_date("2023-02-29").is_err());
        assert!(parse_observed_date("2024-13-01").is_err());
    }

    #[test]
    fn rejects_other_date_formats() {
        for raw in ["08/21/2025", "21-08-2025", "2025-8", "yesterday", ""] {
            let err = parse_observed_date(raw).unwrap_err();
            assert!(matches!(err, JournalSaveError::InvalidDate(_)), "{raw}");
        }
    }
}
