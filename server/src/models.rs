use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub user_name: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser<'a> {
    pub email: &'a str,
    pub user_name: &'a str,
    pub password_hash: &'a str,
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::sessions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)]
pub struct Session {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::sessions)]
pub struct NewSession<'a> {
    pub user_id: Uuid,
    pub token_hash: &'a str,
    pub expires_at: DateTime<Utc>,
}

/// Immutable reference data; never written outside migrations.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::messier_objects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MessierObject {
    pub id: Uuid,
    pub messier_number: i32,
    pub name: String,
    pub object_type: String,
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::images)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)]
pub struct Image {
    pub id: Uuid,
    pub user_id: Uuid,
    pub original_filename: String,
    pub stored_path: String,
    pub content_type: String,
    pub byte_size: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::images)]
pub struct NewImage<'a> {
    pub user_id: Uuid,
    pub original_filename: &'a str,
    pub stored_path: &'a str,
    pub content_type: &'a str,
    pub byte_size: i64,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::user_object_images)]
pub struct NewUserObjectImage {
    pub user_id: Uuid,
    pub messier_object_id: Uuid,
    pub image_id: Uuid,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::journal_entries)]
pub struct NewJournalEntry<'a> {
    pub user_id: Uuid,
    pub messier_object_id: Uuid,
    pub image_id: Uuid,
    pub journal_text: &'a str,
    pub observed_date: NaiveDate,
}
