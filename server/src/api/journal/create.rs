//! POST /journal/new: the only state-mutating endpoint. Validates every
//! field before touching the filesystem or the database, then runs upload
//! intake followed by the upsert transaction.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::error::JournalSaveError;
use crate::flash::{self, Level};
use crate::journal::{parse_observed_date, upsert_entry, JournalUpsert};
use crate::uploads::{allowed_extension, UploadIntake, MAX_FILE_SIZE};
use crate::AppState;

/// Raw multipart fields, collected before any validation.
#[derive(Default)]
struct JournalForm {
    messier_id: Option<String>,
    observed_date: Option<String>,
    journal_text: String,
    image: Option<(String, Vec<u8>)>,
}

/// Fields after validation, ready for intake + upsert.
#[derive(Debug)]
struct ValidatedEntry {
    object_id: Uuid,
    observed_date: NaiveDate,
    journal_text: String,
    image_name: String,
    image_bytes: Vec<u8>,
}

async fn read_form(multipart: &mut Multipart) -> Result<JournalForm, JournalSaveError> {
    let mut form = JournalForm::default();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!("multipart read error: {}", e);
                return Err(if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                    JournalSaveError::TooLarge
                } else {
                    JournalSaveError::MalformedForm
                });
            }
        };

        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("messier_id") => {
                form.messier_id = Some(field.text().await.map_err(read_error)?);
            }
            Some("observed_date") => {
                form.observed_date = Some(field.text().await.map_err(read_error)?);
            }
            Some("journal_text") => {
                form.journal_text = field.text().await.map_err(read_error)?;
            }
            Some("image") => {
                let file_name = field.file_name().map(str::to_string);
                let data = field.bytes().await.map_err(read_error)?;
                if let Some(file_name) = file_name {
                    if !file_name.is_empty() && !data.is_empty() {
                        form.image = Some((file_name, data.to_vec()));
                    }
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

fn read_error(e: axum::extract::multipart::MultipartError) -> JournalSaveError {
    tracing::warn!("multipart field read error: {}", e);
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        JournalSaveError::TooLarge
    } else {
        JournalSaveError::MalformedForm
    }
}

/// All checks run before any filesystem or database mutation; a failure
/// here leaves every entity unchanged.
fn validate(form: JournalForm) -> Result<ValidatedEntry, JournalSaveError> {
    let messier_id = form
        .messier_id
        .filter(|v| !v.trim().is_empty())
        .ok_or(JournalSaveError::MissingField("messier_id"))?;
    let object_id =
        Uuid::parse_str(messier_id.trim()).map_err(|_| JournalSaveError::InvalidObject)?;

    let raw_date = form
        .observed_date
        .filter(|v| !v.trim().is_empty())
        .ok_or(JournalSaveError::MissingField("observed_date"))?;
    let observed_date = parse_observed_date(&raw_date)?;

    let (image_name, image_bytes) = form.image.ok_or(JournalSaveError::MissingImage)?;
    if image_bytes.len() > MAX_FILE_SIZE {
        return Err(JournalSaveError::TooLarge);
    }
    allowed_extension(&image_name)?;

    Ok(ValidatedEntry {
        object_id,
        observed_date,
        journal_text: form.journal_text,
        image_name,
        image_bytes,
    })
}

fn redirect_with_error(jar: CookieJar, err: &JournalSaveError) -> Response {
    let jar = flash::set(jar, Level::Error, &err.to_string());
    (jar, Redirect::to("/")).into_response()
}

pub async fn create_entry(
    AuthUser(principal): AuthUser,
    State(state): State<AppState>,
    jar: CookieJar,
    mut multipart: Multipart,
) -> Response {
    let form = match read_form(&mut multipart).await {
        Ok(form) => form,
        Err(err) => return redirect_with_error(jar, &err),
    };

    let entry = match validate(form) {
        Ok(entry) => entry,
        Err(err) => return redirect_with_error(jar, &err),
    };

    // First mutation: write the image bytes into the content root.
    let intake = UploadIntake::new(&state.config.upload_dir);
    let stored = match intake.accept(&entry.image_name, &entry.image_bytes) {
        Ok(stored) => stored,
        Err(err) => {
            let err = JournalSaveError::from(err);
            if let JournalSaveError::Storage(ref io) = err {
                tracing::error!(error = %io, "failed to write upload");
            }
            return redirect_with_error(jar, &err);
        }
    };

    let mut conn = match state.pool.get() {
        Ok(c) => c,
        Err(_) => {
            // File is on disk but nothing references it yet.
            tracing::warn!(path = %stored.relative_path, "orphaned upload; eligible for sweep");
            return redirect_with_error(jar, &JournalSaveError::Unavailable);
        }
    };

    let upsert = JournalUpsert {
        user_id: principal.id,
        object_id: entry.object_id,
        observed_date: entry.observed_date,
        journal_text: &entry.journal_text,
        stored: &stored,
    };

    match upsert_entry(&mut conn, &upsert) {
        Ok(image_id) => {
            tracing::info!(
                user = %principal.id,
                object = %entry.object_id,
                image = %image_id,
                "journal entry saved"
            );
            let jar = flash::set(jar, Level::Success, "Journal entry saved");
            (jar, Redirect::to("/")).into_response()
        }
        Err(e) => {
            // The transaction rolled back; the written file is the one
            // effect left behind. Operators reconcile the content root
            // against images.stored_path out of band.
            tracing::error!(error = %e, "journal upsert failed");
            tracing::warn!(path = %stored.relative_path, "orphaned upload; eligible for sweep");
            redirect_with_error(jar, &JournalSaveError::Persistence(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_form() -> JournalForm {
        JournalForm {
            messier_id: Some("6e4ae0e7-6dc5-4d2e-a585-7c8b8aafbc8b".to_string()),
            observed_date: Some("2025-08-21".to_string()),
            journal_text: "Clear skies".to_string(),
            image: Some(("andromeda.jpg".to_string(), vec![0xFF, 0xD8])),
        }
    }

    #[test]
    fn valid_form_passes() {
        let entry = validate(base_form()).unwrap();
        assert_eq!(entry.observed_date.to_string(), "2025-08-21");
        assert_eq!(entry.image_name, "andromeda.jpg");
    }

    #[test]
    fn text_file_is_rejected_before_any_io() {
        let form = JournalForm {
            image: Some(("notes.txt".to_string(), b"text".to_vec())),
            ..base_form()
        };
        let err = validate(form).unwrap_err();
        assert!(matches!(err, JournalSaveError::UnsupportedFileType(_)));
    }

    #[test]
    fn bad_dates_are_rejected() {
        for raw in ["2024-02-30", "08/21/2025"] {
            let form = JournalForm {
                observed_date: Some(raw.to_string()),
                ..base_form()
            };
            assert!(
                matches!(validate(form).unwrap_err(), JournalSaveError::InvalidDate(_)),
                "{raw}"
            );
        }
    }

    #[test]
    fn missing_pieces_are_named() {
        let form = JournalForm {
            messier_id: None,
            ..base_form()
        };
        assert!(matches!(
            validate(form).unwrap_err(),
            JournalSaveError::MissingField("messier_id")
        ));

        let form = JournalForm {
            image: None,
            ..base_form()
        };
        assert!(matches!(
            validate(form).unwrap_err(),
            JournalSaveError::MissingImage
        ));
    }

    #[test]
    fn malformed_object_id_is_invalid_object() {
        let form = JournalForm {
            messier_id: Some("31".to_string()),
            ..base_form()
        };
        assert!(matches!(
            validate(form).unwrap_err(),
            JournalSaveError::InvalidObject
        ));
    }

    #[test]
    fn oversized_image_is_rejected() {
        let form = JournalForm {
            image: Some(("big.png".to_string(), vec![0u8; MAX_FILE_SIZE + 1])),
            ..base_form()
        };
        assert!(matches!(
            validate(form).unwrap_err(),
            JournalSaveError::TooLarge
        ));
    }
}
