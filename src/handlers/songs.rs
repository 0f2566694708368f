use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use sea_orm::{ConnectionTrait, TransactionTrait};
use serde::Deserialize;
use serde_json::Number;

use crate::{
    db::{
        entities::file,
        repositories::{FileRepository, SongRepository},
    },
    error::{AppError, Result},
    handlers::SONGS_PATH,
    negotiation::JsonBody,
    resources::SongResource,
    state::AppState,
    validation::validate_song_payload,
};

#[derive(Debug, Deserialize)]
pub struct CreateSongRequest {
    pub file: FileReference,
}

/// The file a new song points at, by id, by name, or both.
#[derive(Debug, Deserialize)]
pub struct FileReference {
    pub id: Option<Number>,
    pub name: Option<String>,
}

pub async fn list_songs(State(state): State<AppState>) -> Result<Json<Vec<SongResource>>> {
    let txn = state.db.begin().await?;

    let songs = SongRepository::new(&txn)
        .list_with_files()
        .await?
        .into_iter()
        .map(|(song, file)| SongResource::new(song, file))
        .collect::<Result<Vec<_>>>()?;

    txn.commit().await?;

    Ok(Json(songs))
}

pub async fn create_song(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody,
) -> Result<impl IntoResponse> {
    if let Err(violation) = validate_song_payload(&payload) {
        tracing::debug!("Rejected song payload: {}", violation);
        return Err(violation.into());
    }

    let request: CreateSongRequest =
        serde_json::from_value(payload).map_err(|e| AppError::Validation(e.to_string()))?;

    let txn = state.db.begin().await?;

    let file = resolve_file(&txn, &request.file).await?;
    let song = SongRepository::new(&txn).create(file.id).await?;

    txn.commit().await?;

    tracing::info!(song_id = song.id, file_id = file.id, "Created song");

    let resource = SongResource::new(song, Some(file))?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, SONGS_PATH)],
        Json(resource),
    ))
}

/// Finds the file a create request refers to.
///
/// An id wins over a name; when both are given they must describe the same file.
/// A reference that matches no file is a client error.
async fn resolve_file<C: ConnectionTrait>(
    db: &C,
    reference: &FileReference,
) -> Result<file::Model> {
    let files = FileRepository::new(db);

    match (&reference.id, &reference.name) {
        (Some(raw_id), name) => {
            let id = parse_file_id(raw_id)
                .ok_or_else(|| AppError::Validation(format!("{} is not a valid file id", raw_id)))?;

            let file = files
                .find_by_id(id)
                .await?
                .ok_or_else(|| AppError::ConstraintViolation(format!("File {} does not exist", id)))?;

            match name {
                Some(name) if *name != file.name => Err(AppError::ConstraintViolation(format!(
                    "File {} is named '{}', not '{}'",
                    id, file.name, name
                ))),
                _ => Ok(file),
            }
        }
        (None, Some(name)) => files.find_by_name(name).await?.ok_or_else(|| {
            AppError::ConstraintViolation(format!("No file named '{}' exists", name))
        }),
        (None, None) => Err(AppError::Validation(
            "'file' must contain an 'id' or a 'name'".to_string(),
        )),
    }
}

/// Accepts integers and integral floats (`3.0`) that fit a row id.
fn parse_file_id(number: &Number) -> Option<i32> {
    if let Some(id) = number.as_i64() {
        return i32::try_from(id).ok();
    }

    number
        .as_f64()
        .filter(|f| f.fract() == 0.0 && *f >= f64::from(i32::MIN) && *f <= f64::from(i32::MAX))
        .map(|f| f as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(value: serde_json::Value) -> Number {
        match value {
            serde_json::Value::Number(n) => n,
            other => panic!("not a number: {}", other),
        }
    }

    #[test]
    fn test_parse_file_id() {
        assert_eq!(parse_file_id(&number(serde_json::json!(12))), Some(12));
        assert_eq!(parse_file_id(&number(serde_json::json!(3.0))), Some(3));
        assert_eq!(parse_file_id(&number(serde_json::json!(2.5))), None);
        assert_eq!(parse_file_id(&number(serde_json::json!(5_000_000_000u64))), None);
        assert_eq!(parse_file_id(&number(serde_json::json!(-1))), Some(-1));
    }
}
