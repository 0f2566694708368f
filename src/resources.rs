//! JSON representations of catalog rows.

use serde::Serialize;

use crate::{
    db::entities::{file, song},
    error::{AppError, Result},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileResource {
    pub id: i32,
    pub name: String,
}

impl From<file::Model> for FileResource {
    fn from(file: file::Model) -> Self {
        Self {
            id: file.id,
            name: file.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SongResource {
    pub id: i32,
    pub file: FileResource,
}

impl SongResource {
    /// Builds the song's representation from the file row it was loaded with.
    ///
    /// A song whose file could not be loaded breaks the foreign key invariant and
    /// is reported as [`AppError::MissingFile`].
    pub fn new(song: song::Model, file: Option<file::Model>) -> Result<Self> {
        match file {
            Some(file) if file.id == song.file_id => Ok(Self {
                id: song.id,
                file: file.into(),
            }),
            _ => Err(AppError::MissingFile {
                song_id: song.id,
                file_id: song.file_id,
            }),
        }
    }
}
