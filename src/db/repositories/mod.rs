use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    Set, SqlErr,
};

use crate::db::entities::{file, song, File, Song};
use crate::error::{AppError, Result};

/// Reads and writes `files` rows through any connection or open transaction.
pub struct FileRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> FileRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<file::Model>> {
        Ok(File::find_by_id(id).one(self.db).await?)
    }

    /// First file (lowest id) carrying exactly this name.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<file::Model>> {
        Ok(File::find()
            .filter(file::Column::Name.eq(name))
            .order_by_asc(file::Column::Id)
            .one(self.db)
            .await?)
    }

    pub async fn create(&self, name: &str) -> Result<file::Model> {
        if name.chars().count() > file::MAX_NAME_LEN {
            return Err(AppError::Validation(format!(
                "file name is longer than {} characters",
                file::MAX_NAME_LEN
            )));
        }

        let file = file::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        };
        Ok(file.insert(self.db).await?)
    }
}

/// Reads and writes `songs` rows through any connection or open transaction.
pub struct SongRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> SongRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Every song in ascending id order, paired with the file it references.
    pub async fn list_with_files(&self) -> Result<Vec<(song::Model, Option<file::Model>)>> {
        Ok(Song::find()
            .find_also_related(File)
            .order_by_asc(song::Column::Id)
            .all(self.db)
            .await?)
    }

    pub async fn create(&self, file_id: i32) -> Result<song::Model> {
        let song = song::ActiveModel {
            file_id: Set(file_id),
            ..Default::default()
        };

        song.insert(self.db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                AppError::ConstraintViolation(format!("File {} does not exist", file_id))
            }
            _ => AppError::Database(e),
        })
    }
}

