use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

use actix_multipart::Multipart;
use actix_web::{web, HttpRequest};
use futures_util::StreamExt;
use log::{error, info};

use crate::errors::AppError;

/// A decoded multipart upload: the `file` part plus any text form fields.
pub struct UploadForm {
    file: Option<Vec<u8>>,
    fields: HashMap<String, String>,
}

impl UploadForm {
    pub fn file(&self) -> Result<&[u8], AppError> {
        self.file
            .as_deref()
            .ok_or_else(|| AppError::BadRequest("Missing file".to_string()))
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// Reads the whole multipart body into memory. The file content is never
/// parsed; text parts are decoded lossily.
pub async fn read_form(req: &HttpRequest, payload: web::Payload) -> Result<UploadForm, AppError> {
    let mut multipart = Multipart::new(req.headers(), payload);
    let mut form = UploadForm {
        file: None,
        fields: HashMap::new(),
    };

    while let Some(item) = multipart.next().await {
        let mut field = item.map_err(|err| {
            error!("Invalid multipart field: {:?}", err);
            AppError::BadRequest("Invalid multipart field".to_string())
        })?;

        let name = field.name().to_string();
        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|err| {
                error!("Failed to read chunk: {:?}", err);
                AppError::BadRequest("Failed to read chunk".to_string())
            })?;
            data.extend_from_slice(&chunk);
        }

        if name == "file" {
            form.file = Some(data);
        } else {
            form.fields
                .insert(name, String::from_utf8_lossy(&data).into_owned());
        }
    }

    Ok(form)
}

pub fn uploads_dir() -> PathBuf {
    PathBuf::from(env::var("UPLOADS_DIR").unwrap_or_else(|_| "uploads".to_string()))
}

/// Writes the upload under `dir` and returns the public URL path. A write
/// failure aborts the request; nothing is retried.
pub async fn save_upload(dir: &Path, file_name: &str, data: &[u8]) -> Result<String, AppError> {
    tokio::fs::create_dir_all(dir).await.map_err(|err| {
        error!("Failed to create uploads dir {:?}: {}", dir, err);
        AppError::InternalServerError("Failed to save file".to_string())
    })?;

    let dest = dir.join(file_name);
    tokio::fs::write(&dest, data).await.map_err(|err| {
        error!("Failed to save file {:?}: {}", dest, err);
        AppError::InternalServerError("Failed to save file".to_string())
    })?;

    info!("Stored upload {:?} ({} bytes)", dest, data.len());
    Ok(format!("/uploads/{}", file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn save_upload_writes_file_and_returns_url() {
        let dir = tempfile::tempdir().unwrap();
        let url = save_upload(dir.path(), "avatar_1_test.png", b"pngbytes")
            .await
            .unwrap();
        assert_eq!(url, "/uploads/avatar_1_test.png");
        let stored = std::fs::read(dir.path().join("avatar_1_test.png")).unwrap();
        assert_eq!(stored, b"pngbytes");
    }

    #[actix_web::test]
    async fn save_upload_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let url = save_upload(&nested, "workout_9_test.upload", b"raw")
            .await
            .unwrap();
        assert_eq!(url, "/uploads/workout_9_test.upload");
        assert!(nested.join("workout_9_test.upload").exists());
    }

    #[actix_web::test]
    async fn unwritable_target_surfaces_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the directory should be makes create_dir_all fail.
        let blocker = dir.path().join("uploads");
        std::fs::write(&blocker, b"not a dir").unwrap();
        let err = save_upload(&blocker, "x.upload", b"raw").await.unwrap_err();
        assert!(matches!(err, AppError::InternalServerError(_)));
    }

    #[test]
    fn missing_file_part_is_a_bad_request() {
        let form = UploadForm {
            file: None,
            fields: HashMap::new(),
        };
        assert!(matches!(form.file(), Err(AppError::BadRequest(_))));
    }
}
