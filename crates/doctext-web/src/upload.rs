use axum::extract::Multipart;

use doctext_core::UploadedFile;

/// Name of the multipart field carrying the document.
pub const FILE_FIELD: &str = "file";

/// Parse a multipart form upload into the uploaded file.
///
/// Unknown fields are drained and ignored. A `file` part without a filename
/// is rejected, since the extension decides how the file is read.
pub async fn parse_multipart(mut multipart: Multipart) -> Result<UploadedFile, String> {
    let mut file: Option<UploadedFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("Failed to read form field: {}", e))?
    {
        let name = field.name().unwrap_or("").to_string();

        if name == FILE_FIELD {
            let filename = field
                .file_name()
                .filter(|f| !f.is_empty())
                .ok_or("Uploaded file has no filename")?
                .to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| format!("Failed to read file data: {}", e))?
                .to_vec();

            file = Some(UploadedFile { filename, data });
        } else {
            let _ = field.bytes().await;
        }
    }

    file.ok_or_else(|| "No file uploaded".to_string())
}
