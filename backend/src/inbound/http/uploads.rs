//! Multipart plumbing shared by the upload endpoints.
//!
//! Each upload endpoint accepts exactly one file bound to a named field.
//! Reading is capped at the policy limit for the target kind so an
//! oversized body is rejected while streaming, not after buffering.

use actix_multipart::Multipart;
use futures_util::TryStreamExt;

use crate::domain::Error;

/// A fully read multipart file part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Client-supplied filename; only its extension is ever used.
    pub filename: String,
    /// Declared MIME type, `application/octet-stream` when absent.
    pub mime: String,
    pub bytes: Vec<u8>,
}

fn map_multipart_error(err: actix_multipart::MultipartError) -> Error {
    Error::invalid_request(format!("malformed multipart payload: {err}"))
}

/// Read the single file bound to `field_name`, enforcing `max_bytes`
/// while streaming.
///
/// Fields with other names are skipped. A payload without the expected
/// file part is `BadRequest`.
pub async fn read_single_file(
    mut payload: Multipart,
    field_name: &str,
    max_bytes: u64,
) -> Result<UploadedFile, Error> {
    while let Some(mut field) = payload.try_next().await.map_err(map_multipart_error)? {
        if field.name() != Some(field_name) {
            // A field must be drained before the next one can be read.
            while let Some(_chunk) = field.try_next().await.map_err(map_multipart_error)? {}
            continue;
        }

        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_owned)
            .ok_or_else(|| Error::invalid_request("uploaded file must have a filename"))?;
        let mime = field
            .content_type()
            .map(|m| m.essence_str().to_owned())
            .unwrap_or_else(|| "application/octet-stream".to_owned());

        let mut bytes: Vec<u8> = Vec::new();
        while let Some(chunk) = field.try_next().await.map_err(map_multipart_error)? {
            if (bytes.len() + chunk.len()) as u64 > max_bytes {
                return Err(Error::payload_too_large(format!(
                    "file exceeds the {max_bytes} byte limit"
                )));
            }
            bytes.extend_from_slice(&chunk);
        }

        return Ok(UploadedFile {
            filename,
            mime,
            bytes,
        });
    }

    Err(Error::invalid_request("no file uploaded"))
}

#[cfg(test)]
pub(crate) mod test_multipart {
    //! Builders for hand-rolled multipart bodies in handler tests.

    /// Assemble a single-file multipart body with the given boundary.
    pub fn file_body(
        boundary: &str,
        field_name: &str,
        filename: &str,
        mime: &str,
        bytes: &[u8],
    ) -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{field_name}\"; \
                 filename=\"{filename}\"\r\nContent-Type: {mime}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
        body
    }

    /// `content-type` header value for [`file_body`].
    pub fn content_type(boundary: &str) -> String {
        format!("multipart/form-data; boundary={boundary}")
    }
}
