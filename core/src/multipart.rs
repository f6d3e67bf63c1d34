//! `multipart/form-data` body encoding for `-F` uploads.

use std::io::Read;

use uuid::Uuid;

use crate::http::FormPart;

/// An encoded multipart body and the `Content-Type` that announces it.
#[derive(Debug)]
pub struct MultipartBody {
    pub content_type: String,
    pub body: Vec<u8>,
}

/// Encode `parts` with a fresh random boundary.
///
/// Takes ownership of the parts so every upload file is closed once its
/// contents have been copied, or as soon as a read fails.
pub fn encode(parts: Vec<(String, FormPart)>) -> std::io::Result<MultipartBody> {
    encode_with_boundary(parts, &format!("------------------------{}", Uuid::new_v4().simple()))
}

fn encode_with_boundary(
    parts: Vec<(String, FormPart)>,
    boundary: &str,
) -> std::io::Result<MultipartBody> {
    let mut body = Vec::new();
    for (name, part) in parts {
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        match part {
            FormPart::Text(value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", escape(&name))
                        .as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            FormPart::File { path, mut file } => {
                let filename = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n",
                        escape(&name),
                        escape(&filename)
                    )
                    .as_bytes(),
                );
                file.read_to_end(&mut body)?;
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());

    Ok(MultipartBody {
        content_type: format!("multipart/form-data; boundary={boundary}"),
        body,
    })
}

fn escape(value: &str) -> String {
    value.replace('"', "%22").replace('\r', "%0D").replace('\n', "%0A")
}
