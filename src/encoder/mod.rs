//! Turns raw image files into transportable inline attachments.
//!
//! Files whose declared type is not `image/*` are filtered out, not
//! errored. A file that cannot be read is dropped from the batch and
//! reported alongside the successes, so one bad file never sinks its
//! siblings.

use std::path::{Path, PathBuf};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use futures_util::future::join_all;

use crate::models::ImageAttachment;

/// A file that was part of the batch but could not be encoded
#[derive(Debug)]
pub struct EncodeFailure {
    pub path: PathBuf,
    pub error: std::io::Error,
}

/// Result of encoding a batch: attachments in original input order plus
/// the files that were dropped
#[derive(Debug, Default)]
pub struct EncodedBatch {
    pub attachments: Vec<ImageAttachment>,
    pub failures: Vec<EncodeFailure>,
}

/// Encode a batch of files concurrently, collecting results in input order
pub async fn encode_batch(paths: &[PathBuf]) -> EncodedBatch {
    let results = join_all(paths.iter().map(|path| encode_one(path))).await;

    let mut batch = EncodedBatch::default();
    for outcome in results.into_iter().flatten() {
        match outcome {
            Ok(attachment) => batch.attachments.push(attachment),
            Err(failure) => batch.failures.push(failure),
        }
    }
    batch
}

/// `None` means the file was filtered (not declared as an image)
async fn encode_one(path: &Path) -> Option<Result<ImageAttachment, EncodeFailure>> {
    let mime = mime_guess::from_path(path).first()?;
    if mime.type_() != mime_guess::mime::IMAGE {
        return None;
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    match tokio::fs::read(path).await {
        Ok(bytes) => Some(Ok(ImageAttachment {
            name,
            mime_type: mime.essence_str().to_string(),
            data: BASE64.encode(&bytes),
        })),
        Err(error) => Some(Err(EncodeFailure {
            path: path.to_path_buf(),
            error,
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_file(name: &str, contents: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(format!("recipe-studio-{}-{name}", std::process::id()));
        std::fs::write(&path, contents).expect("write scratch file");
        path
    }

    #[tokio::test]
    async fn filters_files_that_are_not_images() {
        let text = scratch_file("notes.txt", b"not an image");
        let image = scratch_file("dish.png", b"\x89PNG fake");

        let batch = encode_batch(&[text.clone(), image.clone()]).await;

        assert_eq!(batch.attachments.len(), 1);
        assert_eq!(batch.attachments[0].mime_type, "image/png");
        assert!(batch.failures.is_empty());

        std::fs::remove_file(text).ok();
        std::fs::remove_file(image).ok();
    }

    #[tokio::test]
    async fn unreadable_file_does_not_sink_siblings() {
        let missing = std::env::temp_dir().join("recipe-studio-definitely-missing.jpg");
        let image = scratch_file("soup.jpg", b"jpeg bytes");

        let batch = encode_batch(&[missing.clone(), image.clone()]).await;

        assert_eq!(batch.attachments.len(), 1);
        assert_eq!(batch.failures.len(), 1);
        assert_eq!(batch.failures[0].path, missing);

        std::fs::remove_file(image).ok();
    }

    #[tokio::test]
    async fn payload_is_plain_base64_without_data_uri_prefix() {
        let contents = b"pretend this is a photo";
        let image = scratch_file("plate.png", contents);

        let batch = encode_batch(&[image.clone()]).await;

        let attachment = &batch.attachments[0];
        assert_eq!(attachment.data, BASE64.encode(contents));
        assert!(!attachment.data.starts_with("data:"));
        assert!(attachment.name.ends_with("plate.png"));

        std::fs::remove_file(image).ok();
    }

    #[tokio::test]
    async fn attachments_keep_input_order() {
        let first = scratch_file("a-first.png", b"first");
        let second = scratch_file("b-second.jpg", b"second");

        let batch = encode_batch(&[first.clone(), second.clone()]).await;

        assert_eq!(batch.attachments.len(), 2);
        assert!(batch.attachments[0].name.ends_with("a-first.png"));
        assert!(batch.attachments[1].name.ends_with("b-second.jpg"));

        std::fs::remove_file(first).ok();
        std::fs::remove_file(second).ok();
    }
}
