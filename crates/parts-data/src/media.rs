//! Image uploads to the storage buckets.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::client::RowApi;
use crate::error::DataError;

/// Largest accepted upload.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Public storage buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaBucket {
    Products,
    HeroImages,
}

impl MediaBucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaBucket::Products => "products",
            MediaBucket::HeroImages => "hero-images",
        }
    }
}

impl FromStr for MediaBucket {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "products" | "product" => Ok(MediaBucket::Products),
            "hero-images" | "hero" => Ok(MediaBucket::HeroImages),
            _ => Err(DataError::InvalidUpload(format!("unknown bucket {}", s))),
        }
    }
}

impl fmt::Display for MediaBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone)]
pub struct MediaService {
    api: Arc<dyn RowApi>,
}

impl MediaService {
    pub fn new(api: Arc<dyn RowApi>) -> Self {
        Self { api }
    }

    /// Upload an image and return its public URL.
    ///
    /// The stored name is prefixed with the upload time so re-uploading a
    /// file with the same name never overwrites the earlier one.
    pub async fn upload_image(
        &self,
        bucket: MediaBucket,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<String, DataError> {
        let content_type = image_content_type(file_name).ok_or_else(|| {
            DataError::InvalidUpload(format!("{} is not a supported image type", file_name))
        })?;
        if bytes.is_empty() {
            return Err(DataError::InvalidUpload(format!("{} is empty", file_name)));
        }
        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(DataError::InvalidUpload(format!(
                "{} is {} bytes, the limit is {}",
                file_name,
                bytes.len(),
                MAX_UPLOAD_BYTES
            )));
        }

        let path = object_path(chrono::Utc::now().timestamp_millis(), file_name);
        match self
            .api
            .upload(bucket.as_str(), &path, bytes, content_type)
            .await
        {
            Ok(url) => {
                tracing::info!(bucket = %bucket, path = %path, "Image uploaded");
                Ok(url)
            }
            Err(e) => {
                tracing::error!(bucket = %bucket, path = %path, error = %e, "Image upload failed");
                Err(e)
            }
        }
    }
}

/// `{millis}-{name}`, with the name reduced to `[a-z0-9._-]`.
fn object_path(millis: i64, file_name: &str) -> String {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name);
    let cleaned: String = base
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '.' | '-' | '_' => c,
            'A'..='Z' => c.to_ascii_lowercase(),
            _ => '-',
        })
        .collect();
    format!("{}-{}", millis, cleaned.trim_matches('-'))
}

fn image_content_type(file_name: &str) -> Option<&'static str> {
    let extension = file_name.rsplit_once('.')?.1.to_lowercase();
    match extension.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockRowApi;

    #[test]
    fn test_object_path_is_sanitized() {
        assert_eq!(
            object_path(1_700_000_000_000, "photos/Front Bumper (v2).JPG"),
            "1700000000000-front-bumper--v2-.jpg"
        );
    }

    #[test]
    fn test_content_type_by_extension() {
        assert_eq!(image_content_type("a.JPEG"), Some("image/jpeg"));
        assert_eq!(image_content_type("banner.webp"), Some("image/webp"));
        assert_eq!(image_content_type("invoice.pdf"), None);
        assert_eq!(image_content_type("README"), None);
    }

    #[test]
    fn test_bucket_names() {
        assert_eq!(MediaBucket::HeroImages.as_str(), "hero-images");
        assert_eq!("hero".parse::<MediaBucket>().unwrap(), MediaBucket::HeroImages);
        assert!(matches!(
            "avatars".parse::<MediaBucket>(),
            Err(DataError::InvalidUpload(_))
        ));
    }

    #[tokio::test]
    async fn test_upload_returns_public_url() {
        let mut api = MockRowApi::new();
        api.expect_upload()
            .withf(|bucket, path, bytes, content_type| {
                bucket == "products" && path.ends_with("-oil-filter.png") && bytes.len() == 3 && content_type == "image/png"
            })
            .times(1)
            .returning(|bucket, path, _, _| Ok(format!("https://cdn.example.ph/{}/{}", bucket, path)));

        let url = MediaService::new(Arc::new(api))
            .upload_image(MediaBucket::Products, "Oil Filter.png", vec![1, 2, 3])
            .await
            .unwrap();
        assert!(url.starts_with("https://cdn.example.ph/products/"));
    }

    #[tokio::test]
    async fn test_non_images_are_rejected_before_upload() {
        let mut api = MockRowApi::new();
        api.expect_upload().never();
        let service = MediaService::new(Arc::new(api));

        let err = service
            .upload_image(MediaBucket::Products, "catalog.pdf", vec![1])
            .await
            .unwrap_err();
        assert!(matches!(err, DataError::InvalidUpload(_)));

        let err = service
            .upload_image(MediaBucket::Products, "empty.png", Vec::new())
            .await
            .unwrap_err();
        assert!(matches!(err, DataError::InvalidUpload(_)));
    }
}
