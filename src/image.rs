use crate::errors::{TimeWeaverError, TimeWeaverResult};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use std::path::Path;

/// A self-contained inline image: `data:<mime>;base64,<payload>`.
///
/// This is the only image representation in the app. It is built once from a
/// user-chosen file (or from gateway response bytes) and never mutated; slots
/// drop it wholesale on clear or replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage(String);

impl EncodedImage {
    pub fn from_parts(mime_type: &str, bytes: &[u8]) -> Self {
        EncodedImage(format!("data:{};base64,{}", mime_type, BASE64.encode(bytes)))
    }

    pub fn from_data_uri(uri: impl Into<String>) -> TimeWeaverResult<Self> {
        let uri = uri.into();
        if !uri.starts_with("data:") || !uri.contains(";base64,") {
            return Err(TimeWeaverError::image_error(
                "Not a base64 data URI".to_string(),
            ));
        }
        Ok(EncodedImage(uri))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn mime_type(&self) -> &str {
        let start = "data:".len();
        let end = self.0.find(";base64,").unwrap_or(start);
        &self.0[start..end]
    }

    /// The raw base64 payload, as the gateway's `inlineData` parts carry it.
    pub fn base64_data(&self) -> &str {
        match self.0.find(";base64,") {
            Some(idx) => &self.0[idx + ";base64,".len()..],
            None => "",
        }
    }

    /// Decoded size in bytes, computed without decoding.
    pub fn byte_len(&self) -> usize {
        let payload = self.base64_data();
        let padding = payload.bytes().rev().take_while(|b| *b == b'=').count();
        payload.len() / 4 * 3 - padding
    }

    /// Decodes the inline payload back into raw image bytes.
    pub fn decode_bytes(&self) -> TimeWeaverResult<Vec<u8>> {
        BASE64.decode(self.base64_data().as_bytes()).map_err(|e| {
            TimeWeaverError::image_error(format!("Failed to decode image payload: {}", e))
        })
    }

    /// File extension matching the MIME type, for save-to-disk.
    pub fn extension(&self) -> &'static str {
        match self.mime_type() {
            "image/jpeg" => "jpg",
            "image/webp" => "webp",
            _ => "png",
        }
    }
}

/// Reads a local image file and encodes it as a data URI.
///
/// The file picker hint is PNG/JPEG but nothing is enforced: MIME is sniffed
/// from magic bytes, then the extension, then defaults to PNG.
pub async fn encode_image_file(path: &Path) -> TimeWeaverResult<EncodedImage> {
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        TimeWeaverError::image_error(format!("Failed to read {}: {}", path.display(), e))
    })?;

    if bytes.is_empty() {
        return Err(TimeWeaverError::image_error(format!(
            "{} is empty",
            path.display()
        )));
    }

    Ok(EncodedImage::from_parts(sniff_mime_type(&bytes, path), &bytes))
}

fn sniff_mime_type(bytes: &[u8], path: &Path) -> &'static str {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
        return "image/png";
    }
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return "image/jpeg";
    }

    let extension = path
        .extension()
        .and_then(std::ffi::OsStr::to_str)
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "image/png",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_from_parts_exposes_mime_and_bytes() {
        let image = EncodedImage::from_parts("image/png", &PNG_MAGIC);
        assert_eq!(image.mime_type(), "image/png");
        assert_eq!(image.byte_len(), PNG_MAGIC.len());
        assert_eq!(image.decode_bytes().unwrap(), PNG_MAGIC.to_vec());
        assert!(image.as_str().starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_from_data_uri_rejects_plain_strings() {
        assert!(EncodedImage::from_data_uri("not an image").is_err());
        assert!(EncodedImage::from_data_uri("data:image/png,rawtext").is_err());
    }

    #[test]
    fn test_extension_follows_mime() {
        assert_eq!(EncodedImage::from_parts("image/jpeg", b"x").extension(), "jpg");
        assert_eq!(EncodedImage::from_parts("image/png", b"x").extension(), "png");
    }

    #[tokio::test]
    async fn test_encode_image_file_sniffs_png() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&PNG_MAGIC).unwrap();

        let image = encode_image_file(file.path()).await.unwrap();
        assert_eq!(image.mime_type(), "image/png");
        assert_eq!(image.decode_bytes().unwrap(), PNG_MAGIC.to_vec());
    }

    #[tokio::test]
    async fn test_encode_image_file_falls_back_to_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.jpg");
        std::fs::write(&path, b"not really a jpeg").unwrap();

        let image = encode_image_file(&path).await.unwrap();
        assert_eq!(image.mime_type(), "image/jpeg");
    }

    #[tokio::test]
    async fn test_encode_image_file_missing_path_errors() {
        let result = encode_image_file(Path::new("/no/such/photo.png")).await;
        assert!(result.is_err());
    }
}
