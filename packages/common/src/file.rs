//! File upload reading.
//!
//! The image mutators need "read this upload into something an `<img>`
//! can embed". [`FileReader`] is that capability; [`DataUrlReader`] is
//! the production implementation producing base64 data URLs, which is
//! exactly what `FileReader.readAsDataURL` hands a browser page.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::CommonError;

/// A file chosen through the admin panel's file input
#[derive(Debug, Clone, PartialEq)]
pub struct FileUpload {
    /// Original file name
    pub name: String,

    /// MIME type, e.g. `image/png`
    pub mime: String,

    /// Raw file bytes
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes,
        }
    }
}

/// Capability for turning an upload into an embeddable image source
pub trait FileReader {
    fn read_data_url(&self, file: &FileUpload) -> Result<String, CommonError>;
}

/// Standard base64 data-URL encoder
#[derive(Debug, Default)]
pub struct DataUrlReader;

impl FileReader for DataUrlReader {
    fn read_data_url(&self, file: &FileUpload) -> Result<String, CommonError> {
        let encoded = STANDARD.encode(&file.bytes);
        Ok(format!("data:{};base64,{}", file.mime, encoded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_url_format() {
        let file = FileUpload::new("logo.png", "image/png", vec![1, 2, 3]);
        let url = DataUrlReader.read_data_url(&file).unwrap();

        assert!(url.starts_with("data:image/png;base64,"));
        assert_eq!(url, "data:image/png;base64,AQID");
    }
}
