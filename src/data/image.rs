use crate::error::{DashboardResult, NotAnImageSnafu};
use base64::{Engine, prelude::BASE64_STANDARD};
use serde::{Deserialize, de::IgnoredAny};
use std::borrow::Cow;

pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

///turns raw bytes into something an `img` tag can display directly
pub fn data_uri(content_type: &str, bytes: &[u8]) -> String {
    format!("data:{content_type};base64,{}", BASE64_STANDARD.encode(bytes))
}

///only returns something if the bytes are recognisably an image
pub fn sniff_image_type(bytes: &[u8]) -> Option<&'static str> {
    infer::get(bytes)
        .filter(|kind| kind.matcher_type() == infer::MatcherType::Image)
        .map(|kind| kind.mime_type())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Option<WireProfileImage>")]
pub enum ProfileImage {
    #[default]
    Absent,
    Embedded {
        content_type: String,
        bytes: Vec<u8>,
    },
    Uri(String),
}

impl ProfileImage {
    pub fn display_src<'a>(&'a self, placeholder: &'a str) -> Cow<'a, str> {
        match self {
            Self::Absent => Cow::Borrowed(placeholder),
            Self::Uri(uri) => Cow::Borrowed(uri),
            Self::Embedded {
                content_type,
                bytes,
            } => Cow::Owned(data_uri(content_type, bytes)),
        }
    }

    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireProfileImage {
    Uri(String),
    Embedded {
        data: WireBuffer,
        #[serde(rename = "contentType", default)]
        content_type: Option<String>,
    },
    Unrecognised(IgnoredAny),
}

///node's `Buffer` serialises as `{"type": "Buffer", "data": [...]}`, but some routes flatten it
#[derive(Deserialize)]
#[serde(untagged)]
enum WireBuffer {
    Node { data: Vec<u8> },
    Flat(Vec<u8>),
}

impl From<Option<WireProfileImage>> for ProfileImage {
    fn from(value: Option<WireProfileImage>) -> Self {
        match value {
            None | Some(WireProfileImage::Unrecognised(_)) => Self::Absent,
            Some(WireProfileImage::Uri(uri)) => {
                if uri.trim().is_empty() {
                    Self::Absent
                } else {
                    Self::Uri(uri)
                }
            }
            Some(WireProfileImage::Embedded { data, content_type }) => {
                let bytes = match data {
                    WireBuffer::Node { data } | WireBuffer::Flat(data) => data,
                };
                if bytes.is_empty() {
                    return Self::Absent;
                }

                let content_type = content_type
                    .filter(|ct| !ct.trim().is_empty())
                    .or_else(|| sniff_image_type(&bytes).map(ToString::to_string))
                    .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string());

                Self::Embedded {
                    content_type,
                    bytes,
                }
            }
        }
    }
}

///a file picked in the student form, waiting to be sent along with the draft
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl ImageUpload {
    ///browsers send an empty part when no file was chosen, so that's `Ok(None)` rather than an error
    pub fn from_part(
        file_name: Option<String>,
        declared_content_type: Option<String>,
        bytes: Vec<u8>,
    ) -> DashboardResult<Option<Self>> {
        let file_name = file_name.unwrap_or_default();
        if bytes.is_empty() || file_name.trim().is_empty() {
            return Ok(None);
        }

        let content_type = match sniff_image_type(&bytes) {
            Some(sniffed) => sniffed.to_string(),
            None => match declared_content_type {
                Some(declared) if declared.starts_with("image/") => declared,
                _ => return NotAnImageSnafu { file_name }.fail(),
            },
        };

        Ok(Some(Self {
            file_name,
            content_type,
            bytes,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashboardError;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn data_uri_is_base64_with_content_type() {
        assert_eq!(
            data_uri("image/png", &[0x89, b'P', b'N', b'G']),
            "data:image/png;base64,iVBORw=="
        );
        assert_eq!(data_uri("image/gif", &[]), "data:image/gif;base64,");
    }

    #[test]
    fn absent_image_uses_placeholder() {
        let placeholder = "https://example.org/placeholder.jpeg";
        assert_eq!(ProfileImage::Absent.display_src(placeholder), placeholder);

        let uri = ProfileImage::Uri("https://example.org/ann.png".into());
        assert_eq!(uri.display_src(placeholder), "https://example.org/ann.png");
    }

    #[test]
    fn node_buffer_decodes_to_embedded_image() {
        let image: ProfileImage = serde_json::from_str(
            r#"{"data": {"type": "Buffer", "data": [1, 2, 3]}, "contentType": "image/jpeg"}"#,
        )
        .unwrap();

        assert_eq!(
            image,
            ProfileImage::Embedded {
                content_type: "image/jpeg".into(),
                bytes: vec![1, 2, 3]
            }
        );
        assert_eq!(
            image.display_src("unused"),
            "data:image/jpeg;base64,AQID"
        );
    }

    #[test]
    fn missing_content_type_is_sniffed() {
        let json = format!(r#"{{"data": {:?}}}"#, PNG_MAGIC.to_vec());
        let image: ProfileImage = serde_json::from_str(&json).unwrap();

        assert_eq!(
            image,
            ProfileImage::Embedded {
                content_type: "image/png".into(),
                bytes: PNG_MAGIC.to_vec()
            }
        );

        let unknown: ProfileImage = serde_json::from_str(r#"{"data": [1, 2, 3]}"#).unwrap();
        assert!(matches!(
            unknown,
            ProfileImage::Embedded { ref content_type, .. } if content_type == FALLBACK_CONTENT_TYPE
        ));
    }

    #[test]
    fn empty_and_odd_shapes_are_absent() {
        for json in ["null", r#""""#, r#"{"data": []}"#, "42", r#"{"something": "else"}"#] {
            let image: ProfileImage = serde_json::from_str(json).unwrap();
            assert!(image.is_absent(), "{json} should be absent");
        }
    }

    #[test]
    fn upload_without_a_file_is_none() {
        assert_eq!(
            ImageUpload::from_part(Some(String::new()), None, vec![]).unwrap(),
            None
        );
        assert_eq!(
            ImageUpload::from_part(Some("a.png".into()), Some("image/png".into()), vec![]).unwrap(),
            None
        );
    }

    #[test]
    fn upload_content_type_prefers_sniffing() {
        let upload = ImageUpload::from_part(
            Some("ann.png".into()),
            Some("application/octet-stream".into()),
            PNG_MAGIC.to_vec(),
        )
        .unwrap()
        .unwrap();
        assert_eq!(upload.content_type, "image/png");

        let declared = ImageUpload::from_part(
            Some("ann.heic".into()),
            Some("image/heic".into()),
            b"not really sniffable".to_vec(),
        )
        .unwrap()
        .unwrap();
        assert_eq!(declared.content_type, "image/heic");
    }

    #[test]
    fn non_images_are_refused() {
        let err = ImageUpload::from_part(
            Some("notes.txt".into()),
            Some("text/plain".into()),
            b"hello".to_vec(),
        )
        .unwrap_err();
        assert!(matches!(err, DashboardError::NotAnImage { ref file_name } if file_name == "notes.txt"));
    }
}
