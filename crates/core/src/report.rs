//! Summary of a finished render.

use std::path::PathBuf;

use serde::Serialize;

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderReport {
    /// EGL version negotiated by `eglInitialize`, as `(major, minor)`.
    pub egl_version: (i32, i32),
    pub width: u32,
    pub height: u32,
    pub output: PathBuf,
    /// Size of the written bitmap, headers included.
    pub bytes_written: u64,
}

impl RenderReport {
    /// The EGL version formatted as `major.minor`.
    pub fn egl_version_string(&self) -> String {
        format!("{}.{}", self.egl_version.0, self.egl_version.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RenderReport {
        RenderReport {
            egl_version: (1, 5),
            width: 640,
            height: 480,
            output: PathBuf::from("triangle.bmp"),
            bytes_written: 1_229_854,
        }
    }

    #[test]
    fn version_string_is_major_dot_minor() {
        assert_eq!(sample().egl_version_string(), "1.5");
    }

    #[test]
    fn serializes_all_fields() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["egl_version"], serde_json::json!([1, 5]));
        assert_eq!(json["width"], 640);
        assert_eq!(json["height"], 480);
        assert_eq!(json["output"], "triangle.bmp");
        assert_eq!(json["bytes_written"], 1_229_854);
    }
}
