use axum::body::Body;
use axum::extract::Request;
use axum::http::header::CONTENT_TYPE;

const BOUNDARY: &str = "toolkit-test-boundary";

/// A `multipart/form-data` request assembled part by part, for calling the
/// upload functions without going through the router.
#[derive(Default)]
pub struct FormRequest {
    body: Vec<u8>,
}

impl FormRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(mut self, field: &str, file_name: &str, contents: &[u8]) -> Self {
        self.head(field);
        self.body
            .extend_from_slice(format!("; filename=\"{}\"\r\n\r\n", file_name).as_bytes());
        self.body.extend_from_slice(contents);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn value(mut self, field: &str, value: &str) -> Self {
        self.head(field);
        self.body.extend_from_slice(b"\r\n\r\n");
        self.body.extend_from_slice(value.as_bytes());
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn build(mut self) -> Request {
        self.body
            .extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

        Request::builder()
            .method("POST")
            .uri("/upload")
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(self.body))
            .unwrap()
    }

    fn head(&mut self, field: &str) {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"",
                BOUNDARY, field
            )
            .as_bytes(),
        );
    }
}
