use crate::error::HttpClientError;

pub fn exit_code_for_error(err: &HttpClientError) -> i32 {
    match err {
        HttpClientError::InvalidUrl(_) => 3,
        HttpClientError::Config(_) | HttpClientError::InvalidMethod(_) => 2,
        HttpClientError::Timeout => 28,
        HttpClientError::PermissionDenied(_) | HttpClientError::FileNotFound(_) => 37,
        HttpClientError::Io(_) => 23,
        HttpClientError::Http(err) => http_exit_code(err),
    }
}

fn http_exit_code(err: &reqwest::Error) -> i32 {
    if err.is_timeout() {
        return 28;
    }
    if err.is_connect() {
        return 7;
    }
    if err.is_builder() || err.is_request() {
        return 2;
    }
    56
}

#[cfg(test)]
mod tests {
    use super::exit_code_for_error;
    use crate::error::HttpClientError;

    #[test]
    fn exit_code_maps_invalid_url() {
        let err = HttpClientError::InvalidUrl("bad".to_string());
        assert_eq!(exit_code_for_error(&err), 3);
    }

    #[test]
    fn exit_code_maps_timeout() {
        assert_eq!(exit_code_for_error(&HttpClientError::Timeout), 28);
    }

    #[test]
    fn exit_code_maps_unreadable_upload() {
        let err = HttpClientError::FileNotFound("missing.bin".to_string());
        assert_eq!(exit_code_for_error(&err), 37);
        let err = HttpClientError::InvalidMethod("BAD METHOD".to_string());
        assert_eq!(exit_code_for_error(&err), 2);
    }
}
