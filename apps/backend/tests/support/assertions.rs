use hackathon_backend::{AppError, ErrorCode};

/// Assert that `result` failed with `code`, with a readable message otherwise.
#[track_caller]
pub fn assert_code<T: std::fmt::Debug>(result: Result<T, AppError>, code: ErrorCode) -> AppError {
    match result {
        Ok(value) => panic!("expected {code}, got Ok({value:?})"),
        Err(err) => {
            assert_eq!(err.code(), code, "unexpected error: {err}");
            err
        }
    }
}
