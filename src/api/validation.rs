use super::ApiError;

pub fn validate_session_id(id: i32) -> Result<i32, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid session ID: {}. ID must be a positive integer",
            id
        )));
    }
    Ok(id)
}

pub fn validate_result_id(id: i32) -> Result<i32, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid result ID: {}. ID must be a positive integer",
            id
        )));
    }
    Ok(id)
}
