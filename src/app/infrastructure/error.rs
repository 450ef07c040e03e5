use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Profile parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Editor adapter has been disposed")]
    AdapterDisposed,

    #[error("Editor library failed to load: {0}")]
    WidgetLoad(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Preferences error: {0}")]
    Preferences(String),
}

/// Convenience type alias for Results with AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
        assert!(app_err.to_string().contains("file not found"));
    }

    #[test]
    fn test_toml_error_conversion() {
        let parse_err = toml::from_str::<toml::Value>("id = ").unwrap_err();
        let app_err: AppError = parse_err.into();
        assert!(matches!(app_err, AppError::Toml(_)));
    }

    #[test]
    fn test_error_display() {
        let err = AppError::WidgetLoad("script timed out".to_string());
        assert_eq!(err.to_string(), "Editor library failed to load: script timed out");

        let err = AppError::Backend("detector offline".to_string());
        assert_eq!(err.to_string(), "Backend error: detector offline");

        assert_eq!(
            AppError::AdapterDisposed.to_string(),
            "Editor adapter has been disposed"
        );
    }
}
