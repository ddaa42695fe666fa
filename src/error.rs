//! Error types for the hsv_census library

use thiserror::Error;

/// Result type alias for hsv_census operations
pub type Result<T> = std::result::Result<T, ColorError>;

/// Error types for color conversion, histogram and image operations
#[derive(Error, Debug)]
pub enum ColorError {
    /// An argument was outside its valid domain
    #[error("Invalid argument `{parameter}`: {reason}")]
    InvalidArgument { parameter: String, reason: String },

    /// A color string could not be parsed
    #[error("Invalid color format {input:?}: {reason}")]
    Format { input: String, reason: String },

    /// Image file could not be loaded or decoded
    #[error("Failed to load image: {message}")]
    ImageLoad {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration could not be read, parsed or written
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl ColorError {
    /// Create an invalid argument error
    pub fn invalid_argument(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Create a format error carrying the offending input
    pub fn format(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Format {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Create an image load error with context
    pub fn image_load<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ImageLoad {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a configuration error with context
    pub fn config<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Check if the caller can fix this error by correcting its input
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ColorError::InvalidArgument { .. } | ColorError::Format { .. }
        )
    }

    /// Get user-friendly error description for application display
    pub fn user_message(&self) -> String {
        match self {
            ColorError::InvalidArgument { parameter, reason } => {
                format!("The value given for {} is not valid: {}.", parameter, reason)
            }
            ColorError::Format { input, .. } => {
                format!(
                    "'{}' is not a color. Use #RRGGBB, #AARRGGBB, RR-GG-BB or AA-RR-GG-BB.",
                    input
                )
            }
            ColorError::ImageLoad { .. } => {
                "Could not load the image. Please check the file format and try again.".to_string()
            }
            ColorError::Config { .. } => {
                "Could not use the configuration file. Please check that it is valid JSON.".to_string()
            }
        }
    }
}
