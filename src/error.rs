use thiserror::Error;

#[derive(Error, Debug)]
pub enum MenuError {
    #[error("Failed to fetch menu document: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("Failed to extract text from PDF: {0}")]
    Extract(#[from] pdf_extract::OutputError),

    #[error("Text extraction task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Could not extract date from PDF")]
    DateNotFound,

    #[error("No menu items found in PDF")]
    NoDishesFound,

    #[error("Configuration error: {message}")]
    Config { message: String },
}

pub type Result<T> = std::result::Result<T, MenuError>;
