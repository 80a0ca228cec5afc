use axum::http::StatusCode;
use std::fmt;

/// Failure anywhere on the fetch → snapshot → dataset path.
#[derive(Debug)]
pub enum DataError {
    MissingColumns(Vec<String>),
    BadDate { row: usize, value: String },
    EmptyStore,
    Csv(csv::Error),
    Io(std::io::Error),
    Http(reqwest::Error),
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingColumns(cols) => {
                write!(f, "dataset is missing required columns: {}", cols.join(", "))
            }
            Self::BadDate { row, value } => {
                write!(f, "row {row} has unparseable report date {value:?}")
            }
            Self::EmptyStore => write!(f, "no snapshots in the data directory"),
            Self::Csv(err) => write!(f, "csv error: {err}"),
            Self::Io(err) => write!(f, "io error: {err}"),
            Self::Http(err) => write!(f, "http error: {err}"),
        }
    }
}

impl std::error::Error for DataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Csv(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Http(err) => Some(err),
            _ => None,
        }
    }
}

impl From<csv::Error> for DataError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<std::io::Error> for DataError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<reqwest::Error> for DataError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err)
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<DataError> for AppError {
    fn from(err: DataError) -> Self {
        // An empty store means the startup fetch never succeeded; nothing to serve yet.
        match err {
            DataError::EmptyStore => Self {
                status: StatusCode::SERVICE_UNAVAILABLE,
                message: err.to_string(),
            },
            other => Self::internal(other),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
