mod app_error;
mod database_converter;
mod repository_error;

pub use app_error::{AppError, AppResult, ErrorKind};
pub use database_converter::DatabaseErrorConverter;
pub use repository_error::{RepositoryError, RepositoryResult};
