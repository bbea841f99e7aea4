use farezone_core::source::DatasetError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FarezoneCliError {
    #[error("failure reading run configuration: {0}")]
    ConfigurationError(String),
    #[error("failure loading zone dataset: {source}")]
    DatasetError {
        #[from]
        source: DatasetError,
    },
    #[error("failure reading replay script: {0}")]
    ReplayScriptError(String),
    #[error("failure writing output: {source}")]
    StdIoError {
        #[from]
        source: std::io::Error,
    },
    #[error("failure encoding JSON: {source}")]
    SerdeJsonError {
        #[from]
        source: serde_json::Error,
    },
}
