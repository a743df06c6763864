use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// A rating threshold that does not parse as an integer. Never reaches
    /// the client: the parameter is dropped and the rest of the filter runs.
    #[error("Invalid value for filter '{field}': {value}")]
    InvalidFilterValue { field: String, value: String },
}
