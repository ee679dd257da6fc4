/// Errors raised by domain-level parsing in this crate.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid role '{value}'. Must be one of: {valid}")]
    InvalidRole { value: String, valid: String },
}
