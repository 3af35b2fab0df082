use std::fmt;

#[derive(Debug)]
pub enum SettleError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (month out of range, bad marker pattern, etc.).
    ConfigValidation(String),
    /// The fulfillment source yielded zero resolvable invoice keys.
    NoInvoiceKeys,
}

impl fmt::Display for SettleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::NoInvoiceKeys => {
                write!(f, "fulfillment source has no resolvable invoice keys")
            }
        }
    }
}

impl std::error::Error for SettleError {}
