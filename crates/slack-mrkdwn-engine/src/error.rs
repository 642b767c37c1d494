#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Invalid rule pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("Unknown text encoding label: {0}")]
    UnknownEncoding(String),
    #[error("Output is not representable in {encoding}")]
    Unencodable { encoding: &'static str },
    #[error("Table placeholder lost during rewriting: {0}")]
    LostPlaceholder(String),
}
