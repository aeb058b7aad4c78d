use thiserror::Error;

/// An error produced while decoding a tag-prefixed command buffer.
///
/// Offsets are word indices into the buffer, pointing at the leading tag of
/// the offending command.
#[non_exhaustive]
#[derive(Error, Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DecodeError {
    #[error("Offset {offset}: unknown command tag {tag}.")]
    UnknownTag { tag: i32, offset: usize },
    #[error("Offset {offset}: command with tag {tag} is truncated.")]
    Truncated { tag: i32, offset: usize },
    #[error("Offset {offset}: command with tag {tag} ends with tag {trailer}.")]
    MismatchedTrailer {
        tag: i32,
        trailer: i32,
        offset: usize,
    },
}

impl DecodeError {
    /// Word index of the command that could not be decoded.
    pub fn offset(&self) -> usize {
        match *self {
            DecodeError::UnknownTag { offset, .. }
            | DecodeError::Truncated { offset, .. }
            | DecodeError::MismatchedTrailer { offset, .. } => offset,
        }
    }
}
