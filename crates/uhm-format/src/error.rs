//! Error types for UHM decoding.

use thiserror::Error;

/// Result type alias for decode operations.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Errors that can occur while decoding or rasterizing a UHM document.
///
/// Every variant is terminal: the decode call that produced it returns no
/// canvas, and everything allocated for the partial instruction tree is
/// released on the way out.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    #[error("Not a UHM document (missing 'UHM' magic)")]
    BadMagic,

    #[error("Unexpected end of data at offset {offset}: needed {needed} more byte(s)")]
    UnexpectedEnd { offset: usize, needed: usize },

    #[error("Unknown opcode 0x{opcode:02X} at offset {offset}")]
    UnknownOpcode { opcode: u8, offset: usize },

    #[error("Unknown fill type 0x{fill:02X} at offset {offset}")]
    UnknownFillType { fill: u8, offset: usize },

    #[error("Unknown pattern mode 0x{mode:02X} at offset {offset}")]
    UnknownPatternMode { mode: u8, offset: usize },

    #[error("Block opened at offset {opened_at} is never closed")]
    UnterminatedBlock { opened_at: usize },

    #[error("Placement references unknown pattern {id}")]
    UnknownPattern { id: u16 },

    #[error("Tiled patterns cannot be rotated (rotation {rotation} rad)")]
    UnsupportedRotation { rotation: f32 },

    #[error("Nesting exceeds the limit of {limit} levels")]
    NestingTooDeep { limit: usize },

    #[error("Drawing exceeds the limit of {limit} operations")]
    DrawBudgetExceeded { limit: u64 },

    #[error("Canvas {width}x{height} exceeds the limit of {limit} pixels")]
    CanvasTooLarge { width: u32, height: u32, limit: u64 },
}

impl DecodeError {
    /// Byte offset the error was detected at, when one is known.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::UnexpectedEnd { offset, .. }
            | Self::UnknownOpcode { offset, .. }
            | Self::UnknownFillType { offset, .. }
            | Self::UnknownPatternMode { offset, .. } => Some(*offset),
            Self::UnterminatedBlock { opened_at } => Some(*opened_at),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = DecodeError::UnknownOpcode { opcode: 0x5A, offset: 7 };
        assert_eq!(err.to_string(), "Unknown opcode 0x5A at offset 7");

        let err = DecodeError::UnknownPattern { id: 3 };
        assert_eq!(err.to_string(), "Placement references unknown pattern 3");
    }

    #[test]
    fn test_error_offset() {
        assert_eq!(DecodeError::BadMagic.offset(), None);
        assert_eq!(
            DecodeError::UnexpectedEnd { offset: 12, needed: 4 }.offset(),
            Some(12)
        );
        assert_eq!(
            DecodeError::UnterminatedBlock { opened_at: 7 }.offset(),
            Some(7)
        );
    }
}
