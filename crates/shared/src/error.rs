use thiserror::Error;

/// Domain errors surfaced by the simulation core. Illegal navigation or
/// misdirected drops are not errors; they are forgiven as no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("step ordinal {ordinal} is outside the valid range 1..=7")]
    OutOfRangeStep { ordinal: u8 },
}
