pub mod envelope;
pub mod pii;

pub use envelope::Envelope;
pub use pii::Masked;
