//! Write-side payload construction
//!
//! Typed values, multi-language fields, per-kind XML serialization and the
//! template overlay used by create/update operations.

pub mod assembler;
pub mod kind;
pub mod multilang;
pub mod value;
pub mod xml;

pub use assembler::{PayloadAssembler, finish, overlay, strip_read_only};
pub use kind::EntityKind;
pub use multilang::{TranslatableField, Translation, build_multilang_fragment};
pub use value::{EntityPayload, PayloadValue};
pub use xml::{TextEncoding, serialize_payload};
