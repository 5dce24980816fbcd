//! The schema tree: specification literals, the recursive [`TypeDef`]
//! descriptor, and its composite specializations.

pub mod map_of;
pub mod seq_of;
pub mod spec;
pub mod typedef;

pub use map_of::MapOf;
pub use seq_of::SeqOf;
pub use spec::{Spec, TypeRef};
pub use typedef::{TypeDef, ValueType};
