//! Typed positional ids for variables and constraints.
//!
//! An id is the position of a record in its store. It says nothing about
//! which store the record lives in; handles carry identity, ids carry order.

macro_rules! define_id_type {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(transparent)]
        pub struct $name(usize);

        impl $name {
            /// Get the inner position.
            pub fn inner(self) -> usize {
                self.0
            }

            pub fn new(value: usize) -> Self {
                Self(value)
            }
        }

        impl From<usize> for $name {
            fn from(value: usize) -> Self {
                Self(value)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

define_id_type!(VariableId, "x");
define_id_type!(ConstraintId, "c");
