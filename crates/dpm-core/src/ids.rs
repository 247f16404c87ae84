//! Typed identifiers for graph elements.
//!
//! Both ids are `Copy + Ord + Hash`: they key maps and break ties in the
//! path search.  Node ids come from whoever builds the graph (`row * cols +
//! col` for tile grids) and may be sparse.  Edge ids are dense offsets into
//! the built graph's edge arrays.

use std::fmt;

macro_rules! graph_id {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(pub u32);

        impl $name {
            /// The id as a `usize` offset.
            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;

            fn try_from(n: usize) -> Result<Self, Self::Error> {
                u32::try_from(n).map($name)
            }
        }
    };
}

graph_id! {
    /// Identifier of a tile-graph node, unique within one graph.
    NodeId
}

graph_id! {
    /// Offset of a directed edge in a built graph.
    EdgeId
}
