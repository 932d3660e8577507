//! Graph structure over stage entities: adjacency snapshots for algorithms
//! and the serialized graph description format.

pub mod spec;
pub mod view;
