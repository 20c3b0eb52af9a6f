#![allow(clippy::too_many_arguments)]
extern crate num;
#[macro_use]
extern crate num_derive;

#[macro_use]
pub mod common;
pub mod block_context;
pub mod directional;
pub mod edge_context;
#[cfg(feature = "interintra")]
pub mod interintra;
pub mod intra_predictor;
pub mod scale_table;
