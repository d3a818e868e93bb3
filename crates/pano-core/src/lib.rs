pub mod canvas;
pub mod consts;
pub mod error;
pub mod exposure;
pub mod finalize;
pub mod frame;
pub mod ingest;
pub mod io;
pub mod normalize;
pub mod pipeline;
pub mod project;
pub mod stitcher;
