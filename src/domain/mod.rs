// Domain layer: the tabular data stand-in and model metadata. No I/O here.

pub mod model;
