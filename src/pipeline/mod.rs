// Pipeline entry points. Each stage owns its working directories; the
// learning components themselves are wired in as they land.
pub mod prediction;
pub mod training;
