// Job ingestion pipeline: normalize → extract skills → dedup → truncate.

pub mod dedup;
pub mod handlers;
pub mod normalize;
pub mod orchestrator;
pub mod output;

pub use orchestrator::Pipeline;
