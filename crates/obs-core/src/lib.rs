pub mod builder;
pub mod bundle;
pub mod pipeline;
pub mod sequence;
pub mod store;

pub use builder::{BuildOptions, PerformerRef, build_observation};
pub use bundle::{BUNDLE_TYPE_COLLECTION, build_bundle, bundle_filename};
pub use pipeline::{PipelineOptions, RunOutcome, run_pipeline};
pub use sequence::SequenceAllocator;
pub use store::{DirectoryStore, MemoryStore, ObservationStore, StoreError};
