pub mod partition;

pub use partition::{partition, partition_by, partition_in};
