pub mod local;

pub use local::LocalFileStorage;
