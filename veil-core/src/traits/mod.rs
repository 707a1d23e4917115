pub mod detector;

pub use detector::Detector;
