pub mod dispersion;

pub use dispersion::DispersionMetrics;
