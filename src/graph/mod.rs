pub mod cycle;
pub mod derive;
pub mod model;
