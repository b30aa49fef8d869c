pub mod interaction;
pub mod scene;
pub mod viewport;
