//! Domain - engine configuration

pub mod settings;

pub use settings::PhysicsSettings;
