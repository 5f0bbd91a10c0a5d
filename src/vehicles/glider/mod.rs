pub mod config;
pub mod physics;
pub mod state;

pub use config::GliderConfig;
pub use physics::{FlightDynamics, FlightOutcome, LaunchType};
pub use state::{GliderControls, GliderState};
