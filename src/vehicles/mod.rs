pub mod glider;

pub use glider::{FlightDynamics, FlightOutcome, GliderConfig, GliderControls, GliderState, LaunchType};
