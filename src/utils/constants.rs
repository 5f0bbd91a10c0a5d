pub const GRAVITY: f64 = 9.81; // m/s^2
pub const AIR_DENSITY: f64 = 1.225; // kg/m^3, sea-level ISA

pub const PHYSICS_TIMESTEP: f64 = 1.0 / 60.0; // Fixed physics timestep [s]

// Flight envelope
pub const STALL_ANGLE_DEG: f64 = 16.0; // Stall onset angle of attack [degrees]
pub const STALL_SPEED_MARGIN: f64 = 0.9; // Fraction of stall speed that forces a stall
pub const MIN_AIRSPEED_THRESHOLD: f64 = 0.5; // Below this, velocity direction is unreliable [m/s]

// Landing envelope
pub const MAX_LANDING_SINK_RATE: f64 = 2.0; // Max touchdown vertical speed [m/s]
pub const MAX_LANDING_SPEED_KMH: f64 = 40.0; // Max touchdown ground speed [km/h]
pub const ROLLOUT_STOP_SPEED_KMH: f64 = 2.0; // Below this the rollout is complete [km/h]

// Environment
pub const OCEAN_SINK_RATE: f64 = -1.5; // Constant sink over open water [m/s]
pub const OCEAN_AIR_TEMP: f64 = 12.0; // Air temperature over open water [deg C]
pub const OCEAN_TURBULENCE: f64 = 0.1;
pub const AMBIENT_AIR_TEMP: f64 = 15.0; // Still-air temperature over land [deg C]
pub const RIDGE_LIFT_COEFFICIENT: f64 = 0.4;
pub const RIDGE_LIFT_CEILING: f64 = 300.0; // Ridge lift fades to zero at this height AGL [m]

// Cargo
pub const SPOILAGE_TEMPERATURE: f64 = 30.0; // Cargo spoils above this ambient temperature [deg C]
pub const SPOILAGE_EXPOSURE_LIMIT: f64 = 10.0; // Cumulative hot seconds before spoilage [s]
