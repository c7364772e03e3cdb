// Default input locations, relative to the simulator's working directory
pub const TRAJECTORY_PATH: &str = "data/state.dat";
pub const THERMAL_SCENARIO_PATH: &str = "config/thermal_scenario.csv";
pub const WIND_FIELD_PATH: &str = "data/wind_field.dat";

// Column layout of the state log written by the glider simulation
pub const STATE_X_COLUMN: usize = 0;
pub const STATE_Y_COLUMN: usize = 1;
pub const STATE_TIME_COLUMN: usize = 10;
pub const STATE_MIN_COLUMNS: usize = STATE_TIME_COLUMN + 1;

pub const THERMAL_DELIMITER: u8 = b';';
pub const WIND_FIELD_DELIMITER: u8 = b' ';

// Flight zone geometry (m)
pub const BOUNDARY_RADIUS_M: f64 = 1200.0;
pub const OVERVIEW_AXIS_LIMIT_M: f64 = 1300.0;
pub const FINAL_AXIS_LIMIT_M: f64 = 1500.0;

// Text annotations sit this far (m) up and right of their marker
pub const ANNOTATION_OFFSET_M: f64 = 10.0;

// Wind field time slice shown by the updraft surface (s)
pub const UPDRAFT_SLICE_TIME_S: f64 = 100.0;

pub const UPDRAFT_TITLE: &str = "Updraft velocity[m/s]";

// Colours, RGB
pub const TRAJECTORY_RGB: (u8, u8, u8) = (0x66, 0x99, 0xff);
pub const THERMAL_RGB: (u8, u8, u8) = (0xff, 0x66, 0x00);
pub const MARKER_RGB: (u8, u8, u8) = (0, 0, 0);

// Segments used to draw the boundary circle as a polyline
pub const CIRCLE_SEGMENTS: usize = 360;
