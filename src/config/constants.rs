// src/config/constants.rs
//! System-wide configuration constants

/// Synthetic telemetry constants
pub mod telemetry {
    /// Regression strength toward the setpoint
    pub const DEFAULT_ALPHA: f64 = 0.1;
    /// Carry-over of the previous step's change
    pub const DEFAULT_BETA: f64 = 0.1;

    /// Timer period between ticks
    pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1000;
    /// Shortest accepted timer period
    pub const MIN_TICK_INTERVAL_MS: u64 = 1;
    /// Longest accepted timer period (one hour)
    pub const MAX_TICK_INTERVAL_MS: u64 = 3_600_000;

    /// Decimals used when rendering a reading
    pub const DISPLAY_DECIMALS: usize = 2;
    /// Upper bound for `display_decimals`
    pub const MAX_DISPLAY_DECIMALS: usize = 9;
}

/// Device link constants
pub mod link {
    /// Controller serial speed
    pub const DEFAULT_BAUD_RATE: u32 = 115_200;
    /// Highest accepted baud rate
    pub const MAX_BAUD_RATE: u32 = 4_000_000;
    /// Read timeout for the reply line
    pub const DEFAULT_TIMEOUT_MS: u64 = 100;
    /// Wait between writing a command and reading the reply
    pub const DEFAULT_RESPONSE_DELAY_MS: u64 = 100;
    /// Reply lines are cut at this length
    pub const MAX_RESPONSE_LINE_BYTES: usize = 1024;
}

/// Power rail table seeds (`current`, `ideal`, `std_dev`)
pub mod rails {
    /// Built-in seed for one rail
    pub struct RailSeed {
        /// Rail name shown in the Voltage column
        pub name: &'static str,
        /// Loads powered by the rail
        pub description: &'static str,
        /// Voltage channel seed in V
        pub voltage: (f64, f64, f64),
        /// Current channel seed in mA
        pub current_ma: (f64, f64, f64),
    }

    /// The six rails of the power supply table, top to bottom
    pub const DEFAULT_RAILS: [RailSeed; 6] = [
        RailSeed {
            name: "3.3V",
            description: "Main Controller",
            voltage: (3.29, 3.3, 0.1),
            current_ma: (11.9, 12.0, 0.1),
        },
        RailSeed {
            name: "5V",
            description: "Tire Power Control Signals, Network Switch",
            voltage: (4.89, 5.0, 0.1),
            current_ma: (29.5, 30.0, 0.1),
        },
        RailSeed {
            name: "12V",
            description: "AUX",
            voltage: (11.98, 12.0, 0.1),
            current_ma: (1120.0, 1100.0, 10.0),
        },
        RailSeed {
            name: "19V",
            description: "Computer",
            voltage: (19.05, 19.0, 0.1),
            current_ma: (5900.0, 6000.0, 50.0),
        },
        RailSeed {
            name: "24V",
            description: "Antenna, Cameras",
            voltage: (23.95, 24.0, 0.1),
            current_ma: (3203.0, 3200.0, 20.0),
        },
        RailSeed {
            name: "56V",
            description: "Special Scientific Camera, Main Bus",
            voltage: (55.80, 56.0, 0.1),
            current_ma: (4732.0, 4700.0, 30.0),
        },
    ];

    /// Status text before any ON/OFF command
    pub const UNKNOWN_STATUS: &str = "--";
}

/// Configuration file locations
pub mod paths {
    /// System-wide configuration file
    pub const SYSTEM_CONFIG_PATH: &str = "/etc/rover-panel/config.toml";
    /// Per-user configuration directory, relative to `$HOME`
    pub const USER_CONFIG_DIR: &str = ".config/rover-panel";
    /// Project default configuration
    pub const DEFAULT_CONFIG_FILE: &str = "config/default.toml";
    /// Working-directory override, applied last
    pub const LOCAL_CONFIG_FILE: &str = "rover-panel.toml";

    /// Prefix for `ROVER_PANEL__SECTION__KEY` overrides
    pub const ENV_PREFIX: &str = "ROVER_PANEL__";
    /// Separator between nested keys in an override name
    pub const ENV_SEPARATOR: &str = "__";
}
