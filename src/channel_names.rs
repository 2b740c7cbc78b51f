/// Centralized channel naming utilities
///
/// Provides consistent channel names for log messages and parse errors.
/// Get the channel name for a given field index in a sample
///
/// # Arguments
/// * `index` - Field index within one sample (0 = timestamp, 10 = mean SpO2 wave)
///
/// # Returns
/// Static string slice with the channel name, or "unknown" past the last channel
pub fn channel_name(index: usize) -> &'static str {
    CHANNEL_NAMES.get(index).copied().unwrap_or("unknown")
}

/// All channel names in file order
pub const CHANNEL_NAMES: [&str; crate::constants::CHANNEL_COUNT] = [
    "timestamp",
    "position",
    "angle",
    "azimuth",
    "pitch",
    "roll",
    "thermistor",
    "spo2",
    "pulse_rate",
    "perfusion_index",
    "mean_spo2_wave",
];
