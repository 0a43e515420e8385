use std::time::Duration;

/// Default time to wait for the final result code of a command
pub fn command_timeout() -> Duration {
    Duration::from_secs(10)
}

/// Time to wait for `NO CARRIER` after the `+++` escape sequence
pub fn escape_timeout() -> Duration {
    Duration::from_secs(3)
}

/// Time to wait for the first buffered NMEA sentence
pub fn nmea_timeout() -> Duration {
    Duration::from_secs(5)
}

/// Quiet period that ends a burst of NMEA sentences
pub fn nmea_drain_interval() -> Duration {
    Duration::from_millis(100)
}
