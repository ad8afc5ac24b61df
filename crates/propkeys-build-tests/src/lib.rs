//! Providers generated by the build script with `propkeys-codegen` and compiled as regular crate code.

include!(concat!(env!("OUT_DIR"), "/app_key.rs"));

/// Private provider with a custom naming strategy.
#[allow(dead_code)] // only used in tests
mod metrics {
    include!(concat!(env!("OUT_DIR"), "/metrics_key.rs"));

    fn is_ascii(value: &str) -> bool {
        value.is_ascii()
    }

    fn is_interval(value: &str) -> bool {
        value
            .parse::<u32>()
            .is_ok_and(|secs| (1..=3_600).contains(&secs))
    }

    #[cfg(test)]
    mod tests;
}

/// Checks that the value is a non-zero TCP port.
pub fn is_port(value: &str) -> bool {
    value.parse::<u16>().is_ok_and(|port| port != 0)
}
