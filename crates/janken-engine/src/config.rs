//! Engine configuration.

/// Tunables for the room engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Mailbox capacity of each room's command lane. When a lane's mailbox
    /// is full, further commands for that room wait (bounded channel
    /// backpressure) instead of piling up unboundedly.
    pub lane_mailbox_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            lane_mailbox_size: 64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mailbox_size() {
        assert_eq!(EngineConfig::default().lane_mailbox_size, 64);
    }
}
