use crate::pb::HealthRes;

/// Simple health service that can be used by both the REST and the tool APIs
///
/// The service is stateless, so being able to answer at all is the whole check.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    /// Static method to check health without creating an instance
    ///
    /// # Returns
    /// A `HealthRes` indicating the service is healthy.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "MCH service is alive".into(),
        }
    }
}
