//! Export destinations and their derivation policies
//!
//! Each destination reads identity and touch data differently. Rather than
//! branching on the destination inside every accessor, each variant
//! resolves to a static [`DestinationPolicy`] that the deriver consults.

use serde::{Deserialize, Serialize};

/// Analytics platform a record is being shaped for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportDestination {
    #[default]
    None,
    Amplitude,
    Mixpanel,
    Segment,
}

/// Identity attributes a destination may draw its user id from, in
/// priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityField {
    /// Developer-supplied identity set through the SDK
    DeveloperIdentity,
    /// Cross-platform identity resolved by the attribution service
    CrossPlatformId,
    /// Hardware advertising identifier (aaid / idfa / idfv / android id)
    DeviceId,
}

/// How much of the attributed-touch block a destination receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchDataPolicy {
    /// Every `last_attributed_touch_data` attribute
    Full,
    /// Only the serialized custom-fields blob
    CustomFieldsOnly,
}

/// Per-destination derivation policy.
#[derive(Debug, Clone, Copy)]
pub struct DestinationPolicy {
    pub identity_priority: &'static [IdentityField],
    pub touch_data: TouchDataPolicy,
}

impl ExportDestination {
    /// Resolve this destination's derivation policy.
    pub fn policy(self) -> DestinationPolicy {
        match self {
            // Amplitude keys everything off its own user id, resolved from
            // the cross-platform identity when present.
            ExportDestination::Amplitude => DestinationPolicy {
                identity_priority: &[
                    IdentityField::CrossPlatformId,
                    IdentityField::DeveloperIdentity,
                    IdentityField::DeviceId,
                ],
                touch_data: TouchDataPolicy::Full,
            },
            ExportDestination::Mixpanel => DestinationPolicy {
                identity_priority: &[
                    IdentityField::DeveloperIdentity,
                    IdentityField::DeviceId,
                ],
                touch_data: TouchDataPolicy::Full,
            },
            // Segment builds its own context block and only wants the
            // custom fields from the touch data.
            ExportDestination::Segment => DestinationPolicy {
                identity_priority: &[
                    IdentityField::DeveloperIdentity,
                    IdentityField::CrossPlatformId,
                ],
                touch_data: TouchDataPolicy::CustomFieldsOnly,
            },
            ExportDestination::None => DestinationPolicy {
                identity_priority: &[IdentityField::DeveloperIdentity],
                touch_data: TouchDataPolicy::Full,
            },
        }
    }
}

impl std::fmt::Display for ExportDestination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportDestination::None => write!(f, "none"),
            ExportDestination::Amplitude => write!(f, "amplitude"),
            ExportDestination::Mixpanel => write!(f, "mixpanel"),
            ExportDestination::Segment => write!(f, "segment"),
        }
    }
}
