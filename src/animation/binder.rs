use crate::animation::binding::ChannelBinding;
use crate::animation::oscillator::BoneDriver;
use crate::scene::skeleton::Skeleton;

pub struct Binder;

impl Binder {
    /// Resolves each driver's bone name against `skeleton` once, so the
    /// per-frame path never looks bones up by name or by raw position.
    ///
    /// Drivers naming a bone the skeleton does not have are skipped.
    #[must_use]
    pub fn bind(skeleton: &Skeleton, drivers: &[BoneDriver]) -> Vec<ChannelBinding> {
        let mut bindings = Vec::with_capacity(drivers.iter().map(|d| d.oscillators.len()).sum());

        for (driver_index, driver) in drivers.iter().enumerate() {
            let Some(bone_index) = skeleton.find(&driver.bone) else {
                log::warn!(
                    "Skeleton '{}' has no bone named '{}'; its oscillators are skipped",
                    skeleton.name,
                    driver.bone
                );
                continue;
            };

            for (oscillator_index, oscillator) in driver.oscillators.iter().enumerate() {
                bindings.push(ChannelBinding {
                    driver_index,
                    oscillator_index,
                    bone_index,
                    channel: oscillator.channel,
                });
            }
        }

        log::debug!("Bound {} oscillator channels to '{}'", bindings.len(), skeleton.name);
        bindings
    }
}
