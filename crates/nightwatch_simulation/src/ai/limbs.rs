//! Sub-part damage (satellite of the enemy, not of its state machine)
//!
//! Every sub-part tracks its own health; reaching zero detaches it once.
//! Torso never detaches.

use crate::shared::{Health, SubPartId};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Limb {
    pub part: SubPartId,
    pub health: Health,
    pub detached: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LimbSet {
    limbs: Vec<Limb>,
}

impl LimbSet {
    pub fn new(max_health: i32) -> Self {
        Self {
            limbs: SubPartId::ALL
                .iter()
                .map(|&part| Limb {
                    part,
                    health: Health::new(max_health),
                    detached: false,
                })
                .collect(),
        }
    }

    pub fn get(&self, part: SubPartId) -> Option<&Limb> {
        self.limbs.iter().find(|limb| limb.part == part)
    }

    pub fn is_detached(&self, part: SubPartId) -> bool {
        self.get(part).is_some_and(|limb| limb.detached)
    }

    /// Damages one sub-part. Returns the part when this hit detached it.
    pub fn damage(&mut self, part: SubPartId, amount: i32) -> Option<SubPartId> {
        let limb = self.limbs.iter_mut().find(|limb| limb.part == part)?;
        if limb.detached {
            return None;
        }

        limb.health.apply_damage(amount);
        if !limb.health.is_alive() && part.is_detachable() {
            limb.detached = true;
            return Some(part);
        }
        None
    }

    pub fn restore(&mut self) {
        for limb in &mut self.limbs {
            limb.health.restore_full();
            limb.detached = false;
        }
    }
}
