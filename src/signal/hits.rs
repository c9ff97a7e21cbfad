use std::collections::HashMap;

use super::registry::HitId;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HitPolicy {
    /// Every clear removes the id, even if a later hit is still running.
    #[default]
    Independent,
    /// The id stays lit until every hit on it has been cleared.
    RefCounted,
}

#[derive(Debug, Default)]
pub struct HitState {
    policy: HitPolicy,
    active: HashMap<HitId, u32>,
}

impl HitState {
    pub fn new(policy: HitPolicy) -> Self {
        Self {
            policy,
            active: HashMap::new(),
        }
    }

    pub fn policy(&self) -> HitPolicy {
        self.policy
    }

    pub fn insert(&mut self, hit: HitId) {
        let count = self.active.entry(hit).or_insert(0);
        *count = match self.policy {
            HitPolicy::Independent => 1,
            HitPolicy::RefCounted => *count + 1,
        };
    }

    pub fn clear(&mut self, hit: HitId) {
        let Some(count) = self.active.get_mut(&hit) else {
            return;
        };
        match self.policy {
            HitPolicy::Independent => {
                self.active.remove(&hit);
            }
            HitPolicy::RefCounted => {
                *count = count.saturating_sub(1);
                if *count == 0 {
                    self.active.remove(&hit);
                }
            }
        }
    }

    pub fn contains(&self, hit: HitId) -> bool {
        self.active.contains_key(&hit)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn reset(&mut self) {
        self.active.clear();
    }
}
