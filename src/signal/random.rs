use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

pub trait RandomSource {
    fn next_u64(&mut self) -> u64;

    fn pick_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some((self.next_u64() % len as u64) as usize)
    }
}

#[derive(Clone, Debug)]
pub struct RngSource {
    rng: StdRng,
}

impl RngSource {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl RandomSource for RngSource {
    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn pick_index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.rng.gen_range(0..len))
    }
}

#[cfg(test)]
#[derive(Clone, Debug)]
pub struct ScriptedSource {
    values: Vec<u64>,
    cursor: usize,
}

#[cfg(test)]
impl ScriptedSource {
    pub fn new(values: Vec<u64>) -> Self {
        Self { values, cursor: 0 }
    }
}

#[cfg(test)]
impl RandomSource for ScriptedSource {
    fn next_u64(&mut self) -> u64 {
        if self.values.is_empty() {
            return 0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
