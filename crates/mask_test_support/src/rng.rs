/// Small deterministic PRNG for seeded test sessions.
#[derive(Clone, Debug)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        self.state
    }

    /// Uniform-ish in `0..upper`; `0` when `upper == 0`.
    pub fn gen_range(&mut self, upper: usize) -> usize {
        if upper == 0 {
            return 0;
        }
        (self.next_u64() >> 32) as usize % upper
    }

    /// `true` with probability `numerator / denominator`.
    pub fn gen_bool(&mut self, numerator: usize, denominator: usize) -> bool {
        self.gen_range(denominator) < numerator
    }

    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        items.get(self.gen_range(items.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Lcg::new(0x5eed);
        let mut b = Lcg::new(0x5eed);
        for _ in 0..16 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn ranges_stay_in_bounds() {
        let mut rng = Lcg::new(1);
        for _ in 0..256 {
            assert!(rng.gen_range(5) < 5);
        }
        assert_eq!(rng.gen_range(0), 0);
        assert_eq!(rng.pick::<u8>(&[]), None);
        assert!(rng.pick(&[1, 2, 3]).is_some());
        assert!(rng.gen_bool(3, 3));
        assert!(!rng.gen_bool(0, 3));
    }
}
