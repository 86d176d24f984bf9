use num_bigint::BigUint;

/// Memoized factorials. One table lives inside each search engine, so a table
/// never outlives the grid size it was grown for.
#[derive(Debug, Clone)]
pub struct Factorials {
    memo: Vec<BigUint>,
}

impl Default for Factorials {
    fn default() -> Self {
        Factorials {
            memo: vec![BigUint::from(1u32)],
        }
    }
}

impl Factorials {
    pub fn new() -> Self {
        Self::default()
    }

    /// `n!`, growing the table up to `n` on first use.
    pub fn get(&mut self, n: usize) -> &BigUint {
        while self.memo.len() <= n {
            let i = self.memo.len();
            let next = &self.memo[i - 1] * BigUint::from(i);
            self.memo.push(next);
        }
        &self.memo[n]
    }

    /// `C(n, k) = n! / (k! (n - k)!)`, or zero when `k > n`.
    pub fn binomial(&mut self, n: usize, k: usize) -> BigUint {
        if k > n {
            return BigUint::from(0u32);
        }
        let numerator = self.get(n).clone();
        let denominator = self.get(k).clone() * self.get(n - k);
        numerator / denominator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_factorials() {
        let mut factorials = Factorials::new();
        assert_eq!(*factorials.get(0), BigUint::from(1u32));
        assert_eq!(*factorials.get(5), BigUint::from(120u32));
        assert_eq!(factorials.memo.len(), 6);
        // Smaller values come from the table without growing it
        assert_eq!(*factorials.get(3), BigUint::from(6u32));
        assert_eq!(factorials.memo.len(), 6);
    }

    #[test]
    fn test_binomial() {
        let mut factorials = Factorials::new();
        assert_eq!(factorials.binomial(7, 5), BigUint::from(21u32));
        assert_eq!(factorials.binomial(23, 0), BigUint::from(1u32));
        assert_eq!(factorials.binomial(23, 23), BigUint::from(1u32));
        assert_eq!(factorials.binomial(3, 4), BigUint::from(0u32));
    }

    #[test]
    fn test_binomial_beyond_u64() {
        let mut factorials = Factorials::new();
        // 2498 free cells on a 50x50 grid, 7 obstacles
        let ways = factorials.binomial(2498, 7);
        assert!(u64::try_from(&ways).is_err());
        assert_eq!(u128::try_from(&ways).ok(), Some(119415949609078828992));
        // 30! alone overflows u64
        assert!(u64::try_from(factorials.get(30)).is_err());
        assert_eq!(
            factorials.binomial(100, 50).to_string(),
            "100891344545564193334812497256"
        );
    }
}
