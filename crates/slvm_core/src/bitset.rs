//! Fixed-length bit-set used for per-point running-state masks.

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BitSet {
    bits: Vec<u64>,
    len: usize,
}

impl BitSet {
    #[must_use]
    pub fn new_empty(len: usize) -> Self {
        Self {
            bits: vec![0; len.div_ceil(64)],
            len,
        }
    }

    #[must_use]
    pub fn new_full(len: usize) -> Self {
        let mut s = Self::new_empty(len);
        s.set_all(true);
        s
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Resize to `len` bits, every bit set to `value`.
    pub fn reset(&mut self, len: usize, value: bool) {
        self.len = len;
        self.bits.clear();
        self.bits.resize(len.div_ceil(64), 0);
        self.set_all(value);
    }

    pub fn set_all(&mut self, value: bool) {
        let fill = if value { !0 } else { 0 };
        for w in &mut self.bits {
            *w = fill;
        }
        self.trim_tail();
    }

    // Clear unused bits in the last word so counts stay exact.
    fn trim_tail(&mut self) {
        let rem = self.len % 64;
        if rem != 0 {
            if let Some(last) = self.bits.last_mut() {
                *last &= (1_u64 << rem) - 1;
            }
        }
    }

    #[must_use]
    pub fn get(&self, idx: usize) -> bool {
        if idx >= self.len {
            return false;
        }
        (self.bits[idx / 64] >> (idx % 64)) & 1 == 1
    }

    pub fn set(&mut self, idx: usize) {
        if idx < self.len {
            self.bits[idx / 64] |= 1_u64 << (idx % 64);
        }
    }

    pub fn clear(&mut self, idx: usize) {
        if idx < self.len {
            self.bits[idx / 64] &= !(1_u64 << (idx % 64));
        }
    }

    pub fn set_value(&mut self, idx: usize, value: bool) {
        if value {
            self.set(idx);
        } else {
            self.clear(idx);
        }
    }

    pub fn count_ones(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn none(&self) -> bool {
        self.bits.iter().all(|w| *w == 0)
    }

    pub fn all(&self) -> bool {
        self.count_ones() == self.len
    }

    /// Copy `other` into `self`, reusing the allocation.
    pub fn copy_from(&mut self, other: &Self) {
        self.len = other.len;
        self.bits.clear();
        self.bits.extend_from_slice(&other.bits);
    }

    pub fn intersect_with(&mut self, other: &Self) {
        for (a, b) in self.bits.iter_mut().zip(other.bits.iter()) {
            *a &= *b;
        }
    }

    pub fn union_with(&mut self, other: &Self) {
        for (a, b) in self.bits.iter_mut().zip(other.bits.iter()) {
            *a |= *b;
        }
    }

    pub fn subtract_with(&mut self, other: &Self) {
        for (a, b) in self.bits.iter_mut().zip(other.bits.iter()) {
            *a &= !*b;
        }
    }

    pub fn invert(&mut self) {
        for w in &mut self.bits {
            *w = !*w;
        }
        self.trim_tail();
    }

    /// Indices of set bits, ascending.
    pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter().enumerate().flat_map(|(wi, &word)| {
            let mut w = word;
            std::iter::from_fn(move || {
                if w == 0 {
                    return None;
                }
                let bit = w.trailing_zeros() as usize;
                w &= w - 1;
                Some(wi * 64 + bit)
            })
        })
    }
}

impl FromIterator<bool> for BitSet {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let values: Vec<bool> = iter.into_iter().collect();
        let mut s = Self::new_empty(values.len());
        for (i, v) in values.into_iter().enumerate() {
            s.set_value(i, v);
        }
        s
    }
}
