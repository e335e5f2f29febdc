//! Running-state stack for masked control flow.
//!
//! `running` is the set of grid points currently executing. `current` is the
//! result of the last condition evaluated with `S_GET`. Saved masks are kept
//! on an explicit stack so nested conditionals and loops can restore them.

use slvm_core::BitSet;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunningStates {
    running: BitSet,
    current: BitSet,
    saved: Vec<BitSet>,
    spare: Vec<BitSet>,
}

impl RunningStates {
    /// Every point running and current.
    pub fn new(size: usize) -> Self {
        Self {
            running: BitSet::new_full(size),
            current: BitSet::new_full(size),
            saved: Vec::new(),
            spare: Vec::new(),
        }
    }

    pub fn reset(&mut self, size: usize) {
        self.running.reset(size, true);
        self.current.reset(size, true);
        while let Some(mask) = self.saved.pop() {
            self.spare.push(mask);
        }
    }

    pub fn len(&self) -> usize {
        self.running.len()
    }

    pub fn is_empty(&self) -> bool {
        self.running.is_empty()
    }

    pub fn running(&self) -> &BitSet {
        &self.running
    }

    pub fn current(&self) -> &BitSet {
        &self.current
    }

    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    /// `RS_PUSH`: save a copy of the running mask.
    pub fn push(&mut self) {
        let mut mask = self.spare.pop().unwrap_or_default();
        mask.copy_from(&self.running);
        self.saved.push(mask);
    }

    /// `RS_POP`: restore the last saved mask. `false` if nothing was saved.
    pub fn pop(&mut self) -> bool {
        match self.saved.pop() {
            Some(mask) => {
                let old = std::mem::replace(&mut self.running, mask);
                self.spare.push(old);
                true
            }
            None => false,
        }
    }

    /// `RS_GET`: the current mask becomes the running mask.
    pub fn get(&mut self) {
        self.running.copy_from(&self.current);
    }

    /// `RS_INVERSE`: points that were running when the scope was entered but
    /// are not running now.
    pub fn inverse(&mut self) {
        self.running.invert();
        if let Some(entry) = self.saved.last() {
            self.running.intersect_with(entry);
        }
    }

    /// `S_CLEAR`
    pub fn clear_current(&mut self) {
        self.current.reset(self.running.len(), false);
    }

    /// `S_GET`: `current[i] = running[i] && cond(i)`.
    pub fn set_current(&mut self, cond: impl Fn(usize) -> bool) {
        self.current.reset(self.running.len(), false);
        for i in self.running.iter_ones() {
            if cond(i) {
                self.current.set(i);
            }
        }
    }
}
