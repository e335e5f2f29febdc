use crate::pools::SlotId;

/// Operand stack of pool slots.
#[derive(Default)]
pub(crate) struct Stack {
    entries: Vec<SlotId>,
}

impl Stack {
    pub(crate) fn push(&mut self, id: SlotId) {
        self.entries.push(id);
    }

    /// Top entry and whether it is varying.
    pub(crate) fn pop(&mut self) -> Option<(SlotId, bool)> {
        self.entries.pop().map(|id| (id, id.class().is_varying()))
    }

    /// The top `N` entries in push order.
    pub(crate) fn pop_n<const N: usize>(&mut self) -> Option<[SlotId; N]> {
        let start = self.entries.len().checked_sub(N)?;
        let top = <[SlotId; N]>::try_from(&self.entries[start..]).ok()?;
        self.entries.truncate(start);
        Some(top)
    }

    /// The top `n` entries in push order, for variable-count opcodes.
    pub(crate) fn pop_many(&mut self, n: usize) -> Option<Vec<SlotId>> {
        let start = self.entries.len().checked_sub(n)?;
        Some(self.entries.split_off(start))
    }

    pub(crate) fn peek(&self) -> Option<SlotId> {
        self.entries.last().copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn drain(&mut self) -> impl Iterator<Item = SlotId> + '_ {
        self.entries.drain(..)
    }
}
