//! Temporary value pools.
//!
//! One slot allocator per (type, class). Slots are handed out to stack
//! entries and returned when the entry is consumed; their storage is kept for
//! reuse so steady-state execution does not allocate.

use slvm_core::{ShaderData, ShaderVariable, VarClass, VarType};

const POOL_COUNT: usize = VarType::ALL.len() * 2;

/// Handle to a pool slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct SlotId {
    pool: u8,
    index: u32,
}

impl SlotId {
    pub(crate) fn class(self) -> VarClass {
        if self.pool as usize % 2 == 1 {
            VarClass::Varying
        } else {
            VarClass::Uniform
        }
    }
}

#[derive(Default)]
struct SlotPool {
    slots: Vec<ShaderVariable>,
    free: Vec<u32>,
    in_use: usize,
}

pub(crate) struct TempPools {
    pools: Vec<SlotPool>,
}

fn pool_index(ty: VarType, class: VarClass) -> usize {
    ty.index() * 2 + usize::from(class.is_varying())
}

fn placeholder() -> ShaderVariable {
    ShaderVariable {
        name: String::new(),
        ty: VarType::Float,
        class: VarClass::Uniform,
        param: false,
        output: false,
        data: ShaderData::default(),
    }
}

impl TempPools {
    pub(crate) fn new() -> Self {
        Self {
            pools: (0..POOL_COUNT).map(|_| SlotPool::default()).collect(),
        }
    }

    /// A slot of `ty`/`class` sized for `grid_size` points. Contents are stale.
    pub(crate) fn alloc(&mut self, ty: VarType, class: VarClass, grid_size: usize) -> SlotId {
        let pool_idx = pool_index(ty, class);
        let pool = &mut self.pools[pool_idx];
        let len = if class.is_varying() { grid_size.max(1) } else { 1 };
        let index = match pool.free.pop() {
            Some(index) => index,
            None => {
                pool.slots.push(ShaderVariable::new("", ty, class));
                (pool.slots.len() - 1) as u32
            }
        };
        pool.slots[index as usize].reshape(ty, class, len);
        pool.in_use += 1;
        SlotId {
            pool: pool_idx as u8,
            index,
        }
    }

    pub(crate) fn release(&mut self, id: SlotId) {
        let pool = &mut self.pools[id.pool as usize];
        pool.free.push(id.index);
        pool.in_use = pool.in_use.saturating_sub(1);
    }

    pub(crate) fn get(&self, id: SlotId) -> &ShaderVariable {
        &self.pools[id.pool as usize].slots[id.index as usize]
    }

    pub(crate) fn get_mut(&mut self, id: SlotId) -> &mut ShaderVariable {
        &mut self.pools[id.pool as usize].slots[id.index as usize]
    }

    /// Move a slot's variable out so it can be written while other slots are
    /// read. Must be paired with `restore`.
    pub(crate) fn take(&mut self, id: SlotId) -> ShaderVariable {
        std::mem::replace(self.get_mut(id), placeholder())
    }

    pub(crate) fn restore(&mut self, id: SlotId, var: ShaderVariable) {
        *self.get_mut(id) = var;
    }

    pub(crate) fn occupancy(&self) -> Vec<usize> {
        self.pools.iter().map(|p| p.in_use).collect()
    }

    /// Name of the pool at `idx`, for diagnostics.
    pub(crate) fn describe(idx: usize) -> String {
        let ty = VarType::ALL[idx / 2];
        let class = if idx % 2 == 1 { VarClass::Varying } else { VarClass::Uniform };
        format!("{class} {ty}")
    }
}

