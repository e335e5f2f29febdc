//! The shader virtual machine.
//!
//! A `ShaderVm` is one shader instance: a shared, read-only `Program` plus
//! the instance's own locals, operand stack and temporary pools. Execution is
//! run-to-completion over the grid described by a `ShadingEnvironment`.

mod dispatch;
mod ops;
mod stack;

use crate::color;
use crate::config::VmConfig;
use crate::env::{GridEnv, ShadingEnvironment};
use crate::errors::ExecError;
use crate::locals::{Local, Locals};
use crate::pools::TempPools;
use regex::Regex;
use slvm_core::{BitSet, FastHashMap, Matrix4, ShaderVariable, VarClass, VarType, Vec3, fast_map_new};
use slvm_ir::{Program, ProgramElement, SegmentKind};
use slvm_loader::LoadError;
use stack::Stack;
use std::sync::Arc;

/// Raw value handed to `ShaderVm::set_argument`.
#[derive(Clone, Debug, PartialEq)]
pub enum ArgValue {
    /// Flattened numeric components: one per float, three per triple or
    /// color, sixteen per matrix (row major).
    Floats(Vec<f32>),
    Strings(Vec<String>),
}

pub struct ShaderVm {
    program: Arc<Program>,
    config: VmConfig,
    locals: Locals,
    stack: Stack,
    pools: TempPools,
    grid_size: usize,
    segment: SegmentKind,
    pc: usize,
    /// Mnemonic and position of the instruction being executed.
    op: &'static str,
    op_pc: usize,
    /// Running mask snapshot for the current instruction.
    mask: BitSet,
    regex_cache: FastHashMap<String, Regex>,
}

impl ShaderVm {
    pub fn new(program: Arc<Program>) -> Self {
        let locals = Locals::new(&program.locals);
        Self {
            program,
            config: VmConfig::default(),
            locals,
            stack: Stack::default(),
            pools: TempPools::new(),
            grid_size: 1,
            segment: SegmentKind::Code,
            pc: 0,
            op: "",
            op_pc: 0,
            mask: BitSet::new_full(1),
            regex_cache: fast_map_new(),
        }
    }

    /// Load program text and create an instance of it.
    pub fn load(text: &str) -> Result<Self, LoadError> {
        let program = slvm_loader::load_program(text)?;
        Ok(Self::new(Arc::new(program)))
    }

    pub fn with_config(mut self, config: VmConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &VmConfig {
        &self.config
    }

    pub fn program(&self) -> &Arc<Program> {
        &self.program
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// Bind to `env`'s grid: size varying locals and reset the running state.
    pub fn initialise(&mut self, env: &mut dyn ShadingEnvironment) {
        let n = env.grid_size();
        self.resize_grid(n);
        env.states_mut().reset(n);
    }

    fn resize_grid(&mut self, n: usize) {
        self.grid_size = n.max(1);
        self.locals.initialise(self.grid_size);
        self.mask.reset(self.grid_size, true);
    }

    /// Run the Code segment over `env`'s grid. A failed run leaves the
    /// running state reset.
    pub fn execute(&mut self, env: &mut dyn ShadingEnvironment) -> Result<(), ExecError> {
        let n = env.grid_size();
        if n != self.grid_size {
            log::warn!(
                "grid size changed from {} to {n} without initialise; resizing",
                self.grid_size
            );
            self.resize_grid(n);
        }
        if env.states().len() != n {
            env.states_mut().reset(n);
        }
        env.invalidate_illuminance_cache();
        let result = self.run(env, SegmentKind::Code);
        if result.is_err() {
            env.states_mut().reset(n);
        }
        result
    }

    /// Run the Init segment once, then broadcast the computed defaults across
    /// every point of varying locals.
    pub fn execute_init(&mut self) -> Result<(), ExecError> {
        let saved = self.grid_size;
        let mut env = GridEnv::new(0, 0);
        self.grid_size = 1;
        self.mask.reset(1, true);
        let result = self.run(&mut env, SegmentKind::Init);
        self.grid_size = saved;
        self.mask.reset(saved, true);
        self.locals.broadcast_first();
        result
    }

    fn run(&mut self, env: &mut dyn ShadingEnvironment, segment: SegmentKind) -> Result<(), ExecError> {
        let entry = self.pools.occupancy();
        log::debug!(
            "executing {} segment over {} points",
            segment.name(),
            self.grid_size
        );
        self.begin(segment);
        let mut result = Ok(());
        loop {
            match self.step(env) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => {
                    result = Err(e);
                    break;
                }
            }
        }
        let result = result.and_then(|()| self.check_balance(segment, &entry));
        if result.is_err() {
            self.clear_stack();
        }
        result
    }

    fn check_balance(&mut self, segment: SegmentKind, entry: &[usize]) -> Result<(), ExecError> {
        if !self.stack.is_empty() {
            let depth = self.stack.len();
            if self.config.strict_stack {
                return Err(ExecError::StackImbalance {
                    segment: segment.name(),
                    depth,
                });
            }
            log::warn!(
                "{depth} entries left on the stack after the {} segment",
                segment.name()
            );
            self.clear_stack();
        }
        let now = self.pools.occupancy();
        for (idx, (&entry, &now)) in entry.iter().zip(now.iter()).enumerate() {
            if entry != now {
                return Err(ExecError::PoolImbalance {
                    ty: TempPools::describe(idx),
                    entry,
                    now,
                });
            }
        }
        Ok(())
    }

    fn clear_stack(&mut self) {
        for id in self.stack.drain() {
            self.pools.release(id);
        }
    }

    /// Position at the start of `segment` for stepping.
    pub fn begin(&mut self, segment: SegmentKind) {
        self.segment = segment;
        self.pc = 0;
    }

    /// Index of the next element to execute in the current segment.
    pub fn pc(&self) -> usize {
        self.pc
    }

    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    /// Execute one instruction. Returns whether any instruction remains.
    pub fn step(&mut self, env: &mut dyn ShadingEnvironment) -> Result<bool, ExecError> {
        let program = Arc::clone(&self.program);
        let segment = program.segment(self.segment);
        let len = segment.len();
        let pc = self.pc;
        let Some(element) = segment.elements.get(pc) else {
            return Ok(false);
        };
        let ProgramElement::Op { name, info } = element else {
            return Err(ExecError::MalformedElement {
                pc,
                expected: "opcode",
                found: element.describe(),
            });
        };
        let end = pc + 1 + info.operands.len();
        let operands = segment
            .elements
            .get(pc + 1..end)
            .ok_or(ExecError::PcOutOfRange {
                segment: self.segment.name(),
                pc: end,
                len,
            })?;
        self.op = *name;
        self.op_pc = pc;
        self.pc = end;
        if self.config.trace {
            log::trace!("{} {pc:>5} {name}", self.segment.name());
        }
        self.mask.copy_from(env.states().running());
        if let Some(target) = self.dispatch(env, info.code, operands)? {
            if target > len {
                return Err(ExecError::PcOutOfRange {
                    segment: self.segment.name(),
                    pc: target,
                    len,
                });
            }
            self.pc = target;
        }
        Ok(self.pc < len)
    }

    /// Set a parameter from raw values, transforming geometric values from
    /// `space` into `"current"` and colors from the named color space.
    pub fn set_argument(
        &mut self,
        name: &str,
        value: &ArgValue,
        space: Option<&str>,
        env: &dyn ShadingEnvironment,
    ) -> Result<(), ExecError> {
        let idx = self
            .program
            .local_index(name)
            .ok_or_else(|| ExecError::UnknownArgument(name.to_string()))?;
        let ty = self.program.locals[idx].ty;
        let bad = |reason: String| ExecError::BadArgument {
            name: name.to_string(),
            reason,
        };
        let values = convert_argument(ty, value, space, env).map_err(bad)?;
        let Some(first) = values.first() else {
            return Err(bad("no values".to_string()));
        };
        let store = |var: &mut ShaderVariable, value: &ShaderVariable| {
            let mask = BitSet::new_full(var.len());
            var.set_value_from(value, &mask).map_err(|e| bad(e.to_string()))
        };
        match self.locals.get_mut(idx) {
            Some(Local::Scalar(var)) => store(var, first),
            Some(Local::Array(arr)) => {
                for (k, element) in arr.elements.iter_mut().enumerate() {
                    let value = if values.len() == 1 { Some(first) } else { values.get(k) };
                    if let Some(value) = value {
                        store(element, value)?;
                    }
                }
                Ok(())
            }
            None => Err(ExecError::UnknownLocal(idx)),
        }
    }

    /// Copy the value of scalar local `name` into `out`.
    pub fn get_value(&self, name: &str, out: &mut ShaderVariable) -> bool {
        match self.local(name) {
            Some(var) => {
                out.clone_from(var);
                true
            }
            None => false,
        }
    }

    /// Scalar local by name.
    pub fn local(&self, name: &str) -> Option<&ShaderVariable> {
        let idx = self.program.local_index(name)?;
        self.locals.scalar(idx).ok()
    }

    /// Element `index` of array local `name`.
    pub fn local_element(&self, name: &str, index: usize) -> Option<&ShaderVariable> {
        let idx = self.program.local_index(name)?;
        self.locals.array(idx).ok()?.get(index)
    }
}

// One uniform variable per element of the argument.
fn convert_argument(
    ty: VarType,
    value: &ArgValue,
    space: Option<&str>,
    env: &dyn ShadingEnvironment,
) -> Result<Vec<ShaderVariable>, String> {
    let floats = match (ty, value) {
        (VarType::String, ArgValue::Strings(strings)) => {
            return Ok(strings
                .iter()
                .map(|s| {
                    let mut var = ShaderVariable::new("", ty, VarClass::Uniform);
                    var.set_string(s.as_str(), 0);
                    var
                })
                .collect());
        }
        (VarType::String, ArgValue::Floats(_)) => return Err("expected string values".to_string()),
        (_, ArgValue::Strings(_)) => return Err(format!("expected {ty} values, got strings")),
        (_, ArgValue::Floats(floats)) => floats,
    };
    let count = ty.float_count();
    if floats.len() < count {
        return Err(format!(
            "{ty} needs {count} values, got {}",
            floats.len()
        ));
    }
    let space = space.filter(|s| !s.is_empty() && *s != "current");
    let matrix = match (ty, space) {
        (VarType::Point | VarType::Vector | VarType::Normal | VarType::Matrix, Some(space)) => Some(
            env.space_matrix(space, "current")
                .ok_or_else(|| format!("unknown coordinate system '{space}'"))?,
        ),
        _ => None,
    };
    floats
        .chunks_exact(count)
        .map(|chunk| {
            let mut var = ShaderVariable::new("", ty, VarClass::Uniform);
            let triple = || Vec3::new(chunk[0], chunk[1], chunk[2]);
            match ty {
                VarType::Float => var.set_float(chunk[0], 0),
                VarType::Point => {
                    let p = triple();
                    var.set_triple(matrix.map_or(p, |m| m.transform_point(p)), 0);
                }
                VarType::Vector => {
                    let v = triple();
                    var.set_triple(matrix.map_or(v, |m| m.transform_vector(v)), 0);
                }
                VarType::Normal => {
                    let n = triple();
                    var.set_triple(matrix.map_or(n, |m| m.transform_normal(n)), 0);
                }
                VarType::Color => {
                    let c = slvm_core::Color::new(chunk[0], chunk[1], chunk[2]);
                    let space = space.unwrap_or("rgb");
                    let rgb = color::to_rgb(space, c)
                        .ok_or_else(|| format!("unknown color space '{space}'"))?;
                    var.set_color(rgb, 0);
                }
                VarType::Matrix => {
                    let m = Matrix4::from_slice(chunk).unwrap_or(Matrix4::IDENTITY);
                    var.set_matrix(matrix.map_or(m, |to_current| m * to_current), 0);
                }
                VarType::String => {}
            }
            Ok(var)
        })
        .collect()
}
