use crate::errors::ExecError;
use slvm_core::{ShaderVariable, VariableArray};
use slvm_ir::LocalDecl;

pub(crate) enum Local {
    Scalar(ShaderVariable),
    Array(VariableArray),
}

impl Local {
    fn from_decl(decl: &LocalDecl) -> Self {
        match decl.array_len {
            Some(len) => {
                let mut arr = VariableArray::new(decl.name.clone(), decl.ty, decl.class, len);
                arr.param = decl.param;
                arr.output = decl.output;
                Local::Array(arr)
            }
            None => Local::Scalar(
                ShaderVariable::new(decl.name.clone(), decl.ty, decl.class)
                    .with_param(decl.param)
                    .with_output(decl.output),
            ),
        }
    }

    fn each_mut(&mut self, mut f: impl FnMut(&mut ShaderVariable)) {
        match self {
            Local::Scalar(var) => f(var),
            Local::Array(arr) => arr.elements.iter_mut().for_each(f),
        }
    }
}

/// Storage for a program's declared locals, indexed like `Program::locals`.
pub(crate) struct Locals {
    vars: Vec<Local>,
}

impl Locals {
    pub(crate) fn new(decls: &[LocalDecl]) -> Self {
        Self {
            vars: decls.iter().map(Local::from_decl).collect(),
        }
    }

    pub(crate) fn get(&self, idx: usize) -> Option<&Local> {
        self.vars.get(idx)
    }

    pub(crate) fn get_mut(&mut self, idx: usize) -> Option<&mut Local> {
        self.vars.get_mut(idx)
    }

    pub(crate) fn scalar(&self, idx: usize) -> Result<&ShaderVariable, ExecError> {
        match self.vars.get(idx) {
            Some(Local::Scalar(var)) => Ok(var),
            Some(Local::Array(arr)) => Err(ExecError::ArrayNeedsIndex(arr.name.clone())),
            None => Err(ExecError::UnknownLocal(idx)),
        }
    }

    pub(crate) fn scalar_mut(&mut self, idx: usize) -> Result<&mut ShaderVariable, ExecError> {
        match self.vars.get_mut(idx) {
            Some(Local::Scalar(var)) => Ok(var),
            Some(Local::Array(arr)) => Err(ExecError::ArrayNeedsIndex(arr.name.clone())),
            None => Err(ExecError::UnknownLocal(idx)),
        }
    }

    pub(crate) fn array(&self, idx: usize) -> Result<&VariableArray, ExecError> {
        match self.vars.get(idx) {
            Some(Local::Array(arr)) => Ok(arr),
            Some(Local::Scalar(var)) => Err(ExecError::NotAnArray(var.name.clone())),
            None => Err(ExecError::UnknownLocal(idx)),
        }
    }

    pub(crate) fn array_mut(&mut self, idx: usize) -> Result<&mut VariableArray, ExecError> {
        match self.vars.get_mut(idx) {
            Some(Local::Array(arr)) => Ok(arr),
            Some(Local::Scalar(var)) => Err(ExecError::NotAnArray(var.name.clone())),
            None => Err(ExecError::UnknownLocal(idx)),
        }
    }

    /// Size varying storage for `size` points; new points copy the first value.
    pub(crate) fn initialise(&mut self, size: usize) {
        for local in &mut self.vars {
            local.each_mut(|var| var.initialise(size));
        }
    }

    /// Copy point 0 of every varying local to all of its points.
    pub(crate) fn broadcast_first(&mut self) {
        for local in &mut self.vars {
            local.each_mut(|var| {
                if var.is_varying() {
                    let len = var.len();
                    var.data.resize(1);
                    var.data.resize(len);
                }
            });
        }
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Local> {
        self.vars.iter()
    }
}
