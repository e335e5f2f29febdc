use crate::math::{Color, Matrix4, Vec3};
use crate::types::Storage;
use crate::variable::{ShaderData, ShaderVariable};

/// A value type that can live in `ShaderData`.
pub trait Element: Clone + Default + 'static {
    const STORAGE: Storage;

    fn slice(data: &ShaderData) -> Option<&[Self]>;
    fn vec_mut(data: &mut ShaderData) -> Option<&mut Vec<Self>>;
}

macro_rules! impl_element {
    ($ty:ty, $storage:ident) => {
        impl Element for $ty {
            const STORAGE: Storage = Storage::$storage;

            fn slice(data: &ShaderData) -> Option<&[Self]> {
                match data {
                    ShaderData::$storage(v) => Some(v),
                    _ => None,
                }
            }

            fn vec_mut(data: &mut ShaderData) -> Option<&mut Vec<Self>> {
                match data {
                    ShaderData::$storage(v) => Some(v),
                    _ => None,
                }
            }
        }
    };
}

impl_element!(f32, Float);
impl_element!(String, String);
impl_element!(Vec3, Triple);
impl_element!(Color, Color);
impl_element!(Matrix4, Matrix);

/// Borrowed operand of the promotion engine.
#[derive(Clone, Copy, Debug)]
pub enum Operand<'a, T> {
    Uniform(&'a T),
    Varying(&'a [T]),
}

impl<'a, T: Element> Operand<'a, T> {
    /// View a variable as an operand of element type `T`. `None` when the
    /// variable's storage does not hold `T`.
    pub fn of(var: &'a ShaderVariable) -> Option<Self> {
        let values = T::slice(&var.data)?;
        if var.class.is_varying() {
            Some(Operand::Varying(values))
        } else {
            values.first().map(Operand::Uniform)
        }
    }

    pub fn is_varying(&self) -> bool {
        matches!(self, Operand::Varying(_))
    }

    /// Value at grid point `i`; uniform operands ignore the index.
    #[inline]
    pub fn at(&self, i: usize) -> &'a T {
        match *self {
            Operand::Uniform(v) => v,
            Operand::Varying(s) => &s[i],
        }
    }
}
