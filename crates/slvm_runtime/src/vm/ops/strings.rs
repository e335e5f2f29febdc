//! String opcodes: `concat`, `format`, `printf` and `match`.
//!
//! Variable-count forms take their operand count on top of the stack, pushed
//! after the operands themselves. For `format` and `printf` the count covers
//! the arguments following the format string.

use super::promote::{output, write_points};
use crate::env::ShadingEnvironment;
use crate::errors::ExecError;
use crate::vm::ShaderVm;
use regex::Regex;
use slvm_core::{FastHashMap, ShaderData, ShaderVariable, VarType};
use slvm_ir::StrFn;
use smallvec::SmallVec;

/// Expand `fmt` with the values of `args` at point `i`.
///
/// `%f` formats a float, `%d` its truncated integer value, and `%s %p %c %m`
/// render the argument as text. `%%` is a literal percent sign. Conversions
/// without a matching argument are copied unchanged.
fn format_point(fmt: &str, args: &[&ShaderVariable], i: usize) -> String {
    let mut out = String::with_capacity(fmt.len() + 16 * args.len());
    let mut floats = ryu::Buffer::new();
    let mut ints = itoa::Buffer::new();
    let mut next = args.iter();
    let mut chars = fmt.chars();
    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        let Some(conv) = chars.next() else {
            out.push('%');
            break;
        };
        if conv == '%' {
            out.push('%');
            continue;
        }
        if !matches!(conv, 'f' | 'd' | 's' | 'p' | 'c' | 'm') {
            out.push('%');
            out.push(conv);
            continue;
        }
        let Some(arg) = next.next() else {
            out.push('%');
            out.push(conv);
            continue;
        };
        match (conv, &arg.data) {
            ('f', ShaderData::Float(_)) => {
                let v = arg.get_float(i);
                if v.is_finite() {
                    out.push_str(floats.format_finite(v));
                } else {
                    out.push_str(&v.to_string());
                }
            }
            ('d', ShaderData::Float(_)) => {
                let v = arg.get_float(i);
                out.push_str(ints.format(v as i64));
            }
            _ => out.push_str(&arg.element_to_string(i)),
        }
    }
    out
}

fn compiled<'c>(cache: &'c mut FastHashMap<String, Regex>, pattern: &str) -> Result<Option<&'c Regex>, regex::Error> {
    if !cache.contains_key(pattern) {
        let re = Regex::new(pattern)?;
        cache.insert(pattern.to_owned(), re);
    }
    Ok(cache.get(pattern))
}

impl ShaderVm {
    pub(crate) fn op_string(&mut self, env: &mut dyn ShadingEnvironment, f: StrFn) -> Result<(), ExecError> {
        match f {
            StrFn::Concat => self.op_concat(),
            StrFn::Format => self.op_format(),
            StrFn::Printf => self.op_printf(env),
            StrFn::Match => self.op_match(env),
        }
    }

    /// Stack: `s0 .. sN-1`, then `N`.
    fn op_concat(&mut self) -> Result<(), ExecError> {
        let n = self.pop_count()?;
        let ids = self.pop_many(n)?;
        let name = self.op;
        self.produce(VarType::String, &ids, |p, out, mask| {
            let parts: SmallVec<[&ShaderVariable; 8]> = ids.iter().map(|&id| p.get(id)).collect();
            let varying = out.is_varying();
            write_points(output::<String>(out, name)?, varying, mask, |i| {
                parts.iter().map(|s| s.get_string(i)).collect::<String>()
            });
            Ok(())
        })
    }

    /// Stack: format string, arguments, then the argument count.
    fn op_format(&mut self) -> Result<(), ExecError> {
        let n = self.pop_count()?;
        let ids = self.pop_many(n + 1)?;
        let name = self.op;
        self.produce(VarType::String, &ids, |p, out, mask| {
            let fmt = p.get(ids[0]);
            let args: SmallVec<[&ShaderVariable; 8]> = ids[1..].iter().map(|&id| p.get(id)).collect();
            let varying = out.is_varying();
            write_points(output::<String>(out, name)?, varying, mask, |i| {
                format_point(fmt.get_string(i), &args, i)
            });
            Ok(())
        })
    }

    /// Prints once when every operand is uniform, otherwise once per active
    /// point.
    fn op_printf(&mut self, env: &mut dyn ShadingEnvironment) -> Result<(), ExecError> {
        let n = self.pop_count()?;
        let ids = self.pop_many(n + 1)?;
        {
            let fmt = self.pools.get(ids[0]);
            let args: SmallVec<[&ShaderVariable; 8]> = ids[1..].iter().map(|&id| self.pools.get(id)).collect();
            if ids.iter().any(|id| id.class().is_varying()) {
                for i in self.mask.iter_ones() {
                    env.print(&format_point(fmt.get_string(i), &args, i));
                }
            } else {
                env.print(&format_point(fmt.get_string(0), &args, 0));
            }
        }
        self.release_all(&ids);
        Ok(())
    }

    /// `match(pattern, subject)`: 1 where the regular expression matches.
    fn op_match(&mut self, env: &mut dyn ShadingEnvironment) -> Result<(), ExecError> {
        let ids @ [pattern, subject] = self.pop_args::<2>()?;
        let name = self.op;
        let mut cache = std::mem::take(&mut self.regex_cache);
        let result = self.produce(VarType::Float, &ids, |p, out, mask| {
            let (pattern, subject) = (p.get(pattern), p.get(subject));
            let varying = out.is_varying();
            let mut failed: Option<String> = None;
            write_points(output::<f32>(out, name)?, varying, mask, |i| {
                let text = pattern.get_string(i);
                match compiled(&mut cache, text) {
                    Ok(Some(re)) if re.is_match(subject.get_string(i)) => 1.0,
                    Ok(_) => 0.0,
                    Err(e) => {
                        failed.get_or_insert_with(|| format!("match: bad pattern '{text}': {e}"));
                        0.0
                    }
                }
            });
            if let Some(message) = failed {
                env.report_error(&message);
            }
            Ok(())
        });
        self.regex_cache = cache;
        result
    }
}
