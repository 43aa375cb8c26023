//! Marshal/unmarshal flag propagation
//!
//! Only models that travel as RPC payloads, directly or through message-typed
//! fields, get converter functions. Method inputs seed `can_marshal`, method
//! outputs seed `can_unmarshal`, and each flag is then closed over the
//! "is a message-typed field of" relation.

use crate::model::{ApiContext, Model};
use crate::{CompileError, CompileResult};
use std::collections::{HashSet, VecDeque};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Marshal,
    Unmarshal,
}

impl Direction {
    fn is_set(self, model: &Model) -> bool {
        match self {
            Direction::Marshal => model.can_marshal,
            Direction::Unmarshal => model.can_unmarshal,
        }
    }

    fn set(self, model: &mut Model) {
        match self {
            Direction::Marshal => model.can_marshal = true,
            Direction::Unmarshal => model.can_unmarshal = true,
        }
    }
}

/// Seed flags from the services and close them over message-typed fields.
///
/// Flags only ever go from `false` to `true`, so running this again on an
/// already-flagged context changes nothing. Cyclic message graphs terminate.
///
/// # Errors
///
/// [`CompileError::MalformedSchema`] when a method's input/output type or a
/// message field's type has no entry in the lookup table.
pub fn apply_flags(ctx: &mut ApiContext) -> CompileResult<()> {
    seed_from_services(ctx)?;
    close_over_fields(ctx, Direction::Marshal)?;
    close_over_fields(ctx, Direction::Unmarshal)?;

    let (marshal, unmarshal) = ctx.flagged_models();
    tracing::debug!(
        package = %ctx.package,
        marshal = marshal.len(),
        unmarshal = unmarshal.len(),
        "applied marshal flags"
    );
    Ok(())
}

fn seed_from_services(ctx: &mut ApiContext) -> CompileResult<()> {
    let mut seeds = Vec::new();

    for service in &ctx.services {
        for method in &service.methods {
            let input = ctx.model_index(&method.input_type).ok_or_else(|| {
                CompileError::missing_model(
                    &method.input_type,
                    format!("input of method {}.{}", service.name, method.path),
                )
            })?;
            let output = ctx.model_index(&method.output_type).ok_or_else(|| {
                CompileError::missing_model(
                    &method.output_type,
                    format!("output of method {}.{}", service.name, method.path),
                )
            })?;
            seeds.push((input, Direction::Marshal));
            seeds.push((output, Direction::Unmarshal));
        }
    }

    for (index, direction) in seeds {
        direction.set(&mut ctx.models[index]);
    }
    Ok(())
}

fn close_over_fields(ctx: &mut ApiContext, direction: Direction) -> CompileResult<()> {
    let mut queue: VecDeque<usize> = ctx
        .models
        .iter()
        .enumerate()
        .filter(|(_, m)| direction.is_set(m))
        .map(|(i, _)| i)
        .collect();
    let mut visited: HashSet<String> = queue
        .iter()
        .map(|&i| ctx.models[i].name.clone())
        .collect();

    while let Some(index) = queue.pop_front() {
        let model = &ctx.models[index];
        if model.primitive {
            continue;
        }

        let mut referenced = Vec::new();
        for field in model.fields.iter().filter(|f| f.is_message) {
            let base = field.base_type();
            let target = ctx.model_index(base).ok_or_else(|| {
                CompileError::missing_model(
                    base,
                    format!("field {} of {}", field.wire_name, model.name),
                )
            })?;
            referenced.push(target);
        }

        for target in referenced {
            let model = &mut ctx.models[target];
            if model.primitive || !visited.insert(model.name.clone()) {
                continue;
            }
            direction.set(model);
            queue.push_back(target);
        }
    }

    Ok(())
}
