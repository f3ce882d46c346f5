use stocktrader_core::Module;

/// Run an action against a state deterministically (no locking, no history).
///
/// This is the canonical lifecycle without any store around it:
///
/// 1. **Dispatch**: `module.dispatch(state, action)` decides the mutations
/// 2. **Commit**: each mutation is committed in order via `M::commit`
///
/// Returns the committed mutations. If dispatch fails nothing is committed.
/// For history, subscribers and serialized access use `Store::dispatch()`.
pub fn execute<M>(
    module: &M,
    state: &mut M::State,
    action: &M::Action,
) -> Result<Vec<M::Mutation>, M::Error>
where
    M: Module,
{
    let mutations = module.dispatch(state, action)?;
    for mutation in &mutations {
        M::commit(state, mutation.clone());
    }
    Ok(mutations)
}
