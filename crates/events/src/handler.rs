/// Execute an aggregate command deterministically (no IO, no async).
///
/// 1. **Decide**: calls `aggregate.handle(command)` to get events (no mutation)
/// 2. **Evolve**: applies each event via `aggregate.apply(event)`
///
/// The aggregate is mutated in place and the applied events are returned. An
/// empty vec means the command was a no-op and the version did not move.
pub fn execute<A>(aggregate: &mut A, command: &A::Command) -> Result<Vec<A::Event>, A::Error>
where
    A: greennest_core::Aggregate,
{
    let events = A::handle(aggregate, command)?;
    for ev in &events {
        A::apply(aggregate, ev);
    }
    Ok(events)
}
