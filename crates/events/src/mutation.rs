/// A committed state transition.
///
/// Mutations are:
/// - **synchronous** (applied in full before the next one starts)
/// - **named** (stable protocol key for history and subscribers)
/// - the **only** write path into a state container
pub trait Mutation: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable mutation name (e.g. "SET_STOCKS").
    fn mutation_type(&self) -> &'static str;

    /// Whether this mutation is a declared stub that leaves state untouched.
    fn is_noop(&self) -> bool {
        false
    }
}
