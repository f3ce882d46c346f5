/// A named intent sent to a state module (action abstraction).
///
/// Actions are **requests**: the module decides which mutations, if any, they
/// turn into. They are transient and never stored; the mutations they commit
/// are what the history records.
///
/// ## Action vs Mutation
///
/// - **Action**: intent (e.g. "initialise the stock list")
/// - **Mutation**: the committed transition (e.g. `SET_STOCKS` with a list)
///
/// `action_type()` is the stable protocol key callers use when they address
/// actions by name.
pub trait Action: Clone + core::fmt::Debug + Send + Sync + 'static {
    fn action_type(&self) -> &'static str;
}
