use std::collections::BTreeMap;

/// A resource that advertises its available CLI actions.
///
/// CLI equivalent of REST HATEOAS: conforming types embed ready-to-run
/// commands in JSON responses so agents can navigate without memorising the
/// command tree.
pub trait Affordances {
    /// Map of action name to a runnable `ascent` command line.
    fn affordances(&self) -> BTreeMap<String, String>;
}
