pub mod lexical;
pub mod optional;

mod iterator_type;
mod store;

pub use iterator_type::{IteratorType, ValueNotInEnumeration};
pub use store::ChoiceItemStore;

/// Shape tag attached to a generated type when its member set matches one of
/// the pagination-iteration protocol shapes. Generic client logic pattern
/// matches on this to drive the iteration cursor across otherwise-unrelated
/// request and response types.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Capability {
    #[default]
    None,
    IterationRequest,
    IterationResponse,
}
