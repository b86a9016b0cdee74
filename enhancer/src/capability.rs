//! Capability tagging: structural markers for the pagination-iteration
//! protocol shapes. The tag is an enum on the type descriptor, not a marker
//! trait; downstream generic logic pattern matches on it.

use qbx_model::TypeDecl;
use qbx_runtime::Capability;

use crate::diagnostics::Warning;

const ITERATOR_ID: &str = "iteratorID";
const MAX_RETURNED: &str = "MaxReturned";
const REMAINING_COUNT: &str = "iteratorRemainingCount";

pub(crate) fn tag(naive: &TypeDecl, warnings: &mut Vec<Warning>) -> Capability {
    let has = |name: &str| naive.member(name).is_some();

    let request = has(ITERATOR_ID) && has(MAX_RETURNED);
    let response = has(ITERATOR_ID) && has(REMAINING_COUNT);

    match (request, response) {
        // The protocol never produces both shapes on one type; warn instead
        // of picking one.
        (true, true) => {
            warnings.push(Warning::AmbiguousCapability {
                type_name: naive.name.clone(),
            });
            Capability::None
        }
        (true, false) => Capability::IterationRequest,
        (false, true) => Capability::IterationResponse,
        (false, false) => Capability::None,
    }
}
