//! A variable is a view onto a domain. It may forward domain information unaltered, or shift it by
//! a constant.

mod domain_id;
mod integer_variable;
mod offset_view;

pub use domain_id::DomainId;
pub use integer_variable::IntegerVariable;
pub use offset_view::OffsetView;
