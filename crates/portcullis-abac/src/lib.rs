//! # portcullis-abac: Attribute-Based Access Control
//!
//! Decides access from a principal's attributes (role, department,
//! clearance, seniority) rather than from role membership alone.
//!
//! Predicates come in two forms:
//! - [`Condition`], a serializable condition language with `And`/`Or`/`Not`
//! - any `Fn(&Principal) -> bool` closure
//!
//! Both implement [`AttributePredicate`] and are decided by
//! [`authorize_attributes`].
//!
//! ## Examples
//!
//! ```
//! use portcullis_abac::{Condition, authorize_attributes};
//! use portcullis_types::{Effect, Principal, Role};
//!
//! let finance_manager = Condition::And(vec![
//!     Condition::RoleEquals(Role::Manager),
//!     Condition::DepartmentEquals("finance".into()),
//!     Condition::SeniorityAtLeast(5),
//! ]);
//!
//! let user3 = Principal::new("user3", Role::Manager, "finance", 2, 7);
//! assert_eq!(authorize_attributes(&user3, &finance_manager), Effect::Allow);
//!
//! // Closures work too.
//! let senior = |p: &Principal| p.seniority.years() >= 10;
//! assert_eq!(authorize_attributes(&user3, &senior), Effect::Deny);
//! ```

pub mod evaluator;
pub mod policy;

pub use evaluator::{AttributePredicate, authorize_attributes, evaluate_condition};
pub use policy::Condition;
