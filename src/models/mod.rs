pub mod collection;
pub mod role;

pub use collection::{Collection, NewCollection};
pub use role::{Role, RoleAssignment};
