//! The services that apply the business rules before handing work to the stores.

mod entry;
mod user;

pub use entry::EntryService;
pub use user::UserService;
