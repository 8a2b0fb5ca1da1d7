mod group;
pub use group::Group;

mod user;
pub use user::User;
