mod connection;
mod schema;
mod users;

pub use connection::Database;
pub use users::UserRepository;
