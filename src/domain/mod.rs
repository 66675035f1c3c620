mod movie;
mod review;
mod user;

pub use movie::*;
pub use review::*;
pub use user::*;

use uuid::Uuid;

/// Generates an id that `taken` does not already know about.
pub fn generate_unique_id(taken: impl Fn(&str) -> bool) -> String {
    loop {
        let id = Uuid::new_v4().simple().to_string();
        if !taken(&id) {
            return id;
        }
    }
}
