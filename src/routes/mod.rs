pub mod hello_world;
pub mod media;
pub mod reviews;
pub mod user;
mod util;

pub use hello_world::*;
pub use media::*;
pub use reviews::*;
pub use user::*;
pub use util::*;
