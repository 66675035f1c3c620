mod delete_user;
mod get_user;
mod get_users;
mod register_user;
mod update_user;
mod user_image_upload;
mod util;
mod watchlist;

use delete_user::*;
use get_user::*;
use get_users::*;
use register_user::*;
use update_user::*;
use user_image_upload::*;
pub use util::*;
use watchlist::*;
