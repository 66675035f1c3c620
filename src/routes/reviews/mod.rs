mod delete_review;
mod get_reviews;
mod post_review;
mod update_review;
mod util;

use delete_review::*;
use get_reviews::*;
use post_review::*;
use update_review::*;
pub use util::*;
