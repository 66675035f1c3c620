mod catalogue_pdf;
mod create_media;
mod delete_media;
mod get_media_info;
mod get_media_list;
mod send_catalogue_email;
mod update_media;
mod upload_media_poster;
mod util;

use catalogue_pdf::*;
use create_media::*;
use delete_media::*;
use get_media_info::*;
use get_media_list::*;
use send_catalogue_email::*;
use update_media::*;
use upload_media_poster::*;
pub use util::*;
