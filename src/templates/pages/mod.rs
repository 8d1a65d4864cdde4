pub mod login;
pub mod quicklist;

pub use login::login_page;
pub use quicklist::{quicklist_page, QuickListVm};
